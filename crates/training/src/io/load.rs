//! Load functionality for merge-rule files.

use super::format::{MergesVersion, VERSION_PREFIX};
use bpelearn_core::{BpeError, MergeRules, Pair, Result};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Merges loader - reads merge rules back in learned order.
pub struct MergesLoader;

impl MergesLoader {
    /// Load merge rules from a file.
    pub fn load(path: &Path) -> Result<MergeRules> {
        let file = File::open(path).map_err(|e| {
            BpeError::Load(format!("Failed to open file {}: {}", path.display(), e))
        })?;
        Self::from_reader(BufReader::new(file))
    }

    /// Read merge rules from any buffered reader.
    ///
    /// A `#version:` header on the first line is optional. Every other line
    /// must hold exactly two space-separated symbols.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<MergeRules> {
        let mut pairs: Vec<Pair> = Vec::new();

        for (line_num, line) in reader.lines().enumerate() {
            let line = line
                .map_err(|e| BpeError::Load(format!("Failed to read merges: {}", e)))?;

            if line_num == 0 && line.starts_with(VERSION_PREFIX) {
                if MergesVersion::parse_header(&line).is_none() {
                    return Err(BpeError::Load(format!("Invalid version header: '{}'", line)));
                }
                continue;
            }

            let parts: Vec<&str> = line.trim_matches(&['\r', '\n', ' '][..]).split(' ').collect();
            if parts.len() != 2 || parts.iter().any(|p| p.is_empty()) {
                return Err(BpeError::Load(format!(
                    "Invalid merge format at line {}: '{}'",
                    line_num + 1,
                    line
                )));
            }

            pairs.push((parts[0].into(), parts[1].into()));
        }

        Ok(MergeRules::from_pairs(pairs))
    }
}
