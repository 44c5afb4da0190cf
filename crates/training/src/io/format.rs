//! Format definitions for merge-rule files.

use std::fmt;

/// Prefix of the header line of a merge-rule file.
pub const VERSION_PREFIX: &str = "#version:";

/// Version written by this crate.
pub const MERGES_VERSION: MergesVersion = MergesVersion { major: 0, minor: 2 };

/// Version of a merge-rule file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct MergesVersion {
    pub major: u32,
    pub minor: u32,
}

impl MergesVersion {
    /// Parse a `#version: X.Y` header line.
    ///
    /// Returns `None` if the line is not a header or the version is malformed.
    pub fn parse_header(line: &str) -> Option<Self> {
        let version = line.strip_prefix(VERSION_PREFIX)?.trim();
        let (major, minor) = version.split_once('.')?;
        Some(Self {
            major: major.parse().ok()?,
            minor: minor.parse().ok()?,
        })
    }

    /// The header line for this version, without a line terminator.
    pub fn header(&self) -> String {
        format!("{} {}", VERSION_PREFIX, self)
    }
}

impl fmt::Display for MergesVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}
