//! Reading word counts from corpus files.

use crate::training::WordCounter;
use bpelearn_core::{BpeError, Result};
use log::info;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Path that stands for standard input.
pub const STDIN_PATH: &str = "-";

/// Characters other than `\n` that also end a line.
const LINE_BREAKS: [char; 9] = [
    '\r', '\x0b', '\x0c', '\x1c', '\x1d', '\x1e', '\u{85}', '\u{2028}', '\u{2029}',
];

/// How input lines are turned into word counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputMode {
    /// Raw text: every space-separated token counts once
    #[default]
    Text,
    /// Pre-counted `word count` lines
    Dictionary,
}

/// Count the words of every line of `reader`.
///
/// `source_name` is used in error messages.
pub fn read_lines_into<R: BufRead>(
    counter: &mut WordCounter,
    reader: R,
    source_name: &str,
    mode: InputMode,
) -> Result<()> {
    let mut line_num = 0;
    for line in reader.lines() {
        let line = line.map_err(|e| BpeError::io(source_name, e))?;
        for segment in split_line_breaks(&line) {
            line_num += 1;
            match mode {
                InputMode::Text => counter.add_text_line(segment),
                InputMode::Dictionary => counter.add_dict_line(source_name, line_num, segment)?,
            }
        }
    }
    Ok(())
}

/// Split a `\n`-delimited line at the remaining line-break characters.
///
/// A break at the very end does not open another line; an empty line stays
/// one empty line.
fn split_line_breaks(line: &str) -> Vec<&str> {
    if line.is_empty() {
        return vec![line];
    }
    line.split_terminator(LINE_BREAKS).collect()
}

/// Count the words of a corpus file, or of stdin when `path` is `-`.
pub fn read_corpus(counter: &mut WordCounter, path: &Path, mode: InputMode) -> Result<()> {
    let source_name = path.display().to_string();
    info!("Collecting vocab from {}", source_name);

    if path.as_os_str() == STDIN_PATH {
        let stdin = std::io::stdin();
        return read_lines_into(counter, stdin.lock(), &source_name, mode);
    }

    let file = File::open(path).map_err(|e| BpeError::io(path, e))?;
    read_lines_into(counter, BufReader::new(file), &source_name, mode)
}
