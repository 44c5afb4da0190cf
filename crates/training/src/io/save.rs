//! Save functionality for learned merges and word counts.

use super::format::{MergesVersion, MERGES_VERSION};
use crate::training::WordCounter;
use bpelearn_core::{BpeError, MergeRules, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Merges saver - writes merge rules in learned order.
pub struct MergesSaver<'a> {
    /// Merge rules reference
    merges: &'a MergeRules,
    /// Version written in the header
    version: MergesVersion,
}

impl<'a> MergesSaver<'a> {
    /// Create a new merges saver.
    pub fn new(merges: &'a MergeRules) -> Self {
        Self {
            merges,
            version: MERGES_VERSION,
        }
    }

    /// Write the header and one `first second` line per merge.
    pub fn write_to<W: Write>(&self, mut writer: W) -> Result<()> {
        let write_err = |e: std::io::Error| BpeError::Save(format!("Failed to write merges: {}", e));

        writeln!(writer, "{}", self.version.header()).map_err(write_err)?;
        for (first, second) in self.merges.iter() {
            writeln!(writer, "{} {}", first, second).map_err(write_err)?;
        }
        writer.flush().map_err(write_err)
    }

    /// Save the merges to a file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let file = create_file(path)?;
        self.write_to(BufWriter::new(file))
    }
}

/// Word count saver - writes `word count` lines, most frequent first.
///
/// The output can be fed back with dictionary input mode.
pub struct WordCountSaver<'a> {
    /// Word counter reference
    counter: &'a WordCounter,
}

impl<'a> WordCountSaver<'a> {
    /// Create a new word count saver.
    pub fn new(counter: &'a WordCounter) -> Self {
        Self { counter }
    }

    /// Write one `word count` line per word.
    pub fn write_to<W: Write>(&self, mut writer: W) -> Result<()> {
        let write_err =
            |e: std::io::Error| BpeError::Save(format!("Failed to write word counts: {}", e));

        for (word, count) in self.counter.sorted_by_frequency() {
            writeln!(writer, "{} {}", word, count).map_err(write_err)?;
        }
        writer.flush().map_err(write_err)
    }

    /// Save the word counts to a file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let file = create_file(path)?;
        self.write_to(BufWriter::new(file))
    }
}

fn create_file(path: &Path) -> Result<File> {
    File::create(path).map_err(|e| {
        BpeError::Save(format!("Failed to create file {}: {}", path.display(), e))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_merges() {
        let merges = MergeRules::from_pairs(vec![
            ("s".into(), "t</w>".into()),
            ("e".into(), "st</w>".into()),
        ]);

        let mut out = Vec::new();
        MergesSaver::new(&merges).write_to(&mut out).unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "#version: 0.2\ns t</w>\ne st</w>\n"
        );
    }

    #[test]
    fn test_write_empty_merges() {
        let merges = MergeRules::new();
        let mut out = Vec::new();
        MergesSaver::new(&merges).write_to(&mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "#version: 0.2\n");
    }

    #[test]
    fn test_write_word_counts() {
        let mut counter = WordCounter::new();
        counter.add_text_line("b a a c a c");

        let mut out = Vec::new();
        WordCountSaver::new(&counter).write_to(&mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "a 3\nc 2\nb 1\n");
    }

    #[test]
    fn test_save_to_missing_directory_fails() {
        let merges = MergeRules::new();
        let path = std::env::temp_dir()
            .join("bpelearn_test_no_such_dir")
            .join("codes.txt");
        let err = MergesSaver::new(&merges).save(&path).unwrap_err();
        assert!(matches!(err, BpeError::Save(_)));
    }
}
