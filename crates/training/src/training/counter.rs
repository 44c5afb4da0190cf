//! Word counting for BPE training.
//!
//! This module accumulates word frequencies from raw text lines or from
//! pre-counted `word count` dictionary lines, remembering the order in which
//! words were first seen.

use ahash::AHashMap;
use bpelearn_core::{BpeError, Result, WordVocabulary};
use compact_str::CompactString;

/// Characters stripped from both ends of every input line.
const LINE_TRIM: &[char] = &['\r', '\n', ' '];

/// Counter for word frequencies.
#[derive(Debug, Clone, Default)]
pub struct WordCounter {
    /// Word -> position in `words`
    index: AHashMap<CompactString, usize>,
    /// Words in first-seen order
    words: Vec<CompactString>,
    /// Word -> frequency count, parallel to `words`
    word_counts: Vec<i64>,
}

impl WordCounter {
    /// Create a new word counter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `count` occurrences of a word.
    ///
    /// Totals saturate at the `i64` bounds.
    pub fn add_word(&mut self, word: &str, count: i64) {
        if let Some(&pos) = self.index.get(word) {
            self.word_counts[pos] = self.word_counts[pos].saturating_add(count);
        } else {
            let word = CompactString::new(word);
            self.index.insert(word.clone(), self.words.len());
            self.words.push(word);
            self.word_counts.push(count);
        }
    }

    /// Count every word of a raw text line.
    ///
    /// Words are separated by single spaces; empty tokens are ignored.
    pub fn add_text_line(&mut self, line: &str) {
        for word in line.trim_matches(LINE_TRIM).split(' ') {
            if !word.is_empty() {
                self.add_word(word, 1);
            }
        }
    }

    /// Add a `word count` dictionary line.
    ///
    /// `source_name` and the 1-based `line_num` only feed the error message.
    pub fn add_dict_line(&mut self, source_name: &str, line_num: usize, line: &str) -> Result<()> {
        let malformed = || BpeError::MalformedDictLine {
            source_name: source_name.to_string(),
            line: line_num,
            content: line.to_string(),
        };

        let mut parts = line.trim_matches(LINE_TRIM).split(' ');
        let (word, count) = match (parts.next(), parts.next(), parts.next()) {
            (Some(word), Some(count), None) => (word, count),
            _ => return Err(malformed()),
        };
        let count: i64 = count.parse().map_err(|_| malformed())?;
        if let Some(total) = self.get(word) {
            total.checked_add(count).ok_or_else(malformed)?;
        }

        self.add_word(word, count);
        Ok(())
    }

    /// Get the number of unique words.
    pub fn word_count(&self) -> usize {
        self.words.len()
    }

    /// Get the total count of all word occurrences.
    pub fn total_word_occurrences(&self) -> i64 {
        self.word_counts
            .iter()
            .fold(0i64, |total, &count| total.saturating_add(count))
    }

    /// Get the count of a single word.
    pub fn get(&self, word: &str) -> Option<i64> {
        self.index.get(word).map(|&pos| self.word_counts[pos])
    }

    /// Iterate over `(word, count)` in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, i64)> {
        self.words
            .iter()
            .map(|w| w.as_str())
            .zip(self.word_counts.iter().copied())
    }

    /// `(word, count)` sorted by descending count, ties in first-seen order.
    pub fn sorted_by_frequency(&self) -> Vec<(&str, i64)> {
        let mut sorted: Vec<(&str, i64)> = self.iter().collect();
        sorted.sort_by(|a, b| b.1.cmp(&a.1));
        sorted
    }

    /// Build the word vocabulary the merges are learned from.
    pub fn to_vocabulary(&self) -> WordVocabulary {
        WordVocabulary::from_counts(self.iter())
    }
}
