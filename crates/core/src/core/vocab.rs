//! Word vocabulary storage.
//!
//! Every distinct corpus word is stored once, as a sequence of symbols plus the
//! number of times the word occurred. Entries live in a `Vec` and their
//! position never changes, so positions can be used as stable keys by the
//! pair index during training.

use crate::core::merges::Symbol;
use ahash::AHashSet;
use compact_str::CompactString;
use serde::{Deserialize, Serialize};

/// Marker appended to the last character of every word.
///
/// It keeps word-final symbols distinct from word-internal ones, so no merge
/// can ever reach across a word boundary.
pub const END_OF_WORD: &str = "</w>";

/// A single word of the vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordEntry {
    /// Current symbol sequence
    pub symbols: Vec<Symbol>,
    /// Number of occurrences in the corpus
    pub freq: i64,
}

impl WordEntry {
    /// Create an entry from a symbol sequence and frequency.
    pub fn new(symbols: Vec<Symbol>, freq: i64) -> Self {
        Self { symbols, freq }
    }
}

/// Number of distinct base symbols in a vocabulary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlphabetSize {
    /// Distinct symbols seen before the last position of a word
    pub internal: usize,
    /// Distinct word-final symbols (carrying the end-of-word marker)
    pub word_final: usize,
}

impl AlphabetSize {
    /// Total number of base symbols.
    pub fn total(&self) -> usize {
        self.internal + self.word_final
    }
}

/// Ordered collection of word entries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordVocabulary {
    entries: Vec<WordEntry>,
}

impl WordVocabulary {
    /// Create a new empty vocabulary.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a vocabulary from `(word, count)` pairs.
    ///
    /// Words are split into characters with the end-of-word marker attached to
    /// the last one. Entries end up sorted by descending frequency; words with
    /// equal frequency keep the order in which they were given. Empty words
    /// are skipped.
    pub fn from_counts<I, S>(counts: I) -> Self
    where
        I: IntoIterator<Item = (S, i64)>,
        S: AsRef<str>,
    {
        let mut vocab = Self::new();
        for (word, freq) in counts {
            if let Some(symbols) = Self::split_word(word.as_ref()) {
                vocab.entries.push(WordEntry::new(symbols, freq));
            }
        }
        vocab.entries.sort_by(|a, b| b.freq.cmp(&a.freq));
        vocab
    }

    /// Split a word into single-character symbols, tagging the last one.
    ///
    /// Returns `None` for the empty word.
    pub fn split_word(word: &str) -> Option<Vec<Symbol>> {
        let mut symbols: Vec<Symbol> = word
            .chars()
            .map(|c| {
                let mut buf = [0u8; 4];
                CompactString::new(c.encode_utf8(&mut buf))
            })
            .collect();
        symbols.last_mut()?.push_str(END_OF_WORD);
        Some(symbols)
    }

    /// Get the entry at `position`.
    #[inline]
    pub fn get(&self, position: usize) -> Option<&WordEntry> {
        self.entries.get(position)
    }

    /// Replace the symbols of the entry at `position`, returning the old ones.
    ///
    /// Returns `None` if the position is out of range.
    pub fn replace(&mut self, position: usize, symbols: Vec<Symbol>) -> Option<Vec<Symbol>> {
        let entry = self.entries.get_mut(position)?;
        Some(std::mem::replace(&mut entry.symbols, symbols))
    }

    /// Number of entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check whether the vocabulary is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over entries in position order.
    pub fn iter(&self) -> impl Iterator<Item = &WordEntry> {
        self.entries.iter()
    }

    /// Count distinct word-internal and word-final symbols.
    pub fn alphabet_size(&self) -> AlphabetSize {
        let mut internal: AHashSet<&str> = AHashSet::new();
        let mut word_final: AHashSet<&str> = AHashSet::new();

        for entry in &self.entries {
            if let Some((last, rest)) = entry.symbols.split_last() {
                internal.extend(rest.iter().map(|s| s.as_str()));
                word_final.insert(last.as_str());
            }
        }

        AlphabetSize {
            internal: internal.len(),
            word_final: word_final.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn symbols(entry: &WordEntry) -> Vec<&str> {
        entry.symbols.iter().map(|s| s.as_str()).collect()
    }

    #[test]
    fn test_split_word() {
        let split = WordVocabulary::split_word("low").unwrap();
        assert_eq!(split, vec!["l", "o", "w</w>"]);

        let single = WordVocabulary::split_word("a").unwrap();
        assert_eq!(single, vec!["a</w>"]);

        assert!(WordVocabulary::split_word("").is_none());
    }

    #[test]
    fn test_split_word_multibyte() {
        let split = WordVocabulary::split_word("día").unwrap();
        assert_eq!(split, vec!["d", "í", "a</w>"]);
    }

    #[test]
    fn test_from_counts_sorts_descending_and_stable() {
        let vocab = WordVocabulary::from_counts(vec![
            ("low", 5),
            ("lower", 2),
            ("newest", 6),
            ("widest", 3),
            ("wide", 5),
            ("", 9),
        ]);

        assert_eq!(vocab.len(), 5);
        let order: Vec<i64> = vocab.iter().map(|e| e.freq).collect();
        assert_eq!(order, vec![6, 5, 5, 3, 2]);
        assert_eq!(symbols(vocab.get(1).unwrap()), vec!["l", "o", "w</w>"]);
        assert_eq!(symbols(vocab.get(2).unwrap()), vec!["w", "i", "d", "e</w>"]);
    }

    #[test]
    fn test_replace() {
        let mut vocab = WordVocabulary::from_counts(vec![("low", 5)]);
        let old = vocab
            .replace(0, vec!["lo".into(), "w</w>".into()])
            .unwrap();

        assert_eq!(old, vec!["l", "o", "w</w>"]);
        assert_eq!(symbols(vocab.get(0).unwrap()), vec!["lo", "w</w>"]);
        assert_eq!(vocab.get(0).unwrap().freq, 5);
        assert!(vocab.replace(7, Vec::new()).is_none());
    }

    #[test]
    fn test_alphabet_size() {
        let vocab = WordVocabulary::from_counts(vec![
            ("low", 5),
            ("lower", 2),
            ("newest", 6),
            ("widest", 3),
        ]);

        let size = vocab.alphabet_size();
        assert_eq!(size.internal, 8);
        assert_eq!(size.word_final, 3);
        assert_eq!(size.total(), 11);
    }
}
