//! Rewriting vocabulary entries after a merge.

use super::stats::PairIndex;
use bpelearn_core::{fuse, Pair, Symbol, WordVocabulary};

/// A vocabulary entry rewritten by a merge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordChange {
    /// Position of the entry in the vocabulary
    pub position: usize,
    /// Symbols after the merge
    pub word: Vec<Symbol>,
    /// Symbols before the merge
    pub old_word: Vec<Symbol>,
    /// Entry frequency
    pub freq: i64,
}

/// Fuse every occurrence of `pair` in `symbols`, scanning left to right.
///
/// Occurrences never overlap: in `a a a` the pair `(a, a)` is fused once.
/// Returns `None` when the pair does not occur.
pub fn merge_symbols(symbols: &[Symbol], pair: &Pair) -> Option<Vec<Symbol>> {
    let (first, second) = pair;
    let mut merged: Vec<Symbol> = Vec::with_capacity(symbols.len());
    let mut fused: Option<Symbol> = None;
    let mut i = 0;

    while i < symbols.len() {
        if i + 1 < symbols.len() && symbols[i] == *first && symbols[i + 1] == *second {
            merged.push(fused.get_or_insert_with(|| fuse(pair)).clone());
            i += 2;
        } else {
            merged.push(symbols[i].clone());
            i += 1;
        }
    }

    fused.map(|_| merged)
}

/// Rewrite every vocabulary entry that contains `pair`.
///
/// Candidate entries come from the reverse index; positions with a
/// non-positive delta are skipped. Returns one [`WordChange`] per rewritten
/// entry, in ascending position order.
pub fn replace_pair(pair: &Pair, vocab: &mut WordVocabulary, index: &PairIndex) -> Vec<WordChange> {
    let mut changes = Vec::new();

    for position in index.positions(pair) {
        let Some(entry) = vocab.get(position) else {
            continue;
        };
        let freq = entry.freq;
        let Some(word) = merge_symbols(&entry.symbols, pair) else {
            continue;
        };
        if let Some(old_word) = vocab.replace(position, word.clone()) {
            changes.push(WordChange {
                position,
                word,
                old_word,
                freq,
            });
        }
    }

    changes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::training::stats::build_pair_statistics;

    fn pair(a: &str, b: &str) -> Pair {
        (a.into(), b.into())
    }

    fn syms(items: &[&str]) -> Vec<Symbol> {
        items.iter().map(|s| Symbol::from(*s)).collect()
    }

    #[test]
    fn test_merge_symbols() {
        let merged = merge_symbols(&syms(&["n", "e", "w", "e", "s", "t</w>"]), &pair("e", "s"));
        assert_eq!(merged, Some(syms(&["n", "e", "w", "es", "t</w>"])));
    }

    #[test]
    fn test_merge_symbols_absent() {
        assert_eq!(merge_symbols(&syms(&["l", "o", "w</w>"]), &pair("o", "w")), None);
        assert_eq!(merge_symbols(&syms(&["a</w>"]), &pair("a", "b")), None);
    }

    #[test]
    fn test_merge_symbols_matches_whole_symbols_only() {
        // "ab c" contains the text "b c" but not the symbols (b, c)
        let merged = merge_symbols(&syms(&["ab", "c", "b", "c</w>"]), &pair("b", "c"));
        assert_eq!(merged, None);
    }

    #[test]
    fn test_merge_symbols_non_overlapping() {
        let odd = merge_symbols(&syms(&["a", "a", "a</w>"]), &pair("a", "a"));
        assert_eq!(odd, Some(syms(&["aa", "a</w>"])));

        let even = merge_symbols(&syms(&["a", "a", "a", "a"]), &pair("a", "a"));
        assert_eq!(even, Some(syms(&["aa", "aa"])));

        let alternating = merge_symbols(&syms(&["a", "b", "a", "b</w>"]), &pair("a", "b"));
        assert_eq!(alternating, Some(syms(&["ab", "a", "b</w>"])));
    }

    #[test]
    fn test_replace_pair_reports_changes() {
        let mut vocab = WordVocabulary::from_counts(vec![
            ("low", 5),
            ("lower", 2),
            ("newest", 6),
            ("widest", 3),
        ]);
        let (_, index) = build_pair_statistics(&vocab);

        let changes = replace_pair(&pair("e", "s"), &mut vocab, &index);

        assert_eq!(changes.len(), 2);
        assert_eq!(changes[0].position, 0);
        assert_eq!(changes[0].freq, 6);
        assert_eq!(changes[0].old_word, syms(&["n", "e", "w", "e", "s", "t</w>"]));
        assert_eq!(changes[0].word, syms(&["n", "e", "w", "es", "t</w>"]));
        assert_eq!(changes[1].position, 2);
        assert_eq!(changes[1].word, syms(&["w", "i", "d", "es", "t</w>"]));

        assert_eq!(vocab.get(2).unwrap().symbols, syms(&["w", "i", "d", "es", "t</w>"]));
        assert_eq!(vocab.get(1).unwrap().symbols, syms(&["l", "o", "w</w>"]));
    }

    #[test]
    fn test_replace_pair_skips_non_positive_positions() {
        let mut vocab = WordVocabulary::from_counts(vec![("ab", 4), ("abc", 1)]);
        let (_, mut index) = build_pair_statistics(&vocab);
        index.add(&pair("a", "b"), 1, -1);

        let changes = replace_pair(&pair("a", "b"), &mut vocab, &index);
        assert!(changes.is_empty());
        assert_eq!(vocab.get(1).unwrap().symbols, syms(&["a", "b", "c</w>"]));
    }
}
