//! Incremental maintenance of pair statistics after a merge.
//!
//! Only the entries rewritten by the merge are visited. For every fused
//! occurrence the pairs it destroyed are subtracted and the pairs it created
//! are added, so a merge step costs time proportional to the number of
//! occurrences of the merged pair rather than to the size of the corpus.

use super::replace::WordChange;
use super::stats::{PairIndex, PairStats};
use bpelearn_core::{Pair, Symbol};

/// Update `stats` and `index` for the entries changed by merging `pair`.
///
/// The merged pair itself is reset to zero with an empty index bucket.
pub fn update_pair_statistics(
    pair: &Pair,
    changes: &[WordChange],
    stats: &mut PairStats,
    index: &mut PairIndex,
) {
    stats.set(pair.clone(), 0);
    index.reset(pair);

    let mut produced: Vec<usize> = Vec::new();
    for change in changes {
        produced.clear();
        remove_destroyed_pairs(pair, change, stats, index, &mut produced);
        add_created_pairs(change, &produced, stats, index);
    }
}

/// Subtract the context pairs around every occurrence of `pair` in the old
/// word, collecting the new-word positions of the fused symbols.
fn remove_destroyed_pairs(
    pair: &Pair,
    change: &WordChange,
    stats: &mut PairStats,
    index: &mut PairIndex,
    produced: &mut Vec<usize>,
) {
    let (first, second) = pair;
    let old = &change.old_word;
    let mut i = 0;

    while i + 1 < old.len() {
        if old[i] != *first || old[i + 1] != *second {
            i += 1;
            continue;
        }

        if i > 0 {
            let prev = context_pair(&old[i - 1], &old[i]);
            stats.add(&prev, -change.freq);
            index.add(&prev, change.position, -1);
        }

        if i + 2 < old.len() {
            // (second, first) in front of another occurrence is removed as
            // that occurrence's left context.
            let next_is_occurrence =
                i + 3 < old.len() && old[i + 2] == *first && old[i + 3] == *second;
            if !next_is_occurrence {
                let next = context_pair(&old[i + 1], &old[i + 2]);
                stats.add(&next, -change.freq);
                index.add(&next, change.position, -1);
            }
        }

        // Each earlier occurrence shortened the word by one symbol.
        produced.push(i - produced.len());
        i += 2;
    }
}

/// Add the context pairs around every fused symbol in the new word.
fn add_created_pairs(
    change: &WordChange,
    produced: &[usize],
    stats: &mut PairStats,
    index: &mut PairIndex,
) {
    let word = &change.word;

    for (k, &p) in produced.iter().enumerate() {
        if p > 0 {
            let prev = context_pair(&word[p - 1], &word[p]);
            stats.add(&prev, change.freq);
            index.add(&prev, change.position, 1);
        }

        // Two adjacent fused symbols form one pair, counted as the left
        // context of the second.
        let next_is_fused = produced.get(k + 1) == Some(&(p + 1));
        if p + 1 < word.len() && !next_is_fused {
            let next = context_pair(&word[p], &word[p + 1]);
            stats.add(&next, change.freq);
            index.add(&next, change.position, 1);
        }
    }
}

#[inline]
fn context_pair(a: &Symbol, b: &Symbol) -> Pair {
    (a.clone(), b.clone())
}
