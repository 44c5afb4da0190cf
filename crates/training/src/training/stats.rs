//! Pair statistics for BPE training.
//!
//! [`PairStats`] maps every adjacent symbol pair to its aggregate frequency
//! over the vocabulary. [`PairIndex`] maps every pair to the vocabulary
//! positions that contain it, with a signed per-position occurrence delta.
//! Both are built once and then kept current by the incremental updater.

use ahash::AHashMap;
use bpelearn_core::{MergeCandidate, Pair, WordVocabulary};

/// Aggregate pair frequencies.
///
/// Missing pairs read as zero. Values can go negative while a pair is pruned
/// and only its deltas are being tracked.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PairStats {
    counts: AHashMap<Pair, i64>,
}

impl PairStats {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Aggregate frequency of `pair`, zero if absent.
    #[inline]
    pub fn get(&self, pair: &Pair) -> i64 {
        self.counts.get(pair).copied().unwrap_or(0)
    }

    /// Whether `pair` currently has an entry.
    #[inline]
    pub fn contains(&self, pair: &Pair) -> bool {
        self.counts.contains_key(pair)
    }

    /// Add `delta` to the frequency of `pair`, creating the entry if needed.
    ///
    /// The sum saturates at the `i64` bounds.
    #[inline]
    pub fn add(&mut self, pair: &Pair, delta: i64) {
        match self.counts.get_mut(pair) {
            Some(count) => *count = count.saturating_add(delta),
            None => {
                self.counts.insert(pair.clone(), delta);
            }
        }
    }

    /// Overwrite the frequency of `pair`.
    #[inline]
    pub fn set(&mut self, pair: Pair, count: i64) {
        self.counts.insert(pair, count);
    }

    /// Number of entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Whether the table has no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Iterate over `(pair, count)` entries in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&Pair, &i64)> {
        self.counts.iter()
    }

    /// The most frequent pair, ties going to the greater pair.
    pub fn best(&self) -> Option<MergeCandidate> {
        MergeCandidate::select(self.counts.iter())
    }

    /// The largest frequency in the table.
    pub fn max_count(&self) -> Option<i64> {
        self.counts.values().copied().max()
    }

    /// Remove every entry below `threshold`, saving it into `snapshot`.
    ///
    /// A removed negative value is a delta against a pair that was already
    /// pruned, so it is added to the snapshot. Any other removed value is the
    /// pair's full frequency and overwrites the snapshot.
    pub fn prune(&mut self, snapshot: &mut PairStats, threshold: f64) {
        self.counts.retain(|pair, &mut count| {
            if (count as f64) >= threshold {
                return true;
            }
            if count < 0 {
                snapshot.add(pair, count);
            } else {
                snapshot.set(pair.clone(), count);
            }
            false
        });
    }
}

/// Reverse index: pair -> vocabulary position -> occurrence delta.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PairIndex {
    buckets: AHashMap<Pair, AHashMap<usize, i64>>,
}

impl PairIndex {
    /// Create an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Occurrence delta of `pair` at `position`, zero if absent.
    #[inline]
    pub fn get(&self, pair: &Pair, position: usize) -> i64 {
        self.buckets
            .get(pair)
            .and_then(|bucket| bucket.get(&position))
            .copied()
            .unwrap_or(0)
    }

    /// Add `delta` to the occurrence delta of `pair` at `position`.
    #[inline]
    pub fn add(&mut self, pair: &Pair, position: usize, delta: i64) {
        if !self.buckets.contains_key(pair) {
            self.buckets.insert(pair.clone(), AHashMap::new());
        }
        if let Some(bucket) = self.buckets.get_mut(pair) {
            *bucket.entry(position).or_insert(0) += delta;
        }
    }

    /// Empty the bucket of `pair`.
    pub fn reset(&mut self, pair: &Pair) {
        if let Some(bucket) = self.buckets.get_mut(pair) {
            bucket.clear();
        }
    }

    /// Positions whose delta for `pair` is positive, in ascending order.
    pub fn positions(&self, pair: &Pair) -> Vec<usize> {
        let mut positions: Vec<usize> = self
            .buckets
            .get(pair)
            .map(|bucket| {
                bucket
                    .iter()
                    .filter(|(_, &delta)| delta > 0)
                    .map(|(&pos, _)| pos)
                    .collect()
            })
            .unwrap_or_default();
        positions.sort_unstable();
        positions
    }

}

/// Count every adjacent pair of the vocabulary in a single pass.
pub fn build_pair_statistics(vocab: &WordVocabulary) -> (PairStats, PairIndex) {
    let mut stats = PairStats::new();
    let mut index = PairIndex::new();

    for (position, entry) in vocab.iter().enumerate() {
        for window in entry.symbols.windows(2) {
            let pair = (window[0].clone(), window[1].clone());
            stats.add(&pair, entry.freq);
            index.add(&pair, position, 1);
        }
    }

    (stats, index)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(a: &str, b: &str) -> Pair {
        (a.into(), b.into())
    }

    fn sample_vocab() -> WordVocabulary {
        WordVocabulary::from_counts(vec![
            ("low", 5),
            ("lower", 2),
            ("newest", 6),
            ("widest", 3),
        ])
    }

    #[test]
    fn test_build_counts() {
        let (stats, _) = build_pair_statistics(&sample_vocab());

        assert_eq!(stats.get(&pair("e", "s")), 9);
        assert_eq!(stats.get(&pair("s", "t</w>")), 9);
        assert_eq!(stats.get(&pair("l", "o")), 7);
        assert_eq!(stats.get(&pair("o", "w</w>")), 5);
        assert_eq!(stats.get(&pair("w", "e")), 8);
        assert_eq!(stats.get(&pair("t", "s")), 0);
        assert_eq!(stats.max_count(), Some(9));
    }

    #[test]
    fn test_build_index() {
        let vocab = sample_vocab();
        let (_, index) = build_pair_statistics(&vocab);

        // newest(6), low(5), widest(3), lower(2)
        assert_eq!(index.positions(&pair("e", "s")), vec![0, 2]);
        assert_eq!(index.positions(&pair("l", "o")), vec![1, 3]);
        assert_eq!(index.get(&pair("w", "e"), 1), 0);
        assert_eq!(index.get(&pair("w", "e"), 3), 1);
    }

    #[test]
    fn test_repeated_pair_in_one_word() {
        let vocab = WordVocabulary::from_counts(vec![("abab", 3)]);
        let (stats, index) = build_pair_statistics(&vocab);

        assert_eq!(stats.get(&pair("a", "b")), 3);
        assert_eq!(stats.get(&pair("b", "a")), 3);
        assert_eq!(stats.get(&pair("a", "b</w>")), 3);
        assert_eq!(index.get(&pair("a", "b"), 0), 1);
    }

    #[test]
    fn test_best_breaks_ties_by_pair() {
        let (stats, _) = build_pair_statistics(&sample_vocab());
        let best = stats.best().unwrap();
        assert_eq!(best.pair, pair("s", "t</w>"));
        assert_eq!(best.count, 9);
    }

    #[test]
    fn test_prune_moves_entries_to_snapshot() {
        let mut live = PairStats::new();
        live.set(pair("a", "b"), 10);
        live.set(pair("c", "d"), 3);
        live.set(pair("e", "f"), -2);

        let mut snapshot = PairStats::new();
        snapshot.set(pair("c", "d"), 7);
        snapshot.set(pair("e", "f"), 5);

        live.prune(&mut snapshot, 4.0);

        assert_eq!(live.len(), 1);
        assert!(live.contains(&pair("a", "b")));
        assert_eq!(snapshot.get(&pair("c", "d")), 3);
        assert_eq!(snapshot.get(&pair("e", "f")), 3);
        assert!(!snapshot.contains(&pair("a", "b")));
    }

    #[test]
    fn test_prune_threshold_is_fractional() {
        let mut live = PairStats::new();
        live.set(pair("a", "b"), 1);
        let mut snapshot = PairStats::new();

        live.prune(&mut snapshot, 0.9);
        assert!(live.contains(&pair("a", "b")));

        live.prune(&mut snapshot, 1.1);
        assert!(live.is_empty());
        assert_eq!(snapshot.get(&pair("a", "b")), 1);
    }

    #[test]
    fn test_add_saturates() {
        let mut stats = PairStats::new();
        let ab = pair("a", "b");
        stats.add(&ab, i64::MAX);
        stats.add(&ab, 1);
        assert_eq!(stats.get(&ab), i64::MAX);

        stats.add(&ab, -5);
        assert_eq!(stats.get(&ab), i64::MAX - 5);
    }

    #[test]
    fn test_index_reset_and_add() {
        let mut index = PairIndex::new();
        let ab = pair("a", "b");
        index.add(&ab, 4, 1);
        index.add(&ab, 2, 2);
        index.add(&ab, 9, -1);

        assert_eq!(index.positions(&ab), vec![2, 4]);

        index.reset(&ab);
        assert!(index.positions(&ab).is_empty());
        assert_eq!(index.get(&ab, 2), 0);
    }
}
