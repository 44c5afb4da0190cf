//! Ordering of BPE merge candidates.
//!
//! A candidate with a higher count wins; equal counts are broken by the pair
//! itself, where the lexicographically greater pair wins. The order is total,
//! so selection over any table is deterministic.

use crate::core::merges::Pair;

/// A merge candidate during BPE training.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeCandidate {
    /// The pair of symbols to merge
    pub pair: Pair,
    /// The aggregate frequency of this pair
    pub count: i64,
}

impl MergeCandidate {
    /// Create a new merge candidate.
    pub fn new(pair: Pair, count: i64) -> Self {
        Self { pair, count }
    }

    /// Select the best candidate from `(pair, count)` entries.
    ///
    /// Only the winning pair is cloned.
    pub fn select<'a, I>(entries: I) -> Option<Self>
    where
        I: IntoIterator<Item = (&'a Pair, &'a i64)>,
    {
        entries
            .into_iter()
            .max_by(|a, b| a.1.cmp(b.1).then_with(|| a.0.cmp(b.0)))
            .map(|(pair, &count)| Self::new(pair.clone(), count))
    }
}

impl Ord for MergeCandidate {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.count
            .cmp(&other.count)
            .then_with(|| self.pair.cmp(&other.pair))
    }
}

impl PartialOrd for MergeCandidate {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ahash::AHashMap;

    fn pair(a: &str, b: &str) -> Pair {
        (a.into(), b.into())
    }

    #[test]
    fn test_higher_count_wins() {
        let low = MergeCandidate::new(pair("z", "z"), 3);
        let high = MergeCandidate::new(pair("a", "a"), 4);
        assert!(high > low);
    }

    #[test]
    fn test_tie_broken_by_greater_pair() {
        let es = MergeCandidate::new(pair("e", "s"), 9);
        let st = MergeCandidate::new(pair("s", "t</w>"), 9);
        assert!(st > es);

        let ab = MergeCandidate::new(pair("a", "b"), 9);
        let ac = MergeCandidate::new(pair("a", "c"), 9);
        assert!(ac > ab);
    }

    #[test]
    fn test_select_matches_ord() {
        let mut table: AHashMap<Pair, i64> = AHashMap::new();
        table.insert(pair("e", "s"), 9);
        table.insert(pair("s", "t</w>"), 9);
        table.insert(pair("l", "o"), 7);
        table.insert(pair("w", "e"), -2);

        let best = MergeCandidate::select(table.iter()).unwrap();
        assert_eq!(best, MergeCandidate::new(pair("s", "t</w>"), 9));

        let by_ord = table
            .iter()
            .map(|(p, &c)| MergeCandidate::new(p.clone(), c))
            .max()
            .unwrap();
        assert_eq!(best, by_ord);
    }

    #[test]
    fn test_select_empty() {
        let table: AHashMap<Pair, i64> = AHashMap::new();
        assert!(MergeCandidate::select(table.iter()).is_none());
    }
}
