//! Merge rule management for BPE.
//!
//! Merge rules are kept as an ordered list of symbol pairs. The order is the
//! order in which the merges were learned, and it is the order in which they
//! must later be applied.

use ahash::AHashMap;
use compact_str::CompactString;

/// A symbol: a single character or a previously fused unit of characters.
pub type Symbol = CompactString;

/// An ordered pair of adjacent symbols.
///
/// Tuple ordering is lexicographic on (first, second), which is the tie-break
/// order used when two pairs have the same frequency.
pub type Pair = (Symbol, Symbol);

/// Fuse the two symbols of a pair into the symbol that replaces them.
#[inline]
pub fn fuse(pair: &Pair) -> Symbol {
    let mut fused = CompactString::with_capacity(pair.0.len() + pair.1.len());
    fused.push_str(&pair.0);
    fused.push_str(&pair.1);
    fused
}

/// Ordered collection of BPE merge rules with rank lookup.
#[derive(Debug, Clone, Default)]
pub struct MergeRules {
    /// Merges in learned order
    merges: Vec<Pair>,
    /// Pair -> rank (index into `merges`)
    ranks: AHashMap<Pair, u32>,
}

impl MergeRules {
    /// Create a new empty collection of merge rules.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a merge rule and return its rank.
    ///
    /// A pair that is already present keeps its original rank.
    pub fn push(&mut self, pair: Pair) -> u32 {
        if let Some(&rank) = self.ranks.get(&pair) {
            return rank;
        }
        let rank = self.merges.len() as u32;
        self.ranks.insert(pair.clone(), rank);
        self.merges.push(pair);
        rank
    }

    /// Get the rank of a pair, if it has been learned.
    #[inline]
    pub fn rank(&self, pair: &Pair) -> Option<u32> {
        self.ranks.get(pair).copied()
    }

    /// Check whether a pair has been learned.
    #[inline]
    pub fn contains(&self, pair: &Pair) -> bool {
        self.ranks.contains_key(pair)
    }

    /// Get the pair learned at `rank`.
    #[inline]
    pub fn get(&self, rank: usize) -> Option<&Pair> {
        self.merges.get(rank)
    }

    /// Get the number of merge rules.
    #[inline]
    pub fn len(&self) -> usize {
        self.merges.len()
    }

    /// Check if there are no merge rules.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.merges.is_empty()
    }

    /// Iterate over merges in learned order.
    pub fn iter(&self) -> impl Iterator<Item = &Pair> {
        self.merges.iter()
    }

    /// Create merge rules from a list of pairs.
    ///
    /// The pairs are assigned ranks in order (0, 1, 2, ...).
    pub fn from_pairs(pairs: impl IntoIterator<Item = Pair>) -> Self {
        let mut rules = Self::new();
        for pair in pairs {
            rules.push(pair);
        }
        rules
    }
}

impl PartialEq for MergeRules {
    fn eq(&self, other: &Self) -> bool {
        self.merges == other.merges
    }
}

impl Eq for MergeRules {}
