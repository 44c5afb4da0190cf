//! Bpelearn-core - Core data structures for learning BPE merges
//!
//! This crate provides the fundamental types for byte-pair encoding (BPE)
//! merge learning: symbols and pairs, the word vocabulary the merges are
//! learned from, the ordered merge rule list, and the ordering used to pick
//! the next merge.
//!
//! # Features
//!
//! - Compact symbol storage using `CompactString`
//! - Positional word vocabulary with stable entry positions
//! - Ordered merge rules with `AHashMap` rank lookup
//! - Error handling with detailed diagnostics
//!
//! # Example
//!
//! ```rust
//! use bpelearn_core::{MergeRules, WordVocabulary};
//!
//! let vocab = WordVocabulary::from_counts(vec![("low", 5), ("lower", 2)]);
//! assert_eq!(vocab.len(), 2);
//!
//! let mut rules = MergeRules::new();
//! rules.push(("l".into(), "o".into()));
//! assert_eq!(rules.len(), 1);
//! ```

pub mod error;
pub use error::{BpeError, Result};

// Core BPE data structures
pub mod core;
pub use core::{
    fuse, AlphabetSize, MergeCandidate, MergeRules, Pair, Symbol, WordEntry, WordVocabulary,
    END_OF_WORD,
};
