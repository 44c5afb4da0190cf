//! Core BPE data structures.
//!
//! This module contains the symbol, pair and vocabulary types shared by the
//! training crate, independent of how a corpus is read or merges are stored.

pub mod merges;
pub mod priority;
pub mod vocab;

pub use merges::{fuse, MergeRules, Pair, Symbol};
pub use priority::MergeCandidate;
pub use vocab::{AlphabetSize, WordEntry, WordVocabulary, END_OF_WORD};
