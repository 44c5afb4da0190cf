//! Bpelearn-training - BPE merge learning
//!
//! This crate learns BPE merge rules from word frequencies. Pair statistics
//! are computed once and then updated incrementally after every merge, with
//! periodic pruning to keep the live statistics table small.
//!
//! # Features
//!
//! - Word counting from raw text or `word count` dictionaries
//! - Incremental pair statistics with a reverse index into the vocabulary
//! - Deterministic merge selection with a fixed tie-break order
//! - Reading and writing of merge-rule files
//!
//! # Example
//!
//! ```rust
//! use bpelearn_training::{BpeTrainer, LearnConfig, WordCounter};
//!
//! let mut counter = WordCounter::new();
//! counter.add_text_line("low low low lower newest newest widest");
//!
//! let config = LearnConfig::builder()
//!     .num_symbols(10)
//!     .min_frequency(1)
//!     .build()?;
//! let outcome = BpeTrainer::new(config)?.train(counter.to_vocabulary());
//! assert!(!outcome.merges.is_empty());
//! # Ok::<(), bpelearn_training::BpeError>(())
//! ```

pub use bpelearn_core::{BpeError, MergeRules, Pair, Result, Symbol, WordVocabulary};

// Training infrastructure
pub mod training;
pub use training::{
    BpeTrainer, LearnConfig, LearnConfigBuilder, MergeRecord, MergeSession, StopReason,
    TrainingOutcome, WordCounter,
};

// Corpus and merge-file I/O
pub mod io;
pub use io::{read_corpus, InputMode, MergesLoader, MergesSaver, WordCountSaver};
