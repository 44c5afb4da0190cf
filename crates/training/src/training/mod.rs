//! Training infrastructure for BPE merge learning.
//!
//! This module provides word counting, the pair statistics with their
//! incremental maintenance, and the merge loop that learns the rules.

pub mod config;
pub mod counter;
pub mod replace;
pub mod stats;
pub mod trainer;
pub mod update;

pub use config::{LearnConfig, LearnConfigBuilder};
pub use counter::WordCounter;
pub use replace::{merge_symbols, replace_pair, WordChange};
pub use stats::{build_pair_statistics, PairIndex, PairStats};
pub use trainer::{BpeTrainer, MergeRecord, MergeSession, StopReason, TrainingOutcome};
pub use update::update_pair_statistics;
