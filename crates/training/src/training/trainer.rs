//! BPE trainer implementation.
//!
//! This module implements the merge loop: pick the most frequent pair, fuse
//! it everywhere, update the statistics incrementally and record the merge.
//!
//! The live statistics table is kept small by pruning pairs whose frequency
//! falls below a threshold. Pruned values are kept in a full snapshot, and
//! whenever the best live pair drops below the threshold the live table is
//! rebuilt from that snapshot and the threshold is lowered. The threshold
//! anneals towards the best frequency as the number of merges grows.

use super::config::LearnConfig;
use super::replace::replace_pair;
use super::stats::{build_pair_statistics, PairIndex, PairStats};
use super::update::update_pair_statistics;
use bpelearn_core::{fuse, MergeCandidate, MergeRules, Pair, Result, WordVocabulary};
use log::{debug, info, trace};
use serde::{Deserialize, Serialize};

/// Merges between unconditional prune passes.
const PRUNE_INTERVAL: usize = 100;

/// Controls how quickly the restore threshold approaches the best frequency.
const THRESHOLD_ANNEALING: f64 = 10_000.0;

/// One learned merge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeRecord {
    /// Position of the merge in the learned order
    pub rank: usize,
    /// The merged pair
    pub pair: Pair,
    /// Aggregate frequency of the pair when it was selected
    pub frequency: i64,
}

/// Why a training run stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    /// The requested number of merges was learned
    BudgetExhausted,
    /// No pair is left to merge
    NoPairs,
    /// The best remaining pair is below the minimum frequency
    BelowMinFrequency,
}

/// Result of a training run.
#[derive(Debug, Clone)]
pub struct TrainingOutcome {
    /// Learned merges in order
    pub merges: MergeRules,
    /// Per-merge details, parallel to `merges`
    pub records: Vec<MergeRecord>,
    /// Why the run stopped
    pub stop_reason: StopReason,
    /// The vocabulary after all merges
    pub vocab: WordVocabulary,
}

/// BPE trainer.
///
/// Learns merge rules from a word vocabulary by iteratively merging the most
/// frequent adjacent symbol pair.
#[derive(Debug, Clone)]
pub struct BpeTrainer {
    /// Configuration
    config: LearnConfig,
}

impl BpeTrainer {
    /// Create a new trainer, validating the configuration.
    pub fn new(config: LearnConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The trainer configuration.
    pub fn config(&self) -> &LearnConfig {
        &self.config
    }

    /// Number of merges to attempt on `vocab`.
    ///
    /// In total-symbol mode the base symbols count against the budget.
    pub fn merge_budget(&self, vocab: &WordVocabulary) -> usize {
        if !self.config.total_symbols {
            return self.config.num_symbols;
        }
        let alphabet = vocab.alphabet_size();
        info!("Number of word-internal characters: {}", alphabet.internal);
        info!("Number of word-final characters: {}", alphabet.word_final);
        info!(
            "Reducing number of merge operations by {}",
            alphabet.total()
        );
        self.config.num_symbols.saturating_sub(alphabet.total())
    }

    /// Start a merge session over `vocab`.
    pub fn session(&self, vocab: WordVocabulary) -> MergeSession {
        let budget = self.merge_budget(&vocab);
        MergeSession::new(vocab, budget, self.config.min_frequency)
    }

    /// Learn merge rules from `vocab`.
    pub fn train(&self, vocab: WordVocabulary) -> TrainingOutcome {
        let words = vocab.len();
        let mut session = self.session(vocab);
        info!(
            "Learning up to {} merges from {} words",
            session.budget(),
            words
        );
        let mut merges = MergeRules::new();
        let mut records = Vec::new();

        for record in session.by_ref() {
            merges.push(record.pair.clone());
            records.push(record);
        }

        let stop_reason = session.stop_reason().unwrap_or(StopReason::BudgetExhausted);
        info!(
            "Learned {} merges ({})",
            merges.len(),
            match stop_reason {
                StopReason::BudgetExhausted => "merge budget exhausted",
                StopReason::NoPairs => "no pairs left",
                StopReason::BelowMinFrequency => "best pair below minimum frequency",
            }
        );

        TrainingOutcome {
            merges,
            records,
            stop_reason,
            vocab: session.into_vocab(),
        }
    }
}

/// Step-by-step merge loop over a vocabulary.
///
/// Each call to [`Iterator::next`] learns one merge. The iterator ends when
/// the budget is used up, no pairs remain, or the best pair is below the
/// minimum frequency; [`MergeSession::stop_reason`] tells which.
#[derive(Debug)]
pub struct MergeSession {
    vocab: WordVocabulary,
    /// Live statistics table
    stats: PairStats,
    /// Full-fidelity snapshot holding pruned entries
    big_stats: PairStats,
    index: PairIndex,
    threshold: f64,
    min_frequency: i64,
    budget: usize,
    iteration: usize,
    stop_reason: Option<StopReason>,
}

impl MergeSession {
    /// Build the pair statistics for `vocab` and prepare to merge.
    pub fn new(vocab: WordVocabulary, budget: usize, min_frequency: i64) -> Self {
        let (stats, index) = build_pair_statistics(&vocab);
        let big_stats = stats.clone();
        let threshold = stats.max_count().map_or(0.0, |max| max as f64 / 10.0);
        debug!(
            "Initial statistics: {} pairs, prune threshold {}",
            stats.len(),
            threshold
        );

        Self {
            vocab,
            stats,
            big_stats,
            index,
            threshold,
            min_frequency,
            budget,
            iteration: 0,
            stop_reason: None,
        }
    }

    /// Maximum number of merges this session will learn.
    pub fn budget(&self) -> usize {
        self.budget
    }

    /// Number of merges learned so far.
    pub fn merges_done(&self) -> usize {
        self.iteration
    }

    /// Why the session stopped, once it has.
    pub fn stop_reason(&self) -> Option<StopReason> {
        self.stop_reason
    }

    /// Current vocabulary.
    pub fn vocab(&self) -> &WordVocabulary {
        &self.vocab
    }

    /// Live statistics table.
    pub fn stats(&self) -> &PairStats {
        &self.stats
    }

    /// Current prune threshold.
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Consume the session, returning the merged vocabulary.
    pub fn into_vocab(self) -> WordVocabulary {
        self.vocab
    }

    fn stop(&mut self, reason: StopReason) -> Option<MergeRecord> {
        self.stop_reason = Some(reason);
        None
    }

    /// Pick the pair to merge next, restoring pruned statistics if the best
    /// live pair is no longer trustworthy.
    fn select(&mut self) -> Option<MergeCandidate> {
        let i = self.iteration;
        let best = self.stats.best();
        let stale = match &best {
            None => true,
            Some(candidate) => i > 0 && (candidate.count as f64) < self.threshold,
        };
        if !stale {
            return best;
        }

        self.stats.prune(&mut self.big_stats, self.threshold);
        self.stats = self.big_stats.clone();
        let best = self.stats.best()?;
        self.threshold = best.count as f64 * i as f64 / (i as f64 + THRESHOLD_ANNEALING);
        self.stats.prune(&mut self.big_stats, self.threshold);
        trace!(
            "Restored {} pairs from snapshot at merge {}, threshold now {}",
            self.stats.len(),
            i,
            self.threshold
        );
        Some(best)
    }
}

impl Iterator for MergeSession {
    type Item = MergeRecord;

    fn next(&mut self) -> Option<MergeRecord> {
        if self.stop_reason.is_some() {
            return None;
        }
        if self.iteration >= self.budget {
            return self.stop(StopReason::BudgetExhausted);
        }

        let best = match self.select() {
            Some(best) if best.count > 0 => best,
            _ => {
                info!("No pairs left to merge. Stopping");
                return self.stop(StopReason::NoPairs);
            }
        };
        if best.count < self.min_frequency {
            info!(
                "No pair has frequency >= {}. Stopping",
                self.min_frequency
            );
            return self.stop(StopReason::BelowMinFrequency);
        }

        let i = self.iteration;
        debug!(
            "pair {}: {} {} -> {} (frequency {})",
            i,
            best.pair.0,
            best.pair.1,
            fuse(&best.pair),
            best.count
        );

        let changes = replace_pair(&best.pair, &mut self.vocab, &self.index);
        update_pair_statistics(&best.pair, &changes, &mut self.stats, &mut self.index);
        self.stats.set(best.pair.clone(), 0);

        if i % PRUNE_INTERVAL == 0 {
            self.stats.prune(&mut self.big_stats, self.threshold);
        }
        self.iteration += 1;

        Some(MergeRecord {
            rank: i,
            pair: best.pair,
            frequency: best.count,
        })
    }
}
