//! Configuration for BPE merge learning.

use crate::io::InputMode;
use bpelearn_core::{BpeError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration for BPE merge learning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LearnConfig {
    /// Number of merge operations to learn
    pub num_symbols: usize,
    /// Minimum frequency for a pair to be merged
    pub min_frequency: i64,
    /// Count base symbols against `num_symbols`, so it bounds the final
    /// symbol inventory rather than the number of merges
    pub total_symbols: bool,
    /// How corpus lines are read
    pub input_mode: InputMode,
}

impl Default for LearnConfig {
    fn default() -> Self {
        Self {
            num_symbols: 10_000,
            min_frequency: 2,
            total_symbols: false,
            input_mode: InputMode::Text,
        }
    }
}

impl LearnConfig {
    /// Start building a configuration from the defaults.
    pub fn builder() -> LearnConfigBuilder {
        LearnConfigBuilder::new()
    }

    /// Load a configuration from a JSON file.
    ///
    /// Missing fields take their default values.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| BpeError::io(path, e))?;
        let config: Self = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that the configuration can drive a training run.
    pub fn validate(&self) -> Result<()> {
        // A floor of zero would let an already consumed pair be selected again.
        if self.min_frequency < 1 {
            return Err(BpeError::InvalidConfig(format!(
                "min_frequency must be at least 1, got {}",
                self.min_frequency
            )));
        }
        Ok(())
    }
}

/// Builder for [`LearnConfig`].
#[derive(Debug, Clone, Default)]
pub struct LearnConfigBuilder {
    config: LearnConfig,
}

impl LearnConfigBuilder {
    /// Create a new builder with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing configuration.
    pub fn from_config(config: LearnConfig) -> Self {
        Self { config }
    }

    /// Set the number of merge operations.
    pub fn num_symbols(mut self, num_symbols: usize) -> Self {
        self.config.num_symbols = num_symbols;
        self
    }

    /// Set the minimum frequency for merges.
    pub fn min_frequency(mut self, freq: i64) -> Self {
        self.config.min_frequency = freq;
        self
    }

    /// Enable or disable total-symbol budgeting.
    pub fn total_symbols(mut self, enabled: bool) -> Self {
        self.config.total_symbols = enabled;
        self
    }

    /// Set how corpus lines are read.
    pub fn input_mode(mut self, mode: InputMode) -> Self {
        self.config.input_mode = mode;
        self
    }

    /// Validate and build the configuration.
    pub fn build(self) -> Result<LearnConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}
