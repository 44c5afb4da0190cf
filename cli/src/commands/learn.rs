//! Learn command implementation.

use clap::Parser;
use std::path::PathBuf;

/// Learn command arguments.
#[derive(Parser)]
pub struct LearnCommand {
    /// Input files; `-` reads stdin
    #[arg(short, long, num_args = 1.., default_value = "-")]
    pub input: Vec<PathBuf>,

    /// Output file for the merge rules; stdout when omitted
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Number of merge operations to learn
    #[arg(short, long)]
    pub symbols: Option<usize>,

    /// Stop when no pair reaches this frequency
    #[arg(long)]
    pub min_frequency: Option<i64>,

    /// Inputs are `word count` dictionaries instead of raw text
    #[arg(long, default_value_t = false)]
    pub dict_input: bool,

    /// Count base characters against the symbol budget
    #[arg(short, long, default_value_t = false)]
    pub total_symbols: bool,

    /// JSON file with learning options; flags override it
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

use anyhow::{Context, Result as AnyhowResult};
use bpelearn_training::{
    read_corpus, BpeTrainer, InputMode, LearnConfig, LearnConfigBuilder, MergesSaver, WordCounter,
};
use log::info;
use std::io;
use std::time::Instant;

impl LearnCommand {
    /// Merge the config file (if any) with the command-line flags.
    fn learn_config(&self) -> AnyhowResult<LearnConfig> {
        let base = match &self.config {
            Some(path) => LearnConfig::from_json_file(path)
                .with_context(|| format!("failed to load config {}", path.display()))?,
            None => LearnConfig::default(),
        };

        let mut builder = LearnConfigBuilder::from_config(base);
        if let Some(symbols) = self.symbols {
            builder = builder.num_symbols(symbols);
        }
        if let Some(min_frequency) = self.min_frequency {
            builder = builder.min_frequency(min_frequency);
        }
        if self.total_symbols {
            builder = builder.total_symbols(true);
        }
        if self.dict_input {
            builder = builder.input_mode(InputMode::Dictionary);
        }
        Ok(builder.build()?)
    }
}

pub fn run(cmd: LearnCommand) -> AnyhowResult<()> {
    let config = cmd.learn_config()?;
    let mode = config.input_mode;

    let start = Instant::now();
    let mut counter = WordCounter::new();
    for path in &cmd.input {
        read_corpus(&mut counter, path, mode)
            .with_context(|| format!("failed to read {}", path.display()))?;
    }
    info!(
        "Read {} distinct words ({} occurrences) in {:.2}s",
        counter.word_count(),
        counter.total_word_occurrences(),
        start.elapsed().as_secs_f64()
    );

    let start = Instant::now();
    let trainer = BpeTrainer::new(config)?;
    let outcome = trainer.train(counter.to_vocabulary());
    info!(
        "Learned {} merges in {:.2}s",
        outcome.merges.len(),
        start.elapsed().as_secs_f64()
    );

    let saver = MergesSaver::new(&outcome.merges);
    match &cmd.output {
        Some(path) => {
            info!("Write merges file to {}", path.display());
            saver
                .save(path)
                .with_context(|| format!("failed to write {}", path.display()))?;
        }
        None => saver
            .write_to(io::BufWriter::new(io::stdout().lock()))
            .context("failed to write merges to stdout")?,
    }

    Ok(())
}
