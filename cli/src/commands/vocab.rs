//! Vocab command implementation.

use clap::Parser;
use std::path::PathBuf;

/// Vocab command arguments.
#[derive(Parser)]
pub struct VocabCommand {
    /// Input text files; `-` reads stdin
    #[arg(short, long, num_args = 1.., default_value = "-")]
    pub input: Vec<PathBuf>,

    /// Output file for `word count` lines; stdout when omitted
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

use anyhow::{Context, Result as AnyhowResult};
use bpelearn_training::{read_corpus, InputMode, WordCountSaver, WordCounter};
use log::info;
use std::io;

pub fn run(cmd: VocabCommand) -> AnyhowResult<()> {
    let mut counter = WordCounter::new();
    for path in &cmd.input {
        read_corpus(&mut counter, path, InputMode::Text)
            .with_context(|| format!("failed to read {}", path.display()))?;
    }

    info!("Counted {} distinct words", counter.word_count());

    let saver = WordCountSaver::new(&counter);
    match &cmd.output {
        Some(path) => saver
            .save(path)
            .with_context(|| format!("failed to write {}", path.display()))?,
        None => saver
            .write_to(io::BufWriter::new(io::stdout().lock()))
            .context("failed to write word counts to stdout")?,
    }

    Ok(())
}
