//! Bpelearn CLI - Command-line interface for BPE merge learning.
//!
//! This is the main entry point for the `bpelearn` command-line tool.

mod commands;

use clap::{Parser, Subcommand};
use commands::{LearnCommand, VocabCommand};
use env_logger::Env;
use log::LevelFilter;

#[derive(Parser)]
#[command(name = "bpelearn")]
#[command(about = "Learn BPE merge rules from a text corpus", long_about = None)]
#[command(version)]
struct Cli {
    /// Log every learned merge
    #[arg(short, long, global = true, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Learn merge rules from text or word-count files
    Learn(LearnCommand),
    /// Count the words of text files and write a word-count dictionary
    Vocab(VocabCommand),
}

fn init_logging(verbose: bool) {
    let mut builder = env_logger::Builder::from_env(Env::default().default_filter_or("info"));
    builder.format_timestamp_millis();
    if verbose {
        builder.filter_level(LevelFilter::Debug);
    }
    builder.init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Learn(cmd) => commands::learn::run(cmd)?,
        Commands::Vocab(cmd) => commands::vocab::run(cmd)?,
    }

    Ok(())
}
