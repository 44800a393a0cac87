//! Command line argument parsing for the sakuin CLI using clap.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// sakuin - a character n-gram inverted indexer
#[derive(Parser, Debug, Clone)]
#[command(name = "sakuin")]
#[command(about = "Builds a character n-gram inverted index over (title, body) documents")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct SakuinArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human")]
    pub output_format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl SakuinArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1, // Default to normal
                n => n,
            }
        }
    }
}

/// Output formats for command results.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable key/value output
    Human,
    /// Pretty-printed JSON
    Json,
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Build an index from a document dump
    Index(IndexArgs),

    /// Show index statistics
    Stats(StatsArgs),

    /// Show the persisted postings for a token
    Postings(PostingsArgs),
}

/// Arguments for building an index
#[derive(Parser, Debug, Clone)]
pub struct IndexArgs {
    /// Path to the index database file
    #[arg(value_name = "DB_PATH")]
    pub db_path: PathBuf,

    /// Document dump to ingest (JSONL, one {"title", "body"} object per line)
    #[arg(short, long, value_name = "FILE")]
    pub source: PathBuf,

    /// Flush once more than this many distinct tokens are buffered
    #[arg(short, long, default_value = "2048")]
    pub threshold: usize,

    /// Character n-gram width
    #[arg(short, long, default_value = "2")]
    pub ngram: usize,
}

/// Arguments for showing statistics
#[derive(Parser, Debug, Clone)]
pub struct StatsArgs {
    /// Path to the index database file
    #[arg(value_name = "DB_PATH")]
    pub db_path: PathBuf,
}

/// Arguments for showing a token's postings
#[derive(Parser, Debug, Clone)]
pub struct PostingsArgs {
    /// Path to the index database file
    #[arg(value_name = "DB_PATH")]
    pub db_path: PathBuf,

    /// Token text to look up
    #[arg(value_name = "TOKEN")]
    pub token: String,

    /// Resolve document titles for each posting
    #[arg(long)]
    pub titles: bool,
}
