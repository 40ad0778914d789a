pub mod commands;
pub mod output;
pub mod settings;

use clap::{Parser, Subcommand};
use spongeworld_core::LogFormat;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "spongeworld",
    version,
    about = "Where in the world is a 16S sequence: presence across samples by metadata",
    long_about = "Spongeworld looks up exact 16S amplicon sequences in a sample by feature \
                  abundance table and reports in how many samples they are observed, broken \
                  down by sample metadata, with a binomial enrichment ranking of the values."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file (TOML)
    #[arg(short, long, global = true, env = "SPONGEWORLD_CONFIG", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Abundance table (BIOM JSON or tab-separated, optionally gzipped)
    #[arg(long, global = true, env = "SPONGEWORLD_ABUNDANCE", value_name = "FILE")]
    pub abundance: Option<PathBuf>,

    /// Tab-delimited sample metadata
    #[arg(long, global = true, env = "SPONGEWORLD_METADATA", value_name = "FILE")]
    pub metadata: Option<PathBuf>,

    /// Verbosity level (can be repeated)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Number of threads to use (0 = all available)
    #[arg(short = 'j', long, global = true, env = "SPONGEWORLD_THREADS")]
    pub threads: Option<usize>,

    /// Log line format
    #[arg(long, value_enum, global = true)]
    pub log_format: Option<LogFormat>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the size and shape of the dataset
    Summary(commands::summary::SummaryArgs),

    /// List the metadata fields a query is broken down by
    Fields(commands::fields::FieldsArgs),

    /// Presence of sequences per metadata field value (JSON)
    Info(commands::info::InfoArgs),

    /// Significantly enriched metadata values for sequences
    Annotate(commands::annotate::AnnotateArgs),

    /// Answer a JSON sequence/info request from a file or stdin
    Request(commands::request::RequestArgs),
}
