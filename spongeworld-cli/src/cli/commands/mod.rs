pub mod annotate;
pub mod fields;
pub mod info;
pub mod request;
pub mod summary;

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use spongeworld_bio::read_query_sequences;
use spongeworld_core::{QueryConfig, SequenceInput, SpongeError};

/// One sequence stays `Single` so reports can name it.
pub fn into_input(mut sequences: Vec<String>) -> SequenceInput {
    match sequences.len() {
        1 => SequenceInput::Single(sequences.remove(0)),
        _ => SequenceInput::Many(sequences),
    }
}

/// Query sequences and presence settings shared by the query commands
#[derive(Args, Debug, Clone)]
pub struct QueryArgs {
    /// Query sequence (repeat for a set of sequences)
    #[arg(short, long = "sequence", value_name = "SEQ")]
    pub sequences: Vec<String>,

    /// Read the query sequences from a FASTA/FASTQ file
    #[arg(long, value_name = "FILE", conflicts_with = "sequences")]
    pub fasta: Option<PathBuf>,

    /// Relative abundance a sequence must exceed to count as present
    #[arg(short, long)]
    pub threshold: Option<f64>,

    /// Drop field values observed fewer times than this
    #[arg(long)]
    pub min_counts: Option<usize>,
}

impl QueryArgs {
    /// The sequences from the flags or the FASTA file.
    pub fn sequences(&self) -> Result<Vec<String>> {
        let sequences = match &self.fasta {
            Some(path) => read_query_sequences(path)?,
            None => self.sequences.clone(),
        };
        if sequences.is_empty() {
            return Err(SpongeError::MissingParameter("sequence".to_string()).into());
        }
        Ok(sequences)
    }

    pub fn input(&self) -> Result<SequenceInput> {
        Ok(into_input(self.sequences()?))
    }

    /// Configured query settings with the flags applied on top
    pub fn apply(&self, config: &QueryConfig) -> QueryConfig {
        let mut config = config.clone();
        if let Some(threshold) = self.threshold {
            config.threshold = threshold;
        }
        if let Some(min_counts) = self.min_counts {
            config.min_counts = min_counts;
        }
        config
    }
}
