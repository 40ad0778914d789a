//! Query sequences supplied as a FASTA (or FASTQ) file.

use std::path::Path;
use tracing::debug;

use spongeworld_core::{SpongeError, SpongeResult};

/// Reads every record of a FASTA/FASTQ file (optionally gzip-compressed) and
/// returns the bare sequences, in file order.
pub fn read_query_sequences<P: AsRef<Path>>(path: P) -> SpongeResult<Vec<String>> {
    let path = path.as_ref();
    let mut reader = needletail::parse_fastx_file(path).map_err(|e| {
        SpongeError::InvalidInput(format!(
            "{} is not a readable fasta file: {}",
            path.display(),
            e
        ))
    })?;

    let mut sequences = Vec::new();
    while let Some(record) = reader.next() {
        let record = record.map_err(|e| {
            SpongeError::InvalidInput(format!("malformed record in {}: {}", path.display(), e))
        })?;
        sequences.push(String::from_utf8_lossy(&record.seq()).into_owned());
    }

    if sequences.is_empty() {
        return Err(SpongeError::InvalidInput(format!(
            "no sequences found in {}",
            path.display()
        )));
    }
    debug!("Read {} query sequences from {}", sequences.len(), path.display());
    Ok(sequences)
}
