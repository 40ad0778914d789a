//! Readers for abundance tables and query sequence files.

pub mod biom;
pub mod fasta;
pub mod tsv;

use flate2::read::MultiGzDecoder;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::debug;

use spongeworld_core::{SpongeError, SpongeResult};

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];
const HDF5_MAGIC: [u8; 8] = [0x89, b'H', b'D', b'F', b'\r', b'\n', 0x1a, b'\n'];

/// Feature × sample table as read from disk, before any joining or
/// normalisation.
#[derive(Debug, Clone, Default)]
pub struct RawTable {
    pub feature_ids: Vec<String>,
    pub sample_ids: Vec<String>,
    /// `(feature row, sample column, value)`
    pub entries: Vec<(usize, usize, f64)>,
    /// Per feature taxonomy, when the table carries one
    pub taxonomy: Vec<Option<String>>,
}

/// Abundance table layouts we understand
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AbundanceFormat {
    BiomJson,
    Tsv,
}

/// Reads a whole file, transparently decompressing gzip input.
pub fn read_input<P: AsRef<Path>>(path: P) -> SpongeResult<Vec<u8>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| {
        SpongeError::load(format!("cannot open {}: {}", path.display(), e))
    })?;
    let mut reader = BufReader::new(file);
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;

    if bytes.starts_with(&GZIP_MAGIC) {
        debug!("Decompressing gzip input {}", path.display());
        let mut decoded = Vec::new();
        MultiGzDecoder::new(&bytes[..])
            .read_to_end(&mut decoded)
            .map_err(|e| SpongeError::load(format!("corrupt gzip file {}: {}", path.display(), e)))?;
        bytes = decoded;
    }
    Ok(bytes)
}

/// Guesses the table layout from its first bytes.
pub fn detect_format(bytes: &[u8]) -> SpongeResult<AbundanceFormat> {
    if bytes.starts_with(&HDF5_MAGIC) {
        return Err(SpongeError::load(
            "HDF5 BIOM tables are not supported; convert with `biom convert --to-json`",
        ));
    }
    match bytes.iter().find(|b| !b.is_ascii_whitespace()) {
        Some(b'{') => Ok(AbundanceFormat::BiomJson),
        Some(_) => Ok(AbundanceFormat::Tsv),
        None => Err(SpongeError::load("abundance table is empty")),
    }
}

/// Reads an abundance table in any supported layout.
pub fn read_abundance_table<P: AsRef<Path>>(path: P) -> SpongeResult<RawTable> {
    let path = path.as_ref();
    let bytes = read_input(path)?;
    let table = match detect_format(&bytes)? {
        AbundanceFormat::BiomJson => biom::parse_biom_json(&bytes),
        AbundanceFormat::Tsv => {
            let text = std::str::from_utf8(&bytes).map_err(|e| {
                SpongeError::load(format!("{} is not valid UTF-8: {}", path.display(), e))
            })?;
            tsv::parse_tsv_table(text)
        }
    }
    .map_err(|e| match e {
        SpongeError::Load(msg) => SpongeError::Load(format!("{}: {}", path.display(), msg)),
        other => other,
    })?;
    debug!(
        "Read {} features x {} samples ({} entries) from {}",
        table.feature_ids.len(),
        table.sample_ids.len(),
        table.entries.len(),
        path.display()
    );
    Ok(table)
}
