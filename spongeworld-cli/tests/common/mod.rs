#![allow(dead_code)]

use anyhow::Result;
use assert_cmd::Command;
use std::path::{Path, PathBuf};

pub use spongeworld_test::{ReferenceDataset, TestEnvironment, BAD_SEQ, GOOD_SEQ};

/// The binary with a clean `SPONGEWORLD_*` environment
pub fn spongeworld_cmd() -> Command {
    let mut cmd = Command::cargo_bin("spongeworld").unwrap();
    for var in [
        "SPONGEWORLD_CONFIG",
        "SPONGEWORLD_ABUNDANCE",
        "SPONGEWORLD_METADATA",
        "SPONGEWORLD_THREADS",
        "SPONGEWORLD_LOG",
    ] {
        cmd.env_remove(var);
    }
    cmd
}

/// The binary pointed at the reference dataset
pub fn dataset_cmd(dataset: &ReferenceDataset) -> Command {
    let mut cmd = spongeworld_cmd();
    cmd.arg("--abundance")
        .arg(&dataset.abundance_path)
        .arg("--metadata")
        .arg(&dataset.metadata_path);
    cmd
}

/// Write a query FASTA with one record per sequence
pub fn write_fasta(env: &TestEnvironment, name: &str, sequences: &[&str]) -> Result<PathBuf> {
    let mut content = String::new();
    for (i, seq) in sequences.iter().enumerate() {
        content.push_str(&format!(">query_{}\n{}\n", i, seq));
    }
    env.write_file(name, content.as_bytes())
}

/// Write a configuration file pointing at the given tables
pub fn write_config(
    env: &TestEnvironment,
    abundance: &Path,
    metadata: &Path,
    extra: &str,
) -> Result<PathBuf> {
    let content = format!(
        "[data]\nabundance_table = \"{}\"\nmetadata_table = \"{}\"\n{}",
        abundance.display(),
        metadata.display(),
        extra
    );
    env.write_file("spongeworld.toml", content.as_bytes())
}

/// Parse stdout of a finished command as JSON
pub fn stdout_json(output: &std::process::Output) -> Result<serde_json::Value> {
    Ok(serde_json::from_slice(&output.stdout)?)
}
