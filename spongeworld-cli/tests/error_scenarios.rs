mod common;

use anyhow::Result;
use predicates::prelude::*;

use common::*;

#[test]
fn test_missing_dataset_files() -> Result<()> {
    let env = TestEnvironment::new()?;

    spongeworld_cmd()
        .arg("--abundance")
        .arg(env.path("missing.biom"))
        .arg("--metadata")
        .arg(env.path("missing.txt"))
        .arg("summary")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"))
        .code(4);

    Ok(())
}

#[test]
fn test_malformed_table() -> Result<()> {
    let dataset = ReferenceDataset::create()?;
    let broken = dataset.env.write_file("broken.biom", b"{ \"shape\": [1, ")?;

    spongeworld_cmd()
        .arg("--abundance")
        .arg(&broken)
        .arg("--metadata")
        .arg(&dataset.metadata_path)
        .arg("summary")
        .assert()
        .failure()
        .stderr(predicate::str::contains("malformed BIOM JSON"))
        .code(4);

    Ok(())
}

#[test]
fn test_all_sequences_too_short() -> Result<()> {
    let dataset = ReferenceDataset::create()?;

    dataset_cmd(&dataset)
        .args(["info", "-s", "ACGT", "-s", "AAA"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("minimal length is 150"))
        .code(5);

    Ok(())
}

#[test]
fn test_unknown_field() -> Result<()> {
    let dataset = ReferenceDataset::create()?;

    dataset_cmd(&dataset)
        .args(["info", "-s", GOOD_SEQ, "--field", "country"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown metadata field: country"))
        .code(5);

    Ok(())
}

#[test]
fn test_no_sequences() -> Result<()> {
    let dataset = ReferenceDataset::create()?;

    dataset_cmd(&dataset)
        .arg("info")
        .assert()
        .failure()
        .stderr(predicate::str::contains("sequence parameter missing"))
        .code(5);

    Ok(())
}

#[test]
fn test_empty_fasta() -> Result<()> {
    let dataset = ReferenceDataset::create()?;
    let fasta = dataset.env.write_file("empty.fa", b"")?;

    dataset_cmd(&dataset)
        .arg("info")
        .arg("--fasta")
        .arg(&fasta)
        .assert()
        .failure()
        .code(5);

    Ok(())
}

#[test]
fn test_invalid_config() -> Result<()> {
    let env = TestEnvironment::new()?;
    let config = env.write_file("bad.toml", b"[query]\np_value_cutoff = 2.0\n")?;

    spongeworld_cmd()
        .arg("--config")
        .arg(&config)
        .arg("summary")
        .assert()
        .failure()
        .stderr(predicate::str::contains("p_value_cutoff"))
        .code(2);

    Ok(())
}

#[test]
fn test_sequence_and_fasta_conflict() -> Result<()> {
    let dataset = ReferenceDataset::create()?;
    let fasta = write_fasta(&dataset.env, "q.fa", &[GOOD_SEQ])?;

    dataset_cmd(&dataset)
        .args(["info", "-s", GOOD_SEQ])
        .arg("--fasta")
        .arg(&fasta)
        .assert()
        .failure()
        .code(2);

    Ok(())
}
