/// Integration tests for configuration loading and saving
use pretty_assertions::assert_eq;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

use spongeworld_core::config::{default_config, load_config, save_config, Config};
use spongeworld_core::{LogFormat, SpongeError};

fn write(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_partial_config_keeps_defaults() {
    let dir = TempDir::new().unwrap();
    let path = write(
        &dir,
        "spongeworld.toml",
        r#"
[query]
min_counts = 2
highlight_fields = ["env_biome"]
"#,
    );

    let config = load_config(&path).unwrap();
    assert_eq!(config.query.min_counts, 2);
    assert_eq!(config.query.highlight_fields, vec!["env_biome".to_string()]);
    assert_eq!(config.query.threshold, 0.0);
    assert_eq!(config.query.p_value_cutoff, 0.1);
    assert_eq!(config.data.abundance_table, "data/final.withtax.biom");
    assert_eq!(config.logging.level, "warn");
    assert_eq!(config.performance.threads, 0);
}

#[test]
fn test_base_dir_prefixes_relative_tables() {
    let dir = TempDir::new().unwrap();
    let path = write(
        &dir,
        "spongeworld.toml",
        r#"
[data]
base_dir = "/srv/spongeworld"
abundance_table = "emp.biom.gz"
"#,
    );

    let config = load_config(&path).unwrap();
    assert_eq!(
        config.data.abundance_path(),
        PathBuf::from("/srv/spongeworld/emp.biom.gz")
    );
    assert_eq!(
        config.data.metadata_path(),
        PathBuf::from("/srv/spongeworld/data/map.txt")
    );
}

#[test]
fn test_config_validation() {
    let dir = TempDir::new().unwrap();

    let negative = write(&dir, "negative.toml", "[query]\nthreshold = -0.5\n");
    match load_config(&negative) {
        Err(SpongeError::Configuration(msg)) => assert!(msg.contains("threshold")),
        other => panic!("expected configuration error, got {:?}", other),
    }

    let cutoff = write(&dir, "cutoff.toml", "[query]\np_value_cutoff = 0.0\n");
    assert!(matches!(
        load_config(&cutoff),
        Err(SpongeError::Configuration(_))
    ));

    let garbage = write(&dir, "garbage.toml", "[query\nmin_counts = ");
    match load_config(&garbage) {
        Err(SpongeError::Configuration(msg)) => assert!(msg.starts_with("Failed to parse config")),
        other => panic!("expected parse error, got {:?}", other),
    }
}

#[test]
fn test_missing_config_file_is_io_error() {
    let dir = TempDir::new().unwrap();
    let result = load_config(dir.path().join("absent.toml"));
    assert!(matches!(result, Err(SpongeError::Io(_))));
}

#[test]
fn test_config_serialization_preservation() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("saved.toml");

    let mut config = default_config();
    config.data.base_dir = Some("/data".to_string());
    config.query.threshold = 0.001;
    config.query.exclude_fields = vec!["BarcodeSequence".to_string()];
    config.logging.format = LogFormat::Json;
    config.performance.threads = 8;

    save_config(&path, &config).unwrap();
    let loaded = load_config(&path).unwrap();

    assert_eq!(loaded.data.base_dir.as_deref(), Some("/data"));
    assert_eq!(loaded.query.threshold, 0.001);
    assert_eq!(loaded.query.exclude_fields, config.query.exclude_fields);
    assert_eq!(loaded.logging.format, LogFormat::Json);
    assert_eq!(loaded.performance.threads, 8);
}

#[test]
fn test_unknown_log_format_rejected() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "log.toml", "[logging]\nformat = \"pretty\"\n");
    assert!(load_config(&path).is_err());
}

#[test]
fn test_default_config_is_valid() {
    let config = Config::default();
    assert!(config.validate().is_ok());
    assert_eq!(
        config.query.highlight_fields,
        vec!["host_scientific_name", "env_feature", "country"]
    );
}
