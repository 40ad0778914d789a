//! Configuration types for Spongeworld

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use crate::SpongeError;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub query: QueryConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub performance: PerformanceConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    /// BIOM (JSON) or tab-separated abundance table
    #[serde(default = "default_abundance_table")]
    pub abundance_table: String,
    /// Tab-delimited sample metadata, first column is the sample id
    #[serde(default = "default_metadata_table")]
    pub metadata_table: String,
    /// Prefix for relative table paths
    #[serde(default)]
    pub base_dir: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryConfig {
    /// Presence call is `abundance > threshold`
    #[serde(default = "default_threshold")]
    pub threshold: f64,
    /// Field values observed fewer times than this are not reported
    #[serde(default = "default_min_counts")]
    pub min_counts: usize,
    #[serde(default = "default_p_value_cutoff")]
    pub p_value_cutoff: f64,
    /// Fields summarised individually in annotation reports
    #[serde(default = "default_highlight_fields")]
    pub highlight_fields: Vec<String>,
    /// Fields hidden from the default field list, besides the sample id
    #[serde(default)]
    pub exclude_fields: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Any `EnvFilter` directive, e.g. `warn` or `spongeworld_bio=debug`
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub format: LogFormat,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PerformanceConfig {
    /// Worker threads for batch queries (0 = all available)
    #[serde(default)]
    pub threads: usize,
}

// Default value functions
fn default_abundance_table() -> String { "data/final.withtax.biom".to_string() }
fn default_metadata_table() -> String { "data/map.txt".to_string() }
fn default_threshold() -> f64 { 0.0 }
fn default_min_counts() -> usize { 4 }
fn default_p_value_cutoff() -> f64 { 0.1 }
fn default_highlight_fields() -> Vec<String> {
    vec![
        "host_scientific_name".to_string(),
        "env_feature".to_string(),
        "country".to_string(),
    ]
}
fn default_log_level() -> String { "warn".to_string() }

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            abundance_table: default_abundance_table(),
            metadata_table: default_metadata_table(),
            base_dir: None,
        }
    }
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            threshold: default_threshold(),
            min_counts: default_min_counts(),
            p_value_cutoff: default_p_value_cutoff(),
            highlight_fields: default_highlight_fields(),
            exclude_fields: Vec::new(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

impl Default for PerformanceConfig {
    fn default() -> Self {
        Self { threads: 0 }
    }
}

impl DataConfig {
    fn resolve(&self, file: &str) -> PathBuf {
        match &self.base_dir {
            Some(base) => Path::new(base).join(file),
            None => PathBuf::from(file),
        }
    }

    pub fn abundance_path(&self) -> PathBuf {
        self.resolve(&self.abundance_table)
    }

    pub fn metadata_path(&self) -> PathBuf {
        self.resolve(&self.metadata_table)
    }
}

impl QueryConfig {
    pub fn validate(&self) -> Result<(), SpongeError> {
        if !self.threshold.is_finite() || self.threshold < 0.0 {
            return Err(SpongeError::Configuration(format!(
                "threshold must be a non-negative number, got {}",
                self.threshold
            )));
        }
        if !(self.p_value_cutoff > 0.0 && self.p_value_cutoff <= 1.0) {
            return Err(SpongeError::Configuration(format!(
                "p_value_cutoff must be in (0, 1], got {}",
                self.p_value_cutoff
            )));
        }
        Ok(())
    }
}

impl Config {
    pub fn validate(&self) -> Result<(), SpongeError> {
        self.query.validate()
    }
}

pub fn default_config() -> Config {
    Config::default()
}

pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, SpongeError> {
    let contents = std::fs::read_to_string(path)?;
    let config: Config = toml::from_str(&contents)
        .map_err(|e| SpongeError::Configuration(format!("Failed to parse config: {}", e)))?;
    config.validate()?;
    Ok(config)
}

pub fn save_config<P: AsRef<Path>>(path: P, config: &Config) -> Result<(), SpongeError> {
    let contents = toml::to_string_pretty(config)
        .map_err(|e| SpongeError::Configuration(format!("Failed to serialize config: {}", e)))?;
    std::fs::write(path, contents)?;
    Ok(())
}
