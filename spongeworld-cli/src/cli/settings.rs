/// Effective settings of one invocation.
///
/// Precedence is command-line flag, then `SPONGEWORLD_*` variable (both
/// handled by clap), then the configuration file, then built-in defaults.
use anyhow::Result;
use std::path::PathBuf;
use tracing::debug;

use super::Cli;
use spongeworld_bio::AbundanceStore;
use spongeworld_core::logging::level_for_verbosity;
use spongeworld_core::{load_config, Config};

pub struct Settings {
    pub config: Config,
    pub abundance: PathBuf,
    pub metadata: PathBuf,
    pub threads: usize,
}

impl Settings {
    pub fn resolve(cli: &Cli) -> Result<Self> {
        let mut config = match &cli.config {
            Some(path) => load_config(path)?,
            None => Config::default(),
        };

        config.logging.level = level_for_verbosity(&config.logging.level, cli.verbose);
        if let Some(format) = cli.log_format {
            config.logging.format = format;
        }

        let abundance = cli
            .abundance
            .clone()
            .unwrap_or_else(|| config.data.abundance_path());
        let metadata = cli
            .metadata
            .clone()
            .unwrap_or_else(|| config.data.metadata_path());

        let threads = match cli.threads.unwrap_or(config.performance.threads) {
            0 => num_cpus::get(),
            n => n,
        };

        Ok(Self { config, abundance, metadata, threads })
    }

    pub fn load_store(&self) -> Result<AbundanceStore> {
        debug!(
            "Loading dataset from {} and {}",
            self.abundance.display(),
            self.metadata.display()
        );
        Ok(AbundanceStore::load(&self.abundance, &self.metadata)?)
    }
}
