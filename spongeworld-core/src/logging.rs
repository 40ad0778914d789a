//! Logging setup driven by an explicit [`LoggingConfig`].
//!
//! Library code only emits `tracing` events; the binary (or a test) decides
//! once how they are rendered by calling [`init_logging`].

use tracing_subscriber::EnvFilter;

use crate::config::{LogFormat, LoggingConfig};
use crate::error::{SpongeError, SpongeResult};

/// Environment variable overriding the configured level.
pub const LOG_ENV_VAR: &str = "SPONGEWORLD_LOG";

/// Builds the event filter, letting `SPONGEWORLD_LOG` win over the config.
pub fn build_filter(config: &LoggingConfig) -> SpongeResult<EnvFilter> {
    let directive = std::env::var(LOG_ENV_VAR).unwrap_or_else(|_| config.level.clone());
    EnvFilter::try_new(&directive).map_err(|e| {
        SpongeError::Configuration(format!("Invalid log filter '{}': {}", directive, e))
    })
}

/// Installs the global subscriber.
///
/// Returns `Ok(false)` when a subscriber was already installed, which is
/// expected when several tests initialise logging.
pub fn init_logging(config: &LoggingConfig) -> SpongeResult<bool> {
    let filter = build_filter(config)?;
    let installed = match config.format {
        LogFormat::Compact => tracing_subscriber::fmt()
            .compact()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init()
            .is_ok(),
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init()
            .is_ok(),
    };
    Ok(installed)
}

/// Maps a `-v` count onto a level, starting from the configured one.
pub fn level_for_verbosity(base: &str, verbose: u8) -> String {
    match verbose {
        0 => base.to_string(),
        1 => "info".to_string(),
        2 => "debug".to_string(),
        _ => "trace".to_string(),
    }
}
