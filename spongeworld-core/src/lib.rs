//! Core utilities and types shared across all Spongeworld crates

pub mod config;
pub mod error;
pub mod logging;
pub mod types;

// Re-export commonly used types
pub use error::{SpongeError, SpongeResult};
pub use config::{
    Config, DataConfig, LogFormat, LoggingConfig, PerformanceConfig, QueryConfig,
    load_config, save_config,
};
pub use logging::init_logging;

pub use types::{
    FieldValueDistribution, OutputFormat, QueryRequest, QueryResult, SequenceInput,
    ValueDistributions,
};

/// Version information for the Spongeworld project
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");
