//! Test utilities for the Spongeworld workspace
//!
//! This crate provides common test helpers, fixtures, and utilities for testing
//! across the Spongeworld workspace.
//!
//! # Features
//!
//! - **Test Environment**: Isolated temporary directories with automatic cleanup
//! - **Fixtures**: The 20 sample reference dataset and builders for ad hoc tables
//! - **Assertions**: Floating point helpers for abundance checks

pub mod assertions;
pub mod environment;
pub mod fixtures;

// Re-export commonly used items
pub use assertions::{assert_close, assert_sorted_desc};
pub use environment::TestEnvironment;
pub use fixtures::{
    metadata_tsv, random_sequence, reference_metadata, reference_table, ReferenceDataset,
    TableFormat, TableFixture, BAD_SEQ, FEATURE_COUNT, GOOD_SEQ, SAMPLE_COUNT, SEQ_LENGTH,
};

// Re-export test dependencies for convenience
pub use anyhow::{Context, Result};
pub use tempfile;

/// Initialize test logging (safe to call from every test)
pub fn init_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter(tracing_subscriber::EnvFilter::new("debug"))
        .try_init();
}
