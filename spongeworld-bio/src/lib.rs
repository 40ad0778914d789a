//! Abundance data for Spongeworld: table readers, sample metadata and the
//! indexed store queries run against.

pub mod formats;
pub mod matrix;
pub mod metadata;
pub mod store;

// Re-export commonly used types
pub use formats::fasta::read_query_sequences;
pub use formats::{read_abundance_table, AbundanceFormat, RawTable};
pub use matrix::SparseMatrix;
pub use metadata::{MetadataTable, MISSING_VALUE};
pub use store::{AbundanceStore, DatasetSummary};
