/// Core types shared across all Spongeworld modules
pub mod format;
pub mod query;

pub use format::OutputFormat;
pub use query::{
    FieldValueDistribution, QueryRequest, QueryResult, SequenceInput, ValueDistributions,
};
