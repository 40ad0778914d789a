//! Sequence presence queries over a loaded abundance store.
//!
//! - [`engine`]: how often and where a sequence (or a set) is observed
//! - [`ranking`]: binomial enrichment ranking of field values
//! - [`report`]: the per-sequence annotation summary
//! - [`shares`]: pie chart slices per field
//! - [`gate`] and [`request`]: the shared dataset and the JSON boundary
//! - [`batch`]: parallel independent queries

pub mod batch;
pub mod engine;
pub mod gate;
pub mod ranking;
pub mod report;
pub mod request;
pub mod shares;

pub use batch::sequence_info_batch;
pub use engine::{sequence_info, QueryOptions};
pub use gate::StoreGate;
pub use ranking::{binomial_cdf, rank_annotations, significant_values, Annotation};
pub use report::{annotate, FieldSummary, SequenceAnnotations};
pub use request::{handle_request, Response};
pub use shares::{value_shares, ShareMode, Slice};
