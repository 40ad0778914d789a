//! Many independent queries against one store, answered in parallel.

use rayon::prelude::*;
use tracing::info;

use crate::engine::{sequence_info, QueryOptions};
use spongeworld_bio::AbundanceStore;
use spongeworld_core::{QueryResult, SequenceInput, SpongeResult};

/// Runs every query on the current rayon pool. Results keep the input order
/// and each query fails or succeeds on its own.
pub fn sequence_info_batch(
    store: &AbundanceStore,
    queries: &[SequenceInput],
    options: &QueryOptions,
) -> Vec<SpongeResult<QueryResult>> {
    info!(
        "Running {} queries on {} threads",
        queries.len(),
        rayon::current_num_threads()
    );
    queries
        .par_iter()
        .map(|query| sequence_info(store, query, options))
        .collect()
}
