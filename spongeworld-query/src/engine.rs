//! Per-sequence and per-field presence statistics.

use indexmap::IndexMap;
use std::collections::HashSet;
use tracing::debug;

use spongeworld_bio::AbundanceStore;
use spongeworld_core::{QueryConfig, QueryResult, SequenceInput, SpongeError, SpongeResult};

/// Knobs of a single query
#[derive(Debug, Clone, PartialEq)]
pub struct QueryOptions {
    /// Fields to break the result down by; all non-identifier fields when
    /// `None`
    pub fields: Option<Vec<String>>,
    /// Relative abundance a sequence must exceed to count as present
    pub threshold: f64,
    /// Values observed fewer times are left out of the result
    pub min_counts: usize,
    /// Hidden from the default field list
    pub exclude_fields: Vec<String>,
}

impl Default for QueryOptions {
    fn default() -> Self {
        Self {
            fields: None,
            threshold: 0.0,
            min_counts: 4,
            exclude_fields: Vec::new(),
        }
    }
}

impl QueryOptions {
    pub fn from_config(config: &QueryConfig) -> Self {
        Self {
            fields: None,
            threshold: config.threshold,
            min_counts: config.min_counts,
            exclude_fields: config.exclude_fields.clone(),
        }
    }

    pub fn with_fields(mut self, fields: Vec<String>) -> Self {
        self.fields = Some(fields);
        self
    }

    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn with_min_counts(mut self, min_counts: usize) -> Self {
        self.min_counts = min_counts;
        self
    }

    fn resolve_fields(&self, store: &AbundanceStore) -> Vec<String> {
        match &self.fields {
            Some(fields) => fields.clone(),
            None => {
                let mut exclude: HashSet<&str> =
                    self.exclude_fields.iter().map(String::as_str).collect();
                exclude.insert(store.id_field());
                store.fields(&exclude)
            }
        }
    }
}

/// How often, and in which samples, a sequence or a set of sequences is
/// observed.
///
/// Sequences shorter than the indexed length are skipped. The remaining ones
/// are counted together: every total is multiplied by the number of usable
/// sequences, so a set of `n` sequences is measured against `n` copies of
/// the sample population. Unknown sequences are usable but contribute no
/// observations.
pub fn sequence_info(
    store: &AbundanceStore,
    input: &SequenceInput,
    options: &QueryOptions,
) -> SpongeResult<QueryResult> {
    if !options.threshold.is_finite() || options.threshold < 0.0 {
        return Err(SpongeError::InvalidInput(format!(
            "threshold must be a non-negative number, got {}",
            options.threshold
        )));
    }

    let usable: Vec<String> = input
        .as_slice()
        .iter()
        .filter_map(|seq| store.canonicalize(seq))
        .collect();
    if usable.is_empty() {
        return Err(SpongeError::TooShort { min_length: store.seq_length() });
    }
    if usable.len() < input.len() {
        debug!(
            "Skipped {} of {} sequences shorter than {}",
            input.len() - usable.len(),
            input.len(),
            store.seq_length()
        );
    }

    let total_observed = usable
        .iter()
        .map(|seq| store.observed_count(seq, options.threshold))
        .sum();
    let total_samples = store.total_samples() * usable.len();

    let mut info = IndexMap::new();
    for field in options.resolve_fields(store) {
        let counts =
            store.field_value_counts(&usable, &field, options.threshold, options.min_counts)?;
        info.insert(field, counts);
    }

    debug!(
        "Query of {} sequences observed {}/{}",
        usable.len(),
        total_observed,
        total_samples
    );
    Ok(QueryResult { total_samples, total_observed, info })
}
