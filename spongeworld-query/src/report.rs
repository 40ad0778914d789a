//! Annotation report for a sequence or a set of sequences.

use serde::Serialize;

use crate::engine::{sequence_info, QueryOptions};
use crate::ranking::rank_annotations;
use crate::shares::{value_shares, ShareMode, Slice};
use spongeworld_bio::AbundanceStore;
use spongeworld_core::{QueryConfig, SequenceInput, SpongeResult};

/// Enrichment of one highlighted field
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldSummary {
    pub field: String,
    pub significant: Vec<String>,
    /// Where the query was observed
    pub observed_shares: Vec<Slice>,
    /// How the dataset's samples are spread over the field
    pub population_shares: Vec<Slice>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SequenceAnnotations {
    /// The sequence itself, or `Set of N sequences`
    pub name: String,
    pub taxonomy: String,
    pub total_samples: usize,
    pub total_observed: usize,
    pub presence_fraction: f64,
    pub fields: Vec<FieldSummary>,
    /// Ranking over every field
    pub all: Vec<String>,
}

impl SequenceAnnotations {
    pub fn is_observed(&self) -> bool {
        self.total_observed > 0
    }
}

fn set_label(count: usize) -> String {
    format!("Set of {} sequences", count)
}

/// Runs a query over all fields and summarises its significant values.
pub fn annotate(
    store: &AbundanceStore,
    input: &SequenceInput,
    config: &QueryConfig,
) -> SpongeResult<SequenceAnnotations> {
    let options = QueryOptions::from_config(config);
    let result = sequence_info(store, input, &options)?;

    let (name, taxonomy) = match input {
        SequenceInput::Single(seq) => (seq.clone(), store.taxonomy(seq)),
        SequenceInput::Many(seqs) => (set_label(seqs.len()), set_label(seqs.len())),
    };

    let mut fields = Vec::new();
    let mut all = Vec::new();
    if result.total_observed > 0 {
        for field in &config.highlight_fields {
            if !result.info.contains_key(field) {
                continue;
            }
            fields.push(FieldSummary {
                field: field.clone(),
                significant: rank_annotations(
                    &result,
                    config.p_value_cutoff,
                    Some(field.as_str()),
                ),
                observed_shares: value_shares(&result, field, ShareMode::Observed, 0.0)?,
                population_shares: value_shares(&result, field, ShareMode::Population, 0.0)?,
            });
        }
        all = rank_annotations(&result, config.p_value_cutoff, None);
    }

    Ok(SequenceAnnotations {
        name,
        taxonomy,
        total_samples: result.total_samples,
        total_observed: result.total_observed,
        presence_fraction: result.presence_fraction(),
        fields,
        all,
    })
}
