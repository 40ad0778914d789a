//! The in-memory abundance store.
//!
//! Holds the normalised feature × sample matrix, the sequence index and the
//! sample metadata, joined so that matrix column `i` and metadata row `i`
//! describe the same sample. The store is built once and is read-only
//! afterwards, so it can be shared freely between threads.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::path::Path;
use tracing::{debug, info, warn};

use crate::formats::{read_abundance_table, RawTable};
use crate::matrix::SparseMatrix;
use crate::metadata::{MetadataTable, MISSING_VALUE};
use spongeworld_core::{FieldValueDistribution, SpongeError, SpongeResult, ValueDistributions};

/// Size and shape of a loaded dataset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetSummary {
    pub samples: usize,
    pub features: usize,
    pub seq_length: usize,
    pub nonzero_entries: usize,
    /// Samples present in the table but without metadata
    pub dropped_unmatched: usize,
    /// Samples whose abundances sum to zero
    pub dropped_empty: usize,
    pub fields: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct AbundanceStore {
    matrix: SparseMatrix,
    feature_ids: Vec<String>,
    index: HashMap<String, usize>,
    taxonomy: Vec<Option<String>>,
    metadata: MetadataTable,
    seq_length: usize,
    dropped_unmatched: usize,
    dropped_empty: usize,
}

impl AbundanceStore {
    /// Loads an abundance table and its sample mapping file.
    pub fn load<P: AsRef<Path>, Q: AsRef<Path>>(abundance: P, metadata: Q) -> SpongeResult<Self> {
        let abundance = abundance.as_ref();
        let metadata = metadata.as_ref();
        info!("Loading abundance table {}", abundance.display());
        let table = read_abundance_table(abundance)?;
        info!("Loading sample metadata {}", metadata.display());
        let mapping = MetadataTable::load(metadata)?;
        Self::from_parts(table, mapping)
    }

    /// Joins, normalises and indexes already parsed inputs.
    pub fn from_parts(table: RawTable, metadata: MetadataTable) -> SpongeResult<Self> {
        let RawTable { feature_ids, sample_ids, entries, mut taxonomy } = table;
        if feature_ids.is_empty() {
            return Err(SpongeError::load("abundance table has no features"));
        }
        taxonomy.resize(feature_ids.len(), None);

        let seq_length = feature_ids[0].chars().count();
        if let Some(bad) = feature_ids.iter().find(|id| id.chars().count() != seq_length) {
            return Err(SpongeError::load(format!(
                "feature '{}' has length {}, expected {} like the first feature",
                bad,
                bad.chars().count(),
                seq_length
            )));
        }

        let mut index = HashMap::with_capacity(feature_ids.len());
        let mut upper = Vec::with_capacity(feature_ids.len());
        for (row, id) in feature_ids.iter().enumerate() {
            let key = id.to_ascii_uppercase();
            if index.insert(key.clone(), row).is_some() {
                return Err(SpongeError::load(format!("duplicate feature id '{}'", id)));
            }
            upper.push(key);
        }

        let mut matrix = SparseMatrix::from_triplets(upper.len(), sample_ids.len(), entries)?;
        let sums = matrix.column_sums();

        // Inner join in matrix column order
        let positions = metadata.sample_positions();
        let mut columns = Vec::with_capacity(sample_ids.len());
        let mut rows = Vec::with_capacity(sample_ids.len());
        let mut dropped_unmatched = 0;
        let mut dropped_empty = 0;
        for (col, id) in sample_ids.iter().enumerate() {
            match positions.get(id.as_str()) {
                None => dropped_unmatched += 1,
                Some(_) if sums[col] <= 0.0 => {
                    warn!("Sample {} has no reads and is dropped", id);
                    dropped_empty += 1;
                }
                Some(&row) => {
                    columns.push(col);
                    rows.push(row);
                }
            }
        }
        if dropped_unmatched > 0 {
            debug!("{} samples without metadata dropped", dropped_unmatched);
        }
        let orphans = metadata.len().saturating_sub(rows.len() + dropped_empty);
        if orphans > 0 {
            debug!("{} metadata rows without abundance data ignored", orphans);
        }

        matrix = matrix.select_columns(&columns);
        matrix.normalize_columns();
        let metadata = metadata.select(&rows);

        info!(
            "Loaded {} features x {} samples (sequence length {})",
            matrix.n_rows(),
            matrix.n_cols(),
            seq_length
        );

        Ok(Self {
            matrix,
            feature_ids: upper,
            index,
            taxonomy,
            metadata,
            seq_length,
            dropped_unmatched,
            dropped_empty,
        })
    }

    /// Metadata fields in file order, minus `exclude`.
    pub fn fields(&self, exclude: &HashSet<&str>) -> Vec<String> {
        self.metadata
            .fields()
            .iter()
            .filter(|f| !exclude.contains(f.as_str()))
            .cloned()
            .collect()
    }

    /// Name of the sample identifier column
    pub fn id_field(&self) -> &str {
        self.metadata.id_field()
    }

    pub fn total_samples(&self) -> usize {
        self.matrix.n_cols()
    }

    /// Length every indexed sequence has; queries are cut to it.
    pub fn seq_length(&self) -> usize {
        self.seq_length
    }

    pub fn feature_count(&self) -> usize {
        self.feature_ids.len()
    }

    pub fn feature_ids(&self) -> &[String] {
        &self.feature_ids
    }

    pub fn sample_ids(&self) -> &[String] {
        self.metadata.sample_ids()
    }

    /// Truncates and upper-cases a query, or `None` when it is too short to
    /// ever match. Length is counted in characters, so a non-ASCII query is
    /// still counted towards the set; it simply matches nothing.
    pub fn canonicalize(&self, sequence: &str) -> Option<String> {
        let head: String = sequence.chars().take(self.seq_length).collect();
        if head.chars().count() < self.seq_length {
            return None;
        }
        Some(head.to_ascii_uppercase())
    }

    pub fn row_for(&self, sequence: &str) -> Option<usize> {
        let key = self.canonicalize(sequence)?;
        self.index.get(&key).copied()
    }

    /// Samples in which `sequence` is above `threshold`; 0 when unknown.
    pub fn observed_count(&self, sequence: &str, threshold: f64) -> usize {
        self.row_for(sequence)
            .map(|row| self.matrix.count_above(row, threshold))
            .unwrap_or(0)
    }

    /// Samples whose `field` equals `value`.
    pub fn value_sample_count(&self, field: &str, value: &str) -> SpongeResult<usize> {
        Ok(self.metadata.column(field)?.count_value(value))
    }

    /// Per value presence of a set of sequences within `field`.
    ///
    /// A sample counts once for every query sequence present in it, and the
    /// population of each value is scaled by the number of query sequences.
    /// Values observed fewer than `min_counts` times are left out, as are
    /// values never observed.
    pub fn field_value_counts<S: AsRef<str>>(
        &self,
        sequences: &[S],
        field: &str,
        threshold: f64,
        min_counts: usize,
    ) -> SpongeResult<ValueDistributions> {
        let column = self.metadata.column(field)?;
        let mut observed = vec![0usize; column.cardinality()];
        for sequence in sequences {
            if let Some(row) = self.row_for(sequence.as_ref()) {
                for (sample, value) in self.matrix.row(row) {
                    if value > threshold {
                        observed[column.code(sample) as usize] += 1;
                    }
                }
            }
        }

        let multiplicity = sequences.len();
        let mut counts = ValueDistributions::new();
        for (code, &seen) in observed.iter().enumerate() {
            if seen == 0 || seen < min_counts {
                continue;
            }
            let code = code as u32;
            counts.insert(
                column.value(code).to_string(),
                FieldValueDistribution {
                    total_samples: column.count(code) * multiplicity,
                    observed_samples: seen,
                },
            );
        }
        Ok(counts)
    }

    /// Taxonomy string of a sequence, `"na"` when unknown.
    pub fn taxonomy(&self, sequence: &str) -> String {
        self.row_for(sequence)
            .and_then(|row| self.taxonomy[row].clone())
            .unwrap_or_else(|| MISSING_VALUE.to_string())
    }

    /// Relative abundance of a sequence in one sample.
    pub fn abundance(&self, sequence: &str, sample_id: &str) -> Option<f64> {
        let row = self.row_for(sequence)?;
        let col = self.sample_ids().iter().position(|s| s == sample_id)?;
        Some(self.matrix.get(row, col))
    }

    pub fn matrix(&self) -> &SparseMatrix {
        &self.matrix
    }

    pub fn summary(&self) -> DatasetSummary {
        DatasetSummary {
            samples: self.total_samples(),
            features: self.feature_count(),
            seq_length: self.seq_length,
            nonzero_entries: self.matrix.nnz(),
            dropped_unmatched: self.dropped_unmatched,
            dropped_empty: self.dropped_empty,
            fields: self.metadata.fields().to_vec(),
        }
    }
}
