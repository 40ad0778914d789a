//! Test fixtures and data generators
//!
//! The reference dataset has 20 samples with metadata (`#SampleID`, `id`,
//! `group`) and 12 features of 150 bp:
//!
//! - [`GOOD_SEQ`] is present in S12..S20, the nine samples of `group=2`.
//! - [`BAD_SEQ`] is present in ten samples, six of `group=1` and four of
//!   `group=2`; only five of them exceed a relative abundance of 10/2500.
//! - S7 sums to 1700 reads, every other sample to 2500.
//! - The matrix also holds S21 and S22, which have no metadata, and the
//!   mapping file lists S99, which has no abundances. The mapping rows are in
//!   reverse order compared to the matrix columns.

use anyhow::Result;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde_json::{json, Value};
use std::path::PathBuf;

use crate::environment::TestEnvironment;

pub const GOOD_SEQ: &str = "TACGTAGGGTGCAAGCGTTAATCGGAATTACTGGGCGTAAAGCGTGCGCAGGCGGTTATGTAAGACAGTTGTGAAATCCCCGGGCTCAACCTGGGAACTGCATCTGTGACTGCATAGCTAGAGTACGGTAGAGGGGGATGGAATTCCGCG";
pub const BAD_SEQ: &str = "TACGGAGGATGCGAGCGTTATCTGGAATCATTGGGTTTAAAGGGTCCGTAGGCGGGTTGATAAGTCAGAGGTGAAAGCGCTTAGCTCAACTAAGCAACTGCCTTTGAAACTGTCAGTCTTGAATGATTGTGAAGTAGTTGGAATGTGTAG";

/// Retained samples in the reference dataset
pub const SAMPLE_COUNT: usize = 20;
/// Features in the reference dataset
pub const FEATURE_COUNT: usize = 12;
pub const SEQ_LENGTH: usize = 150;

/// On-disk layout of an abundance table fixture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableFormat {
    BiomSparse,
    BiomDense,
    Tsv,
    BiomSparseGzip,
}

/// Deterministic random DNA sequence
pub fn random_sequence(seed: u64, length: usize) -> String {
    let mut rng = StdRng::seed_from_u64(seed);
    let bases = ['A', 'C', 'G', 'T'];
    (0..length).map(|_| bases[rng.gen_range(0..4)]).collect()
}

/// In-memory abundance table that can be rendered in any supported format
#[derive(Debug, Clone, Default)]
pub struct TableFixture {
    pub features: Vec<String>,
    pub samples: Vec<String>,
    /// (feature row, sample column, count)
    pub entries: Vec<(usize, usize, f64)>,
    /// Per feature taxonomy as it should appear in the BIOM row metadata
    pub taxonomy: Vec<Option<Value>>,
}

impl TableFixture {
    pub fn new(features: &[&str], samples: &[&str]) -> Self {
        Self {
            features: features.iter().map(|s| s.to_string()).collect(),
            samples: samples.iter().map(|s| s.to_string()).collect(),
            entries: Vec::new(),
            taxonomy: vec![None; features.len()],
        }
    }

    pub fn with_entry(mut self, row: usize, col: usize, count: f64) -> Self {
        self.entries.push((row, col, count));
        self
    }

    pub fn with_taxonomy(mut self, row: usize, taxonomy: Value) -> Self {
        self.taxonomy[row] = Some(taxonomy);
        self
    }

    fn dense(&self) -> Vec<Vec<f64>> {
        let mut rows = vec![vec![0.0; self.samples.len()]; self.features.len()];
        for &(r, c, v) in &self.entries {
            rows[r][c] += v;
        }
        rows
    }

    fn taxonomy_string(&self, row: usize) -> Option<String> {
        match self.taxonomy.get(row)? {
            Some(Value::String(s)) => Some(s.clone()),
            Some(Value::Array(parts)) => Some(
                parts
                    .iter()
                    .filter_map(|p| p.as_str())
                    .collect::<Vec<_>>()
                    .join("; "),
            ),
            _ => None,
        }
    }

    /// BIOM 1.0 JSON document
    pub fn to_biom_json(&self, dense: bool) -> String {
        let rows: Vec<Value> = self
            .features
            .iter()
            .enumerate()
            .map(|(i, id)| match &self.taxonomy[i] {
                Some(tax) => json!({"id": id, "metadata": {"taxonomy": tax}}),
                None => json!({"id": id, "metadata": null}),
            })
            .collect();
        let columns: Vec<Value> = self
            .samples
            .iter()
            .map(|id| json!({"id": id, "metadata": null}))
            .collect();
        let (matrix_type, data) = if dense {
            ("dense", json!(self.dense()))
        } else {
            let triplets: Vec<Value> = self
                .entries
                .iter()
                .map(|&(r, c, v)| json!([r, c, v]))
                .collect();
            ("sparse", Value::Array(triplets))
        };
        json!({
            "id": "spongeworld-fixture",
            "format": "Biological Observation Matrix 1.0.0",
            "format_url": "http://biom-format.org",
            "type": "OTU table",
            "generated_by": "spongeworld-test",
            "date": "2016-01-01T00:00:00",
            "matrix_type": matrix_type,
            "matrix_element_type": "float",
            "shape": [self.features.len(), self.samples.len()],
            "data": data,
            "rows": rows,
            "columns": columns,
        })
        .to_string()
    }

    /// Classic tab-separated OTU table, with a taxonomy column when any
    /// feature carries one
    pub fn to_tsv(&self) -> String {
        let with_taxonomy = self.taxonomy.iter().any(|t| t.is_some());
        let mut out = String::from("# Constructed from biom file\n#OTU ID");
        for sample in &self.samples {
            out.push('\t');
            out.push_str(sample);
        }
        if with_taxonomy {
            out.push_str("\ttaxonomy");
        }
        out.push('\n');
        for (i, (feature, row)) in self.features.iter().zip(self.dense()).enumerate() {
            out.push_str(feature);
            for value in row {
                out.push('\t');
                out.push_str(&value.to_string());
            }
            if with_taxonomy {
                out.push('\t');
                out.push_str(&self.taxonomy_string(i).unwrap_or_default());
            }
            out.push('\n');
        }
        out
    }
}

/// Tab-delimited mapping file
pub fn metadata_tsv(header: &[&str], rows: &[Vec<&str>]) -> String {
    let mut out = header.join("\t");
    out.push('\n');
    for row in rows {
        out.push_str(&row.join("\t"));
        out.push('\n');
    }
    out
}

fn sample_name(n: usize) -> String {
    format!("S{}", n)
}

/// Abundance table of the reference dataset
pub fn reference_table() -> TableFixture {
    // Matrix column order: S1..S10, S21, S11..S20, S22
    let mut samples: Vec<String> = (1..=10).map(sample_name).collect();
    samples.push("S21".to_string());
    samples.extend((11..=20).map(sample_name));
    samples.push("S22".to_string());
    let column = |name: &str| samples.iter().position(|s| s == name).unwrap_or(0);

    let mut features = vec![GOOD_SEQ.to_string(), BAD_SEQ.to_string()];
    features.extend((1..FEATURE_COUNT - 1).map(|f| random_sequence(100 + f as u64, SEQ_LENGTH)));

    let mut taxonomy = vec![None; features.len()];
    taxonomy[0] = Some(json!(["k__Bacteria", "p__Proteobacteria"]));
    taxonomy[1] = Some(json!("k__Bacteria;p__Firmicutes"));

    let mut entries = Vec::new();
    let bad_counts = [
        ("S1", 50.0), ("S2", 50.0), ("S3", 5.0), ("S5", 5.0), ("S6", 5.0), ("S7", 3.0),
        ("S12", 50.0), ("S13", 50.0), ("S14", 50.0), ("S15", 5.0),
    ];

    for n in 1..=20usize {
        let name = sample_name(n);
        let col = column(&name);
        let total = if n == 7 { 1700.0 } else { 2500.0 };
        let mut used = 0.0;

        if n >= 12 {
            entries.push((0, col, 100.0));
            used += 100.0;
        }
        if let Some(&(_, count)) = bad_counts.iter().find(|(s, _)| *s == name) {
            entries.push((1, col, count));
            used += count;
        }
        for f in 3..features.len() {
            if (n + f) % 3 == 0 {
                entries.push((f, col, 10.0));
                used += 10.0;
            }
        }
        // First filler takes up the remaining reads
        entries.push((2, col, total - used));
    }

    // Samples without metadata; they must never influence results
    let s21 = column("S21");
    let s22 = column("S22");
    entries.push((0, s21, 400.0));
    entries.push((1, s21, 400.0));
    entries.push((2, s21, 200.0));
    entries.push((2, s22, 1000.0));

    TableFixture { features, samples, entries, taxonomy }
}

/// Mapping file of the reference dataset
pub fn reference_metadata() -> String {
    let mut rows: Vec<Vec<String>> = (1..=20usize)
        .rev()
        .map(|n| {
            let group = if n <= 11 { "1" } else { "2" };
            vec![sample_name(n), format!("id{}", n), group.to_string()]
        })
        .collect();
    rows.push(vec!["S99".to_string(), "id99".to_string(), "2".to_string()]);
    let rows: Vec<Vec<&str>> = rows
        .iter()
        .map(|r| r.iter().map(|s| s.as_str()).collect())
        .collect();
    metadata_tsv(&["#SampleID", "id", "group"], &rows)
}

/// Reference dataset written to a temporary directory
pub struct ReferenceDataset {
    pub env: TestEnvironment,
    pub abundance_path: PathBuf,
    pub metadata_path: PathBuf,
}

impl ReferenceDataset {
    /// Sparse BIOM JSON table plus mapping file
    pub fn create() -> Result<Self> {
        Self::create_with(TableFormat::BiomSparse)
    }

    pub fn create_with(format: TableFormat) -> Result<Self> {
        let env = TestEnvironment::new()?;
        let table = reference_table();
        let abundance_path = match format {
            TableFormat::BiomSparse => {
                env.write_file("test1.biom", table.to_biom_json(false).as_bytes())?
            }
            TableFormat::BiomDense => {
                env.write_file("test1.dense.biom", table.to_biom_json(true).as_bytes())?
            }
            TableFormat::Tsv => env.write_file("test1.tsv", table.to_tsv().as_bytes())?,
            TableFormat::BiomSparseGzip => {
                env.write_gzip("test1.biom.gz", table.to_biom_json(false).as_bytes())?
            }
        };
        let metadata_path = env.write_file("test1.map.txt", reference_metadata().as_bytes())?;
        Ok(Self { env, abundance_path, metadata_path })
    }
}
