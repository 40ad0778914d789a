//! BIOM 1.0 (JSON) abundance tables.
//!
//! Both `sparse` (list of `[row, column, value]` triplets) and `dense`
//! (list of rows) matrices are accepted. Row metadata may carry a
//! `taxonomy` given either as a string or as a list of ranks.

use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::HashMap;

use super::RawTable;
use spongeworld_core::{SpongeError, SpongeResult};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "lowercase")]
enum MatrixType {
    Sparse,
    Dense,
}

#[derive(Debug, Deserialize)]
struct BiomEntry {
    id: String,
    #[serde(default)]
    metadata: Option<Map<String, Value>>,
}

#[derive(Debug, Deserialize)]
struct BiomDocument {
    #[serde(default)]
    format: Option<String>,
    matrix_type: MatrixType,
    shape: [usize; 2],
    data: Vec<Vec<f64>>,
    rows: Vec<BiomEntry>,
    columns: Vec<BiomEntry>,
}

fn taxonomy_of(entry: &BiomEntry) -> Option<String> {
    match entry.metadata.as_ref()?.get("taxonomy")? {
        Value::String(s) => Some(s.clone()),
        Value::Array(ranks) => Some(
            ranks
                .iter()
                .map(|r| match r {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                })
                .collect::<Vec<_>>()
                .join(";"),
        ),
        Value::Null => None,
        other => Some(other.to_string()),
    }
}

fn index_of(value: f64, bound: usize, what: &str, entry: usize) -> SpongeResult<usize> {
    if value < 0.0 || value.fract() != 0.0 || value as usize >= bound {
        return Err(SpongeError::load(format!(
            "data entry {} has invalid {} index {}",
            entry, what, value
        )));
    }
    Ok(value as usize)
}

fn check_unique(ids: &[String], what: &str) -> SpongeResult<()> {
    let mut seen = HashMap::with_capacity(ids.len());
    for (pos, id) in ids.iter().enumerate() {
        if let Some(first) = seen.insert(id.as_str(), pos) {
            return Err(SpongeError::load(format!(
                "duplicate {} id '{}' (positions {} and {})",
                what, id, first, pos
            )));
        }
    }
    Ok(())
}

pub fn parse_biom_json(bytes: &[u8]) -> SpongeResult<RawTable> {
    let doc: BiomDocument = serde_json::from_slice(bytes)
        .map_err(|e| SpongeError::load(format!("malformed BIOM JSON: {}", e)))?;

    if let Some(format) = &doc.format {
        if !format.starts_with("Biological Observation Matrix 1") {
            tracing::warn!("Unexpected BIOM format string '{}'", format);
        }
    }

    let [n_rows, n_cols] = doc.shape;
    if doc.rows.len() != n_rows || doc.columns.len() != n_cols {
        return Err(SpongeError::load(format!(
            "shape {}x{} does not match {} rows and {} columns",
            n_rows,
            n_cols,
            doc.rows.len(),
            doc.columns.len()
        )));
    }

    let entries = match doc.matrix_type {
        MatrixType::Sparse => {
            let mut entries = Vec::with_capacity(doc.data.len());
            for (i, triplet) in doc.data.iter().enumerate() {
                if triplet.len() != 3 {
                    return Err(SpongeError::load(format!(
                        "sparse data entry {} has {} values instead of 3",
                        i,
                        triplet.len()
                    )));
                }
                let r = index_of(triplet[0], n_rows, "row", i)?;
                let c = index_of(triplet[1], n_cols, "column", i)?;
                entries.push((r, c, triplet[2]));
            }
            entries
        }
        MatrixType::Dense => {
            if doc.data.len() != n_rows {
                return Err(SpongeError::load(format!(
                    "dense data has {} rows, expected {}",
                    doc.data.len(),
                    n_rows
                )));
            }
            let mut entries = Vec::new();
            for (r, row) in doc.data.iter().enumerate() {
                if row.len() != n_cols {
                    return Err(SpongeError::load(format!(
                        "dense row {} has {} values, expected {}",
                        r,
                        row.len(),
                        n_cols
                    )));
                }
                entries.extend(
                    row.iter()
                        .enumerate()
                        .filter(|&(_, &v)| v != 0.0)
                        .map(|(c, &v)| (r, c, v)),
                );
            }
            entries
        }
    };

    let taxonomy = doc.rows.iter().map(taxonomy_of).collect();
    let feature_ids: Vec<String> = doc.rows.into_iter().map(|e| e.id).collect();
    let sample_ids: Vec<String> = doc.columns.into_iter().map(|e| e.id).collect();
    check_unique(&feature_ids, "feature")?;
    check_unique(&sample_ids, "sample")?;

    Ok(RawTable { feature_ids, sample_ids, entries, taxonomy })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const SPARSE: &str = r#"{
        "id": null,
        "format": "Biological Observation Matrix 1.0.0",
        "type": "OTU table",
        "matrix_type": "sparse",
        "matrix_element_type": "int",
        "shape": [2, 3],
        "data": [[0, 0, 5], [0, 2, 1], [1, 1, 7]],
        "rows": [
            {"id": "ACGT", "metadata": {"taxonomy": ["k__Bacteria", "p__Firmicutes"]}},
            {"id": "TTGA", "metadata": null}
        ],
        "columns": [
            {"id": "S1", "metadata": null},
            {"id": "S2", "metadata": null},
            {"id": "S3", "metadata": {"depth": 12}}
        ]
    }"#;

    #[test]
    fn test_parse_sparse() {
        let table = parse_biom_json(SPARSE.as_bytes()).unwrap();
        assert_eq!(table.feature_ids, vec!["ACGT", "TTGA"]);
        assert_eq!(table.sample_ids, vec!["S1", "S2", "S3"]);
        assert_eq!(table.entries, vec![(0, 0, 5.0), (0, 2, 1.0), (1, 1, 7.0)]);
        assert_eq!(
            table.taxonomy,
            vec![Some("k__Bacteria;p__Firmicutes".to_string()), None]
        );
    }

    #[test]
    fn test_parse_dense() {
        let doc = r#"{
            "matrix_type": "dense",
            "shape": [2, 2],
            "data": [[0, 3.5], [1, 0]],
            "rows": [{"id": "AA", "metadata": {"taxonomy": "k__Archaea"}}, {"id": "CC"}],
            "columns": [{"id": "S1"}, {"id": "S2"}]
        }"#;
        let table = parse_biom_json(doc.as_bytes()).unwrap();
        assert_eq!(table.entries, vec![(0, 1, 3.5), (1, 0, 1.0)]);
        assert_eq!(table.taxonomy[0].as_deref(), Some("k__Archaea"));
    }

    #[test]
    fn test_shape_mismatch() {
        let doc = SPARSE.replace("[2, 3]", "[2, 4]");
        match parse_biom_json(doc.as_bytes()).unwrap_err() {
            SpongeError::Load(msg) => assert!(msg.contains("shape")),
            e => panic!("Expected Load error, got {:?}", e),
        }
    }

    #[test]
    fn test_out_of_range_triplet() {
        let doc = SPARSE.replace("[1, 1, 7]", "[1, 3, 7]");
        assert!(parse_biom_json(doc.as_bytes()).is_err());
        let doc = SPARSE.replace("[1, 1, 7]", "[1, 1.5, 7]");
        assert!(parse_biom_json(doc.as_bytes()).is_err());
    }

    #[test]
    fn test_duplicate_sample_id() {
        let doc = SPARSE.replace("\"S3\"", "\"S1\"");
        match parse_biom_json(doc.as_bytes()).unwrap_err() {
            SpongeError::Load(msg) => assert!(msg.contains("duplicate sample id 'S1'")),
            e => panic!("Expected Load error, got {:?}", e),
        }
    }

    #[test]
    fn test_not_json() {
        assert!(parse_biom_json(b"{ not json").is_err());
    }
}
