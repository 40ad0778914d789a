//! Request and response shapes of the sequence query API

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::{SpongeError, SpongeResult};

/// One query sequence or a set of them.
///
/// Deserialises from either a JSON string or a JSON array of strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SequenceInput {
    Single(String),
    Many(Vec<String>),
}

impl SequenceInput {
    pub fn as_slice(&self) -> &[String] {
        match self {
            SequenceInput::Single(seq) => std::slice::from_ref(seq),
            SequenceInput::Many(seqs) => seqs,
        }
    }

    pub fn into_vec(self) -> Vec<String> {
        match self {
            SequenceInput::Single(seq) => vec![seq],
            SequenceInput::Many(seqs) => seqs,
        }
    }

    pub fn len(&self) -> usize {
        self.as_slice().len()
    }

    pub fn is_empty(&self) -> bool {
        self.as_slice().is_empty()
    }

    pub fn is_single(&self) -> bool {
        matches!(self, SequenceInput::Single(_))
    }
}

impl From<&str> for SequenceInput {
    fn from(seq: &str) -> Self {
        SequenceInput::Single(seq.to_string())
    }
}

impl From<String> for SequenceInput {
    fn from(seq: String) -> Self {
        SequenceInput::Single(seq)
    }
}

impl From<Vec<String>> for SequenceInput {
    fn from(seqs: Vec<String>) -> Self {
        SequenceInput::Many(seqs)
    }
}

impl From<Vec<&str>> for SequenceInput {
    fn from(seqs: Vec<&str>) -> Self {
        SequenceInput::Many(seqs.into_iter().map(String::from).collect())
    }
}

/// Body of a `/sequence/info` request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QueryRequest {
    #[serde(default)]
    pub sequence: Option<SequenceInput>,
    #[serde(default)]
    pub fields: Option<Vec<String>>,
    #[serde(default)]
    pub threshold: Option<f64>,
}

impl QueryRequest {
    pub fn from_json(body: &str) -> SpongeResult<Self> {
        serde_json::from_str(body)
            .map_err(|e| SpongeError::InvalidInput(format!("malformed request: {}", e)))
    }

    /// The query sequences; a request without them is a client error.
    pub fn sequences(&self) -> SpongeResult<&SequenceInput> {
        self.sequence
            .as_ref()
            .ok_or_else(|| SpongeError::MissingParameter("sequence".to_string()))
    }
}

/// Presence of the query within the samples sharing one metadata value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldValueDistribution {
    /// Samples carrying the value, scaled by the number of query sequences
    pub total_samples: usize,
    /// Sample/sequence pairs where the sequence is present
    pub observed_samples: usize,
}

impl FieldValueDistribution {
    pub fn fraction(&self) -> f64 {
        if self.total_samples == 0 {
            0.0
        } else {
            self.observed_samples as f64 / self.total_samples as f64
        }
    }
}

/// Per value distributions of one field.
pub type ValueDistributions = BTreeMap<String, FieldValueDistribution>;

/// Answer to a sequence query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryResult {
    pub total_samples: usize,
    pub total_observed: usize,
    /// Keyed by field, in the order the fields were requested
    pub info: IndexMap<String, ValueDistributions>,
}

impl QueryResult {
    pub fn presence_fraction(&self) -> f64 {
        if self.total_samples == 0 {
            0.0
        } else {
            self.total_observed as f64 / self.total_samples as f64
        }
    }

    pub fn to_json(&self) -> SpongeResult<String> {
        Ok(serde_json::to_string(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_sequence_input_from_json() {
        let single: SequenceInput = serde_json::from_str("\"ACGT\"").unwrap();
        assert_eq!(single, SequenceInput::Single("ACGT".to_string()));
        assert!(single.is_single());

        let many: SequenceInput = serde_json::from_str("[\"ACGT\", \"TTTT\"]").unwrap();
        assert_eq!(many.len(), 2);
        assert_eq!(many.into_vec(), vec!["ACGT", "TTTT"]);
    }

    #[test]
    fn test_request_without_sequence() {
        let request = QueryRequest::from_json(r#"{"threshold": 0.01}"#).unwrap();
        assert_eq!(request.threshold, Some(0.01));
        match request.sequences().unwrap_err() {
            SpongeError::MissingParameter(name) => assert_eq!(name, "sequence"),
            e => panic!("Expected MissingParameter, got {:?}", e),
        }
    }

    #[test]
    fn test_request_full() {
        let request = QueryRequest::from_json(
            r#"{"sequence": ["AC", "GT"], "fields": ["group"], "threshold": 0}"#,
        )
        .unwrap();
        assert_eq!(request.sequences().unwrap().as_slice(), ["AC", "GT"]);
        assert_eq!(request.fields, Some(vec!["group".to_string()]));
        assert_eq!(request.threshold, Some(0.0));
    }

    #[test]
    fn test_request_rejects_wrong_sequence_type() {
        let err = QueryRequest::from_json(r#"{"sequence": 12}"#).unwrap_err();
        assert!(err.is_client_error());
    }

    #[test]
    fn test_result_json_shape() {
        let mut group = ValueDistributions::new();
        group.insert(
            "2".to_string(),
            FieldValueDistribution { total_samples: 9, observed_samples: 9 },
        );
        let mut info = IndexMap::new();
        info.insert("id".to_string(), ValueDistributions::new());
        info.insert("group".to_string(), group);
        let result = QueryResult { total_samples: 20, total_observed: 9, info };

        let value: serde_json::Value = serde_json::from_str(&result.to_json().unwrap()).unwrap();
        assert_eq!(value["total_samples"], 20);
        assert_eq!(value["total_observed"], 9);
        assert_eq!(value["info"]["group"]["2"]["observed_samples"], 9);
        assert_eq!(value["info"]["group"]["2"]["total_samples"], 9);
        assert!(value["info"]["id"].as_object().unwrap().is_empty());
        assert!((result.presence_fraction() - 0.45).abs() < 1e-12);
    }
}
