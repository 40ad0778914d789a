//! The REST-shaped request boundary: JSON in, status and body out.

use serde::Serialize;
use tracing::{debug, warn};

use crate::engine::{sequence_info, QueryOptions};
use crate::gate::StoreGate;
use spongeworld_core::{QueryConfig, QueryRequest, SpongeError, SpongeResult};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Response {
    pub status: u16,
    pub body: String,
}

impl Response {
    pub fn ok(body: String) -> Self {
        Self { status: 200, body }
    }

    /// A missing `sequence` is reported bare; every other failure carries
    /// the `error encountered: ` prefix front ends match on.
    pub fn error(err: &SpongeError) -> Self {
        let body = match err {
            SpongeError::MissingParameter(_) => err.to_string(),
            _ => format!("error encountered: {}", err),
        };
        Self { status: err.status_code(), body }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

fn answer(gate: &StoreGate, body: &str, defaults: &QueryConfig) -> SpongeResult<String> {
    let request = QueryRequest::from_json(body)?;
    let sequences = request.sequences()?;
    let store = gate.get()?;

    let mut options = QueryOptions::from_config(defaults);
    if let Some(fields) = &request.fields {
        options = options.with_fields(fields.clone());
    }
    if let Some(threshold) = request.threshold {
        options = options.with_threshold(threshold);
    }

    let result = sequence_info(&store, sequences, &options)?;
    result.to_json()
}

/// Answers a `sequence/info` request body.
pub fn handle_request(gate: &StoreGate, body: &str, defaults: &QueryConfig) -> Response {
    match answer(gate, body, defaults) {
        Ok(json) => Response::ok(json),
        Err(err) => {
            if err.is_client_error() {
                debug!("Rejected request: {}", err);
            } else {
                warn!("Request failed: {}", err);
            }
            Response::error(&err)
        }
    }
}
