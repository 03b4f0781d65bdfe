use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// A document payload ready for submission to the parse endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentUpload {
    pub file_name: String,
    pub media_type: String,
    pub bytes: Vec<u8>,
}

/// Body of a successful `/parse-document` response.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ParseResponse {
    /// Extracted field mapping; an absent key means no fields.
    #[serde(default)]
    pub parsed_result: BTreeMap<String, Value>,
    /// The service's classification of the document, when echoed.
    #[serde(default)]
    pub document_type: Option<String>,
}

/// Body of a `/finalize-parsed-fields` request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FinalizeRequest {
    pub document_name: String,
    pub document_type: String,
    pub parsed_fields: BTreeMap<String, String>,
}

/// Failure of a request to the parsing service.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequestError {
    #[error("request timed out")]
    Timeout,
    #[error("network error: {0}")]
    Network(String),
    #[error("server returned status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("invalid response body: {0}")]
    Decode(String),
}

/// Completion events emitted by the background client.
///
/// `request_id` is the caller's correlation tag, echoed back unchanged so
/// out-of-order completions can be matched to the request that produced them.
#[derive(Debug, Clone, PartialEq)]
pub enum ClientEvent {
    ParseFinished {
        request_id: u64,
        result: Result<ParseResponse, RequestError>,
    },
    FinalizeFinished {
        request_id: u64,
        result: Result<(), RequestError>,
    },
}
