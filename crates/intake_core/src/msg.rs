use std::collections::BTreeMap;

use serde_json::Value;

use crate::state::{DocumentType, RequestGeneration, SelectedFile};

/// Extracted fields and echoed classification from a successful parse.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseOutcome {
    pub fields: BTreeMap<String, Value>,
    /// Absent when the service does not echo a classification; the chosen
    /// type is used in its place.
    pub document_type: Option<String>,
}

/// Terminal failure of an in-flight parse or finalize request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestFailure {
    /// Transport-level failure: unreachable host, refused connection,
    /// timeout, unusable response body.
    Network { message: String },
    /// The service answered outside the 2xx range.
    Server { status: u16, body: String },
}

const BODY_SNIPPET_LEN: usize = 120;

impl RequestFailure {
    /// Short human-readable message for the notification surface.
    ///
    /// Full diagnostics belong in the developer log, not here.
    pub fn summary(&self) -> String {
        match self {
            RequestFailure::Network { message } => {
                format!("Could not reach the parsing service: {message}")
            }
            RequestFailure::Server { status, body } => {
                let snippet = snippet(body);
                if snippet.is_empty() {
                    format!("The service returned status {status}.")
                } else {
                    format!("The service returned status {status}: {snippet}")
                }
            }
        }
    }
}

fn snippet(body: &str) -> &str {
    let trimmed = body.trim();
    if trimmed.len() <= BODY_SNIPPET_LEN {
        return trimmed;
    }
    let mut end = BODY_SNIPPET_LEN;
    while end > 0 && !trimmed.is_char_boundary(end) {
        end -= 1;
    }
    &trimmed[..end]
}

#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// User picked a file; replaces the selection outright.
    FileChosen(SelectedFile),
    /// User changed the document-category selector.
    DocumentTypeChosen(DocumentType),
    /// User edited one extracted field.
    FieldEdited { key: String, value: String },
    /// User asked to submit the selection for parsing.
    ParseRequested,
    /// The parse request tagged `generation` settled.
    ParseCompleted {
        generation: RequestGeneration,
        result: Result<ParseOutcome, RequestFailure>,
    },
    /// User asked to commit the reviewed fields.
    FinalizeRequested,
    /// The finalize request tagged `generation` settled.
    FinalizeCompleted {
        generation: RequestGeneration,
        result: Result<(), RequestFailure>,
    },
    /// User acknowledged the current notification.
    NotificationDismissed,
    /// Fallback for placeholder wiring.
    NoOp,
}
