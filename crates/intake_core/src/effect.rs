use std::collections::BTreeMap;

use crate::state::{DocumentType, PreviewId, RequestGeneration, SelectedFile};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Submit the file to the parse endpoint. The driver must echo
    /// `generation` back in the completion message.
    SendParseRequest {
        file: SelectedFile,
        document_type: DocumentType,
        generation: RequestGeneration,
    },
    /// Submit the reviewed fields to the finalize endpoint. The driver must
    /// echo `generation` back in the completion message.
    SendFinalizeRequest {
        payload: FinalizePayload,
        generation: RequestGeneration,
    },
    /// Invalidate a preview reference that was replaced.
    ReleasePreview { preview: PreviewId },
}

/// Envelope posted to the finalize endpoint.
///
/// `document_type` carries the label echoed by the parse response, never the
/// user's original selection, so a server-side reclassification cannot be
/// contradicted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FinalizePayload {
    pub document_name: String,
    pub document_type: String,
    pub parsed_fields: BTreeMap<String, String>,
}
