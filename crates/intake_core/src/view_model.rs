use crate::notification::Severity;
use crate::state::{DocumentType, Phase, PreviewId};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub phase: Phase,
    pub file_name: Option<String>,
    pub preview: Option<PreviewId>,
    pub document_type: DocumentType,
    pub fields: Vec<FieldRowView>,
    pub notification: Option<NotificationView>,
    pub busy: bool,
    pub dirty: bool,
}

/// One editable field row, ordered by key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldRowView {
    pub key: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationView {
    pub title: String,
    pub message: String,
    pub severity: Severity,
}
