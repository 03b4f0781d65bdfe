use std::collections::BTreeMap;

use serde_json::Value;

use crate::effect::FinalizePayload;
use crate::notification::Notification;
use crate::view_model::{AppViewModel, FieldRowView, NotificationView};

pub type PreviewId = u64;

/// Monotonic tag for outbound requests; completions carrying an older
/// generation are stale and must be dropped.
pub type RequestGeneration = u64;

/// Closed set of document categories the user can submit under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DocumentType {
    #[default]
    Form941,
    JobDetails,
}

impl DocumentType {
    pub const ALL: [DocumentType; 2] = [DocumentType::Form941, DocumentType::JobDetails];

    /// The label used on the wire for this category.
    pub fn wire_name(self) -> &'static str {
        match self {
            DocumentType::Form941 => "form_941",
            DocumentType::JobDetails => "job_details",
        }
    }

    pub fn from_wire_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|document_type| document_type.wire_name() == name)
    }
}

/// The user's chosen file: payload plus name and media type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub name: String,
    pub media_type: String,
    pub bytes: Vec<u8>,
}

/// Where the intake flow currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    FileSelected,
    Parsing,
    Parsed,
    Finalizing,
    Finalized,
}

impl Phase {
    /// True while a request is in flight; re-invocations are refused.
    pub fn is_busy(self) -> bool {
        matches!(self, Phase::Parsing | Phase::Finalizing)
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppState {
    phase: Phase,
    selected: Option<SelectedFile>,
    preview: Option<PreviewId>,
    next_preview_id: PreviewId,
    chosen_type: DocumentType,
    parsed_fields: Option<BTreeMap<String, Value>>,
    form_values: BTreeMap<String, String>,
    parsed_type: Option<String>,
    notification: Option<Notification>,
    generation: RequestGeneration,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel {
            phase: self.phase,
            file_name: self.selected.as_ref().map(|file| file.name.clone()),
            preview: self.preview,
            document_type: self.chosen_type,
            fields: self
                .form_values
                .iter()
                .map(|(key, value)| FieldRowView {
                    key: key.clone(),
                    value: value.clone(),
                })
                .collect(),
            notification: self.notification.as_ref().map(|notification| NotificationView {
                title: notification.title.clone(),
                message: notification.message.clone(),
                severity: notification.severity,
            }),
            busy: self.phase.is_busy(),
            dirty: self.dirty,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn document_type(&self) -> DocumentType {
        self.chosen_type
    }

    pub fn selected_file(&self) -> Option<&SelectedFile> {
        self.selected.as_ref()
    }

    pub fn preview(&self) -> Option<PreviewId> {
        self.preview
    }

    pub fn parsed_fields(&self) -> Option<&BTreeMap<String, Value>> {
        self.parsed_fields.as_ref()
    }

    pub fn form_values(&self) -> &BTreeMap<String, String> {
        &self.form_values
    }

    pub fn parsed_document_type(&self) -> Option<&str> {
        self.parsed_type.as_deref()
    }

    pub fn notification(&self) -> Option<&Notification> {
        self.notification.as_ref()
    }

    /// Returns whether a render is due and resets the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    /// Replaces the selection and resets all parse-derived state.
    ///
    /// Returns the preview reference that must be released, if any.
    pub(crate) fn select_file(&mut self, file: SelectedFile) -> Option<PreviewId> {
        let released = self.preview.take();
        self.next_preview_id += 1;
        self.preview = Some(self.next_preview_id);
        self.selected = Some(file);
        self.parsed_fields = None;
        self.form_values.clear();
        self.parsed_type = None;
        self.phase = Phase::FileSelected;
        self.dirty = true;
        released
    }

    pub(crate) fn set_document_type(&mut self, document_type: DocumentType) {
        self.chosen_type = document_type;
        self.dirty = true;
    }

    pub(crate) fn set_form_value(&mut self, key: String, value: String) {
        self.form_values.insert(key, value);
        self.dirty = true;
    }

    pub(crate) fn generation(&self) -> RequestGeneration {
        self.generation
    }

    pub(crate) fn begin_parse(&mut self) -> RequestGeneration {
        self.generation += 1;
        self.phase = Phase::Parsing;
        self.dirty = true;
        self.generation
    }

    /// Seeds the field mappings from a confirmed parse response.
    ///
    /// Every value is coerced to a string for editing: null becomes the
    /// empty string, strings are kept verbatim, everything else is rendered
    /// as JSON.
    pub(crate) fn apply_parse_success(
        &mut self,
        fields: BTreeMap<String, Value>,
        echoed_type: Option<String>,
    ) {
        self.form_values = fields
            .iter()
            .map(|(key, value)| (key.clone(), stringify_field(value)))
            .collect();
        self.parsed_fields = Some(fields);
        // The server's classification is authoritative for finalize.
        self.parsed_type =
            Some(echoed_type.unwrap_or_else(|| self.chosen_type.wire_name().to_string()));
        self.phase = Phase::Parsed;
        self.dirty = true;
    }

    pub(crate) fn apply_parse_failure(&mut self) {
        self.phase = Phase::FileSelected;
        self.dirty = true;
    }

    pub(crate) fn has_parsed_fields(&self) -> bool {
        self.parsed_fields.is_some()
    }

    pub(crate) fn begin_finalize(&mut self) -> RequestGeneration {
        self.generation += 1;
        self.phase = Phase::Finalizing;
        self.dirty = true;
        self.generation
    }

    pub(crate) fn finalize_payload(&self) -> FinalizePayload {
        FinalizePayload {
            document_name: self
                .selected
                .as_ref()
                .map(|file| file.name.clone())
                .unwrap_or_default(),
            document_type: self
                .parsed_type
                .clone()
                .unwrap_or_else(|| self.chosen_type.wire_name().to_string()),
            parsed_fields: self.form_values.clone(),
        }
    }

    pub(crate) fn apply_finalize_success(&mut self) {
        self.phase = Phase::Finalized;
        self.dirty = true;
    }

    pub(crate) fn apply_finalize_failure(&mut self) {
        self.phase = Phase::Parsed;
        self.dirty = true;
    }

    pub(crate) fn show_notification(&mut self, notification: Notification) {
        self.notification = Some(notification);
        self.dirty = true;
    }

    pub(crate) fn dismiss_notification(&mut self) {
        self.notification = None;
        self.dirty = true;
    }
}

fn stringify_field(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}
