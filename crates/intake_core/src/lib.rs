//! Intake core: pure state machine for the upload/parse/finalize flow.
mod effect;
mod msg;
mod notification;
mod state;
mod update;
mod view_model;

pub use effect::{Effect, FinalizePayload};
pub use msg::{Msg, ParseOutcome, RequestFailure};
pub use notification::{Notification, Severity};
pub use state::{AppState, DocumentType, Phase, PreviewId, RequestGeneration, SelectedFile};
pub use update::update;
pub use view_model::{AppViewModel, FieldRowView, NotificationView};
