//! Intake client: HTTP engine for the parse and finalize endpoints.
mod handle;
mod service;
mod types;

pub use handle::ClientHandle;
pub use service::{ParseService, ReqwestParseService, ServiceSettings, FINALIZE_PATH, PARSE_PATH};
pub use types::{ClientEvent, DocumentUpload, FinalizeRequest, ParseResponse, RequestError};
