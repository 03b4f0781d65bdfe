use std::io;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use intake_client::{
    ClientEvent, ClientHandle, DocumentUpload, FinalizeRequest, RequestError, ServiceSettings,
};
use intake_core::{Effect, Msg, ParseOutcome, PreviewId, RequestFailure, SelectedFile};
use intake_logging::{intake_info, intake_warn};

use crate::app::AppMsg;
use crate::preview::PreviewStore;

pub struct EffectRunner {
    client: ClientHandle,
    previews: PreviewStore,
}

impl EffectRunner {
    pub fn new(msg_tx: mpsc::Sender<AppMsg>, settings: ServiceSettings) -> io::Result<Self> {
        let client = ClientHandle::new(settings);
        let runner = Self {
            client: client.clone(),
            previews: PreviewStore::new()?,
        };
        spawn_event_loop(client, msg_tx);
        Ok(runner)
    }

    pub fn enqueue(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::SendParseRequest {
                    file,
                    document_type,
                    generation,
                } => {
                    intake_info!(
                        "submit parse generation={} file={} bytes={} document_type={}",
                        generation,
                        file.name,
                        file.bytes.len(),
                        document_type.wire_name()
                    );
                    // The generation tag rides along as the client's request
                    // id so the completion can be matched back up.
                    self.client.submit_parse(
                        generation,
                        DocumentUpload {
                            file_name: file.name,
                            media_type: file.media_type,
                            bytes: file.bytes,
                        },
                        document_type.wire_name(),
                    );
                }
                Effect::SendFinalizeRequest {
                    payload,
                    generation,
                } => {
                    intake_info!(
                        "submit finalize generation={} document={} document_type={} fields={}",
                        generation,
                        payload.document_name,
                        payload.document_type,
                        payload.parsed_fields.len()
                    );
                    self.client.submit_finalize(
                        generation,
                        FinalizeRequest {
                            document_name: payload.document_name,
                            document_type: payload.document_type,
                            parsed_fields: payload.parsed_fields,
                        },
                    );
                }
                Effect::ReleasePreview { preview } => {
                    self.previews.release(preview);
                }
            }
        }
    }

    /// Ensures the current selection's preview file exists on disk.
    pub fn materialize_preview(&mut self, preview: PreviewId, file: &SelectedFile) {
        self.previews.materialize(preview, file);
    }

    pub fn preview_path(&self, preview: PreviewId) -> Option<&std::path::Path> {
        self.previews.path(preview)
    }
}

fn spawn_event_loop(client: ClientHandle, msg_tx: mpsc::Sender<AppMsg>) {
    thread::spawn(move || loop {
        if let Some(event) = client.try_recv() {
            let msg = match event {
                ClientEvent::ParseFinished { request_id, result } => Msg::ParseCompleted {
                    generation: request_id,
                    result: result
                        .map(|response| ParseOutcome {
                            fields: response.parsed_result,
                            document_type: response.document_type,
                        })
                        .map_err(map_request_error),
                },
                ClientEvent::FinalizeFinished { request_id, result } => Msg::FinalizeCompleted {
                    generation: request_id,
                    result: result.map_err(map_request_error),
                },
            };
            if msg_tx.send(AppMsg::Core(msg)).is_err() {
                break;
            }
        } else {
            thread::sleep(Duration::from_millis(20));
        }
    });
}

/// Maps the client's transport taxonomy onto the state machine's failure
/// kinds, logging the full diagnostics on the way; the notification surface
/// only ever sees the short summary.
fn map_request_error(err: RequestError) -> RequestFailure {
    match err {
        RequestError::Status { status, body } => {
            intake_warn!("service failure status={} body={}", status, body);
            RequestFailure::Server { status, body }
        }
        other => {
            intake_warn!("transport failure: {}", other);
            RequestFailure::Network {
                message: other.to_string(),
            }
        }
    }
}
