use std::sync::{mpsc, Arc, Mutex};
use std::thread;

use intake_logging::intake_debug;

use crate::service::{ParseService, ReqwestParseService, ServiceSettings};
use crate::types::{ClientEvent, DocumentUpload, FinalizeRequest};

enum ClientCommand {
    Parse {
        request_id: u64,
        upload: DocumentUpload,
        document_type: String,
    },
    Finalize {
        request_id: u64,
        request: FinalizeRequest,
    },
}

/// Bridge between the synchronous message loop and the async HTTP client.
///
/// Commands go in over a channel to a background thread owning a tokio
/// runtime; completion events come back out and are polled by the driver.
#[derive(Clone)]
pub struct ClientHandle {
    cmd_tx: mpsc::Sender<ClientCommand>,
    event_rx: Arc<Mutex<mpsc::Receiver<ClientEvent>>>,
}

impl ClientHandle {
    pub fn new(settings: ServiceSettings) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let service = Arc::new(ReqwestParseService::new(settings));

        thread::spawn(move || {
            let runtime = tokio::runtime::Runtime::new().expect("tokio runtime");
            while let Ok(command) = cmd_rx.recv() {
                let service = service.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    handle_command(service.as_ref(), command, event_tx).await;
                });
            }
        });

        Self {
            cmd_tx,
            event_rx: Arc::new(Mutex::new(event_rx)),
        }
    }

    /// `request_id` is echoed back in the matching completion event.
    pub fn submit_parse(
        &self,
        request_id: u64,
        upload: DocumentUpload,
        document_type: impl Into<String>,
    ) {
        let _ = self.cmd_tx.send(ClientCommand::Parse {
            request_id,
            upload,
            document_type: document_type.into(),
        });
    }

    /// `request_id` is echoed back in the matching completion event.
    pub fn submit_finalize(&self, request_id: u64, request: FinalizeRequest) {
        let _ = self.cmd_tx.send(ClientCommand::Finalize {
            request_id,
            request,
        });
    }

    pub fn try_recv(&self) -> Option<ClientEvent> {
        self.event_rx.lock().ok().and_then(|rx| rx.try_recv().ok())
    }
}

async fn handle_command(
    service: &dyn ParseService,
    command: ClientCommand,
    event_tx: mpsc::Sender<ClientEvent>,
) {
    match command {
        ClientCommand::Parse {
            request_id,
            upload,
            document_type,
        } => {
            intake_debug!(
                "parse request id={} file={} bytes={} document_type={}",
                request_id,
                upload.file_name,
                upload.bytes.len(),
                document_type
            );
            let result = service.parse_document(&upload, &document_type).await;
            let _ = event_tx.send(ClientEvent::ParseFinished { request_id, result });
        }
        ClientCommand::Finalize {
            request_id,
            request,
        } => {
            intake_debug!(
                "finalize request id={} document={} fields={}",
                request_id,
                request.document_name,
                request.parsed_fields.len()
            );
            let result = service.finalize_fields(&request).await;
            let _ = event_tx.send(ClientEvent::FinalizeFinished { request_id, result });
        }
    }
}
