use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread;

use chat_logging::chat_debug;

use crate::{
    Backend, ClientEvent, ClientSettings, HttpBackend, RequestId, TaskId, TransferError, UploadFile,
};

enum ClientCommand {
    Upload { task_id: TaskId, file: UploadFile },
    Query { request_id: RequestId, query: String },
}

/// Handle to the transfer worker: commands go in over a channel and run on
/// a background tokio runtime; completions come back as `ClientEvent`s,
/// drained without blocking via `try_recv`. Clones share the same worker.
#[derive(Clone)]
pub struct ClientHandle {
    cmd_tx: mpsc::Sender<ClientCommand>,
    event_rx: Arc<Mutex<mpsc::Receiver<ClientEvent>>>,
}

impl ClientHandle {
    pub fn new(settings: ClientSettings) -> Result<Self, TransferError> {
        Ok(Self::with_backend(Arc::new(HttpBackend::new(settings)?)))
    }

    /// Runs the worker over any backend implementation; tests substitute
    /// scripted ones here.
    pub fn with_backend(backend: Arc<dyn Backend>) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();

        thread::spawn(move || {
            let runtime = tokio::runtime::Runtime::new().expect("tokio runtime");
            while let Ok(command) = cmd_rx.recv() {
                let backend = backend.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    handle_command(backend.as_ref(), command, event_tx).await;
                });
            }
        });

        Self {
            cmd_tx,
            event_rx: Arc::new(Mutex::new(event_rx)),
        }
    }

    pub fn upload(&self, task_id: TaskId, file: UploadFile) {
        let _ = self.cmd_tx.send(ClientCommand::Upload { task_id, file });
    }

    pub fn query(&self, request_id: RequestId, query: impl Into<String>) {
        let _ = self.cmd_tx.send(ClientCommand::Query {
            request_id,
            query: query.into(),
        });
    }

    pub fn try_recv(&self) -> Option<ClientEvent> {
        self.event_rx.lock().ok()?.try_recv().ok()
    }
}

async fn handle_command(
    backend: &dyn Backend,
    command: ClientCommand,
    event_tx: mpsc::Sender<ClientEvent>,
) {
    match command {
        ClientCommand::Upload { task_id, file } => {
            chat_debug!(
                "upload start task_id={} file={} ({} bytes)",
                task_id,
                file.name,
                file.bytes.len()
            );
            let result = backend.upload_document(&file).await;
            let _ = event_tx.send(ClientEvent::UploadCompleted { task_id, result });
        }
        ClientCommand::Query { request_id, query } => {
            chat_debug!("query start request_id={} query_len={}", request_id, query.len());
            let result = backend.submit_query(&query).await;
            let _ = event_tx.send(ClientEvent::QueryCompleted { request_id, result });
        }
    }
}
