use std::fmt;

use serde::Deserialize;
use thiserror::Error;

pub type TaskId = u64;
pub type RequestId = u64;

/// Fixed text substituted when an upload fails without a structured
/// `{message}` body.
pub const UPLOAD_FAILED_TEXT: &str = "Upload failed";

/// A file to transfer: name plus binary content. Nothing is validated
/// client-side; the backend decides what it accepts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

/// Success body of `POST /upload`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UploadReceipt {
    pub message: String,
    #[serde(default)]
    pub total_docs: Option<u64>,
}

/// Success body of `POST /query`. The passage list is named `context` on
/// the wire; it is carried as `sources` from here on.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct QueryReply {
    pub answer: String,
    #[serde(rename = "context", default)]
    pub sources: Vec<Passage>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Passage {
    pub text: String,
    #[serde(default)]
    pub full_text: Option<String>,
    pub score: f32,
}

/// Error body shape the backend may return on a failed upload.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub(crate) struct ErrorBody {
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {message}")]
pub struct TransferError {
    pub kind: FailureKind,
    pub message: String,
}

impl TransferError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    /// The backend rejected the request and said why; the message is its
    /// own text, shown verbatim.
    Backend(u16),
    /// Non-2xx without a structured message body.
    HttpStatus(u16),
    Timeout,
    Network,
    MalformedBody,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::Backend(status) => write!(f, "backend error (http {status})"),
            FailureKind::HttpStatus(status) => write!(f, "http status {status}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::Network => write!(f, "network error"),
            FailureKind::MalformedBody => write!(f, "malformed response body"),
        }
    }
}

/// Completion of a command issued through the `ClientHandle`, tagged with
/// the id the caller supplied.
#[derive(Debug, Clone, PartialEq)]
pub enum ClientEvent {
    UploadCompleted {
        task_id: TaskId,
        result: Result<UploadReceipt, TransferError>,
    },
    QueryCompleted {
        request_id: RequestId,
        result: Result<QueryReply, TransferError>,
    },
}
