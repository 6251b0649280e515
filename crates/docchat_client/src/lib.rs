//! Docchat client: transfer layer for the retrieval backend.
mod handle;
mod transfer;
mod types;

pub use handle::ClientHandle;
pub use transfer::{Backend, ClientSettings, HttpBackend};
pub use types::{
    ClientEvent, FailureKind, Passage, QueryReply, RequestId, TaskId, TransferError, UploadFile,
    UploadReceipt, UPLOAD_FAILED_TEXT,
};
