use crate::{FileHandle, QueryId, QueryOutcome, TaskId, UploadOutcome};

#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// User edited the chat input box.
    InputChanged(String),
    /// User submitted the current input as a query.
    Submitted,
    /// Transfer layer resolved the in-flight query.
    QueryFinished {
        query_id: QueryId,
        outcome: QueryOutcome,
    },
    /// User selected or dropped files for indexing, in input order.
    FilesSelected(Vec<FileHandle>),
    /// Transfer layer resolved the active upload.
    UploadFinished {
        task_id: TaskId,
        outcome: UploadOutcome,
    },
    /// The shell's status-clear timer elapsed.
    StatusCleared { generation: u64 },
    /// User cleared the chat.
    ChatCleared,
}
