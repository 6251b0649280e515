use crate::{FileHandle, QueryId, TaskId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Transfer one document to the backend. The controller emits at most
    /// one of these at a time; the next comes only after `UploadFinished`.
    UploadDocument { task_id: TaskId, file: FileHandle },
    /// Send the submitted query to the backend.
    SubmitQuery { query_id: QueryId, query: String },
    /// Post `Msg::StatusCleared { generation }` after the fixed delay.
    ScheduleStatusClear { generation: u64 },
}
