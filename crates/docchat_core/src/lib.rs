//! Docchat core: pure state machine and view-model helpers.
mod effect;
mod msg;
mod state;
mod store;
mod update;
mod view_model;

pub use effect::Effect;
pub use msg::Msg;
pub use state::{
    AppState, FileHandle, QueryAnswer, QueryId, QueryOutcome, StatusPhase, TaskId, UploadOutcome,
    APOLOGY_TEXT,
};
pub use store::{
    ChatMessage, MessageBody, MessageId, MessageStore, Role, SourceCitation, CLEARED_NOTICE,
};
pub use update::update;
pub use view_model::{ChatViewModel, MessageRowView, SourceRowView, StatusLineView};
