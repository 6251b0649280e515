use crate::state::StatusPhase;
use crate::store::{MessageId, Role};

/// Everything the renderer needs, derived from state. The message rows are
/// the sole input to chat rendering; no presentation markup lives here.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ChatViewModel {
    pub messages: Vec<MessageRowView>,
    pub status: Option<StatusLineView>,
    pub input: String,
    pub send_enabled: bool,
    pub awaiting_reply: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MessageRowView {
    pub id: MessageId,
    pub role: Role,
    /// True for the transient placeholder shown while a query is in flight.
    pub loading: bool,
    pub text: String,
    pub sources: Vec<SourceRowView>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceRowView {
    pub text: String,
    /// Relevance score rendered as a rounded percentage.
    pub match_percent: u8,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLineView {
    pub text: String,
    pub phase: StatusPhase,
}
