pub type MessageId = u64;

/// Text shown as the sole message after a chat reset.
pub const CLEARED_NOTICE: &str = "Chat cleared. Ready for new questions!";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Bot,
}

/// Message content: real text, or the transient marker shown while a
/// query is in flight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageBody {
    Text(String),
    Loading,
}

/// A passage returned alongside an answer, scored in [0, 1].
#[derive(Debug, Clone, PartialEq)]
pub struct SourceCitation {
    pub text: String,
    pub full_text: Option<String>,
    pub score: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChatMessage {
    pub id: MessageId,
    pub role: Role,
    pub body: MessageBody,
    pub sources: Vec<SourceCitation>,
}

/// Ordered list of displayable chat entries. Insertion order is display
/// order, oldest first. Messages are never edited in place; a change is
/// a removal followed by a fresh append.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MessageStore {
    messages: Vec<ChatMessage>,
    next_id: MessageId,
}

impl MessageStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a message and returns its id. Ids come from a monotonic
    /// counter, so they stay unique for the life of the store, including
    /// across `clear`.
    pub fn append(
        &mut self,
        role: Role,
        body: MessageBody,
        sources: Vec<SourceCitation>,
    ) -> MessageId {
        self.next_id += 1;
        let id = self.next_id;
        self.messages.push(ChatMessage {
            id,
            role,
            body,
            sources,
        });
        id
    }

    /// Removes the message with the given id. A no-op if it is absent.
    pub fn remove(&mut self, id: MessageId) {
        self.messages.retain(|message| message.id != id);
    }

    /// Hard reset: drops every message and leaves exactly one bot notice.
    pub fn clear(&mut self) {
        self.messages.clear();
        self.append(Role::Bot, MessageBody::Text(CLEARED_NOTICE.to_string()), Vec::new());
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn contains(&self, id: MessageId) -> bool {
        self.messages.iter().any(|message| message.id == id)
    }
}
