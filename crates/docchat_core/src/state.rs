use std::collections::VecDeque;

use crate::store::{MessageBody, MessageId, MessageStore, Role, SourceCitation};
use crate::view_model::{ChatViewModel, MessageRowView, SourceRowView, StatusLineView};

pub type TaskId = u64;
pub type QueryId = u64;

/// Bot reply used when a query fails for any reason.
pub const APOLOGY_TEXT: &str = "Sorry, something went wrong. Please try again.";

/// A file as handed over by the shell: name plus binary content. The
/// backend is authoritative about size and type; nothing is validated
/// here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileHandle {
    pub name: String,
    pub bytes: Vec<u8>,
}

/// Terminal outcome of one document transfer. The display text is already
/// normalized by the transfer layer: the backend's confirmation for
/// `Indexed`, the backend's error message or its fixed fallback for
/// `Failed`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadOutcome {
    Indexed(String),
    Failed(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct QueryAnswer {
    pub answer: String,
    pub sources: Vec<SourceCitation>,
}

/// Terminal outcome of one query. Failures carry no detail; the raw error
/// stays in the diagnostic log and the user gets the fixed apology.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryOutcome {
    Answered(QueryAnswer),
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusPhase {
    Loading,
    Success,
    Error,
}

/// The single shared upload status line. Every update bumps `generation`,
/// which is how a scheduled auto-clear recognizes it has been superseded.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
struct StatusLine {
    current: Option<(String, StatusPhase)>,
    generation: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct PendingUpload {
    task_id: TaskId,
    file: FileHandle,
}

#[derive(Debug, Clone, PartialEq)]
struct InFlightQuery {
    query_id: QueryId,
    placeholder: MessageId,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppState {
    store: MessageStore,
    input: String,
    active_upload: Option<TaskId>,
    pending_uploads: VecDeque<PendingUpload>,
    in_flight: Option<InFlightQuery>,
    status: StatusLine,
    next_task_id: TaskId,
    next_query_id: QueryId,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> ChatViewModel {
        let messages = self
            .store
            .messages()
            .iter()
            .map(|message| MessageRowView {
                id: message.id,
                role: message.role,
                loading: matches!(message.body, MessageBody::Loading),
                text: match &message.body {
                    MessageBody::Text(text) => text.clone(),
                    MessageBody::Loading => String::new(),
                },
                sources: message
                    .sources
                    .iter()
                    .map(|citation| SourceRowView {
                        text: citation.text.clone(),
                        match_percent: score_to_percent(citation.score),
                    })
                    .collect(),
            })
            .collect();

        let status = self
            .status
            .current
            .as_ref()
            .map(|(text, phase)| StatusLineView {
                text: text.clone(),
                phase: *phase,
            });

        let awaiting_reply = self.in_flight.is_some();
        ChatViewModel {
            messages,
            status,
            input: self.input.clone(),
            send_enabled: !self.input.trim().is_empty() && !awaiting_reply,
            awaiting_reply,
        }
    }

    /// Returns whether the state changed since the last call, and resets
    /// the flag. The shell uses this to coalesce renders.
    pub fn consume_dirty(&mut self) -> bool {
        let was_dirty = self.dirty;
        self.dirty = false;
        was_dirty
    }

    fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    // --- chat input and query lifecycle ---

    pub(crate) fn set_input(&mut self, text: String) {
        if self.input != text {
            self.input = text;
            self.mark_dirty();
        }
    }

    /// Starts a query from the current input, or returns `None` when the
    /// trimmed input is empty or another query is still in flight. On
    /// success the user message and the loading placeholder are appended
    /// and the input box is emptied.
    pub(crate) fn begin_query(&mut self) -> Option<(QueryId, String)> {
        if self.in_flight.is_some() {
            return None;
        }
        let query = self.input.trim().to_string();
        if query.is_empty() {
            return None;
        }

        self.store
            .append(Role::User, MessageBody::Text(query.clone()), Vec::new());
        let placeholder = self.store.append(Role::Bot, MessageBody::Loading, Vec::new());
        self.next_query_id += 1;
        let query_id = self.next_query_id;
        self.in_flight = Some(InFlightQuery {
            query_id,
            placeholder,
        });
        self.input.clear();
        self.mark_dirty();
        Some((query_id, query))
    }

    /// Resolves the in-flight query: the placeholder goes away and exactly
    /// one bot message is appended. A stale or unknown `query_id` is
    /// ignored.
    pub(crate) fn resolve_query(&mut self, query_id: QueryId, outcome: QueryOutcome) {
        let Some(in_flight) = self.in_flight.take() else {
            return;
        };
        if in_flight.query_id != query_id {
            self.in_flight = Some(in_flight);
            return;
        }

        self.store.remove(in_flight.placeholder);
        match outcome {
            QueryOutcome::Answered(reply) => {
                self.store
                    .append(Role::Bot, MessageBody::Text(reply.answer), reply.sources);
            }
            QueryOutcome::Failed => {
                self.store.append(
                    Role::Bot,
                    MessageBody::Text(APOLOGY_TEXT.to_string()),
                    Vec::new(),
                );
            }
        }
        self.mark_dirty();
    }

    pub(crate) fn clear_chat(&mut self) {
        self.store.clear();
        self.mark_dirty();
    }

    // --- upload queue ---

    /// Enqueues the given files in input order. When no transfer is
    /// active, the first file is promoted immediately and returned so the
    /// caller can emit its effect.
    pub(crate) fn enqueue_uploads(&mut self, files: Vec<FileHandle>) -> Option<(TaskId, FileHandle)> {
        if files.is_empty() {
            return None;
        }
        for file in files {
            self.next_task_id += 1;
            self.pending_uploads.push_back(PendingUpload {
                task_id: self.next_task_id,
                file,
            });
        }
        if self.active_upload.is_some() {
            return None;
        }
        self.promote_next_upload()
    }

    pub(crate) fn is_active_upload(&self, task_id: TaskId) -> bool {
        self.active_upload == Some(task_id)
    }

    /// Drops the finished task and promotes the next pending one, if any.
    pub(crate) fn finish_upload(&mut self) -> Option<(TaskId, FileHandle)> {
        self.active_upload = None;
        self.promote_next_upload()
    }

    /// The promoted file is moved out for the caller's effect; the
    /// controller keeps only the task id.
    fn promote_next_upload(&mut self) -> Option<(TaskId, FileHandle)> {
        let pending = self.pending_uploads.pop_front()?;
        self.active_upload = Some(pending.task_id);
        self.set_status(
            format!("Uploading {}...", pending.file.name),
            StatusPhase::Loading,
        );
        Some((pending.task_id, pending.file))
    }

    // --- status line ---

    /// Replaces the status line and returns the new generation.
    pub(crate) fn set_status(&mut self, text: String, phase: StatusPhase) -> u64 {
        self.status.generation += 1;
        self.status.current = Some((text, phase));
        self.mark_dirty();
        self.status.generation
    }

    /// Clears the status line, but only when `generation` still matches;
    /// a timer that fired for a superseded status is a no-op.
    pub(crate) fn clear_status_if_current(&mut self, generation: u64) {
        if self.status.generation == generation && self.status.current.is_some() {
            self.status.current = None;
            self.mark_dirty();
        }
    }
}

fn score_to_percent(score: f32) -> u8 {
    (score.clamp(0.0, 1.0) * 100.0).round() as u8
}
