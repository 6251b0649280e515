use crate::{AppState, Effect, Msg, StatusPhase, UploadOutcome};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::InputChanged(text) => {
            state.set_input(text);
            Vec::new()
        }
        Msg::Submitted => match state.begin_query() {
            Some((query_id, query)) => vec![Effect::SubmitQuery { query_id, query }],
            None => Vec::new(),
        },
        Msg::QueryFinished { query_id, outcome } => {
            state.resolve_query(query_id, outcome);
            Vec::new()
        }
        Msg::FilesSelected(files) => match state.enqueue_uploads(files) {
            Some((task_id, file)) => vec![Effect::UploadDocument { task_id, file }],
            None => Vec::new(),
        },
        Msg::UploadFinished { task_id, outcome } => {
            if !state.is_active_upload(task_id) {
                return (state, Vec::new());
            }

            let mut effects = Vec::new();
            match outcome {
                UploadOutcome::Indexed(message) => {
                    let generation =
                        state.set_status(format!("Indexed: {message}"), StatusPhase::Success);
                    effects.push(Effect::ScheduleStatusClear { generation });
                }
                UploadOutcome::Failed(message) => {
                    state.set_status(format!("Error: {message}"), StatusPhase::Error);
                }
            }

            // A failure never aborts the batch; the next file still gets
            // its turn, and its status overwrites this one.
            if let Some((task_id, file)) = state.finish_upload() {
                effects.push(Effect::UploadDocument { task_id, file });
            }
            effects
        }
        Msg::StatusCleared { generation } => {
            state.clear_status_if_current(generation);
            Vec::new()
        }
        Msg::ChatCleared => {
            state.clear_chat();
            Vec::new()
        }
    };

    (state, effects)
}
