use docchat_core::{ChatViewModel, MessageRowView, Role, StatusPhase};

const DIVIDER: &str = "----------------------------------------";

pub fn banner() -> Vec<String> {
    vec![
        "docchat - ask questions about your documents".to_string(),
        "Commands: /upload <path>..., /clear, /quit. Anything else is a question.".to_string(),
    ]
}

/// Turns the view model into printable lines. The view model is the sole
/// input; nothing else about the state leaks into rendering.
pub fn render(view: &ChatViewModel) -> Vec<String> {
    let mut lines = Vec::new();
    lines.push(DIVIDER.to_string());
    if let Some(status) = &view.status {
        lines.push(format!("[{}] {}", phase_label(status.phase), status.text));
    }
    for row in &view.messages {
        message_lines(row, &mut lines);
    }
    lines
}

fn message_lines(row: &MessageRowView, lines: &mut Vec<String>) {
    let speaker = match row.role {
        Role::User => "You",
        Role::Bot => "Bot",
    };
    if row.loading {
        lines.push(format!("{speaker}: Thinking..."));
        return;
    }
    lines.push(format!("{speaker}: {}", row.text));
    if !row.sources.is_empty() {
        lines.push("  Sources:".to_string());
        for source in &row.sources {
            lines.push(format!("    Match: {}% \"{}\"", source.match_percent, source.text));
        }
    }
}

fn phase_label(phase: StatusPhase) -> &'static str {
    match phase {
        StatusPhase::Loading => "working",
        StatusPhase::Success => "ok",
        StatusPhase::Error => "error",
    }
}
