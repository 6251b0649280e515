use std::io::{self, BufRead};
use std::path::Path;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use chat_logging::{chat_error, LogDestination};
use docchat_client::ClientSettings;
use docchat_core::{update, AppState, FileHandle, Msg};
use url::Url;

use super::effects::EffectRunner;
use super::ui::render;

const DEFAULT_BACKEND: &str = "http://127.0.0.1:8000";

enum InputEvent {
    Line(String),
    Eof,
}

enum Command {
    Query(String),
    Upload(Vec<String>),
    Clear,
    Quit,
    Empty,
}

pub fn run_app() -> io::Result<()> {
    chat_logging::initialize(LogDestination::File);

    let base_url = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_BACKEND.to_string());
    let base_url = Url::parse(&base_url)
        .map_err(|err| io::Error::new(io::ErrorKind::InvalidInput, err.to_string()))?;

    let (msg_tx, msg_rx) = mpsc::channel::<Msg>();
    let runner = EffectRunner::new(msg_tx, ClientSettings::new(base_url))
        .map_err(|err| io::Error::other(err.to_string()))?;

    let input_rx = spawn_stdin_reader();

    for line in render::banner() {
        println!("{line}");
    }

    let mut state = AppState::new();
    loop {
        // Transfer completions and timers first, then user input.
        while let Ok(msg) = msg_rx.try_recv() {
            state = dispatch(state, msg, &runner);
        }

        match input_rx.recv_timeout(Duration::from_millis(50)) {
            Ok(InputEvent::Line(line)) => match parse_command(&line) {
                Command::Quit => break,
                Command::Clear => state = dispatch(state, Msg::ChatCleared, &runner),
                Command::Upload(paths) => {
                    let files = read_files(&paths);
                    state = dispatch(state, Msg::FilesSelected(files), &runner);
                }
                Command::Query(text) => {
                    state = dispatch(state, Msg::InputChanged(text), &runner);
                    state = dispatch(state, Msg::Submitted, &runner);
                }
                Command::Empty => {}
            },
            Ok(InputEvent::Eof) => break,
            Err(mpsc::RecvTimeoutError::Timeout) => {}
            Err(mpsc::RecvTimeoutError::Disconnected) => break,
        }

        if state.consume_dirty() {
            for line in render::render(&state.view()) {
                println!("{line}");
            }
        }
    }

    Ok(())
}

fn dispatch(state: AppState, msg: Msg, runner: &EffectRunner) -> AppState {
    let (state, effects) = update(state, msg);
    runner.run(effects);
    state
}

fn spawn_stdin_reader() -> mpsc::Receiver<InputEvent> {
    let (input_tx, input_rx) = mpsc::channel();
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            match line {
                Ok(line) => {
                    if input_tx.send(InputEvent::Line(line)).is_err() {
                        return;
                    }
                }
                Err(_) => break,
            }
        }
        let _ = input_tx.send(InputEvent::Eof);
    });
    input_rx
}

fn parse_command(line: &str) -> Command {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Command::Empty;
    }
    if let Some(rest) = trimmed.strip_prefix("/upload") {
        let paths = rest.split_whitespace().map(ToOwned::to_owned).collect();
        return Command::Upload(paths);
    }
    match trimmed {
        "/clear" => Command::Clear,
        "/quit" | "/exit" => Command::Quit,
        _ => Command::Query(line.to_string()),
    }
}

fn read_files(paths: &[String]) -> Vec<FileHandle> {
    let mut files = Vec::new();
    for path in paths {
        match std::fs::read(path) {
            Ok(bytes) => {
                let name = Path::new(path)
                    .file_name()
                    .map(|name| name.to_string_lossy().into_owned())
                    .unwrap_or_else(|| path.clone());
                files.push(FileHandle { name, bytes });
            }
            Err(err) => {
                chat_error!("Could not read {}: {}", path, err);
                eprintln!("Could not read {path}: {err}");
            }
        }
    }
    files
}
