use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use chat_logging::{chat_info, chat_warn};
use docchat_client::{ClientEvent, ClientHandle, ClientSettings, TransferError, UploadFile};
use docchat_core::{Effect, Msg, QueryAnswer, QueryOutcome, SourceCitation, UploadOutcome};

/// Delay before a successful upload's status line clears itself.
const STATUS_CLEAR_DELAY: Duration = Duration::from_secs(3);

pub struct EffectRunner {
    client: ClientHandle,
    msg_tx: mpsc::Sender<Msg>,
}

impl EffectRunner {
    pub fn new(msg_tx: mpsc::Sender<Msg>, settings: ClientSettings) -> Result<Self, TransferError> {
        let client = ClientHandle::new(settings)?;
        let runner = Self { client, msg_tx };
        runner.spawn_event_pump();
        Ok(runner)
    }

    pub fn run(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::UploadDocument { task_id, file } => {
                    chat_info!(
                        "UploadDocument task_id={} file={} ({} bytes)",
                        task_id,
                        file.name,
                        file.bytes.len()
                    );
                    self.client.upload(
                        task_id,
                        UploadFile {
                            name: file.name,
                            bytes: file.bytes,
                        },
                    );
                }
                Effect::SubmitQuery { query_id, query } => {
                    chat_info!("SubmitQuery query_id={} query_len={}", query_id, query.len());
                    self.client.query(query_id, query);
                }
                Effect::ScheduleStatusClear { generation } => {
                    let msg_tx = self.msg_tx.clone();
                    thread::spawn(move || {
                        thread::sleep(STATUS_CLEAR_DELAY);
                        let _ = msg_tx.send(Msg::StatusCleared { generation });
                    });
                }
            }
        }
    }

    fn spawn_event_pump(&self) {
        let client = self.client.clone();
        let msg_tx = self.msg_tx.clone();
        thread::spawn(move || loop {
            if let Some(event) = client.try_recv() {
                let msg = match event {
                    ClientEvent::UploadCompleted { task_id, result } => Msg::UploadFinished {
                        task_id,
                        outcome: match result {
                            Ok(receipt) => UploadOutcome::Indexed(receipt.message),
                            Err(err) => {
                                chat_warn!("Upload {} failed: {}", task_id, err);
                                UploadOutcome::Failed(err.message)
                            }
                        },
                    },
                    ClientEvent::QueryCompleted { request_id, result } => Msg::QueryFinished {
                        query_id: request_id,
                        outcome: match result {
                            Ok(reply) => QueryOutcome::Answered(map_reply(reply)),
                            Err(err) => {
                                chat_warn!("Query {} failed: {}", request_id, err);
                                QueryOutcome::Failed
                            }
                        },
                    },
                };
                if msg_tx.send(msg).is_err() {
                    break;
                }
            } else {
                thread::sleep(Duration::from_millis(20));
            }
        });
    }
}

fn map_reply(reply: docchat_client::QueryReply) -> QueryAnswer {
    QueryAnswer {
        answer: reply.answer,
        sources: reply
            .sources
            .into_iter()
            .map(|passage| SourceCitation {
                text: passage.text,
                full_text: passage.full_text,
                score: passage.score,
            })
            .collect(),
    }
}
