use std::io;
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use pager_logging::{pager_debug, pager_trace};
use tokio::sync::mpsc as async_mpsc;

use crate::{AdminClient, EngineEvent, Fetcher};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineCommand {
    FetchPage { page: u32, url: String },
    SendFeedbackAnswer { phone: String, message: String },
    MarkFeedbackReplied { feedback_id: String, reply_content: String },
    GenerateReport,
}

/// Runs IO on a dedicated single-threaded runtime and reports back over a channel.
///
/// Dropping the handle closes the command channel; the worker thread then
/// exits and abandons anything still in flight.
pub struct EngineHandle {
    cmd_tx: async_mpsc::UnboundedSender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(fetcher: Arc<dyn Fetcher>, admin: Arc<dyn AdminClient>) -> io::Result<Self> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;
        let (cmd_tx, mut cmd_rx) = async_mpsc::unbounded_channel::<EngineCommand>();
        let (event_tx, event_rx) = mpsc::channel();

        thread::Builder::new()
            .name("pager-engine".to_string())
            .spawn(move || {
                runtime.block_on(async move {
                    while let Some(command) = cmd_rx.recv().await {
                        let fetcher = fetcher.clone();
                        let admin = admin.clone();
                        let event_tx = event_tx.clone();
                        tokio::spawn(async move {
                            let event =
                                handle_command(fetcher.as_ref(), admin.as_ref(), command).await;
                            let _ = event_tx.send(event);
                        });
                    }
                    pager_trace!("engine command channel closed");
                });
            })?;

        Ok(Self { cmd_tx, event_rx })
    }

    /// Queue a command. Returns false once the worker is gone.
    pub fn submit(&self, command: EngineCommand) -> bool {
        pager_debug!("engine command {:?}", command);
        self.cmd_tx.send(command).is_ok()
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }
}

async fn handle_command(
    fetcher: &dyn Fetcher,
    admin: &dyn AdminClient,
    command: EngineCommand,
) -> EngineEvent {
    match command {
        EngineCommand::FetchPage { page, url } => EngineEvent::PageFetched {
            page,
            result: fetcher.fetch_page(&url).await,
        },
        EngineCommand::SendFeedbackAnswer { phone, message } => {
            EngineEvent::FeedbackAnswered(admin.send_feedback_answer(&phone, &message).await)
        }
        EngineCommand::MarkFeedbackReplied {
            feedback_id,
            reply_content,
        } => {
            let result = admin
                .mark_feedback_replied(&feedback_id, &reply_content)
                .await;
            EngineEvent::FeedbackMarked {
                feedback_id,
                result,
            }
        }
        EngineCommand::GenerateReport => {
            EngineEvent::ReportGenerated(admin.generate_report().await)
        }
    }
}
