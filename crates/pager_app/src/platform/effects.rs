use std::time::Duration;

use pager_core::{Effect, Msg, NoticeLevel, ResponseCode};
use pager_engine::{EngineCommand, EngineEvent, EngineHandle, EnvelopeCode};
use pager_logging::{pager_error, pager_info, pager_warn};

use super::container::ResultsContainer;

/// Executes effects against the engine and the results container.
pub struct EffectRunner {
    engine: EngineHandle,
    container: ResultsContainer,
    outstanding: usize,
}

impl EffectRunner {
    pub fn new(engine: EngineHandle, container: ResultsContainer) -> Self {
        Self {
            engine,
            container,
            outstanding: 0,
        }
    }

    pub fn container(&self) -> &ResultsContainer {
        &self.container
    }

    pub fn container_mut(&mut self) -> &mut ResultsContainer {
        &mut self.container
    }

    /// Engine commands submitted and not yet answered.
    pub fn outstanding(&self) -> usize {
        self.outstanding
    }

    pub fn submit(&mut self, command: EngineCommand) {
        if self.engine.submit(command) {
            self.outstanding += 1;
        } else {
            pager_error!("engine worker is gone; command dropped");
        }
    }

    pub fn recv_event(&mut self, timeout: Duration) -> Option<EngineEvent> {
        let event = self.engine.recv_timeout(timeout)?;
        self.outstanding = self.outstanding.saturating_sub(1);
        Some(event)
    }

    pub fn run(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::ShowLoading => self.container.show_loading(),
                Effect::HideLoading => self.container.hide_loading(),
                Effect::FetchPage { page, url } => {
                    pager_info!("FetchPage page={} url={}", page, url);
                    self.submit(EngineCommand::FetchPage { page, url });
                }
                Effect::AppendFragment(fragment) => self.container.append(fragment),
                Effect::ReportError { context, message } => {
                    pager_warn!("{:?} failed: {}", context, message);
                }
                Effect::Notify(notice) => match notice.level {
                    NoticeLevel::Success => pager_info!("{}", notice.message),
                    NoticeLevel::Warning => pager_warn!("{}", notice.message),
                    NoticeLevel::Error => pager_error!("{}", notice.message),
                },
                Effect::SendFeedbackAnswer { phone, message } => {
                    self.submit(EngineCommand::SendFeedbackAnswer { phone, message });
                }
                Effect::MarkFeedbackReplied {
                    feedback_id,
                    reply_content,
                } => {
                    self.submit(EngineCommand::MarkFeedbackReplied {
                        feedback_id,
                        reply_content,
                    });
                }
                Effect::GenerateReport => self.submit(EngineCommand::GenerateReport),
            }
        }
    }
}

pub fn event_to_msg(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::PageFetched { page, result } => match result {
            Ok(output) => Msg::PageLoaded {
                page,
                body: output.body,
            },
            Err(err) => Msg::PageFailed {
                page,
                message: err.to_string(),
            },
        },
        EngineEvent::FeedbackAnswered(result) => Msg::FeedbackAnswered(map_result(result)),
        EngineEvent::FeedbackMarked {
            feedback_id,
            result,
        } => Msg::FeedbackMarked {
            feedback_id,
            result: map_result(result),
        },
        EngineEvent::ReportGenerated(result) => Msg::ReportGenerated(map_result(result)),
    }
}

fn map_result<E: ToString>(result: Result<EnvelopeCode, E>) -> Result<ResponseCode, String> {
    result.map(map_code).map_err(|err| err.to_string())
}

fn map_code(code: EnvelopeCode) -> ResponseCode {
    match code {
        EnvelopeCode::Number(n) => ResponseCode::Number(n),
        EnvelopeCode::Text(text) => ResponseCode::Text(text),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pager_engine::{FetchMetadata, FetchOutput};

    #[test]
    fn page_events_map_to_controller_messages() {
        let msg = event_to_msg(EngineEvent::PageFetched {
            page: 2,
            result: Ok(FetchOutput {
                body: "<div>item3</div>".to_string(),
                metadata: FetchMetadata {
                    url: String::new(),
                    final_url: String::new(),
                    content_type: None,
                    encoding_label: "UTF-8".to_string(),
                    byte_len: 16,
                },
            }),
        });
        assert_eq!(
            msg,
            Msg::PageLoaded {
                page: 2,
                body: "<div>item3</div>".to_string()
            }
        );
    }

    #[test]
    fn envelope_codes_map_one_to_one() {
        let msg = event_to_msg(EngineEvent::ReportGenerated(Ok(EnvelopeCode::Number(1))));
        assert_eq!(msg, Msg::ReportGenerated(Ok(ResponseCode::Number(1))));

        let msg = event_to_msg(EngineEvent::FeedbackMarked {
            feedback_id: "7".to_string(),
            result: Ok(EnvelopeCode::Text("success".to_string())),
        });
        assert_eq!(
            msg,
            Msg::FeedbackMarked {
                feedback_id: "7".to_string(),
                result: Ok(ResponseCode::Text("success".to_string())),
            }
        );
    }
}
