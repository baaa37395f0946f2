use std::sync::Arc;
use std::time::Duration;

use pager_engine::{
    AdminClient, EngineCommand, EngineEvent, EngineHandle, EnvelopeCode, FetchError, FetchMetadata,
    FetchOutput, Fetcher,
};

struct EchoFetcher;

#[async_trait::async_trait]
impl Fetcher for EchoFetcher {
    async fn fetch_page(&self, url: &str) -> Result<FetchOutput, FetchError> {
        Ok(FetchOutput {
            body: format!("<div>{url}</div>"),
            metadata: FetchMetadata {
                url: url.to_string(),
                final_url: url.to_string(),
                content_type: Some("text/html".to_string()),
                encoding_label: "UTF-8".to_string(),
                byte_len: 0,
            },
        })
    }
}

struct FixedAdmin;

#[async_trait::async_trait]
impl AdminClient for FixedAdmin {
    async fn send_feedback_answer(&self, _: &str, _: &str) -> Result<EnvelopeCode, FetchError> {
        Ok(EnvelopeCode::Number(0))
    }

    async fn mark_feedback_replied(&self, _: &str, _: &str) -> Result<EnvelopeCode, FetchError> {
        Ok(EnvelopeCode::Text("success".to_string()))
    }

    async fn generate_report(&self) -> Result<EnvelopeCode, FetchError> {
        Ok(EnvelopeCode::Number(1))
    }
}

fn handle() -> EngineHandle {
    EngineHandle::new(Arc::new(EchoFetcher), Arc::new(FixedAdmin)).expect("engine")
}

#[test]
fn fetch_command_round_trips_through_worker() {
    let engine = handle();
    assert!(engine.submit(EngineCommand::FetchPage {
        page: 2,
        url: "http://admin.local/feedback?page=2".to_string(),
    }));

    let event = engine.recv_timeout(Duration::from_secs(5)).expect("event");
    match event {
        EngineEvent::PageFetched { page, result } => {
            assert_eq!(page, 2);
            assert_eq!(
                result.unwrap().body,
                "<div>http://admin.local/feedback?page=2</div>"
            );
        }
        other => panic!("unexpected event {other:?}"),
    }
    assert!(engine.try_recv().is_none());
}

#[test]
fn admin_commands_report_their_envelopes() {
    let engine = handle();
    engine.submit(EngineCommand::MarkFeedbackReplied {
        feedback_id: "42".to_string(),
        reply_content: "done".to_string(),
    });

    let event = engine.recv_timeout(Duration::from_secs(5)).expect("event");
    assert_eq!(
        event,
        EngineEvent::FeedbackMarked {
            feedback_id: "42".to_string(),
            result: Ok(EnvelopeCode::Text("success".to_string())),
        }
    );

    engine.submit(EngineCommand::GenerateReport);
    let event = engine.recv_timeout(Duration::from_secs(5)).expect("event");
    assert_eq!(event, EngineEvent::ReportGenerated(Ok(EnvelopeCode::Number(1))));
}
