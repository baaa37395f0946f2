use crate::{ResponseCode, ReplyTarget, ScrollMetrics};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Host reported a scroll-position change.
    Scrolled(ScrollMetrics),
    /// Page request settled with a body (empty means end of data).
    PageLoaded { page: u32, body: String },
    /// Page request failed in transport or with a non-success status.
    PageFailed { page: u32, message: String },
    /// User clicked the reply button on a feedback row.
    ReplyOpened(ReplyTarget),
    /// User dismissed the reply popup.
    ReplyCancelled,
    /// User edited the reply text.
    ReplyDraftChanged(String),
    /// User clicked send in the reply popup.
    ReplySubmitted,
    /// Answer endpoint settled.
    FeedbackAnswered(Result<ResponseCode, String>),
    /// Mark-as-replied request settled.
    FeedbackMarked {
        feedback_id: String,
        result: Result<ResponseCode, String>,
    },
    /// User clicked the report button.
    GenerateReportClicked,
    /// Report endpoint settled.
    ReportGenerated(Result<ResponseCode, String>),
    /// Fallback for placeholder wiring.
    NoOp,
}
