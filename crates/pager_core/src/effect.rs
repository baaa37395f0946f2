#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Append the loading indicator to the results container.
    ShowLoading,
    /// Remove every loading indicator from the results container.
    HideLoading,
    FetchPage { page: u32, url: String },
    /// Append a server-rendered fragment, possibly empty.
    AppendFragment(String),
    /// Diagnostic-only error report; never shown to the user.
    ReportError { context: ErrorContext, message: String },
    Notify(Notice),
    SendFeedbackAnswer { phone: String, message: String },
    MarkFeedbackReplied { feedback_id: String, reply_content: String },
    GenerateReport,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorContext {
    Page(u32),
    FeedbackAnswer,
    MarkReplied(String),
    Report,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Warning,
    Error,
}

/// Transient user-facing notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn new(level: NoticeLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
        }
    }
}
