use crate::state::FailurePolicy;
use crate::{AppState, Effect, ErrorContext, Msg, Notice, NoticeLevel, ResponseCode, ScrollMetrics};

/// Code the answer endpoint returns when the message went out.
const ANSWER_SENT: i64 = 0;
/// Code the report endpoint returns when the workbook was written.
const REPORT_WRITTEN: i64 = 1;

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::Scrolled(metrics) => on_scrolled(&mut state, metrics),
        Msg::PageLoaded { page, body } => on_page_loaded(&mut state, page, body),
        Msg::PageFailed { page, message } => on_page_failed(&mut state, page, message),
        Msg::ReplyOpened(target) => {
            state.open_reply(target);
            Vec::new()
        }
        Msg::ReplyCancelled => {
            if state.feedback().popup_visible {
                state.feedback_mut().popup_visible = false;
            }
            Vec::new()
        }
        Msg::ReplyDraftChanged(text) => {
            if state.feedback().draft != text {
                state.feedback_mut().draft = text;
            }
            Vec::new()
        }
        Msg::ReplySubmitted => on_reply_submitted(&mut state),
        Msg::FeedbackAnswered(result) => on_feedback_answered(&mut state, result),
        Msg::FeedbackMarked {
            feedback_id,
            result,
        } => match result {
            Ok(_) => Vec::new(),
            Err(message) => vec![Effect::ReportError {
                context: ErrorContext::MarkReplied(feedback_id),
                message,
            }],
        },
        Msg::GenerateReportClicked => {
            if state.report().generating {
                Vec::new()
            } else {
                state.report_mut().generating = true;
                vec![Effect::GenerateReport]
            }
        }
        Msg::ReportGenerated(result) => on_report_generated(&mut state, result),
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

fn on_scrolled(state: &mut AppState, metrics: ScrollMetrics) -> Vec<Effect> {
    if !metrics.is_bottom_signal() {
        return Vec::new();
    }
    let pagination = state.pagination();
    if pagination.request_in_flight || !pagination.has_more {
        return Vec::new();
    }

    let pagination = state.pagination_mut();
    pagination.current_page += 1;
    pagination.request_in_flight = true;
    pagination.loading_visible = true;
    let page = pagination.current_page;
    let url = pagination.endpoint.page_url(page);
    vec![Effect::ShowLoading, Effect::FetchPage { page, url }]
}

fn is_awaited(state: &AppState, page: u32) -> bool {
    let pagination = state.pagination();
    pagination.request_in_flight && !pagination.stalled && pagination.current_page == page
}

fn on_page_loaded(state: &mut AppState, page: u32, body: String) -> Vec<Effect> {
    if !is_awaited(state, page) {
        return Vec::new();
    }
    let pagination = state.pagination_mut();
    if body.is_empty() {
        pagination.has_more = false;
    }
    pagination.fragments_appended += 1;
    pagination.request_in_flight = false;
    pagination.loading_visible = false;
    vec![Effect::AppendFragment(body), Effect::HideLoading]
}

fn on_page_failed(state: &mut AppState, page: u32, message: String) -> Vec<Effect> {
    if !is_awaited(state, page) {
        return Vec::new();
    }
    let pagination = state.pagination_mut();
    pagination.failed_fetches += 1;
    pagination.loading_visible = false;
    match pagination.failure_policy {
        FailurePolicy::Wedge => {
            pagination.stalled = true;
        }
        FailurePolicy::Release => {
            pagination.request_in_flight = false;
            pagination.current_page = pagination.current_page.saturating_sub(1).max(1);
        }
    }
    vec![
        Effect::ReportError {
            context: ErrorContext::Page(page),
            message,
        },
        Effect::HideLoading,
    ]
}

fn on_reply_submitted(state: &mut AppState) -> Vec<Effect> {
    let feedback = state.feedback();
    let Some(target) = feedback.target.as_ref() else {
        return Vec::new();
    };
    if feedback.sending {
        return Vec::new();
    }
    if feedback.draft.is_empty() {
        let notice = Notice::new(NoticeLevel::Warning, "reply cannot be empty");
        state.set_notice(notice.clone());
        return vec![Effect::Notify(notice)];
    }

    let effect = Effect::SendFeedbackAnswer {
        phone: target.phone.clone(),
        message: feedback.draft.clone(),
    };
    state.feedback_mut().sending = true;
    vec![effect]
}

fn on_feedback_answered(
    state: &mut AppState,
    result: Result<ResponseCode, String>,
) -> Vec<Effect> {
    if !state.feedback().sending {
        return Vec::new();
    }
    state.feedback_mut().sending = false;

    let mut effects = Vec::new();
    match result {
        Ok(code) if code.is(ANSWER_SENT) => {
            let feedback = state.feedback_mut();
            feedback.popup_visible = false;
            let reply_content = std::mem::take(&mut feedback.draft);
            if let Some(target) = feedback.target.clone() {
                feedback.replied.insert(target.reply_id);
                effects.push(notify(state, NoticeLevel::Success, "reply sent"));
                effects.push(Effect::MarkFeedbackReplied {
                    feedback_id: target.feedback_id,
                    reply_content,
                });
            }
        }
        Ok(_) => {
            effects.push(notify(state, NoticeLevel::Error, "reply failed"));
        }
        Err(message) => {
            effects.push(Effect::ReportError {
                context: ErrorContext::FeedbackAnswer,
                message,
            });
            effects.push(notify(state, NoticeLevel::Error, "reply failed"));
        }
    }
    effects
}

fn on_report_generated(
    state: &mut AppState,
    result: Result<ResponseCode, String>,
) -> Vec<Effect> {
    if !state.report().generating {
        return Vec::new();
    }
    state.report_mut().generating = false;

    match result {
        Ok(code) if code.is(REPORT_WRITTEN) => {
            vec![notify(state, NoticeLevel::Success, "report generated")]
        }
        Ok(code) => {
            let message = format!("report generation returned code {code}");
            vec![notify(state, NoticeLevel::Error, message)]
        }
        Err(message) => vec![
            Effect::ReportError {
                context: ErrorContext::Report,
                message,
            },
            notify(state, NoticeLevel::Error, "report generation failed"),
        ],
    }
}

fn notify(state: &mut AppState, level: NoticeLevel, message: impl Into<String>) -> Effect {
    let notice = Notice::new(level, message);
    state.set_notice(notice.clone());
    Effect::Notify(notice)
}
