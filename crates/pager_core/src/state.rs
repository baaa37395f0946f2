use crate::feedback::{FeedbackState, ReplyTarget};
use crate::view_model::{AppViewModel, ReplyView};
use crate::{Endpoint, Notice};

/// Page number the listing is rendered with on first load.
pub const FIRST_PAGE: u32 = 1;

/// What a failed page request does to the in-flight flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Keep the flag set: the controller never fetches again.
    Wedge,
    /// Clear the flag and rewind the page so the next bottom signal retries it.
    #[default]
    Release,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PaginationState {
    pub(crate) endpoint: Endpoint,
    pub(crate) current_page: u32,
    pub(crate) request_in_flight: bool,
    pub(crate) has_more: bool,
    pub(crate) failure_policy: FailurePolicy,
    pub(crate) loading_visible: bool,
    pub(crate) stalled: bool,
    pub(crate) fragments_appended: usize,
    pub(crate) failed_fetches: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub(crate) struct ReportState {
    pub(crate) generating: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    pagination: PaginationState,
    feedback: FeedbackState,
    report: ReportState,
    last_notice: Option<Notice>,
    dirty: bool,
}

impl AppState {
    pub fn new(endpoint: Endpoint, failure_policy: FailurePolicy) -> Self {
        Self {
            pagination: PaginationState {
                endpoint,
                current_page: FIRST_PAGE,
                request_in_flight: false,
                has_more: true,
                failure_policy,
                loading_visible: false,
                stalled: false,
                fragments_appended: 0,
                failed_fetches: 0,
            },
            feedback: FeedbackState::default(),
            report: ReportState::default(),
            last_notice: None,
            dirty: false,
        }
    }

    pub fn view(&self) -> AppViewModel {
        let p = &self.pagination;
        let f = &self.feedback;
        AppViewModel {
            endpoint: p.endpoint.as_str().to_string(),
            current_page: p.current_page,
            request_in_flight: p.request_in_flight,
            has_more: p.has_more,
            loading_visible: p.loading_visible,
            stalled: p.stalled,
            fragments_appended: p.fragments_appended,
            failed_fetches: p.failed_fetches,
            reply: ReplyView {
                popup_visible: f.popup_visible,
                target: f.target.clone(),
                draft: f.draft.clone(),
                sending: f.sending,
                replied_ids: f.replied.iter().cloned().collect(),
            },
            report_generating: self.report.generating,
            last_notice: self.last_notice.clone(),
            dirty: self.dirty,
        }
    }

    /// Returns whether anything changed since the last call, and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub fn current_page(&self) -> u32 {
        self.pagination.current_page
    }

    pub fn request_in_flight(&self) -> bool {
        self.pagination.request_in_flight
    }

    pub fn has_more(&self) -> bool {
        self.pagination.has_more
    }

    pub fn is_stalled(&self) -> bool {
        self.pagination.stalled
    }

    /// True while any request started by the controller has not settled.
    pub fn has_pending_requests(&self) -> bool {
        (self.pagination.request_in_flight && !self.pagination.stalled)
            || self.feedback.sending
            || self.report.generating
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn pagination(&self) -> &PaginationState {
        &self.pagination
    }

    pub(crate) fn pagination_mut(&mut self) -> &mut PaginationState {
        self.dirty = true;
        &mut self.pagination
    }

    pub(crate) fn feedback(&self) -> &FeedbackState {
        &self.feedback
    }

    pub(crate) fn feedback_mut(&mut self) -> &mut FeedbackState {
        self.dirty = true;
        &mut self.feedback
    }

    pub(crate) fn report(&self) -> &ReportState {
        &self.report
    }

    pub(crate) fn report_mut(&mut self) -> &mut ReportState {
        self.dirty = true;
        &mut self.report
    }

    pub(crate) fn open_reply(&mut self, target: ReplyTarget) {
        let feedback = self.feedback_mut();
        feedback.target = Some(target);
        feedback.popup_visible = true;
    }

    pub(crate) fn set_notice(&mut self, notice: Notice) {
        self.last_notice = Some(notice);
        self.mark_dirty();
    }
}
