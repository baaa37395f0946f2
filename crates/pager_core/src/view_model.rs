use crate::{Notice, ReplyTarget};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppViewModel {
    pub endpoint: String,
    pub current_page: u32,
    pub request_in_flight: bool,
    pub has_more: bool,
    pub loading_visible: bool,
    pub stalled: bool,
    pub fragments_appended: usize,
    pub failed_fetches: u32,
    pub reply: ReplyView,
    pub report_generating: bool,
    pub last_notice: Option<Notice>,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ReplyView {
    pub popup_visible: bool,
    pub target: Option<ReplyTarget>,
    pub draft: String,
    pub sending: bool,
    pub replied_ids: Vec<String>,
}
