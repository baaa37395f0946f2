//! Pager core: pure pagination state machine and view-model helpers.
//!
//! Everything here is synchronous and side-effect free. The host feeds
//! [`Msg`] values into [`update`] and executes the returned [`Effect`]s.
mod code;
mod effect;
mod endpoint;
mod feedback;
mod msg;
mod scroll;
mod state;
mod update;
mod view_model;

pub use code::ResponseCode;
pub use effect::{Effect, ErrorContext, Notice, NoticeLevel};
pub use endpoint::Endpoint;
pub use feedback::ReplyTarget;
pub use msg::Msg;
pub use scroll::{ElementMeasurements, ScrollMetrics};
pub use state::{AppState, FailurePolicy, FIRST_PAGE};
pub use update::update;
pub use view_model::{AppViewModel, ReplyView};
