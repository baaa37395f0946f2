use std::collections::BTreeSet;

/// The feedback row a reply is addressed to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplyTarget {
    pub phone: String,
    pub feedback_id: String,
    pub reply_id: String,
}

impl ReplyTarget {
    /// Build from the attributes of the clicked reply button
    /// (`data-tel`, `data-fid`, `id`). Returns `None` if any is missing.
    pub fn from_attributes<'a, I>(attrs: I) -> Option<Self>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut phone = None;
        let mut feedback_id = None;
        let mut reply_id = None;
        for (name, value) in attrs {
            match name {
                "data-tel" => phone = Some(value.to_string()),
                "data-fid" => feedback_id = Some(value.to_string()),
                "id" => reply_id = Some(value.to_string()),
                _ => {}
            }
        }
        Some(Self {
            phone: phone?,
            feedback_id: feedback_id?,
            reply_id: reply_id?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub(crate) struct FeedbackState {
    pub(crate) target: Option<ReplyTarget>,
    pub(crate) popup_visible: bool,
    pub(crate) draft: String,
    pub(crate) sending: bool,
    /// Reply buttons disabled after a successful send.
    pub(crate) replied: BTreeSet<String>,
}
