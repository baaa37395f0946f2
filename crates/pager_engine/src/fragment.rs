use scraper::Html;

/// Size of one appended fragment, used by hosts to grow their content height.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FragmentSummary {
    /// Top-level elements, i.e. listing rows.
    pub rows: usize,
    /// Characters of visible text, whitespace trimmed per node.
    pub text_len: usize,
}

pub fn summarize_fragment(html: &str) -> FragmentSummary {
    if html.trim().is_empty() {
        return FragmentSummary::default();
    }

    let doc = Html::parse_fragment(html);
    let root = doc.root_element();
    let rows = root
        .children()
        .filter(|node| node.value().is_element())
        .count();
    let text_len = root.text().map(|t| t.trim().chars().count()).sum();

    FragmentSummary { rows, text_len }
}
