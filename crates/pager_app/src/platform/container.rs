use pager_core::{ElementMeasurements, ScrollMetrics};
use pager_engine::summarize_fragment;
use pager_logging::pager_debug;

use super::config::MeasurementRegime;

/// Headless stand-in for the listing's results container and the window
/// scrolled over it. Content height grows with the rows appended.
#[derive(Debug, Clone)]
pub struct ResultsContainer {
    fragments: Vec<String>,
    rows: usize,
    loading_indicators: usize,
    viewport_height: u32,
    row_height: u32,
    regime: MeasurementRegime,
}

impl ResultsContainer {
    pub fn new(viewport_height: u32, row_height: u32, regime: MeasurementRegime) -> Self {
        Self {
            fragments: Vec::new(),
            rows: 0,
            loading_indicators: 0,
            viewport_height,
            row_height,
            regime,
        }
    }

    pub fn append(&mut self, fragment: String) {
        let summary = summarize_fragment(&fragment);
        pager_debug!(
            "appended {} rows ({} chars of text)",
            summary.rows,
            summary.text_len
        );
        self.rows += summary.rows;
        self.fragments.push(fragment);
    }

    pub fn show_loading(&mut self) {
        self.loading_indicators += 1;
    }

    /// Removes every indicator, however many were appended.
    pub fn hide_loading(&mut self) {
        self.loading_indicators = 0;
    }

    pub fn is_loading(&self) -> bool {
        self.loading_indicators > 0
    }

    pub fn fragments(&self) -> &[String] {
        &self.fragments
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Page height; never shorter than the viewport.
    pub fn content_height(&self) -> u32 {
        let rows = u32::try_from(self.rows).unwrap_or(u32::MAX);
        rows.saturating_mul(self.row_height).max(self.viewport_height)
    }

    /// Measurements as the host would report them with the window scrolled
    /// all the way down.
    pub fn measure_at_bottom(&self) -> (ElementMeasurements, ElementMeasurements) {
        let content = self.content_height();
        let offset = content - self.viewport_height;
        match self.regime {
            MeasurementRegime::Document => (
                ElementMeasurements {
                    client_height: self.viewport_height,
                    scroll_top: offset,
                    scroll_height: content,
                },
                ElementMeasurements {
                    client_height: content,
                    scroll_top: 0,
                    scroll_height: content,
                },
            ),
            MeasurementRegime::Body => (
                ElementMeasurements {
                    client_height: self.viewport_height,
                    scroll_top: 0,
                    scroll_height: self.viewport_height,
                },
                ElementMeasurements {
                    client_height: self.viewport_height,
                    scroll_top: offset,
                    scroll_height: content,
                },
            ),
        }
    }

    pub fn metrics_at_bottom(&self) -> ScrollMetrics {
        let (document, body) = self.measure_at_bottom();
        ScrollMetrics::normalize(document, body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(n: usize) -> String {
        (0..n).map(|i| format!("<div>item{i}</div>")).collect()
    }

    #[test]
    fn short_listing_does_not_scroll() {
        let mut container = ResultsContainer::new(720, 48, MeasurementRegime::Document);
        container.append(rows(5));

        let metrics = container.metrics_at_bottom();
        assert!(metrics.is_at_top());
        assert!(!metrics.is_bottom_signal());
    }

    #[test]
    fn both_regimes_report_the_same_bottom() {
        let mut document = ResultsContainer::new(720, 48, MeasurementRegime::Document);
        let mut body = ResultsContainer::new(720, 48, MeasurementRegime::Body);
        document.append(rows(30));
        body.append(rows(30));

        let expected = ScrollMetrics {
            viewport_height: 720,
            scroll_offset: 30 * 48 - 720,
            content_height: 30 * 48,
        };
        assert_eq!(document.metrics_at_bottom(), expected);
        assert_eq!(body.metrics_at_bottom(), expected);
        assert!(expected.is_bottom_signal());
    }

    #[test]
    fn loading_indicators_are_removed_together() {
        let mut container = ResultsContainer::new(720, 48, MeasurementRegime::Document);
        container.show_loading();
        container.show_loading();
        assert!(container.is_loading());
        container.hide_loading();
        assert!(!container.is_loading());
    }

    #[test]
    fn empty_fragment_is_kept_but_adds_no_rows() {
        let mut container = ResultsContainer::new(720, 48, MeasurementRegime::Document);
        container.append(String::new());
        assert_eq!(container.fragments().len(), 1);
        assert_eq!(container.rows(), 0);
    }
}
