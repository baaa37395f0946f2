/// Raw scroll measurements reported by one element of the host page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ElementMeasurements {
    /// Height of the visible part of the element.
    pub client_height: u32,
    /// Distance scrolled away above the visible part.
    pub scroll_top: u32,
    /// Full height of the element's content.
    pub scroll_height: u32,
}

/// Viewport geometry after cross-environment normalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScrollMetrics {
    pub viewport_height: u32,
    pub scroll_offset: u32,
    pub content_height: u32,
}

impl ScrollMetrics {
    /// Pick one consistent measurement source.
    ///
    /// Some hosts report a document-level `scroll_top` of 0 and keep the real
    /// values on the body element. When the document reads 0 all three values
    /// come from the body; otherwise all three come from the document. Values
    /// are never mixed across the two elements.
    pub fn normalize(document: ElementMeasurements, body: ElementMeasurements) -> Self {
        if document.scroll_top == 0 {
            Self::from(body)
        } else {
            Self::from(document)
        }
    }

    pub fn is_at_top(&self) -> bool {
        self.scroll_offset == 0
    }

    pub fn is_at_bottom(&self) -> bool {
        u64::from(self.scroll_offset) + u64::from(self.viewport_height)
            == u64::from(self.content_height)
    }

    /// True when the user scrolled away from the top and reached the bottom.
    pub fn is_bottom_signal(&self) -> bool {
        !self.is_at_top() && self.is_at_bottom()
    }
}

impl From<ElementMeasurements> for ScrollMetrics {
    fn from(m: ElementMeasurements) -> Self {
        Self {
            viewport_height: m.client_height,
            scroll_offset: m.scroll_top,
            content_height: m.scroll_height,
        }
    }
}
