//! Vertical scroll state for the single-page site.
//!
//! Tracks content height, viewport height and the current offset in terminal
//! rows. Every mutation clamps the offset so the last page never scrolls past
//! the end of the content.

/// Shared metrics for vertical scrolling.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScrollMetrics {
    offset: u16,
    content_height: u16,
    viewport_height: u16,
}

impl ScrollMetrics {
    pub const fn offset(&self) -> u16 {
        self.offset
    }

    pub const fn content_height(&self) -> u16 {
        self.content_height
    }

    pub const fn viewport_height(&self) -> u16 {
        self.viewport_height
    }

    /// Returns the maximum valid scroll offset.
    pub fn max_offset(&self) -> u16 {
        self.content_height.saturating_sub(self.viewport_height)
    }

    pub fn is_scrollable(&self) -> bool {
        self.content_height > self.viewport_height && self.viewport_height > 0
    }

    /// Half-open row range `[start, end)` of content currently on screen.
    pub fn visible_rows(&self) -> (u16, u16) {
        let end = self.offset.saturating_add(self.viewport_height).min(self.content_height);
        (self.offset, end)
    }

    pub fn update_viewport_height(&mut self, viewport_height: u16) {
        self.viewport_height = viewport_height;
        self.clamp_offset();
    }

    pub fn update_content_height(&mut self, content_height: u16) {
        self.content_height = content_height;
        self.clamp_offset();
    }

    /// Scrolls by relative line count (`+` down, `-` up). Returns whether the offset moved.
    pub fn scroll_lines(&mut self, delta: i32) -> bool {
        let before = self.offset;
        let next = (i32::from(self.offset) + delta).clamp(0, i32::from(self.max_offset()));
        self.offset = next as u16;
        before != self.offset
    }

    /// Scrolls by whole viewports.
    pub fn scroll_pages(&mut self, delta_pages: i32) -> bool {
        let page = i32::from(self.viewport_height.max(1));
        self.scroll_lines(page.saturating_mul(delta_pages))
    }

    /// Jumps to `row`, clamped to the scrollable range.
    pub fn scroll_to(&mut self, row: u16) -> bool {
        let before = self.offset;
        self.offset = row.min(self.max_offset());
        before != self.offset
    }

    pub fn scroll_to_top(&mut self) -> bool {
        self.scroll_to(0)
    }

    pub fn scroll_to_bottom(&mut self) -> bool {
        self.scroll_to(self.max_offset())
    }

    fn clamp_offset(&mut self) {
        self.offset = self.offset.min(self.max_offset());
    }
}
