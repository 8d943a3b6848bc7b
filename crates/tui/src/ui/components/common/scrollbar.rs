//! Themed vertical scrollbar for the page viewport.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    widgets::{Scrollbar, ScrollbarOrientation, ScrollbarState, StatefulWidget},
};

use super::ScrollMetrics;
use crate::ui::theme::roles::Theme;

/// Renders a scrollbar on the right edge of `area` when the content overflows.
pub fn render_vertical_scrollbar(buf: &mut Buffer, area: Rect, theme: &dyn Theme, metrics: &ScrollMetrics) {
    if !metrics.is_scrollable() {
        return;
    }
    let mut scrollbar_state = ScrollbarState::new(metrics.max_offset() as usize)
        .position(metrics.offset() as usize)
        .viewport_content_length(metrics.viewport_height() as usize);
    Scrollbar::new(ScrollbarOrientation::VerticalRight)
        .begin_symbol(None)
        .end_symbol(None)
        .thumb_style(Style::default().fg(theme.roles().accent_primary))
        .track_style(Style::default().fg(theme.roles().border))
        .render(area, buf, &mut scrollbar_state);
}
