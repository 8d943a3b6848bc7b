//! Screen layout: header, scrolling body and the hint bar.

use ratatui::layout::{Constraint, Layout, Rect};

/// Rows taken by the header navigation bar (bordered, one content row).
pub const HEADER_HEIGHT: u16 = 3;
/// Rows taken by the hint bar.
pub const HINTS_HEIGHT: u16 = 1;

pub struct MainLayout;

impl MainLayout {
    /// Splits the terminal into `[header, body, hints]`.
    ///
    /// The split does not depend on the viewport class; only the header's
    /// contents and the page layout change between mobile and desktop.
    pub fn areas(size: Rect) -> [Rect; 3] {
        Layout::vertical([
            Constraint::Length(HEADER_HEIGHT),
            Constraint::Min(0),
            Constraint::Length(HINTS_HEIGHT),
        ])
        .areas(size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn body_takes_remaining_rows() {
        let [header, body, hints] = MainLayout::areas(Rect::new(0, 0, 100, 30));
        assert_eq!(header, Rect::new(0, 0, 100, 3));
        assert_eq!(body, Rect::new(0, 3, 100, 26));
        assert_eq!(hints, Rect::new(0, 29, 100, 1));
    }
}
