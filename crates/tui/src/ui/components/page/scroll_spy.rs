//! Section observers: decide which page section is "in view".
//!
//! The navigation bar does not compute this itself; it only consumes the
//! section id an observer reports. [`ScrollSpy`] is the default observer.

use std::fmt::Debug;

/// Vertical extent of one page section, in page rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionSpan {
    pub id: String,
    pub top: u16,
    pub height: u16,
}

impl SectionSpan {
    pub fn bottom(&self) -> u16 {
        self.top.saturating_add(self.height)
    }
}

/// What an observer sees after each scroll or relayout.
#[derive(Debug, Clone, Copy)]
pub struct PageViewport<'a> {
    pub sections: &'a [SectionSpan],
    pub offset: u16,
    pub height: u16,
}

/// Source of "section X is now in view" signals.
pub trait SectionObserver: Debug {
    /// Returns a section id only when the in-view section changed since the last call.
    fn observe(&mut self, viewport: &PageViewport<'_>) -> Option<String>;

    /// Records `section_id` as the in-view section without consulting the viewport.
    ///
    /// Used after an explicit jump to an anchor; the next `observe` only
    /// reports once scrolling moves away from it.
    fn sync(&mut self, section_id: &str);
}

/// Reports the last section whose top has crossed the upper third of the viewport.
#[derive(Debug, Default)]
pub struct ScrollSpy {
    current: Option<String>,
}

impl ScrollSpy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }

    fn section_in_view<'a>(viewport: &PageViewport<'a>) -> Option<&'a SectionSpan> {
        let activation_row = viewport.offset.saturating_add(viewport.height / 3);
        viewport
            .sections
            .iter()
            .take_while(|section| section.top <= activation_row)
            .last()
            .or_else(|| viewport.sections.first())
    }
}

impl SectionObserver for ScrollSpy {
    fn observe(&mut self, viewport: &PageViewport<'_>) -> Option<String> {
        let section = Self::section_in_view(viewport)?;
        if self.current.as_deref() == Some(section.id.as_str()) {
            return None;
        }
        self.current = Some(section.id.clone());
        Some(section.id.clone())
    }

    fn sync(&mut self, section_id: &str) {
        self.current = Some(section_id.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spans() -> Vec<SectionSpan> {
        [("hero", 0, 20), ("services", 20, 30), ("case-studies", 50, 30), ("contact", 80, 40)]
            .into_iter()
            .map(|(id, top, height)| SectionSpan {
                id: id.to_string(),
                top,
                height,
            })
            .collect()
    }

    #[test]
    fn reports_section_crossing_upper_third() {
        let sections = spans();
        let mut spy = ScrollSpy::new();
        let view = |offset| PageViewport {
            sections: &sections,
            offset,
            height: 30,
        };

        assert_eq!(spy.observe(&view(0)).as_deref(), Some("hero"));
        // activation row 19: still the hero
        assert_eq!(spy.observe(&view(9)), None);
        // activation row 20: services reached
        assert_eq!(spy.observe(&view(10)).as_deref(), Some("services"));
        assert_eq!(spy.observe(&view(12)), None);
        assert_eq!(spy.observe(&view(45)).as_deref(), Some("case-studies"));
        assert_eq!(spy.observe(&view(0)).as_deref(), Some("hero"));
        assert_eq!(spy.current(), Some("hero"));
    }

    #[test]
    fn sync_holds_section_until_scroll_moves() {
        let sections = spans();
        let mut spy = ScrollSpy::new();
        let view = |offset| PageViewport {
            sections: &sections,
            offset,
            height: 30,
        };

        // activation row 70 sits inside case-studies
        assert_eq!(spy.observe(&view(60)).as_deref(), Some("case-studies"));
        spy.sync("contact");
        assert_eq!(spy.current(), Some("contact"));
        assert_eq!(spy.observe(&view(55)).as_deref(), Some("case-studies"));
    }

    #[test]
    fn empty_page_reports_nothing() {
        let mut spy = ScrollSpy::new();
        let viewport = PageViewport {
            sections: &[],
            offset: 0,
            height: 10,
        };
        assert_eq!(spy.observe(&viewport), None);
    }
}
