use digitalfront_types::ViewportClass;
use digitalfront_util::SectionContent;
use rat_focus::{FocusBuilder, FocusFlag, HasFocus};
use ratatui::layout::Rect;
use tracing::{debug, warn};

use super::scroll_spy::{PageViewport, SectionSpan};
use crate::ui::components::common::{ScrollMetrics, VisibilityObserver};
use crate::ui::components::contact::contact_block_height;

/// Id of the section that hosts the contact form.
pub const CONTACT_SECTION_ID: &str = "contact";
/// Columns left blank on either side of the content.
pub const CONTENT_MARGIN: u16 = 2;
/// Rows above a section body: spacer, title, spacer.
const HEADER_ROWS: u16 = 3;
/// Spacer row below each section.
const FOOTER_ROWS: u16 = 1;
const MIN_TEXT_WIDTH: u16 = 16;

/// One laid-out section on the page canvas.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionLayout {
    pub span: SectionSpan,
    pub title: String,
    /// Wrapped body rows; empty for the contact section.
    pub body: Vec<String>,
}

impl SectionLayout {
    pub fn title_row(&self) -> u16 {
        self.span.top + 1
    }

    pub fn body_top(&self) -> u16 {
        self.span.top + HEADER_ROWS
    }

    pub fn is_contact(&self) -> bool {
        self.span.id == CONTACT_SECTION_ID
    }
}

/// Scrollable single-page canvas: section layout, scroll position and
/// reveal-on-scroll state.
#[derive(Debug, Clone)]
pub struct PageState {
    sections: Vec<SectionContent>,
    layout: Vec<SectionLayout>,
    spans: Vec<SectionSpan>,
    canvas_width: u16,
    text_width: u16,
    viewport: ViewportClass,
    pub metrics: ScrollMetrics,
    reveal: VisibilityObserver,
    pub focus: FocusFlag,
    pub last_area: Rect,
}

impl PageState {
    pub fn new(sections: Vec<SectionContent>) -> Self {
        Self {
            sections,
            layout: Vec::new(),
            spans: Vec::new(),
            canvas_width: 0,
            text_width: 0,
            viewport: ViewportClass::Desktop,
            metrics: ScrollMetrics::default(),
            reveal: VisibilityObserver::default(),
            focus: FocusFlag::named("page"),
            last_area: Rect::default(),
        }
    }

    pub fn layout(&self) -> &[SectionLayout] {
        &self.layout
    }

    pub fn canvas_width(&self) -> u16 {
        self.canvas_width
    }

    pub fn is_revealed(&self, section_id: &str) -> bool {
        self.reveal.is_revealed(section_id)
    }

    /// What section observers get to see.
    pub fn viewport(&self) -> PageViewport<'_> {
        PageViewport {
            sections: &self.spans,
            offset: self.metrics.offset(),
            height: self.metrics.viewport_height(),
        }
    }

    /// Where the contact block sits on the canvas, if the page has one.
    pub fn contact_area(&self) -> Option<Rect> {
        self.layout.iter().find(|section| section.is_contact()).map(|section| Rect {
            x: CONTENT_MARGIN,
            y: section.body_top(),
            width: self.text_width,
            height: contact_block_height(self.viewport),
        })
    }

    /// Lays the sections out for `area` (the page's screen area).
    ///
    /// One column on the right is kept for the scrollbar. The scroll offset is
    /// clamped to the new content height.
    pub fn relayout(&mut self, area: Rect, viewport: ViewportClass) {
        self.canvas_width = area.width.saturating_sub(1);
        self.text_width = self.canvas_width.saturating_sub(CONTENT_MARGIN * 2).max(MIN_TEXT_WIDTH);
        self.viewport = viewport;

        let mut top = 0u16;
        let mut layout = Vec::with_capacity(self.sections.len());
        for section in &self.sections {
            let body = if section.id == CONTACT_SECTION_ID {
                Vec::new()
            } else {
                wrap_paragraphs(&section.body, self.text_width)
            };
            let body_height = if section.id == CONTACT_SECTION_ID {
                contact_block_height(viewport)
            } else {
                body.len() as u16
            };
            let height = HEADER_ROWS + body_height + FOOTER_ROWS;
            layout.push(SectionLayout {
                span: SectionSpan {
                    id: section.id.clone(),
                    top,
                    height,
                },
                title: section.title.clone(),
                body,
            });
            top = top.saturating_add(height);
        }

        for section in &layout {
            self.reveal.observe(&section.span.id, section.span.top, section.span.height);
        }
        self.spans = layout.iter().map(|section| section.span.clone()).collect();
        self.layout = layout;
        self.metrics.update_viewport_height(area.height);
        self.metrics.update_content_height(top);
        debug!(width = area.width, height = area.height, content_height = top, "page laid out");
        self.refresh_reveal();
    }

    /// Marks sections that reached the reveal threshold.
    pub fn refresh_reveal(&mut self) {
        let revealed = self.reveal.update(self.metrics.offset(), self.metrics.viewport_height());
        if !revealed.is_empty() {
            debug!(?revealed, "sections revealed");
        }
    }

    /// Scrolls so the anchored section starts at the top of the viewport.
    ///
    /// Returns `false` for an anchor that names no section.
    pub fn scroll_to_anchor(&mut self, anchor: &str) -> bool {
        let id = anchor.trim_start_matches('#');
        let Some(top) = self.spans.iter().find(|span| span.id == id).map(|span| span.top) else {
            warn!(anchor, "no section for anchor");
            return false;
        };
        self.metrics.scroll_to(top);
        self.refresh_reveal();
        true
    }

    pub fn scroll_lines(&mut self, delta: i32) -> bool {
        let moved = self.metrics.scroll_lines(delta);
        if moved {
            self.refresh_reveal();
        }
        moved
    }

    pub fn scroll_pages(&mut self, delta: i32) -> bool {
        let moved = self.metrics.scroll_pages(delta);
        if moved {
            self.refresh_reveal();
        }
        moved
    }

    pub fn scroll_to_top(&mut self) -> bool {
        let moved = self.metrics.scroll_to_top();
        if moved {
            self.refresh_reveal();
        }
        moved
    }

    pub fn scroll_to_bottom(&mut self) -> bool {
        let moved = self.metrics.scroll_to_bottom();
        if moved {
            self.refresh_reveal();
        }
        moved
    }

    /// Scrolls the minimum amount needed to show canvas rows `top..top + height`.
    pub fn scroll_into_view(&mut self, top: u16, height: u16) -> bool {
        let (first, end) = self.metrics.visible_rows();
        let bottom = top.saturating_add(height);
        let target = if top < first {
            top
        } else if bottom > end {
            bottom.saturating_sub(self.metrics.viewport_height()).min(top)
        } else {
            return false;
        };
        let moved = self.metrics.scroll_to(target);
        if moved {
            self.refresh_reveal();
        }
        moved
    }
}

/// Wraps each paragraph to `width` with a blank row between paragraphs.
fn wrap_paragraphs(paragraphs: &[String], width: u16) -> Vec<String> {
    let mut rows = Vec::new();
    for (idx, paragraph) in paragraphs.iter().enumerate() {
        if idx > 0 {
            rows.push(String::new());
        }
        rows.extend(textwrap::wrap(paragraph, usize::from(width)).into_iter().map(|line| line.into_owned()));
    }
    rows
}

impl HasFocus for PageState {
    fn build(&self, builder: &mut FocusBuilder) {
        builder.leaf_widget(self);
    }

    fn focus(&self) -> FocusFlag {
        self.focus.clone()
    }

    fn area(&self) -> Rect {
        self.last_area
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use digitalfront_util::SiteConfig;

    fn page(width: u16, height: u16, viewport: ViewportClass) -> PageState {
        let mut page = PageState::new(SiteConfig::default().sections);
        page.relayout(Rect::new(0, 3, width, height), viewport);
        page
    }

    #[test]
    fn sections_are_stacked_without_gaps() {
        let page = page(120, 30, ViewportClass::Desktop);
        let spans = page.viewport().sections;
        assert_eq!(spans.first().map(|s| s.id.as_str()), Some("hero"));
        for pair in spans.windows(2) {
            assert_eq!(pair[0].bottom(), pair[1].top);
        }
        assert_eq!(page.metrics.content_height(), spans.last().map(SectionSpan::bottom).unwrap_or(0));
    }

    #[test]
    fn contact_block_grows_in_mobile_layout() {
        let desktop = page(120, 30, ViewportClass::Desktop);
        let mobile = page(60, 30, ViewportClass::Mobile);
        let desktop_area = desktop.contact_area().expect("contact");
        let mobile_area = mobile.contact_area().expect("contact");
        assert!(mobile_area.height > desktop_area.height);
        assert_eq!(desktop_area.x, CONTENT_MARGIN);
    }

    #[test]
    fn anchor_scroll_moves_section_to_top_and_reveals_it() {
        let mut page = page(120, 20, ViewportClass::Desktop);
        assert!(!page.is_revealed("process"));
        assert!(page.scroll_to_anchor("#process"));
        let top = page.viewport().sections.iter().find(|s| s.id == "process").map(|s| s.top);
        assert_eq!(Some(page.metrics.offset()), top.map(|t| t.min(page.metrics.max_offset())));
        assert!(page.is_revealed("process"));
        assert!(!page.scroll_to_anchor("#pricing"));
    }

    #[test]
    fn scroll_into_view_only_moves_when_needed() {
        let mut page = page(120, 20, ViewportClass::Desktop);
        assert!(!page.scroll_into_view(2, 5));
        assert!(page.scroll_into_view(40, 5));
        assert_eq!(page.metrics.offset(), 25);
        assert!(page.scroll_into_view(10, 3));
        assert_eq!(page.metrics.offset(), 10);
    }
}
