use crossterm::event::{KeyCode, KeyEvent, MouseEvent, MouseEventKind};
use digitalfront_types::Effect;
use ratatui::{
    Frame,
    buffer::Buffer,
    layout::{Position, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use super::state::{CONTENT_MARGIN, SectionLayout};
use crate::app::App;
use crate::ui::components::common::render_vertical_scrollbar;
use crate::ui::components::contact::ContactFormComponent;
use crate::ui::components::Component;
use crate::ui::theme::{roles::Theme, theme_helpers as th};

/// Rows moved per mouse wheel notch.
const WHEEL_STEP: i32 = 3;

/// Renders the scrolling page and forwards interaction with the embedded
/// contact block.
///
/// The full page is drawn into an off-screen canvas as tall as the content;
/// only the rows inside the viewport are copied to the frame.
#[derive(Debug, Default)]
pub struct PageComponent {
    contact_view: ContactFormComponent,
}

impl PageComponent {
    fn render_section(&self, canvas: &mut Buffer, section: &SectionLayout, text_width: u16, theme: &dyn Theme, revealed: bool) {
        let is_hero = section.span.id == "hero";
        let title_style = match (revealed, is_hero) {
            (false, _) => theme.text_muted_style(),
            (true, true) => theme.accent_emphasis_style().add_modifier(Modifier::BOLD),
            (true, false) => theme.accent_primary_style().add_modifier(Modifier::BOLD),
        };
        let title_area = Rect::new(CONTENT_MARGIN, section.title_row(), text_width, 1);
        Paragraph::new(Line::from(Span::styled(section.title.as_str(), title_style))).render(title_area, canvas);

        if section.body.is_empty() {
            return;
        }
        let body_style = if revealed {
            theme.text_secondary_style()
        } else {
            theme.text_muted_style().add_modifier(Modifier::DIM)
        };
        let lines: Vec<Line> = section.body.iter().map(|row| Line::from(row.as_str())).collect();
        let body_area = Rect::new(CONTENT_MARGIN, section.body_top(), text_width, section.body.len() as u16);
        Paragraph::new(lines).style(body_style).render(body_area, canvas);
    }

    /// Draws every section into a fresh canvas; returns it with the contact cursor, if any.
    fn paint_canvas(&self, app: &mut App) -> (Buffer, Option<Position>) {
        let width = app.page.canvas_width();
        let height = app.page.metrics.content_height();
        let mut canvas = Buffer::empty(Rect::new(0, 0, width, height));
        canvas.set_style(canvas.area, th::page_style(&*app.ctx.theme));

        let text_width = width.saturating_sub(CONTENT_MARGIN * 2);
        for section in app.page.layout() {
            let revealed = app.page.is_revealed(&section.span.id);
            self.render_section(&mut canvas, section, text_width, &*app.ctx.theme, revealed);
        }

        let cursor = match app.page.contact_area() {
            Some(area) => {
                let clip = area.intersection(canvas.area);
                self.contact_view.render_into(&mut canvas, clip, app)
            }
            None => None,
        };
        (canvas, cursor)
    }

    /// Translates a screen position into canvas coordinates.
    fn to_canvas(app: &App, column: u16, row: u16) -> Option<Position> {
        let area = app.page.last_area;
        if !area.contains(Position::new(column, row)) {
            return None;
        }
        Some(Position::new(column - area.x, row - area.y + app.page.metrics.offset()))
    }
}

/// Copies canvas rows `offset..offset + area.height` into `target` at `area`.
fn blit(canvas: &Buffer, target: &mut Buffer, area: Rect, offset: u16) {
    for dy in 0..area.height {
        let src_y = offset + dy;
        for dx in 0..area.width.min(canvas.area.width) {
            let Some(cell) = canvas.cell(Position::new(dx, src_y)) else {
                continue;
            };
            if let Some(dst) = target.cell_mut(Position::new(area.x + dx, area.y + dy)) {
                *dst = cell.clone();
            }
        }
    }
}

impl Component for PageComponent {
    fn handle_key_events(&mut self, app: &mut App, key: KeyEvent) -> Vec<Effect> {
        let moved = match key.code {
            KeyCode::Down | KeyCode::Char('j') => app.page.scroll_lines(1),
            KeyCode::Up | KeyCode::Char('k') => app.page.scroll_lines(-1),
            KeyCode::PageDown | KeyCode::Char(' ') => app.page.scroll_pages(1),
            KeyCode::PageUp => app.page.scroll_pages(-1),
            KeyCode::Home | KeyCode::Char('g') => app.page.scroll_to_top(),
            KeyCode::End | KeyCode::Char('G') => app.page.scroll_to_bottom(),
            _ => false,
        };
        if moved { app.observe_sections() } else { Vec::new() }
    }

    fn handle_mouse_events(&mut self, app: &mut App, mouse: MouseEvent) -> Vec<Effect> {
        let Some(position) = Self::to_canvas(app, mouse.column, mouse.row) else {
            return Vec::new();
        };
        match mouse.kind {
            MouseEventKind::ScrollDown => {
                if app.page.scroll_lines(WHEEL_STEP) {
                    return app.observe_sections();
                }
                Vec::new()
            }
            MouseEventKind::ScrollUp => {
                if app.page.scroll_lines(-WHEEL_STEP) {
                    return app.observe_sections();
                }
                Vec::new()
            }
            _ => {
                let inside_contact = app.page.contact_area().is_some_and(|area| area.contains(position));
                if !inside_contact {
                    if mouse.kind == MouseEventKind::Down(crossterm::event::MouseButton::Left) {
                        let flag = app.page.focus.clone();
                        app.focus.focus(&flag);
                    }
                    return Vec::new();
                }
                let translated = MouseEvent {
                    column: position.x,
                    row: position.y,
                    ..mouse
                };
                self.contact_view.handle_mouse_events(app, translated)
            }
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, app: &mut App) {
        app.page.last_area = area;
        let (canvas, cursor) = self.paint_canvas(app);
        let offset = app.page.metrics.offset();

        frame.buffer_mut().set_style(area, th::page_style(&*app.ctx.theme));
        blit(&canvas, frame.buffer_mut(), area, offset);
        render_vertical_scrollbar(frame.buffer_mut(), area, &*app.ctx.theme, &app.page.metrics);

        if let Some(position) = cursor {
            let (first, end) = app.page.metrics.visible_rows();
            if (first..end).contains(&position.y) {
                frame.set_cursor_position(Position::new(area.x + position.x, area.y + position.y - first));
            }
        }
    }

    fn get_hint_spans(&self, app: &App) -> Vec<Span<'_>> {
        th::build_hint_spans(
            &*app.ctx.theme,
            &[(" ↑/↓", " Scroll "), (" PgUp/PgDn", " Page "), (" Home/End", " Top/bottom ")],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blit_copies_the_visible_window() {
        let mut canvas = Buffer::empty(Rect::new(0, 0, 4, 6));
        for row in 0..6u16 {
            canvas.set_string(0, row, format!("r{row}"), ratatui::style::Style::default());
        }
        let mut target = Buffer::empty(Rect::new(0, 0, 6, 3));
        blit(&canvas, &mut target, Rect::new(1, 1, 5, 2), 3);
        assert_eq!(target.cell(Position::new(1, 1)).map(|c| c.symbol()), Some("r"));
        assert_eq!(target.cell(Position::new(2, 1)).map(|c| c.symbol()), Some("3"));
        assert_eq!(target.cell(Position::new(2, 2)).map(|c| c.symbol()), Some("4"));
        assert_eq!(target.cell(Position::new(2, 0)).map(|c| c.symbol()), Some(" "));
    }
}
