use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use digitalfront_types::{ContactField, Effect, SubmissionPhase, ViewportClass};
use ratatui::{
    Frame,
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Position, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};
use unicode_width::UnicodeWidthChar;

use super::state::field_index;
use super::{FORM_HEIGHT_MOBILE, SIDE_PANEL_HEIGHT, contact_block_height};
use crate::app::App;
use crate::ui::components::{Component, find_target_index_by_mouse_position};
use crate::ui::theme::theme_helpers as th;

/// Spinner frames shown on the submit button while a submission is in flight.
const SPINNER: [&str; 4] = ["◐", "◓", "◑", "◒"];

/// Contact block: the "Let's Create" side panel next to (or above) the form.
///
/// The block is drawn into whatever buffer it is given, so the page can
/// render it into its off-screen canvas. All recorded areas are relative to
/// that buffer.
#[derive(Debug, Default)]
pub struct ContactFormComponent;

impl ContactFormComponent {
    /// Draws the block and returns the cursor cell when an input is focused.
    pub fn render_into(&self, buf: &mut Buffer, area: Rect, app: &mut App) -> Option<Position> {
        let viewport = app.nav_bar.viewport();
        let [panel_area, form_area] = match viewport {
            ViewportClass::Desktop => {
                Layout::horizontal([Constraint::Percentage(42), Constraint::Percentage(58)]).areas(area)
            }
            ViewportClass::Mobile => {
                Layout::vertical([Constraint::Length(SIDE_PANEL_HEIGHT), Constraint::Length(FORM_HEIGHT_MOBILE)]).areas(area)
            }
        };
        app.contact.last_area = area;
        self.render_side_panel(buf, panel_area, app);
        match app.contact.phase() {
            SubmissionPhase::Submitted => {
                self.render_submitted(buf, form_area, app);
                None
            }
            SubmissionPhase::Idle | SubmissionPhase::Submitting => self.render_form(buf, form_area, app),
        }
    }

    fn render_side_panel(&self, buf: &mut Buffer, area: Rect, app: &App) {
        let theme = &*app.ctx.theme;
        let contact = &app.ctx.config.contact;
        let accent = theme.accent_secondary_style();
        let lines = vec![
            Line::from(Span::styled(contact.heading.as_str(), theme.accent_emphasis_style().add_modifier(Modifier::BOLD))),
            Line::default(),
            Line::from(Span::styled(contact.pitch.as_str(), theme.text_secondary_style())),
            Line::default(),
            Line::from(vec![Span::styled("✉ Email   ", accent), Span::raw(contact.email.as_str())]),
            Line::from(vec![Span::styled("☎ Phone   ", accent), Span::raw(contact.phone_label.as_str())]),
            Line::from(vec![Span::styled("⌂ Office  ", accent), Span::raw(contact.office.as_str())]),
        ];
        Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .block(th::block(theme, None, false).padding(ratatui::widgets::Padding::horizontal(1)))
            .render(area, buf);
    }

    fn render_submitted(&self, buf: &mut Buffer, area: Rect, app: &App) {
        let theme = &*app.ctx.theme;
        let block = th::block(theme, Some(" Get in Touch "), false);
        let inner = block.inner(area);
        block.render(area, buf);
        let [_, body, _] =
            Layout::vertical([Constraint::Fill(1), Constraint::Length(4), Constraint::Fill(1)]).areas(inner);
        Paragraph::new(vec![
            Line::from(Span::styled("✔", theme.status_success())),
            Line::from(Span::styled("Message Sent!", theme.status_success().add_modifier(Modifier::BOLD))),
            Line::default(),
            Line::from(Span::styled("We'll get back to you as soon as possible.", theme.text_secondary_style())),
        ])
        .alignment(Alignment::Center)
        .render(body, buf);
    }

    fn render_form(&self, buf: &mut Buffer, area: Rect, app: &mut App) -> Option<Position> {
        let theme = &*app.ctx.theme;
        let focused = app.contact.container_focus.get();
        let block = th::block(theme, Some(" Get in Touch "), focused);
        let inner = block.inner(area);
        block.render(area, buf);

        let field_areas = form_field_layout(inner, app.nav_bar.viewport());
        let editable = app.contact.is_editable();
        let mut cursor = None;
        for field in ContactField::ALL {
            let rect = field_areas[field_index(field)];
            let has_focus = app.contact.focus_flag(field).get();
            if let Some(position) = self.render_field(buf, rect, app, field, has_focus && editable) {
                cursor = Some(position);
            }
        }

        let (hint_area, button_area) = (field_areas[4], field_areas[5]);
        if let Some(hint) = app.contact.validation_hint() {
            Paragraph::new(Span::styled(hint, theme.status_error())).render(hint_area, buf);
        }

        let submit_focused = app.contact.submit_focus.get();
        let label = match app.contact.phase() {
            SubmissionPhase::Submitting => format!("{} Sending...", SPINNER[app.throbber_idx % SPINNER.len()]),
            _ => "Send Message".to_string(),
        };
        let style = th::primary_button_style(theme, editable, submit_focused);
        Paragraph::new(Line::from(label))
            .alignment(Alignment::Center)
            .style(style)
            .block(Block::default().borders(Borders::ALL).border_style(theme.border_style(submit_focused)).style(style))
            .render(button_area, buf);

        let contact = &mut app.contact;
        for field in ContactField::ALL {
            contact.field_areas[field_index(field)] = field_areas[field_index(field)];
        }
        contact.submit_area = button_area;
        cursor
    }

    fn render_field(&self, buf: &mut Buffer, area: Rect, app: &App, field: ContactField, focused: bool) -> Option<Position> {
        let theme = &*app.ctx.theme;
        let state = app.contact.input(field);
        let title = if field.is_required() {
            format!(" {} * ", field.label())
        } else {
            format!(" {} ", field.label())
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(ratatui::widgets::BorderType::Rounded)
            .border_style(theme.border_style(focused))
            .title(Span::styled(title, theme.text_secondary_style()));
        let inner = block.inner(area);
        let style = th::input_style(theme, true, focused);
        block.style(style).render(area, buf);

        if state.input().is_empty() {
            Paragraph::new(Span::styled(field.placeholder(), theme.text_muted_style())).render(inner, buf);
        } else if field == ContactField::Message {
            let lines: Vec<Line> = hard_wrap(state.input(), inner.width).into_iter().map(Line::from).collect();
            let overflow = (lines.len() as u16).saturating_sub(inner.height);
            Paragraph::new(lines).scroll((overflow, 0)).style(style).render(inner, buf);
        } else {
            let skip = state.display_cursor().saturating_sub(inner.width.saturating_sub(1));
            Paragraph::new(state.input()).scroll((0, skip)).style(style).render(inner, buf);
        }

        if !focused || inner.width == 0 || inner.height == 0 {
            return None;
        }
        if field == ContactField::Message {
            let (col, row) = wrapped_cursor(state.input(), state.cursor(), inner.width);
            let total_rows = hard_wrap(state.input(), inner.width).len().max(1) as u16;
            let overflow = total_rows.saturating_sub(inner.height);
            let row = row.saturating_sub(overflow).min(inner.height - 1);
            Some(Position::new(inner.x + col, inner.y + row))
        } else {
            let col = state.display_cursor().min(inner.width.saturating_sub(1));
            Some(Position::new(inner.x + col, inner.y))
        }
    }
}

/// Splits the form body into the four inputs, the hint row, and the submit button.
fn form_field_layout(inner: Rect, viewport: ViewportClass) -> Vec<Rect> {
    let inner = inner.inner(ratatui::layout::Margin::new(1, 0));
    match viewport {
        ViewportClass::Desktop => {
            let [first_row, company, message, hint, button] = Layout::vertical([
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(6),
                Constraint::Length(1),
                Constraint::Length(3),
            ])
            .areas(inner);
            let [name, email] = Layout::horizontal([Constraint::Fill(1), Constraint::Fill(1)]).spacing(1).areas(first_row);
            vec![name, email, company, message, hint, button]
        }
        ViewportClass::Mobile => Layout::vertical([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(6),
            Constraint::Length(1),
            Constraint::Length(3),
        ])
        .split(inner)
        .to_vec(),
    }
}

/// Character-wraps `text` into rows of at most `width` display columns.
fn hard_wrap(text: &str, width: u16) -> Vec<String> {
    let width = usize::from(width.max(1));
    let mut rows = vec![String::new()];
    let mut used = 0usize;
    for ch in text.chars() {
        let ch_width = ch.width().unwrap_or(0);
        if used + ch_width > width {
            rows.push(String::new());
            used = 0;
        }
        if let Some(row) = rows.last_mut() {
            row.push(ch);
        }
        used += ch_width;
    }
    rows
}

/// Column and row of the cursor (a char index) inside [`hard_wrap`]'s output.
fn wrapped_cursor(text: &str, cursor: usize, width: u16) -> (u16, u16) {
    let width = usize::from(width.max(1));
    let (mut col, mut row) = (0usize, 0usize);
    for ch in text.chars().take(cursor) {
        let ch_width = ch.width().unwrap_or(0);
        if col + ch_width > width {
            row += 1;
            col = 0;
        }
        col += ch_width;
    }
    if col >= width {
        row += 1;
        col = 0;
    }
    (col as u16, row as u16)
}

impl Component for ContactFormComponent {
    fn handle_key_events(&mut self, app: &mut App, key: KeyEvent) -> Vec<Effect> {
        if app.contact.submit_focus.get() {
            return match key.code {
                KeyCode::Enter | KeyCode::Char(' ') => app.submit_contact(),
                KeyCode::Up => {
                    app.focus.prev();
                    Vec::new()
                }
                _ => Vec::new(),
            };
        }

        let Some(field) = app.contact.focused_field() else {
            return Vec::new();
        };
        match key.code {
            KeyCode::Enter | KeyCode::Down => {
                app.focus.next();
            }
            KeyCode::Up => {
                app.focus.prev();
            }
            KeyCode::Left => app.contact.edit_field(field, |input| input.move_left()),
            KeyCode::Right => app.contact.edit_field(field, |input| input.move_right()),
            KeyCode::Home => app.contact.edit_field(field, |input| input.move_home()),
            KeyCode::End => app.contact.edit_field(field, |input| input.move_end()),
            KeyCode::Backspace => app.contact.edit_field(field, |input| input.backspace()),
            KeyCode::Delete => app.contact.edit_field(field, |input| input.delete()),
            KeyCode::Char(c) if !key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) => {
                app.contact.edit_field(field, |input| input.insert_char(c));
            }
            _ => {}
        }
        Vec::new()
    }

    /// Expects `mouse` already translated into the coordinates the block was drawn with.
    fn handle_mouse_events(&mut self, app: &mut App, mouse: MouseEvent) -> Vec<Effect> {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) || app.contact.phase() == SubmissionPhase::Submitted {
            return Vec::new();
        }
        let contact = &app.contact;
        if contact.submit_area.contains(Position::new(mouse.column, mouse.row)) {
            let flag = contact.submit_focus.clone();
            app.focus.focus(&flag);
            return app.submit_contact();
        }
        if let Some(idx) = find_target_index_by_mouse_position(&contact.last_area, &contact.field_areas, mouse.column, mouse.row) {
            let flag = contact.field_focus[idx].clone();
            app.focus.focus(&flag);
        }
        Vec::new()
    }

    fn render(&mut self, frame: &mut Frame, rect: Rect, app: &mut App) {
        if let Some(position) = self.render_into(frame.buffer_mut(), rect, app) {
            frame.set_cursor_position(position);
        }
    }

    fn get_hint_spans(&self, app: &App) -> Vec<Span<'_>> {
        let hints: &[(&str, &str)] = if app.contact.submit_focus.get() {
            &[(" Enter", " Send message "), (" Tab", " Next ")]
        } else {
            &[(" Type", " Edit field "), (" Enter/↓", " Next field "), (" Tab", " Next ")]
        };
        th::build_hint_spans(&*app.ctx.theme, hints)
    }

    fn get_preferred_layout(&self, app: &App, area: Rect) -> Vec<Rect> {
        let height = contact_block_height(app.nav_bar.viewport());
        vec![Rect { height: height.min(area.height), ..area }]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hard_wrap_splits_at_width() {
        assert_eq!(hard_wrap("abcdef", 4), vec!["abcd".to_string(), "ef".to_string()]);
        assert_eq!(hard_wrap("", 4), vec![String::new()]);
    }

    #[test]
    fn cursor_follows_wrapped_rows() {
        assert_eq!(wrapped_cursor("abcdef", 0, 4), (0, 0));
        assert_eq!(wrapped_cursor("abcdef", 3, 4), (3, 0));
        assert_eq!(wrapped_cursor("abcdef", 4, 4), (0, 1));
        assert_eq!(wrapped_cursor("abcdef", 6, 4), (2, 1));
    }
}
