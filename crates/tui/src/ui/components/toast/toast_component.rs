use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
use digitalfront_types::{Effect, ToastVariant};
use ratatui::{
    Frame,
    layout::{Position, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Clear, Paragraph, Wrap},
};

use crate::app::App;
use crate::ui::components::Component;
use crate::ui::theme::theme_helpers as th;

const TOAST_WIDTH: u16 = 44;
const TOAST_HEIGHT: u16 = 4;

/// Draws the toast stack in the top-right corner of the body area.
#[derive(Debug, Default)]
pub struct ToastComponent {
    areas: Vec<(u64, Rect)>,
}

impl ToastComponent {
    /// Whether a toast was drawn at (`column`, `row`) in the last frame.
    pub fn contains(&self, column: u16, row: u16) -> bool {
        self.areas.iter().any(|(_, area)| area.contains(Position::new(column, row)))
    }
}

impl Component for ToastComponent {
    /// Clicking a toast dismisses it.
    fn handle_mouse_events(&mut self, app: &mut App, mouse: MouseEvent) -> Vec<Effect> {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return Vec::new();
        }
        let hit = self
            .areas
            .iter()
            .find(|(_, area)| area.contains(Position::new(mouse.column, mouse.row)))
            .map(|(id, _)| *id);
        if let Some(id) = hit {
            app.toasts.dismiss(id);
        }
        Vec::new()
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, app: &mut App) {
        self.areas.clear();
        let theme = &*app.ctx.theme;
        let width = TOAST_WIDTH.min(area.width);
        let mut y = area.y;
        for active in app.toasts.iter() {
            if y + TOAST_HEIGHT > area.bottom() {
                break;
            }
            let rect = Rect::new(area.right().saturating_sub(width + 1), y, width, TOAST_HEIGHT);
            let (title_style, destructive) = match active.toast.variant {
                ToastVariant::Destructive => (theme.status_error().add_modifier(Modifier::BOLD), true),
                ToastVariant::Default => (theme.text_primary_style().add_modifier(Modifier::BOLD), false),
            };
            let mut block = th::block(theme, None, false).style(theme.overlay_style());
            if destructive {
                block = block.border_style(theme.status_error());
            }
            let body = Paragraph::new(vec![
                Line::from(Span::styled(active.toast.title.as_str(), title_style)),
                Line::from(Span::styled(active.toast.description.as_str(), theme.text_secondary_style())),
            ])
            .wrap(Wrap { trim: true })
            .block(block);
            frame.render_widget(Clear, rect);
            frame.render_widget(body, rect);
            self.areas.push((active.id, rect));
            y += TOAST_HEIGHT;
        }
    }
}
