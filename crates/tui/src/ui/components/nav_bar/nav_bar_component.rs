use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use digitalfront_types::Effect;
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Position, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Clear, Paragraph},
};
use unicode_width::UnicodeWidthStr;

use super::state::MenuRow;
use crate::app::App;
use crate::ui::components::{Component, find_target_index_by_mouse_position};
use crate::ui::theme::theme_helpers as th;

/// Anchor the brand links to.
const BRAND_ANCHOR: &str = "#hero";
const MENU_OPEN_ICON: &str = " ✕ ";
const MENU_CLOSED_ICON: &str = " ☰ ";
const WHATSAPP_MENU_LABEL: &str = "Contact Us (WhatsApp)";

/// Header navigation: brand, section tabs and the WhatsApp action on
/// desktop; brand and a menu button on mobile.
///
/// The open mobile menu is drawn separately by [`render_menu`](Self::render_menu)
/// so it can overlay the page.
#[derive(Debug, Default)]
pub struct NavBarComponent;

impl NavBarComponent {
    pub fn new() -> Self {
        Self
    }

    fn activate_entry(app: &mut App, idx: usize) -> Vec<Effect> {
        let Some(name) = app.nav_bar.items().get(idx).map(|entry| entry.name.clone()) else {
            return Vec::new();
        };
        app.nav_bar
            .select_item(&name)
            .map(Effect::ScrollToAnchor)
            .into_iter()
            .collect()
    }

    fn activate_whatsapp(app: &mut App) -> Vec<Effect> {
        app.nav_bar.close_menu();
        vec![Effect::OpenExternal(app.ctx.config.contact.whatsapp_url.clone())]
    }

    fn activate_menu_row(app: &mut App, row: usize) -> Vec<Effect> {
        match app.nav_bar.menu_row(row) {
            Some(MenuRow::Entry(idx)) => Self::activate_entry(app, idx),
            Some(MenuRow::WhatsApp) => Self::activate_whatsapp(app),
            None => Vec::new(),
        }
    }

    fn render_desktop(&self, frame: &mut Frame, inner: Rect, app: &mut App) {
        let theme = &*app.ctx.theme;
        let phone_label = format!("☎ {}", app.ctx.config.contact.phone_label);
        let brand_width = app.ctx.config.brand.width() as u16 + 2;
        let [brand_area, tabs_area, phone_area] = Layout::horizontal([
            Constraint::Length(brand_width),
            Constraint::Fill(1),
            Constraint::Length(phone_label.width() as u16 + 2),
        ])
        .areas(inner);

        frame.render_widget(
            Paragraph::new(Span::styled(
                app.ctx.config.brand.as_str(),
                theme.accent_emphasis_style().add_modifier(Modifier::BOLD),
            )),
            brand_area,
        );

        let focused = app.nav_bar.container_focus.get();
        let mut tab_areas = Vec::with_capacity(app.nav_bar.items().len());
        let mut x = tabs_area.x;
        for (idx, entry) in app.nav_bar.items().iter().enumerate() {
            let label = format!(" {} ", entry.name);
            let width = (label.width() as u16).min(tabs_area.right().saturating_sub(x));
            let area = Rect::new(x, tabs_area.y, width, 1);
            let active = app.nav_bar.active_index() == Some(idx);
            let cursor = focused && app.nav_bar.cursor == idx;
            frame.render_widget(Paragraph::new(Span::styled(label, th::tab_style(theme, active, cursor))), area);
            tab_areas.push(area);
            x = x.saturating_add(width + 1);
        }

        frame.render_widget(
            Paragraph::new(Span::styled(phone_label, theme.accent_primary_style())),
            phone_area,
        );

        let state = &mut app.nav_bar;
        state.brand_area = brand_area;
        state.tab_areas = tab_areas;
        state.phone_area = phone_area;
        state.menu_button_area = Rect::default();
    }

    fn render_mobile(&self, frame: &mut Frame, inner: Rect, app: &mut App) {
        let theme = &*app.ctx.theme;
        let [brand_area, button_area] =
            Layout::horizontal([Constraint::Fill(1), Constraint::Length(MENU_CLOSED_ICON.width() as u16)]).areas(inner);

        frame.render_widget(
            Paragraph::new(Span::styled(
                app.ctx.config.brand.as_str(),
                theme.accent_emphasis_style().add_modifier(Modifier::BOLD),
            )),
            brand_area,
        );
        let icon = if app.nav_bar.is_menu_open() { MENU_OPEN_ICON } else { MENU_CLOSED_ICON };
        let focused = app.nav_bar.container_focus.get() && !app.nav_bar.is_menu_open();
        frame.render_widget(Paragraph::new(Span::styled(icon, th::tab_style(theme, false, focused))), button_area);

        let state = &mut app.nav_bar;
        state.brand_area = brand_area;
        state.menu_button_area = button_area;
        state.tab_areas.clear();
        state.phone_area = Rect::default();
    }

    /// Draws the open mobile menu at the top of `body`; records row areas for hit testing.
    pub fn render_menu(&self, frame: &mut Frame, body: Rect, app: &mut App) {
        if !app.nav_bar.is_menu_visible() {
            app.nav_bar.menu_row_areas.clear();
            return;
        }
        let theme = &*app.ctx.theme;
        let rows = app.nav_bar.menu_len() as u16;
        let area = Rect {
            height: (rows + 2).min(body.height),
            ..body
        };
        let block = th::block(theme, None, true).style(theme.overlay_style());
        let inner = block.inner(area);
        frame.render_widget(Clear, area);
        frame.render_widget(block, area);

        let mut row_areas = Vec::with_capacity(rows as usize);
        for row in 0..app.nav_bar.menu_len() {
            let row_area = Rect::new(inner.x, inner.y + row as u16, inner.width, 1);
            if row_area.y >= inner.bottom() {
                break;
            }
            let cursor = app.nav_bar.cursor == row;
            let line = match app.nav_bar.menu_row(row) {
                Some(MenuRow::Entry(idx)) => {
                    let active = app.nav_bar.active_index() == Some(idx);
                    let name = app.nav_bar.items()[idx].name.as_str();
                    Line::from(Span::styled(format!(" {name} "), th::tab_style(theme, active, cursor)))
                }
                _ => Line::from(Span::styled(
                    format!(" {WHATSAPP_MENU_LABEL} "),
                    th::primary_button_style(theme, true, cursor),
                )),
            };
            frame.render_widget(Paragraph::new(line), row_area);
            row_areas.push(row_area);
        }
        app.nav_bar.menu_row_areas = row_areas;
    }
}

impl Component for NavBarComponent {
    fn handle_key_events(&mut self, app: &mut App, key: KeyEvent) -> Vec<Effect> {
        if app.nav_bar.is_menu_visible() {
            return match key.code {
                KeyCode::Up => {
                    app.nav_bar.move_cursor(false);
                    Vec::new()
                }
                KeyCode::Down => {
                    app.nav_bar.move_cursor(true);
                    Vec::new()
                }
                KeyCode::Enter => {
                    let row = app.nav_bar.cursor;
                    Self::activate_menu_row(app, row)
                }
                KeyCode::Esc | KeyCode::Char('m') => {
                    app.nav_bar.toggle_menu();
                    Vec::new()
                }
                _ => Vec::new(),
            };
        }

        match key.code {
            KeyCode::Char('m') | KeyCode::Enter if app.nav_bar.viewport().is_mobile() => {
                app.nav_bar.toggle_menu();
                Vec::new()
            }
            KeyCode::Left => {
                app.nav_bar.move_cursor(false);
                Vec::new()
            }
            KeyCode::Right => {
                app.nav_bar.move_cursor(true);
                Vec::new()
            }
            KeyCode::Enter => {
                let idx = app.nav_bar.cursor;
                Self::activate_entry(app, idx)
            }
            KeyCode::Char('w') => Self::activate_whatsapp(app),
            KeyCode::Char('h') => vec![Effect::ScrollToAnchor(BRAND_ANCHOR.to_string())],
            _ => Vec::new(),
        }
    }

    fn handle_mouse_events(&mut self, app: &mut App, mouse: MouseEvent) -> Vec<Effect> {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return Vec::new();
        }
        let position = Position::new(mouse.column, mouse.row);
        let state = &app.nav_bar;

        if state.is_menu_visible() {
            let bounds = state.menu_row_areas.iter().copied().reduce(Rect::union).unwrap_or_default();
            if let Some(row) = find_target_index_by_mouse_position(&bounds, &state.menu_row_areas, mouse.column, mouse.row) {
                return Self::activate_menu_row(app, row);
            }
        }
        if state.menu_button_area.contains(position) {
            app.nav_bar.toggle_menu();
            return Vec::new();
        }
        if state.brand_area.contains(position) {
            app.nav_bar.close_menu();
            return vec![Effect::ScrollToAnchor(BRAND_ANCHOR.to_string())];
        }
        if state.phone_area.contains(position) {
            return Self::activate_whatsapp(app);
        }
        if let Some(idx) = find_target_index_by_mouse_position(&state.last_area, &state.tab_areas, mouse.column, mouse.row) {
            let flag = app.nav_bar.container_focus.clone();
            app.focus.focus(&flag);
            return Self::activate_entry(app, idx);
        }
        Vec::new()
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, app: &mut App) {
        let focused = app.nav_bar.container_focus.get();
        let block = th::block(&*app.ctx.theme, None, focused);
        let inner = block.inner(area).inner(ratatui::layout::Margin::new(1, 0));
        frame.render_widget(block, area);
        app.nav_bar.last_area = area;

        if app.nav_bar.viewport().is_mobile() {
            self.render_mobile(frame, inner, app);
        } else {
            self.render_desktop(frame, inner, app);
        }
    }

    fn get_hint_spans(&self, app: &App) -> Vec<Span<'_>> {
        let hints: &[(&str, &str)] = if app.nav_bar.is_menu_visible() {
            &[(" ↑/↓", " Move "), (" Enter", " Open "), (" Esc", " Close menu ")]
        } else if app.nav_bar.viewport().is_mobile() {
            &[(" m", " Menu "), (" h", " Home ")]
        } else {
            &[(" ←/→", " Move "), (" Enter", " Go to section "), (" w", " WhatsApp "), (" h", " Home ")]
        };
        th::build_hint_spans(&*app.ctx.theme, hints)
    }
}
