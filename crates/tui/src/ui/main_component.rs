use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use digitalfront_types::Effect;
use ratatui::{
    prelude::*,
    style::Style,
    widgets::Paragraph,
};

use super::components::{Component, ContactFormComponent, NavBarComponent, PageComponent, ToastComponent};
use super::layout::MainLayout;
use super::theme::theme_helpers as th;
use crate::app::App;

/// Root view: header navigation, scrolling page, toasts and the hint bar.
#[derive(Debug, Default)]
pub struct MainView {
    /// Header navigation and the mobile menu overlay
    pub nav_bar_view: NavBarComponent,
    /// The scrolling page (draws the contact block inline)
    pub page_view: PageComponent,
    /// Key handling for the contact inputs while one of them has focus
    pub contact_view: ContactFormComponent,
    pub toast_view: ToastComponent,
}

impl MainView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Puts focus back on the page when nothing is focused.
    pub fn restore_focus(&mut self, app: &mut App) {
        app.focus.focus(&app.page);
    }

    /// Whether keystrokes currently go into a text input.
    fn is_editing(app: &App) -> bool {
        app.contact.focused_field().is_some() && app.contact.is_editable()
    }
}

impl Component for MainView {
    fn handle_key_events(&mut self, app: &mut App, key: KeyEvent) -> Vec<Effect> {
        // The open mobile menu captures the keyboard.
        if app.nav_bar.is_menu_visible() {
            return self.nav_bar_view.handle_key_events(app, key);
        }

        match key.code {
            KeyCode::Tab => {
                app.focus.next();
                return app.reveal_focused_contact();
            }
            KeyCode::BackTab => {
                app.focus.prev();
                return app.reveal_focused_contact();
            }
            KeyCode::Char('q') if !Self::is_editing(app) && key.modifiers.is_empty() => {
                return vec![Effect::Quit];
            }
            KeyCode::Char('m') if !Self::is_editing(app) && app.nav_bar.viewport().is_mobile() => {
                app.focus.focus(&app.nav_bar);
                app.nav_bar.toggle_menu();
                return Vec::new();
            }
            KeyCode::Esc if app.contact.container_focus.get() => {
                app.focus.focus(&app.page);
                return Vec::new();
            }
            _ => {}
        }

        if app.nav_bar.container_focus.get() {
            return self.nav_bar_view.handle_key_events(app, key);
        }

        if app.contact.container_focus.get() {
            let mut effects = self.contact_view.handle_key_events(app, key);
            effects.extend(app.reveal_focused_contact());
            return effects;
        }

        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return Vec::new();
        }
        self.page_view.handle_key_events(app, key)
    }

    fn handle_mouse_events(&mut self, app: &mut App, mouse: MouseEvent) -> Vec<Effect> {
        if self.toast_view.contains(mouse.column, mouse.row) {
            return self.toast_view.handle_mouse_events(app, mouse);
        }

        let position = Position::new(mouse.column, mouse.row);
        if app.nav_bar.is_menu_visible() {
            let on_menu = app.nav_bar.menu_row_areas.iter().any(|area| area.contains(position));
            if on_menu || app.nav_bar.last_area.contains(position) {
                return self.nav_bar_view.handle_mouse_events(app, mouse);
            }
            // Clicking anywhere else dismisses the menu.
            if mouse.kind == MouseEventKind::Down(MouseButton::Left) {
                app.nav_bar.close_menu();
                return Vec::new();
            }
        }

        if app.nav_bar.last_area.contains(position) {
            return self.nav_bar_view.handle_mouse_events(app, mouse);
        }
        self.page_view.handle_mouse_events(app, mouse)
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, app: &mut App) {
        // Fill the entire background with the theme's background color for consistency
        let bg_fill = Paragraph::new("").style(Style::default().bg(app.ctx.theme.roles().background));
        frame.render_widget(bg_fill, area);

        let layout = self.get_preferred_layout(app, area);
        self.nav_bar_view.render(frame, layout[0], app);
        self.page_view.render(frame, layout[1], app);
        self.nav_bar_view.render_menu(frame, layout[1], app);
        self.toast_view.render(frame, layout[1], app);

        let hint_spans: Vec<Span> = self.get_hint_spans(app);
        let hints_widget = Paragraph::new(Line::from(hint_spans)).style(app.ctx.theme.text_muted_style());
        frame.render_widget(hints_widget, layout[2]);
    }

    fn get_hint_spans(&self, app: &App) -> Vec<Span<'_>> {
        let mut hint_spans: Vec<Span> = vec![Span::styled("Hints: ", app.ctx.theme.text_muted_style())];

        if app.nav_bar.container_focus.get() || app.nav_bar.is_menu_visible() {
            hint_spans.extend(self.nav_bar_view.get_hint_spans(app));
        } else if app.contact.container_focus.get() {
            hint_spans.extend(self.contact_view.get_hint_spans(app));
            hint_spans.extend(th::build_hint_spans(&*app.ctx.theme, &[(" Esc", " Back to page ")]));
            return hint_spans;
        } else {
            hint_spans.extend(self.page_view.get_hint_spans(app));
        }

        hint_spans.extend(th::build_hint_spans(&*app.ctx.theme, &[(" Tab", " Next "), (" q", " Quit ")]));
        hint_spans
    }

    fn get_preferred_layout(&self, _app: &App, area: Rect) -> Vec<Rect> {
        MainLayout::areas(area).to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::app::SharedCtx;
    use digitalfront_types::{ContactField, Msg, ViewportClass};
    use digitalfront_util::{OpenError, SiteConfig, UriOpener};
    use ratatui::{Terminal, backend::TestBackend};

    #[derive(Debug)]
    struct NoopOpener;

    impl UriOpener for NoopOpener {
        fn open(&self, _uri: &str) -> Result<(), OpenError> {
            Ok(())
        }
    }

    fn app(width: u16, height: u16) -> App {
        let ctx = SharedCtx::new(Arc::new(SiteConfig::default()), Arc::new(NoopOpener));
        let mut app = App::new(ctx);
        app.update(&Msg::Resize(width, height));
        app
    }

    /// Renders one frame and returns it row by row.
    fn draw(view: &mut MainView, app: &mut App, width: u16, height: u16) -> Vec<String> {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).expect("terminal");
        terminal
            .draw(|frame| view.render(frame, frame.area(), app))
            .expect("draw");
        let buffer = terminal.backend().buffer();
        buffer
            .content()
            .chunks(usize::from(width))
            .map(|row| row.iter().map(|cell| cell.symbol()).collect())
            .collect()
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn desktop_header_shows_tabs_and_phone() {
        let mut app = app(120, 30);
        let mut view = MainView::new();
        let header = draw(&mut view, &mut app, 120, 30)[..3].concat();
        assert!(header.contains("The Digital Front"));
        assert!(header.contains("Integrations"));
        assert!(header.contains("+91 9284613155"));
        assert!(!header.contains("☰"));
    }

    #[test]
    fn mobile_header_shows_menu_button_only() {
        let mut app = app(60, 30);
        assert_eq!(app.nav_bar.viewport(), ViewportClass::Mobile);
        let mut view = MainView::new();
        let header = draw(&mut view, &mut app, 60, 30)[..3].concat();
        assert!(header.contains("☰"));
        assert!(!header.contains("Services"));

        view.handle_key_events(&mut app, key(KeyCode::Char('m')));
        assert!(app.nav_bar.is_menu_open());
        let screen = draw(&mut view, &mut app, 60, 30);
        assert!(screen[..3].concat().contains("✕"));
        let menu = screen[3..12].concat();
        assert!(menu.contains("Testimonials"));
        assert!(menu.contains("Contact Us (WhatsApp)"));
    }

    #[test]
    fn typing_in_contact_field_does_not_quit() {
        let mut app = app(120, 30);
        let mut view = MainView::new();
        app.focus.focus(app.contact.focus_flag(ContactField::Name));
        assert!(view.handle_key_events(&mut app, key(KeyCode::Char('q'))).is_empty());
        assert_eq!(app.contact.field(ContactField::Name), "q");

        app.focus.focus(&app.page);
        assert_eq!(view.handle_key_events(&mut app, key(KeyCode::Char('q'))), vec![Effect::Quit]);
    }

    #[test]
    fn tabbing_into_the_form_scrolls_it_into_view() {
        let mut app = app(120, 30);
        let mut view = MainView::new();
        draw(&mut view, &mut app, 120, 30);
        assert_eq!(app.page.metrics.offset(), 0);

        // nav -> page -> first contact input
        app.focus.focus(&app.page);
        view.handle_key_events(&mut app, key(KeyCode::Tab));
        assert_eq!(app.contact.focused_field(), Some(ContactField::Name));
        assert!(app.page.metrics.offset() > 0);
    }
}
