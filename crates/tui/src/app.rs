//! Application state and logic for the Digital Front terminal site.
//!
//! [`App`] owns every component's state and the shared context. All state
//! changes happen here or in component reducers; side effects leave as
//! [`Effect`]s and come back as [`Msg`]s.

use std::sync::Arc;
use std::time::Instant;

use digitalfront_types::{Effect, Msg, SubmissionPhase, ThemeFlag, Toast};
use digitalfront_util::{SiteConfig, UriOpener};
use rat_focus::{Focus, FocusBuilder, FocusFlag, HasFocus};
use ratatui::layout::Rect;
use tracing::{debug, info, warn};

use crate::ui::components::contact::{ContactFormState, SubmitError};
use crate::ui::components::nav_bar::NavBarState;
use crate::ui::components::page::{CONTACT_SECTION_ID, PageState, ScrollSpy, SectionObserver};
use crate::ui::components::toast::ToastState;
use crate::ui::layout::MainLayout;
use crate::ui::theme::{self, roles::Theme};

const SUCCESS_TITLE: &str = "Message Sent!";
const SUCCESS_DESCRIPTION: &str = "We'll get back to you as soon as possible.";
const FAILURE_TITLE: &str = "Error";
const FAILURE_DESCRIPTION: &str = "There was a problem sending your message. Please try again.";

/// Cross-cutting shared context owned by the App.
///
/// Holds the read-only configuration, the active theme and the host opener
/// so components do not need them threaded through every call.
#[derive(Debug)]
pub struct SharedCtx {
    pub config: Arc<SiteConfig>,
    pub theme_flag: ThemeFlag,
    pub theme: Box<dyn Theme>,
    /// Hands `mailto:` and external URIs to the host
    pub opener: Arc<dyn UriOpener>,
}

impl SharedCtx {
    pub fn new(config: Arc<SiteConfig>, opener: Arc<dyn UriOpener>) -> Self {
        let theme_flag = config.theme;
        Self {
            config,
            theme_flag,
            theme: theme::load(theme_flag),
            opener,
        }
    }
}

/// The main application state.
#[derive(Debug)]
pub struct App {
    pub ctx: SharedCtx,
    pub nav_bar: NavBarState,
    pub page: PageState,
    pub contact: ContactFormState,
    pub toasts: ToastState,
    /// Global focus ring built from the component states
    pub focus: Focus,
    /// Animation frame for the submit spinner
    pub throbber_idx: usize,
    pub should_quit: bool,
    root_focus: FocusFlag,
    section_observer: Box<dyn SectionObserver>,
}

impl App {
    pub fn new(ctx: SharedCtx) -> Self {
        let config = Arc::clone(&ctx.config);
        let mut app = Self {
            nav_bar: NavBarState::new(config.navigation.clone(), config.desktop_breakpoint_px),
            page: PageState::new(config.sections.clone()),
            contact: ContactFormState::new(),
            toasts: ToastState::default(),
            focus: Focus::default(),
            throbber_idx: 0,
            should_quit: false,
            root_focus: FocusFlag::named("root"),
            section_observer: Box::new(ScrollSpy::new()),
            ctx,
        };
        app.focus = FocusBuilder::build_for(&app);
        app.focus.focus(&app.page);
        app
    }

    /// Replaces the scroll-driven section observer (tests drive the nav bar with fakes).
    pub fn with_section_observer(mut self, observer: Box<dyn SectionObserver>) -> Self {
        self.section_observer = observer;
        self
    }

    /// Updates the application state based on a message.
    ///
    /// Returns the effects the runtime must execute.
    pub fn update(&mut self, msg: &Msg) -> Vec<Effect> {
        match msg {
            Msg::Tick => {
                self.tick(Instant::now());
                Vec::new()
            }
            Msg::Resize(width, height) => self.resize(*width, *height),
            Msg::SectionInView(section_id) => {
                self.nav_bar.set_active_from_external_signal(section_id);
                Vec::new()
            }
            Msg::MailtoDispatched(Ok(())) => self.on_mailto_opened(),
            Msg::MailtoDispatched(Err(error)) => self.on_mailto_failed(error),
            Msg::ExternalLinkOpened(Ok(())) => Vec::new(),
            Msg::ExternalLinkOpened(Err(error)) => {
                warn!(%error, "failed to open external link");
                let toast = Toast::new("Could not open link", error.clone(), self.ctx.config.toast_duration()).destructive();
                vec![Effect::ShowToast(toast)]
            }
            Msg::ContactResetDue(ticket) => {
                self.contact.apply_reset(*ticket);
                Vec::new()
            }
        }
    }

    fn tick(&mut self, now: Instant) {
        if self.contact.phase() == SubmissionPhase::Submitting {
            self.throbber_idx = self.throbber_idx.wrapping_add(1);
        } else {
            self.throbber_idx = 0;
        }
        self.toasts.expire(now);
    }

    /// Reclassifies the viewport from the terminal width and lays the page out again.
    fn resize(&mut self, width: u16, height: u16) -> Vec<Effect> {
        let width_px = u32::from(width).saturating_mul(self.ctx.config.cell_width_px);
        if self.nav_bar.set_viewport_width(width_px) {
            info!(width, width_px, viewport = ?self.nav_bar.viewport(), "layout switched");
        }
        let [_, body, _] = MainLayout::areas(Rect::new(0, 0, width, height));
        self.page.relayout(body, self.nav_bar.viewport());
        self.page.last_area = body;
        self.observe_sections()
    }

    /// Asks the section observer for a new in-view section and applies it.
    pub fn observe_sections(&mut self) -> Vec<Effect> {
        let in_view = self.section_observer.observe(&self.page.viewport());
        match in_view {
            Some(section_id) => self.update(&Msg::SectionInView(section_id)),
            None => Vec::new(),
        }
    }

    /// Scrolls to a same-page anchor and marks its section as in view.
    ///
    /// The anchored section wins even when the page cannot scroll far enough
    /// for the observer to report it (the last sections on a tall terminal).
    pub fn scroll_to_anchor(&mut self, anchor: &str) -> Vec<Effect> {
        if !self.page.scroll_to_anchor(anchor) {
            return Vec::new();
        }
        let section_id = anchor.trim_start_matches('#');
        self.section_observer.sync(section_id);
        self.update(&Msg::SectionInView(section_id.to_string()))
    }

    /// Starts a contact submission addressed to the configured destination.
    pub fn submit_contact(&mut self) -> Vec<Effect> {
        let destination = self.ctx.config.contact.email.clone();
        match self.contact.begin_submit(&destination) {
            Ok(effect) => vec![effect],
            Err(SubmitError::InProgress) => {
                debug!("submit ignored; a submission is already in progress");
                Vec::new()
            }
            Err(error @ SubmitError::Invalid(_)) => {
                debug!(%error, "submit blocked by validation");
                Vec::new()
            }
            Err(SubmitError::Compose(error)) => {
                warn!(%error, "failed to compose contact mail link");
                vec![Effect::ShowToast(self.failure_toast())]
            }
        }
    }

    fn on_mailto_opened(&mut self) -> Vec<Effect> {
        let Some(ticket) = self.contact.complete_submit() else {
            return Vec::new();
        };
        let duration = self.ctx.config.toast_duration();
        vec![
            Effect::ShowToast(Toast::new(SUCCESS_TITLE, SUCCESS_DESCRIPTION, duration)),
            Effect::ScheduleContactReset {
                ticket,
                delay: self.ctx.config.reset_delay(),
            },
        ]
    }

    fn on_mailto_failed(&mut self, error: &str) -> Vec<Effect> {
        warn!(%error, "mail handler could not be opened");
        if self.contact.fail_submit() {
            return vec![Effect::ShowToast(self.failure_toast())];
        }
        Vec::new()
    }

    fn failure_toast(&self) -> Toast {
        Toast::new(FAILURE_TITLE, FAILURE_DESCRIPTION, self.ctx.config.toast_duration()).destructive()
    }

    pub fn show_toast(&mut self, toast: Toast) {
        debug!(title = %toast.title, variant = ?toast.variant, "toast shown");
        self.toasts.push(toast, Instant::now());
    }

    /// Scrolls the focused contact input (or the whole block) into view.
    pub fn reveal_focused_contact(&mut self) -> Vec<Effect> {
        if !self.contact.container_focus.get() {
            return Vec::new();
        }
        let Some(block) = self.page.contact_area() else {
            return Vec::new();
        };
        let target = if self.contact.submit_focus.get() {
            self.contact.submit_area
        } else {
            self.contact
                .focused_field()
                .map(|field| self.contact.field_areas[field as usize])
                .unwrap_or(block)
        };
        let target = if target.height == 0 { block } else { target };
        if self.page.scroll_into_view(target.y, target.height) {
            return self.observe_sections();
        }
        Vec::new()
    }

    /// Tears the app down: the form stops accepting transitions so a late
    /// reset cannot touch it.
    pub fn shutdown(&mut self) {
        self.contact.unmount();
        self.should_quit = true;
        info!("shutting down");
    }
}

impl HasFocus for App {
    fn build(&self, builder: &mut FocusBuilder) {
        let tag = builder.start(self);
        builder.widget(&self.nav_bar);
        builder.widget(&self.page);
        if self.ctx.config.section(CONTACT_SECTION_ID).is_some() {
            builder.widget(&self.contact);
        }
        builder.end(tag);
    }

    fn focus(&self) -> FocusFlag {
        self.root_focus.clone()
    }

    fn area(&self) -> Rect {
        Rect::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use digitalfront_types::{ContactField, ResetTicket, ViewportClass};
    use digitalfront_util::OpenError;
    use std::sync::Mutex;
    use std::time::Duration;

    use crate::ui::components::page::PageViewport;

    #[derive(Debug, Default)]
    struct RecordingOpener {
        opened: Mutex<Vec<String>>,
    }

    impl UriOpener for RecordingOpener {
        fn open(&self, uri: &str) -> Result<(), OpenError> {
            if let Ok(mut opened) = self.opened.lock() {
                opened.push(uri.to_string());
            }
            Ok(())
        }
    }

    /// Reports a scripted sequence of section ids, one per observation.
    #[derive(Debug)]
    struct ScriptedObserver(Vec<&'static str>);

    impl SectionObserver for ScriptedObserver {
        fn observe(&mut self, _viewport: &PageViewport<'_>) -> Option<String> {
            if self.0.is_empty() {
                return None;
            }
            Some(self.0.remove(0).to_string())
        }

        fn sync(&mut self, _section_id: &str) {}
    }

    fn app() -> App {
        let ctx = SharedCtx::new(Arc::new(SiteConfig::default()), Arc::new(RecordingOpener::default()));
        let mut app = App::new(ctx);
        app.update(&Msg::Resize(140, 40));
        app
    }

    fn fill_form(app: &mut App) {
        app.contact.update_field(ContactField::Name, "Asha");
        app.contact.update_field(ContactField::Email, "asha@example.com");
        app.contact.update_field(ContactField::Message, "Hello there");
    }

    #[test]
    fn resize_drives_viewport_class_from_cell_width() {
        let mut app = app();
        assert_eq!(app.nav_bar.viewport(), ViewportClass::Desktop);
        // 95 columns * 8 px = 760 px
        app.update(&Msg::Resize(95, 40));
        assert_eq!(app.nav_bar.viewport(), ViewportClass::Mobile);
        // 96 columns * 8 px = 768 px
        app.update(&Msg::Resize(96, 40));
        assert_eq!(app.nav_bar.viewport(), ViewportClass::Desktop);
    }

    #[test]
    fn external_observer_drives_active_item() {
        let ctx = SharedCtx::new(Arc::new(SiteConfig::default()), Arc::new(RecordingOpener::default()));
        let mut app = App::new(ctx).with_section_observer(Box::new(ScriptedObserver(vec!["case-studies", "integrations"])));
        app.observe_sections();
        assert_eq!(app.nav_bar.active_item(), Some("Work"));
        app.observe_sections();
        assert_eq!(app.nav_bar.active_item(), Some("Integrations"));
        app.observe_sections();
        assert_eq!(app.nav_bar.active_item(), Some("Integrations"));
    }

    #[test]
    fn scrolling_to_anchor_updates_active_item() {
        let mut app = app();
        // six body rows: the activation row sits two rows below the top
        app.update(&Msg::Resize(140, 10));
        app.scroll_to_anchor("#process");
        assert_eq!(app.nav_bar.active_item(), Some("Process"));
        app.scroll_to_anchor("#hero");
        assert_eq!(app.nav_bar.active_item(), None);
    }

    #[test]
    fn clicking_last_entry_keeps_it_active_at_page_bottom() {
        let mut app = app();
        app.update(&Msg::Resize(120, 40));
        app.nav_bar.select_item("Contact");
        app.scroll_to_anchor("#contact");
        assert_eq!(app.nav_bar.active_item(), Some("Contact"));

        // scrolling away hands control back to the observer
        app.page.scroll_lines(-40);
        app.observe_sections();
        assert_ne!(app.nav_bar.active_item(), Some("Contact"));
    }

    #[test]
    fn successful_dispatch_schedules_reset_and_toast() {
        let mut app = app();
        fill_form(&mut app);
        let effects = app.submit_contact();
        assert!(matches!(effects.as_slice(), [Effect::OpenMailto(uri)] if uri.starts_with("mailto:team@thedigitalfront.in")));

        let effects = app.update(&Msg::MailtoDispatched(Ok(())));
        assert_eq!(app.contact.phase(), SubmissionPhase::Submitted);
        assert!(matches!(&effects[0], Effect::ShowToast(toast) if toast.title == SUCCESS_TITLE));
        let Effect::ScheduleContactReset { ticket, delay } = effects[1].clone() else {
            panic!("expected reset, got {:?}", effects[1]);
        };
        assert_eq!(delay, Duration::from_secs(3));

        app.update(&Msg::ContactResetDue(ticket));
        assert_eq!(app.contact.phase(), SubmissionPhase::Idle);
        assert_eq!(app.contact.field(ContactField::Name), "");
    }

    #[test]
    fn failed_dispatch_keeps_fields_and_shows_destructive_toast() {
        let mut app = app();
        fill_form(&mut app);
        app.submit_contact();
        let effects = app.update(&Msg::MailtoDispatched(Err("no handler".into())));
        assert_eq!(app.contact.phase(), SubmissionPhase::Idle);
        assert_eq!(app.contact.field(ContactField::Message), "Hello there");
        assert!(matches!(
            effects.as_slice(),
            [Effect::ShowToast(toast)] if toast.title == FAILURE_TITLE && toast.variant == digitalfront_types::ToastVariant::Destructive
        ));
    }

    #[test]
    fn double_submit_yields_one_mailto() {
        let mut app = app();
        fill_form(&mut app);
        assert_eq!(app.submit_contact().len(), 1);
        assert!(app.submit_contact().is_empty());
    }

    #[test]
    fn reset_after_shutdown_is_ignored() {
        let mut app = app();
        fill_form(&mut app);
        app.submit_contact();
        app.update(&Msg::MailtoDispatched(Ok(())));
        app.shutdown();
        app.update(&Msg::ContactResetDue(ResetTicket(1)));
        assert_eq!(app.contact.phase(), SubmissionPhase::Submitted);
        assert_eq!(app.contact.field(ContactField::Name), "Asha");
    }

    #[test]
    fn tab_reaches_contact_fields() {
        let mut app = app();
        app.focus.focus(&app.nav_bar);
        assert!(app.nav_bar.container_focus.get());
        app.focus.next();
        assert!(app.page.focus.get());
        app.focus.next();
        assert_eq!(app.contact.focused_field(), Some(ContactField::Name));
    }
}
