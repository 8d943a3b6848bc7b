use digitalfront_types::ViewportClass;
pub use digitalfront_util::section_label;
use digitalfront_util::NavEntry;
use rat_focus::{FocusBuilder, FocusFlag, HasFocus};
use ratatui::layout::Rect;
use tracing::{debug, warn};

/// Row of the open mobile menu the keyboard cursor can rest on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuRow {
    Entry(usize),
    WhatsApp,
}

/// State for the header navigation bar.
///
/// Owns the configured entries, the active entry, the responsive viewport
/// class and the mobile menu toggle, plus the hit-test areas recorded during
/// the last render. The active entry is stored as an index, so it can only
/// ever name a configured entry; `None` means nothing is highlighted (for
/// example while the hero is in view).
#[derive(Debug, Clone)]
pub struct NavBarState {
    items: Vec<NavEntry>,
    active: Option<usize>,
    /// Keyboard cursor over tabs (desktop) or menu rows (mobile).
    pub cursor: usize,
    viewport: ViewportClass,
    breakpoint_px: u32,
    menu_open: bool,
    /// Focus flag for the header in the global focus tree.
    pub container_focus: FocusFlag,
    /// Last rendered header area; used for mouse hit testing.
    pub last_area: Rect,
    pub brand_area: Rect,
    pub tab_areas: Vec<Rect>,
    pub phone_area: Rect,
    pub menu_button_area: Rect,
    /// Rows of the open mobile menu; the last one is the WhatsApp action.
    pub menu_row_areas: Vec<Rect>,
}

impl NavBarState {
    pub fn new(items: Vec<NavEntry>, breakpoint_px: u32) -> Self {
        Self {
            items,
            active: None,
            cursor: 0,
            viewport: ViewportClass::Desktop,
            breakpoint_px,
            menu_open: false,
            container_focus: FocusFlag::named("nav.header"),
            last_area: Rect::default(),
            brand_area: Rect::default(),
            tab_areas: Vec::new(),
            phone_area: Rect::default(),
            menu_button_area: Rect::default(),
            menu_row_areas: Vec::new(),
        }
    }

    // ===== SELECTORS =====

    pub fn items(&self) -> &[NavEntry] {
        &self.items
    }

    /// Name of the highlighted entry, if any.
    pub fn active_item(&self) -> Option<&str> {
        self.active.and_then(|idx| self.items.get(idx)).map(|entry| entry.name.as_str())
    }

    pub fn active_index(&self) -> Option<usize> {
        self.active
    }

    pub fn viewport(&self) -> ViewportClass {
        self.viewport
    }

    pub fn is_menu_open(&self) -> bool {
        self.menu_open
    }

    /// The menu only shows in the mobile layout, whatever `menu_open` says.
    pub fn is_menu_visible(&self) -> bool {
        self.menu_open && self.viewport.is_mobile()
    }

    /// Number of keyboard-addressable menu rows (entries plus the WhatsApp action).
    pub fn menu_len(&self) -> usize {
        self.items.len() + 1
    }

    pub fn menu_row(&self, index: usize) -> Option<MenuRow> {
        match index {
            idx if idx < self.items.len() => Some(MenuRow::Entry(idx)),
            idx if idx == self.items.len() => Some(MenuRow::WhatsApp),
            _ => None,
        }
    }

    // ===== REDUCERS =====

    /// Applies a section id pushed by the external scroll watcher.
    ///
    /// Returns the resulting label. A label that matches no configured entry
    /// (such as `Hero`) clears the highlight.
    pub fn set_active_from_external_signal(&mut self, section_id: &str) -> String {
        let label = section_label(section_id);
        let next = self.items.iter().position(|entry| entry.name == label);
        if next != self.active {
            debug!(section_id, label = %label, "active navigation entry changed by section signal");
        }
        self.active = next;
        label
    }

    /// User click on an entry: highlight it immediately and close the mobile menu.
    ///
    /// Returns the entry's anchor so the caller can scroll to it, or `None`
    /// for a name that is not configured.
    pub fn select_item(&mut self, name: &str) -> Option<String> {
        let Some(idx) = self.items.iter().position(|entry| entry.name == name) else {
            warn!(name, "ignoring selection of unknown navigation entry");
            return None;
        };
        self.active = Some(idx);
        self.cursor = idx;
        if self.viewport.is_mobile() {
            self.menu_open = false;
        }
        debug!(name, "navigation entry selected");
        Some(self.items[idx].anchor.clone())
    }

    /// Flips the mobile menu. Ignored in the desktop layout.
    pub fn toggle_menu(&mut self) -> bool {
        if !self.viewport.is_mobile() {
            return false;
        }
        self.menu_open = !self.menu_open;
        if self.menu_open {
            self.cursor = self.active.unwrap_or(0);
        }
        true
    }

    pub fn close_menu(&mut self) {
        self.menu_open = false;
    }

    /// Reclassifies the viewport. Returns `true` when the class changed.
    pub fn set_viewport_width(&mut self, width_px: u32) -> bool {
        let next = ViewportClass::classify(width_px, self.breakpoint_px);
        if next == self.viewport {
            return false;
        }
        debug!(width_px, ?next, "viewport class changed");
        self.viewport = next;
        true
    }

    /// Moves the keyboard cursor, wrapping at either end.
    pub fn move_cursor(&mut self, forward: bool) {
        let len = if self.is_menu_visible() { self.menu_len() } else { self.items.len() };
        if len == 0 {
            return;
        }
        self.cursor = if forward { (self.cursor + 1) % len } else { (self.cursor + len - 1) % len };
    }
}

impl HasFocus for NavBarState {
    fn build(&self, builder: &mut FocusBuilder) {
        builder.leaf_widget(self);
    }

    fn focus(&self) -> FocusFlag {
        self.container_focus.clone()
    }

    fn area(&self) -> Rect {
        self.last_area
    }
}
