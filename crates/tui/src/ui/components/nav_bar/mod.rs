//! Header navigation bar.
//!
//! The bar tracks which section is active (pushed by the page's scroll
//! watcher or set by a click), switches between the desktop tab strip and
//! the mobile menu at the configured breakpoint, and owns the mobile menu
//! toggle. Activating an entry emits `Effect::ScrollToAnchor`; the WhatsApp
//! action emits `Effect::OpenExternal`.

mod nav_bar_component;
mod state;

pub use nav_bar_component::NavBarComponent;
pub use state::{MenuRow, NavBarState, section_label};
