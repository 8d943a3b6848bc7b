//! Theme styling module for the TUI UI layer.
//!
//! The site ships a dark and a light palette sharing the purple-to-blue brand
//! accents. Which one is used is decided once at startup from the injected,
//! read-only [`ThemeFlag`]; components only ever see `&dyn Theme`.

use digitalfront_types::ThemeFlag;
use tracing::debug;

pub mod dark;
pub mod light;
pub mod roles;
pub mod theme_helpers;

pub use dark::DarkTheme;
pub use light::LightTheme;
pub use roles::Theme;

/// Builds the palette selected by `flag`.
pub fn load(flag: ThemeFlag) -> Box<dyn Theme> {
    debug!(?flag, "loading theme");
    match flag {
        ThemeFlag::Dark => Box::new(DarkTheme::new()),
        ThemeFlag::Light => Box::new(LightTheme::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_selects_palette() {
        assert!(load(ThemeFlag::Dark).is_dark());
        assert!(!load(ThemeFlag::Light).is_dark());
    }
}
