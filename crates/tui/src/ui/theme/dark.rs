//! Dark palette: near-black surfaces with the purple-to-blue brand accents.

use ratatui::style::Color;

use super::{
    roles::{Theme, ThemeRoles},
    theme_helpers::lighten_rgb,
};

pub const INK: Color = Color::Rgb(0x0B, 0x0B, 0x12);
pub const PANEL: Color = Color::Rgb(0x16, 0x16, 0x22);
pub const PANEL_MUTED: Color = Color::Rgb(0x22, 0x22, 0x33);
pub const EDGE: Color = Color::Rgb(0x33, 0x33, 0x4A);

pub const SNOW: Color = Color::Rgb(0xED, 0xED, 0xF5);
pub const MIST: Color = Color::Rgb(0xC4, 0xC4, 0xD6);
pub const FOG: Color = Color::Rgb(0x70, 0x70, 0x88);

pub const PURPLE: Color = Color::Rgb(0xA8, 0x55, 0xF7); // purple-500
pub const BLUE: Color = Color::Rgb(0x3B, 0x82, 0xF6); // blue-500
pub const GREEN: Color = Color::Rgb(0x4A, 0xDE, 0x80); // green-400
pub const RED: Color = Color::Rgb(0xF8, 0x71, 0x71); // red-400

fn build_dark_roles() -> ThemeRoles {
    ThemeRoles {
        background: INK,
        surface: PANEL,
        surface_muted: PANEL_MUTED,
        border: EDGE,

        text: SNOW,
        text_secondary: MIST,
        text_muted: FOG,

        accent_primary: PURPLE,
        accent_secondary: BLUE,

        success: GREEN,
        error: RED,

        selection_bg: PANEL_MUTED,
        selection_fg: lighten_rgb(PURPLE, 0.35),
        focus: PURPLE,
        overlay_bg: Color::Rgb(0x10, 0x10, 0x1A),
    }
}

/// Default theme for dark terminals.
#[derive(Debug, Clone)]
pub struct DarkTheme {
    roles: ThemeRoles,
}

impl DarkTheme {
    pub fn new() -> Self {
        Self { roles: build_dark_roles() }
    }
}

impl Default for DarkTheme {
    fn default() -> Self {
        Self::new()
    }
}

impl Theme for DarkTheme {
    fn roles(&self) -> &ThemeRoles {
        &self.roles
    }

    fn is_dark(&self) -> bool {
        true
    }
}
