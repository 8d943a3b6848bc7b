//! Light palette: white and gray-50 surfaces, gray-800 text, same brand accents.

use ratatui::style::Color;

use super::{
    roles::{Theme, ThemeRoles},
    theme_helpers::darken_rgb,
};

pub const WHITE: Color = Color::Rgb(0xFF, 0xFF, 0xFF);
pub const GRAY_50: Color = Color::Rgb(0xF9, 0xFA, 0xFB);
pub const GRAY_100: Color = Color::Rgb(0xF3, 0xF4, 0xF6);
pub const GRAY_300: Color = Color::Rgb(0xD1, 0xD5, 0xDB);
pub const GRAY_500: Color = Color::Rgb(0x6B, 0x72, 0x80);
pub const GRAY_700: Color = Color::Rgb(0x37, 0x41, 0x51);
pub const GRAY_800: Color = Color::Rgb(0x1F, 0x29, 0x37);

pub const PURPLE: Color = Color::Rgb(0x93, 0x33, 0xEA); // purple-600
pub const BLUE: Color = Color::Rgb(0x25, 0x63, 0xEB); // blue-600
pub const GREEN: Color = Color::Rgb(0x16, 0xA3, 0x4A); // green-600
pub const RED: Color = Color::Rgb(0xDC, 0x26, 0x26); // red-600

fn build_light_roles() -> ThemeRoles {
    ThemeRoles {
        background: WHITE,
        surface: GRAY_50,
        surface_muted: GRAY_100,
        border: GRAY_300,

        text: GRAY_800,
        text_secondary: GRAY_700,
        text_muted: GRAY_500,

        accent_primary: PURPLE,
        accent_secondary: BLUE,

        success: GREEN,
        error: RED,

        selection_bg: GRAY_100,
        selection_fg: darken_rgb(PURPLE, 0.85),
        focus: PURPLE,
        overlay_bg: GRAY_50,
    }
}

/// Theme for light terminals.
#[derive(Debug, Clone)]
pub struct LightTheme {
    roles: ThemeRoles,
}

impl LightTheme {
    pub fn new() -> Self {
        Self {
            roles: build_light_roles(),
        }
    }
}

impl Default for LightTheme {
    fn default() -> Self {
        Self::new()
    }
}

impl Theme for LightTheme {
    fn roles(&self) -> &ThemeRoles {
        &self.roles
    }

    fn is_dark(&self) -> bool {
        false
    }
}
