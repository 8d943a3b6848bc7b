use ratatui::{
    style::{Color, Modifier, Style},
    text::Span,
    widgets::{Block, BorderType, Borders},
};

use super::roles::Theme;
use crate::ui::theme::roles::ThemeRoles;

/// Build a standard Block with theme surfaces and borders.
pub fn block<'a, T: Theme + ?Sized>(theme: &'a T, title: Option<&'a str>, focused: bool) -> Block<'a> {
    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme.border_style(focused))
        .style(panel_style(theme));
    if let Some(t) = title {
        block = block.title(Span::styled(t, theme.text_secondary_style().add_modifier(Modifier::BOLD)));
    }
    block
}

/// Style for panel-like containers (set background on widget using `.style`).
pub fn panel_style<T: Theme + ?Sized>(theme: &T) -> Style {
    let ThemeRoles { surface, text, .. } = *theme.roles();
    Style::default().bg(surface).fg(text)
}

/// Style for the page background behind every section.
pub fn page_style<T: Theme + ?Sized>(theme: &T) -> Style {
    let ThemeRoles { background, text, .. } = *theme.roles();
    Style::default().bg(background).fg(text)
}

/// Darken an RGB color by a multiplicative factor (0.0..=1.0).
/// If the color is not RGB, returns it unchanged.
pub fn darken_rgb(color: Color, factor: f32) -> Color {
    match color {
        Color::Rgb(r, g, b) => {
            let f = factor.clamp(0.0, 1.0);
            let scale = |channel: u8| (channel as f32 * f).round().clamp(0.0, 255.0) as u8;
            Color::Rgb(scale(r), scale(g), scale(b))
        }
        other => other,
    }
}

/// Move an RGB color towards white by `amount` (0.0..=1.0).
pub fn lighten_rgb(color: Color, amount: f32) -> Color {
    match color {
        Color::Rgb(r, g, b) => {
            let a = amount.clamp(0.0, 1.0);
            let mix = |channel: u8| (channel as f32 + (255.0 - channel as f32) * a).round().clamp(0.0, 255.0) as u8;
            Color::Rgb(mix(r), mix(g), mix(b))
        }
        other => other,
    }
}

/// Style for input fields; caller sets the block border based on focus.
pub fn input_style<T: Theme + ?Sized>(theme: &T, valid: bool, focused: bool) -> Style {
    let ThemeRoles {
        surface_muted, text, error, ..
    } = *theme.roles();
    let mut style = Style::default().bg(surface_muted).fg(text);
    if !valid {
        style = style.fg(error);
    }
    if focused {
        style = style.add_modifier(Modifier::BOLD);
    }
    style
}

/// Filled brand button; muted when disabled.
pub fn primary_button_style<T: Theme + ?Sized>(theme: &T, enabled: bool, focused: bool) -> Style {
    if !enabled {
        return theme.text_muted_style().bg(theme.roles().surface_muted);
    }
    let ThemeRoles { accent_primary, .. } = *theme.roles();
    let mut style = Style::default().bg(accent_primary).fg(Color::White).add_modifier(Modifier::BOLD);
    if focused {
        style = style.add_modifier(Modifier::UNDERLINED);
    }
    style
}

/// Style of a navigation tab; the active one carries the highlight.
pub fn tab_style<T: Theme + ?Sized>(theme: &T, active: bool, cursor: bool) -> Style {
    let mut style = if active {
        theme.selection_style().add_modifier(Modifier::BOLD)
    } else {
        theme.text_secondary_style()
    };
    if cursor {
        style = style.add_modifier(Modifier::UNDERLINED);
    }
    style
}

/// Builds `key  description` span pairs for the hint bar.
pub fn build_hint_spans<'a, T: Theme + ?Sized>(theme: &T, hints: &[(&'a str, &'a str)]) -> Vec<Span<'a>> {
    let mut spans = Vec::with_capacity(hints.len() * 2);
    for (key, description) in hints {
        spans.push(Span::styled(*key, theme.accent_emphasis_style()));
        spans.push(Span::styled(*description, theme.text_muted_style()));
    }
    spans
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn darken_and_lighten_bound_channels() {
        assert_eq!(darken_rgb(Color::Rgb(200, 100, 0), 0.5), Color::Rgb(100, 50, 0));
        assert_eq!(lighten_rgb(Color::Rgb(0, 0, 255), 1.0), Color::Rgb(255, 255, 255));
        assert_eq!(darken_rgb(Color::Red, 0.5), Color::Red);
    }
}
