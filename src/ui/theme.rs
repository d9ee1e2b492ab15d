//! UI theme constants - dark and light palettes

use crate::logging::Level;
use crate::prefs::Theme;
use ratatui::style::{Color, Modifier, Style};

// Level colors (shared by both palettes)
pub const COLOR_SUCCESS: Color = Color::Rgb(76, 175, 80); // green
pub const COLOR_INFO: Color = Color::Rgb(33, 150, 243); // blue
pub const COLOR_WARN: Color = Color::Rgb(255, 152, 0); // orange
pub const COLOR_ERROR: Color = Color::Rgb(244, 67, 54); // red
pub const COLOR_FORCE: Color = Color::Rgb(156, 39, 176); // purple

// JSON tree colors
pub const COLOR_JSON_STRING: Color = Color::Rgb(206, 145, 120);
pub const COLOR_JSON_NUMBER: Color = Color::Rgb(181, 206, 168);
pub const COLOR_JSON_BOOL: Color = Color::Rgb(86, 156, 214);
pub const COLOR_JSON_NULL: Color = Color::Rgb(153, 153, 153);

// Symbols
pub const SYMBOL_EXPANDED: &str = "▼";
pub const SYMBOL_COLLAPSED: &str = "▶";
pub const SYMBOL_COPIED: &str = "✓";
pub const SYMBOL_PINNED: &str = "📌";
pub const SYMBOL_EMPTY: &str = "📋";

/// Colors of one theme
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub background: Color,
    pub header: Color,
    pub border: Color,
    pub text: Color,
    pub muted: Color,
    pub badge_active: Color,
    pub badge_idle: Color,
}

pub const DARK: Palette = Palette {
    background: Color::Rgb(18, 18, 18),
    header: Color::Rgb(40, 40, 40),
    border: Color::Rgb(80, 80, 80),
    text: Color::Rgb(230, 230, 230),
    muted: Color::Rgb(136, 136, 136),
    badge_active: COLOR_SUCCESS,
    badge_idle: Color::Rgb(100, 100, 100),
};

pub const LIGHT: Palette = Palette {
    background: Color::Rgb(250, 250, 250),
    header: Color::Rgb(230, 230, 230),
    border: Color::Rgb(190, 190, 190),
    text: Color::Rgb(30, 30, 30),
    muted: Color::Rgb(110, 110, 110),
    badge_active: COLOR_SUCCESS,
    badge_idle: Color::Rgb(170, 170, 170),
};

pub fn palette(theme: Theme) -> Palette {
    match theme {
        Theme::Dark => DARK,
        Theme::Light => LIGHT,
    }
}

/// Text color of an entry; unknown levels render like `info`
pub fn level_color(level: &Level) -> Color {
    match level {
        Level::Success => COLOR_SUCCESS,
        Level::Warn => COLOR_WARN,
        Level::Error => COLOR_ERROR,
        Level::Force => COLOR_FORCE,
        Level::Info | Level::Default | Level::Custom(_) => COLOR_INFO,
    }
}

impl Palette {
    pub fn base(&self) -> Style {
        Style::new().fg(self.text).bg(self.background)
    }

    pub fn muted(&self) -> Style {
        Style::new().fg(self.muted)
    }

    pub fn border(&self) -> Style {
        Style::new().fg(self.border)
    }

    pub fn title(&self) -> Style {
        Style::new()
            .fg(self.text)
            .bg(self.header)
            .add_modifier(Modifier::BOLD)
    }
}
