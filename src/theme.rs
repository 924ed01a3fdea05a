//! Style registry: maps each highlight [`Category`] to the colors its layer is painted with.

use serde::Serialize;

use crate::settings::{Settings, StyleSetting};
use crate::syntax::Category;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Color {
    Reset,
    Rgb(u8, u8, u8),
    Indexed(u8),
}

impl Color {
    pub const fn from_rgb_hex(hex: u32) -> Self {
        Self::Rgb(
            ((hex >> 16) & 0xFF) as u8,
            ((hex >> 8) & 0xFF) as u8,
            (hex & 0xFF) as u8,
        )
    }
}

/// Foreground/background pair a layer is rendered with. Layers are keyed by this value, so
/// two categories sharing a style end up in the same layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct Style {
    pub fg: Color,
    pub bg: Option<Color>,
}

impl Style {
    pub const fn fg(fg: Color) -> Self {
        Self { fg, bg: None }
    }

    pub fn bg(mut self, color: Color) -> Self {
        self.bg = Some(color);
        self
    }
}

pub const DEFAULT_SYNTAX_RGB_HEX: [Option<u32>; Category::COUNT] = [
    Some(0x569CD6), // Keyword
    Some(0x6A9955), // Comment
    Some(0xCE9178), // String
    Some(0xD7BA7D), // Rune
    Some(0xB5CEA8), // Number
    Some(0x4FC1FF), // Constant
    Some(0xCE9178), // ImportPath
    Some(0xDCDCAA), // Declaration
    Some(0xC586C0), // Label
    None,           // Operator
    Some(0x4EC9B0), // Builtin
    Some(0xF44747), // Unresolved
];

/// Category -> style table handed to a [`crate::syntax::Syntax`] session.
///
/// A category without a style is legitimately invisible: the aggregator drops its spans.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    styles: [Option<Style>; Category::COUNT],
}

impl Theme {
    /// A theme with nothing registered.
    pub fn empty() -> Self {
        Self {
            styles: [None; Category::COUNT],
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        let mut theme = Self::default();
        for category in Category::ALL {
            if let Some(setting) = settings.syntax.get(category) {
                theme.apply_setting(category, setting);
            }
        }
        theme
    }

    pub fn style(&self, category: Category) -> Option<Style> {
        self.styles[category as usize]
    }

    pub fn set_style(&mut self, category: Category, style: Style) {
        self.styles[category as usize] = Some(style);
    }

    pub fn clear_style(&mut self, category: Category) {
        self.styles[category as usize] = None;
    }

    pub fn with_style(mut self, category: Category, style: Style) -> Self {
        self.set_style(category, style);
        self
    }

    fn apply_setting(&mut self, category: Category, setting: &StyleSetting) {
        if setting.disabled {
            self.clear_style(category);
            return;
        }

        let current = self.style(category);
        let fg = match setting.fg.as_deref() {
            Some(raw) => match parse_color(raw) {
                Some(color) => Some(color),
                None => {
                    tracing::warn!(?category, value = raw, "ignoring invalid foreground color");
                    current.map(|style| style.fg)
                }
            },
            None => current.map(|style| style.fg),
        };
        let Some(fg) = fg else {
            tracing::warn!(?category, "no foreground color; category stays unstyled");
            return;
        };

        let mut bg = current.and_then(|style| style.bg);
        if let Some(raw) = setting.bg.as_deref() {
            match parse_color(raw) {
                Some(Color::Reset) => bg = None,
                Some(color) => bg = Some(color),
                None => tracing::warn!(?category, value = raw, "ignoring invalid background color"),
            }
        }

        self.styles[category as usize] = Some(Style { fg, bg });
    }
}

impl Default for Theme {
    fn default() -> Self {
        let mut styles = [None; Category::COUNT];
        for (slot, hex) in styles.iter_mut().zip(DEFAULT_SYNTAX_RGB_HEX) {
            *slot = hex.map(|hex| Style::fg(Color::from_rgb_hex(hex)));
        }
        Self { styles }
    }
}

pub fn color_to_hex(color: Color) -> Option<String> {
    match color {
        Color::Rgb(r, g, b) => Some(format!("#{:02X}{:02X}{:02X}", r, g, b)),
        _ => None,
    }
}

/// The sixteen ANSI names settings may use, plus a few spelling variants.
const NAMED_COLORS: [(&str, u8); 18] = [
    ("black", 0),
    ("red", 1),
    ("green", 2),
    ("yellow", 3),
    ("blue", 4),
    ("magenta", 5),
    ("cyan", 6),
    ("gray", 7),
    ("grey", 7),
    ("dark_gray", 8),
    ("dark_grey", 8),
    ("light_red", 9),
    ("light_green", 10),
    ("light_yellow", 11),
    ("light_blue", 12),
    ("light_magenta", 13),
    ("light_cyan", 14),
    ("white", 15),
];

/// Parses a settings color: `#RRGGBB`, `reset`, or one of the ANSI names (case-insensitive).
pub fn parse_color(value: &str) -> Option<Color> {
    let value = value.trim();
    if let Some(hex) = value.strip_prefix('#') {
        if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        return u32::from_str_radix(hex, 16).ok().map(Color::from_rgb_hex);
    }
    if value.eq_ignore_ascii_case("reset") {
        return Some(Color::Reset);
    }
    NAMED_COLORS
        .iter()
        .find(|(name, _)| value.eq_ignore_ascii_case(name))
        .map(|&(_, idx)| Color::Indexed(idx))
}

#[cfg(test)]
#[path = "../tests/unit/theme.rs"]
mod tests;
