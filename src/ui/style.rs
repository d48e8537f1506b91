use crate::config::{ClassStyle, StyleConfig};
use ratatui::style::{Color, Modifier, Style};
use std::collections::HashMap;

/// Colors resolved once from `[style]`, plus per-class overrides.
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub bg: Color,
    pub fg: Color,
    pub accent: Color,
    pub spacing: u16,
    classes: HashMap<String, ResolvedClass>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct ResolvedClass {
    fg: Option<Color>,
    bg: Option<Color>,
    bold: bool,
}

impl Theme {
    pub fn from_config(style: &StyleConfig) -> Self {
        let mut classes = builtin_classes(style);
        for (name, class) in &style.classes {
            classes.insert(name.clone(), resolve_class(class));
        }
        Self {
            bg: hex_to_color(&style.bg).unwrap_or(Color::Black),
            fg: hex_to_color(&style.fg).unwrap_or(Color::White),
            accent: hex_to_color(&style.accent).unwrap_or(Color::Cyan),
            spacing: style.spacing,
            classes,
        }
    }

    /// Style for a widget carrying `classes`. Later classes override earlier ones.
    pub fn style_for<S: AsRef<str>>(&self, classes: &[S]) -> Style {
        let mut style = Style::default().fg(self.fg);
        for class in classes {
            if let Some(c) = self.classes.get(class.as_ref()) {
                if let Some(fg) = c.fg {
                    style = style.fg(fg);
                }
                if let Some(bg) = c.bg {
                    style = style.bg(bg);
                }
                if c.bold {
                    style = style.add_modifier(Modifier::BOLD);
                }
            }
        }
        style
    }

    /// Bar background, honoring a `bg` override on any window style class.
    pub fn window_bg<S: AsRef<str>>(&self, classes: &[S]) -> Color {
        classes
            .iter()
            .filter_map(|c| self.classes.get(c.as_ref()).and_then(|c| c.bg))
            .next_back()
            .unwrap_or(self.bg)
    }
}

fn builtin_classes(style: &StyleConfig) -> HashMap<String, ResolvedClass> {
    let accent = hex_to_color(&style.accent);
    HashMap::from([
        (
            "active".to_string(),
            ResolvedClass {
                fg: accent,
                bg: None,
                bold: true,
            },
        ),
        (
            "special-workspace".to_string(),
            ResolvedClass {
                fg: Some(Color::Magenta),
                bg: None,
                bold: false,
            },
        ),
    ])
}

fn resolve_class(class: &ClassStyle) -> ResolvedClass {
    ResolvedClass {
        fg: class.fg.as_deref().and_then(hex_to_color),
        bg: class.bg.as_deref().and_then(hex_to_color),
        bold: class.bold,
    }
}

/// Parses `#rrggbb` or `rrggbb`.
pub fn hex_to_color(hex: &str) -> Option<Color> {
    let hex = hex.trim().trim_start_matches('#');
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some(Color::Rgb(channel(0)?, channel(2)?, channel(4)?))
}
