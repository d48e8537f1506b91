use crate::layout::LayoutSpec;
use crate::widget::WidgetArgsMap;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct BarConfig {
    #[serde(default)]
    pub bar: LayoutSpec,
    #[serde(default)]
    pub window: WindowConfig,
    #[serde(default)]
    pub style: StyleConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Keyword arguments per widget reference, e.g. `[widget.workspaces]`.
    #[serde(default)]
    pub widget: WidgetArgsMap,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_debug_filter")]
    pub debug_filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            debug_filter: default_debug_filter(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_debug_filter() -> String {
    "info,selvedge=debug".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WindowConfig {
    #[serde(default = "default_height")]
    pub height: u32,
    /// Used only when the bar is not anchored to both left and right.
    #[serde(default = "default_width")]
    pub width: u32,
    #[serde(default)]
    pub monitor: String,
    #[serde(default)]
    pub font: Option<String>,
    #[serde(default)]
    pub font_size: Option<f32>,
    #[serde(default = "default_min_padding")]
    pub min_padding: u32,
}

impl WindowConfig {
    /// Font size in pixels: explicit, or the largest that fits one text row
    /// inside `height - min_padding`.
    pub fn font_size(&self) -> f32 {
        match self.font_size {
            Some(fs) => fs,
            None => {
                let available = self.height.saturating_sub(self.min_padding) as f32;
                (available / 1.2).max(6.0)
            }
        }
    }

    pub fn monitor(&self) -> Option<&str> {
        (!self.monitor.is_empty()).then_some(self.monitor.as_str())
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            height: default_height(),
            width: default_width(),
            monitor: String::new(), // Empty = compositor decides
            font: None,
            font_size: None,
            min_padding: default_min_padding(),
        }
    }
}

fn default_height() -> u32 {
    30
}

fn default_width() -> u32 {
    800
}

fn default_min_padding() -> u32 {
    6
}

#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
pub struct ClassStyle {
    #[serde(default)]
    pub fg: Option<String>,
    #[serde(default)]
    pub bg: Option<String>,
    #[serde(default)]
    pub bold: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StyleConfig {
    #[serde(default = "default_bg")]
    pub bg: String,
    #[serde(default = "default_fg")]
    pub fg: String,
    #[serde(default = "default_accent")]
    pub accent: String,
    /// Cells between widgets of the same section.
    #[serde(default = "default_spacing")]
    pub spacing: u16,
    /// Per style-class overrides, keyed by class name.
    #[serde(default)]
    pub classes: HashMap<String, ClassStyle>,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            bg: default_bg(),
            fg: default_fg(),
            accent: default_accent(),
            spacing: default_spacing(),
            classes: HashMap::new(),
        }
    }
}

fn default_bg() -> String {
    "#1e1e2e".to_string()
}

fn default_fg() -> String {
    "#cdd6f4".to_string()
}

fn default_accent() -> String {
    "#89b4fa".to_string()
}

fn default_spacing() -> u16 {
    1
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{Edge, Section};

    #[test]
    fn test_empty_document_uses_defaults() {
        let config: BarConfig = toml::from_str("").unwrap();
        assert_eq!(config.bar.name, "stbar");
        assert_eq!(config.bar.anchor, vec![Edge::Left, Edge::Top, Edge::Right]);
        assert_eq!(config.window.height, 30);
        assert_eq!(config.logging.level, "info");
        assert!(config.widget.is_empty());
    }

    #[test]
    fn test_full_document() {
        let config: BarConfig = toml::from_str(
            r##"
            [bar]
            anchor = ["bottom", "left", "right"]
            name = "bottom-bar"
            [bar.margins]
            bottom = 2
            [bar.widgets]
            start = ["workspaces"]
            end = "window_title"

            [window]
            height = 24
            monitor = "DP-1"

            [style]
            accent = "#ff0000"
            [style.classes.special-workspace]
            fg = "#f5c2e7"
            bold = true

            [widget.workspaces]
            spacing = 2
            "##,
        )
        .unwrap();
        assert_eq!(config.bar.name, "bottom-bar");
        assert_eq!(config.bar.widgets.references(Section::End), vec!["window_title".to_string()]);
        assert_eq!(config.window.monitor(), Some("DP-1"));
        assert!(config.style.classes["special-workspace"].bold);
        assert_eq!(
            config.widget["workspaces"].get("spacing").and_then(|v| v.as_integer()),
            Some(2)
        );
    }

    #[test]
    fn test_font_size() {
        let mut window = WindowConfig::default();
        window.height = 30;
        window.min_padding = 6;
        // 24 / 1.2 = 20
        assert!((window.font_size() - 20.0).abs() < 0.001);

        window.font_size = Some(13.0);
        assert_eq!(window.font_size(), 13.0);

        window.font_size = None;
        window.height = 4;
        assert_eq!(window.font_size(), 6.0);
        assert_eq!(window.monitor(), None);
    }
}
