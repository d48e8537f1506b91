use crate::error::BuildError;
use crate::event::WidgetEvent;
use crate::hyprland::HyprEvent;
use crate::state::BarState;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use std::collections::HashMap;

/// Keyword arguments for every widget, keyed by widget reference.
pub type WidgetArgsMap = HashMap<String, toml::Value>;

/// Constructor registered for a widget reference.
pub type WidgetFactory = fn(&WidgetArgs<'_>) -> Result<Box<dyn Widget>, BuildError>;

/// A Widget is a renderable component living in one of the bar sections.
pub trait Widget {
    fn name(&self) -> &str;

    fn style_classes(&self) -> &[String] {
        &[]
    }

    /// Width in cells for the next frame.
    fn width(&self, state: &BarState) -> u16;

    fn render(&mut self, area: Rect, buf: &mut Buffer, state: &BarState);

    /// Called once after the bar is assembled, before the first frame.
    fn mount(&mut self, _state: &BarState) {}

    fn handle_event(&mut self, _event: WidgetEvent, _state: &BarState) {}

    /// Returns true when the event changed what the widget draws.
    fn handle_hypr_event(&mut self, _event: &HyprEvent, _state: &BarState) -> bool {
        false
    }
}

/// The keyword bundle handed to a factory. An absent bundle behaves like an
/// empty one, so every getter falls back to its default.
#[derive(Debug, Clone, Copy)]
pub struct WidgetArgs<'a> {
    reference: &'a str,
    table: Option<&'a toml::Table>,
}

impl<'a> WidgetArgs<'a> {
    pub fn new(reference: &'a str, table: Option<&'a toml::Table>) -> Self {
        Self { reference, table }
    }

    pub fn none(reference: &'a str) -> Self {
        Self::new(reference, None)
    }

    pub fn reference(&self) -> &str {
        self.reference
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_none_or(|t| t.is_empty())
    }

    /// Rejects keywords the widget does not accept.
    pub fn expect_only(&self, allowed: &[&str]) -> Result<(), BuildError> {
        let Some(table) = self.table else {
            return Ok(());
        };
        match table.keys().find(|k| !allowed.contains(&k.as_str())) {
            Some(key) => Err(BuildError::UnexpectedArgument {
                reference: self.reference.to_string(),
                key: key.clone(),
            }),
            None => Ok(()),
        }
    }

    pub fn bool_or(&self, key: &str, default: bool) -> Result<bool, BuildError> {
        match self.get(key) {
            None => Ok(default),
            Some(v) => v.as_bool().ok_or_else(|| self.invalid(key, "a boolean")),
        }
    }

    pub fn int_or(&self, key: &str, default: i64) -> Result<i64, BuildError> {
        match self.get(key) {
            None => Ok(default),
            Some(v) => v.as_integer().ok_or_else(|| self.invalid(key, "an integer")),
        }
    }

    pub fn str_or(&self, key: &str, default: &str) -> Result<String, BuildError> {
        Ok(self.opt_str(key)?.unwrap_or_else(|| default.to_string()))
    }

    pub fn opt_str(&self, key: &str) -> Result<Option<String>, BuildError> {
        match self.get(key) {
            None => Ok(None),
            Some(v) => v
                .as_str()
                .map(|s| Some(s.to_string()))
                .ok_or_else(|| self.invalid(key, "a string")),
        }
    }

    fn get(&self, key: &str) -> Option<&'a toml::Value> {
        self.table.and_then(|t| t.get(key))
    }

    fn invalid(&self, key: &str, expected: &'static str) -> BuildError {
        BuildError::InvalidArgument {
            reference: self.reference.to_string(),
            key: key.to_string(),
            expected,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(src: &str) -> toml::Table {
        src.parse().unwrap()
    }

    #[test]
    fn test_defaults_without_bundle() {
        let args = WidgetArgs::none("window_title");
        assert!(args.is_empty());
        assert!(args.expect_only(&[]).is_ok());
        assert!(args.bool_or("icon", true).unwrap());
        assert_eq!(args.int_or("spacing", 5).unwrap(), 5);
    }

    #[test]
    fn test_typed_getters() {
        let t = table("icon = false\nspacing = 3\ntext = \"hi\"");
        let args = WidgetArgs::new("x", Some(&t));
        assert!(!args.bool_or("icon", true).unwrap());
        assert_eq!(args.int_or("spacing", 1).unwrap(), 3);
        assert_eq!(args.str_or("text", "").unwrap(), "hi");
        assert_eq!(args.opt_str("missing").unwrap(), None);
    }

    #[test]
    fn test_wrong_type_is_reported() {
        let t = table("spacing = \"wide\"");
        let args = WidgetArgs::new("workspaces", Some(&t));
        assert_eq!(
            args.int_or("spacing", 1),
            Err(BuildError::InvalidArgument {
                reference: "workspaces".into(),
                key: "spacing".into(),
                expected: "an integer",
            })
        );
    }

    #[test]
    fn test_unknown_keyword_rejected() {
        let t = table("colour = 1");
        let args = WidgetArgs::new("workspaces", Some(&t));
        assert!(matches!(
            args.expect_only(&["spacing"]),
            Err(BuildError::UnexpectedArgument { key, .. }) if key == "colour"
        ));
    }
}
