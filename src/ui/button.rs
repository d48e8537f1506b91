use super::{draw_text, text_width};
use crate::error::BuildError;
use crate::event::{BUTTON_LEFT, WidgetEvent};
use crate::modules::logging::{log_debug, log_error};
use crate::state::BarState;
use crate::widget::{Widget, WidgetArgs};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;

/// A clickable label that runs a Hyprland dispatch on left click.
pub struct Button {
    label: String,
    command: Option<String>,
    classes: Vec<String>,
}

impl Button {
    pub fn new(label: impl Into<String>, command: Option<String>) -> Self {
        Self {
            label: label.into(),
            command,
            classes: vec!["button".to_string()],
        }
    }

    fn padded(&self) -> String {
        format!(" {} ", self.label)
    }
}

impl Widget for Button {
    fn name(&self) -> &str {
        "button"
    }

    fn style_classes(&self) -> &[String] {
        &self.classes
    }

    fn width(&self, _state: &BarState) -> u16 {
        text_width(&self.padded())
    }

    fn render(&mut self, area: Rect, buf: &mut Buffer, state: &BarState) {
        draw_text(buf, area, &self.padded(), state.theme.style_for(&self.classes));
    }

    fn handle_event(&mut self, event: WidgetEvent, state: &BarState) {
        let WidgetEvent::Click { button, .. } = event else {
            return;
        };
        if button != BUTTON_LEFT {
            return;
        }
        let (Some(command), Some(hypr)) = (&self.command, &state.hypr) else {
            log_debug("BUTTON", &format!("'{}' clicked, nothing to dispatch", self.label));
            return;
        };
        if let Err(e) = hypr.dispatch(command) {
            log_error("BUTTON", &format!("dispatch '{}' failed: {}", command, e));
        }
    }
}

/// `ui:Button(label = "", command = None)`
pub fn main(args: &WidgetArgs<'_>) -> Result<Box<dyn Widget>, BuildError> {
    args.expect_only(&["label", "command"])?;
    Ok(Box::new(Button::new(
        args.str_or("label", "")?,
        args.opt_str("command")?,
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::testing::render_row;

    #[test]
    fn test_button_pads_label() {
        let t: toml::Table = "label = \"menu\"\ncommand = \"exec wofi\"".parse().unwrap();
        let mut w = main(&WidgetArgs::new("ui:Button", Some(&t))).unwrap();
        assert_eq!(render_row(w.as_mut()), " menu ");
    }

    #[test]
    fn test_click_without_compositor_is_harmless() {
        let state = BarState::detached(Default::default());
        let mut b = Button::new("x", Some("exec true".into()));
        b.handle_event(
            WidgetEvent::Click {
                button: BUTTON_LEFT,
                x: 0,
                y: 0,
            },
            &state,
        );
    }
}
