use super::{draw_text, text_width};
use crate::error::BuildError;
use crate::state::BarState;
use crate::widget::{Widget, WidgetArgs};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;

pub struct Label {
    name: String,
    text: String,
    classes: Vec<String>,
}

impl Label {
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
            classes: Vec::new(),
        }
    }

    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }
}

impl Widget for Label {
    fn name(&self) -> &str {
        &self.name
    }

    fn style_classes(&self) -> &[String] {
        &self.classes
    }

    fn width(&self, _state: &BarState) -> u16 {
        text_width(&self.text)
    }

    fn render(&mut self, area: Rect, buf: &mut Buffer, state: &BarState) {
        draw_text(buf, area, &self.text, state.theme.style_for(&self.classes));
    }
}

/// `ui:Label(text = "", class = None)`
pub fn main(args: &WidgetArgs<'_>) -> Result<Box<dyn Widget>, BuildError> {
    args.expect_only(&["text", "class"])?;
    let mut label = Label::new("label", args.str_or("text", "")?);
    if let Some(class) = args.opt_str("class")? {
        label = label.class(class);
    }
    Ok(Box::new(label))
}
