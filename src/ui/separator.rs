use super::{draw_text, text_width};
use crate::error::BuildError;
use crate::state::BarState;
use crate::widget::{Widget, WidgetArgs};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;

pub struct Separator {
    symbol: String,
    classes: Vec<String>,
}

impl Separator {
    pub fn new(symbol: &str) -> Self {
        Self {
            symbol: symbol.to_string(),
            classes: vec!["separator".to_string()],
        }
    }
}

impl Widget for Separator {
    fn name(&self) -> &str {
        "separator"
    }

    fn style_classes(&self) -> &[String] {
        &self.classes
    }

    fn width(&self, _state: &BarState) -> u16 {
        text_width(&self.symbol)
    }

    fn render(&mut self, area: Rect, buf: &mut Buffer, state: &BarState) {
        draw_text(buf, area, &self.symbol, state.theme.style_for(&self.classes));
    }
}

/// `ui:Separator(symbol = "|")`
pub fn main(args: &WidgetArgs<'_>) -> Result<Box<dyn Widget>, BuildError> {
    args.expect_only(&["symbol"])?;
    let symbol = args.str_or("symbol", "|")?;
    Ok(Box::new(Separator::new(&symbol)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::testing::render_row;

    #[test]
    fn test_default_symbol() {
        let mut w = main(&WidgetArgs::none("ui:Separator")).unwrap();
        assert_eq!(render_row(w.as_mut()), "|");
    }
}
