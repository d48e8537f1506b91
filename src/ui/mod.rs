//! Toolkit primitives, reachable from configs as `ui:<Class>`.

pub mod button;
pub mod image;
pub mod label;
pub mod separator;
pub mod style;

pub use button::Button;
pub use image::Image;
pub use label::Label;
pub use separator::Separator;
pub use style::Theme;

use crate::registry::{Catalog, ClassKind, ModuleEntry, TOOLKIT_NAMESPACE};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;

pub fn register(catalog: &mut Catalog) {
    catalog.register_module(
        TOOLKIT_NAMESPACE,
        ModuleEntry::default()
            .class("Label", ClassKind::Widget(label::main))
            .class("Image", ClassKind::Widget(image::main))
            .class("Button", ClassKind::Widget(button::main))
            .class("Separator", ClassKind::Widget(separator::main))
            .class("Theme", ClassKind::Other),
    );
}

/// Width of `text` in cells.
pub fn text_width(text: &str) -> u16 {
    u16::try_from(text.chars().count()).unwrap_or(u16::MAX)
}

/// Draws `text` on the vertically centered row of `area`, clipped to its width.
pub fn draw_text(buf: &mut Buffer, area: Rect, text: &str, style: Style) {
    if area.is_empty() {
        return;
    }
    let y = area.y + area.height.saturating_sub(1) / 2;
    buf.set_stringn(area.x, y, text, area.width as usize, style);
}
