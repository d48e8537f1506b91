use ratatui::layout::Rect;

/// Linux input codes for pointer buttons.
pub const BUTTON_LEFT: u32 = 272;
pub const BUTTON_RIGHT: u32 = 273;
pub const BUTTON_MIDDLE: u32 = 274;

/// Pointer events delivered to a Widget, in cell coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WidgetEvent {
    /// Pointer entered the widget area
    Enter,
    /// Pointer left the widget area
    Leave,
    /// Pointer moved within the widget area (relative coordinates)
    Motion { x: u16, y: u16 },
    /// Pointer button clicked (272=Left, 273=Right, 274=Middle)
    Click { button: u32, x: u16, y: u16 },
    /// Scroll event (dx, dy)
    Scroll { dx: f64, dy: f64 },
}

impl WidgetEvent {
    /// Same event with coordinates made relative to `area`.
    pub fn relative_to(self, area: Rect) -> Self {
        match self {
            WidgetEvent::Motion { x, y } => WidgetEvent::Motion {
                x: x.saturating_sub(area.x),
                y: y.saturating_sub(area.y),
            },
            WidgetEvent::Click { button, x, y } => WidgetEvent::Click {
                button,
                x: x.saturating_sub(area.x),
                y: y.saturating_sub(area.y),
            },
            other => other,
        }
    }

    pub fn position(&self) -> Option<(u16, u16)> {
        match self {
            WidgetEvent::Motion { x, y } | WidgetEvent::Click { x, y, .. } => Some((*x, *y)),
            _ => None,
        }
    }
}

pub fn button_label(button: u32) -> &'static str {
    match button {
        BUTTON_LEFT => "L",
        BUTTON_RIGHT => "R",
        BUTTON_MIDDLE => "M",
        _ => "?",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relative_click() {
        let area = Rect::new(10, 0, 5, 1);
        let ev = WidgetEvent::Click {
            button: BUTTON_LEFT,
            x: 12,
            y: 0,
        };
        assert_eq!(
            ev.relative_to(area),
            WidgetEvent::Click {
                button: BUTTON_LEFT,
                x: 2,
                y: 0
            }
        );
        assert_eq!(WidgetEvent::Leave.relative_to(area), WidgetEvent::Leave);
    }
}
