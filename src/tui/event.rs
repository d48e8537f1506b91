use crate::event::{BUTTON_LEFT, BUTTON_MIDDLE, BUTTON_RIGHT, WidgetEvent};
use crossterm::event::{Event, KeyCode, MouseButton, MouseEvent, MouseEventKind};

#[derive(Debug, PartialEq)]
pub enum AppSignal {
    Quit,
    /// Pointer input for the bar at cell `(x, y)`.
    Pointer(u16, u16, WidgetEvent),
    Redraw,
    Continue,
}

/// Maps a terminal event onto what the preview should do. Only the first
/// row is the bar; pointer input elsewhere reads as leaving it.
pub fn translate(event: Event) -> AppSignal {
    match event {
        Event::Key(key) => match key.code {
            KeyCode::Char('q') | KeyCode::Esc => AppSignal::Quit,
            _ => AppSignal::Continue,
        },
        Event::Mouse(mouse) => translate_mouse(mouse),
        Event::Resize(_, _) => AppSignal::Redraw,
        _ => AppSignal::Continue,
    }
}

fn translate_mouse(mouse: MouseEvent) -> AppSignal {
    let (x, y) = (mouse.column, mouse.row);
    if y != 0 {
        return match mouse.kind {
            MouseEventKind::Moved => AppSignal::Pointer(x, y, WidgetEvent::Leave),
            _ => AppSignal::Continue,
        };
    }
    let event = match mouse.kind {
        MouseEventKind::Down(button) => WidgetEvent::Click {
            button: match button {
                MouseButton::Left => BUTTON_LEFT,
                MouseButton::Right => BUTTON_RIGHT,
                MouseButton::Middle => BUTTON_MIDDLE,
            },
            x,
            y,
        },
        MouseEventKind::Moved => WidgetEvent::Motion { x, y },
        MouseEventKind::ScrollUp => WidgetEvent::Scroll { dx: 0.0, dy: -1.0 },
        MouseEventKind::ScrollDown => WidgetEvent::Scroll { dx: 0.0, dy: 1.0 },
        _ => return AppSignal::Continue,
    };
    AppSignal::Pointer(x, y, event)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEvent, KeyModifiers};

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> Event {
        Event::Mouse(MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    #[test]
    fn test_quit_keys() {
        let q = Event::Key(KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE));
        let esc = Event::Key(KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE));
        let x = Event::Key(KeyEvent::new(KeyCode::Char('x'), KeyModifiers::NONE));
        assert_eq!(translate(q), AppSignal::Quit);
        assert_eq!(translate(esc), AppSignal::Quit);
        assert_eq!(translate(x), AppSignal::Continue);
    }

    #[test]
    fn test_clicks_on_bar_row() {
        assert_eq!(
            translate(mouse(MouseEventKind::Down(MouseButton::Right), 5, 0)),
            AppSignal::Pointer(
                5,
                0,
                WidgetEvent::Click {
                    button: BUTTON_RIGHT,
                    x: 5,
                    y: 0
                }
            )
        );
        assert_eq!(
            translate(mouse(MouseEventKind::Down(MouseButton::Left), 5, 3)),
            AppSignal::Continue
        );
        assert_eq!(
            translate(mouse(MouseEventKind::Moved, 5, 3)),
            AppSignal::Pointer(5, 3, WidgetEvent::Leave)
        );
    }
}
