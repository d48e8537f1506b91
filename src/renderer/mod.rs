mod input;
mod layout;
mod types;

use crate::hyprland::HyprEvent;
use crate::layout::{BarWindow, Section};
use crate::modules::logging::*;
use crate::state::BarState;
use crate::widget::Widget;
use anyhow::Result;
use ratatui::prelude::*;
use types::HitWidget;

/// Draws an assembled [`BarWindow`] into a cell buffer and routes input to
/// its widgets. Shared by the Wayland surface and the terminal preview.
pub struct BarRenderer {
    buffer: Buffer,
    pub width: u16,
    pub height: u16,
    window: BarWindow,
    pub(crate) hit_map: Vec<HitWidget>,
    pub(crate) hovered: Option<(Section, usize)>,
}

impl BarRenderer {
    pub fn new(window: BarWindow, width: u16, height: u16) -> Self {
        log_debug(
            "RENDER",
            &format!(
                "Initializing BarRenderer {}x{} for '{}'",
                width, height, window.name
            ),
        );
        Self {
            buffer: Buffer::empty(Rect::new(0, 0, width, height)),
            width,
            height,
            window,
            hit_map: Vec::new(),
            hovered: None,
        }
    }

    pub fn window(&self) -> &BarWindow {
        &self.window
    }

    /// Lets every widget seed its state before the first frame.
    pub fn mount(&mut self, state: &BarState) {
        let mut count = 0;
        for widget in self.window.child.widgets_mut() {
            widget.mount(state);
            count += 1;
        }
        log_info("RENDER", &format!("Mounted {} widgets", count));
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        if self.width != width || self.height != height {
            log_debug(
                "RENDER",
                &format!("Resizing buffer to {}x{}", width, height),
            );
            self.width = width;
            self.height = height;
            self.buffer = Buffer::empty(Rect::new(0, 0, width, height));
        }
    }

    pub fn render_frame(&mut self, state: &BarState) -> Result<()> {
        let area = Rect::new(0, 0, self.width, self.height);
        self.buffer.reset();
        self.hit_map.clear();

        let bg = state.theme.window_bg(&self.window.style_classes);
        self.buffer.set_style(area, Style::default().bg(bg).fg(state.theme.fg));

        let rects = self.calculate_flex_rects(area, state);
        for (section, rect) in Section::ALL.into_iter().zip(rects) {
            if let Some(part) = self.window.child.section_mut(section) {
                Self::render_section(
                    &mut self.buffer,
                    rect,
                    part,
                    &mut self.hit_map,
                    section,
                    state,
                );
            }
        }
        Ok(())
    }

    /// Hands a compositor event to every widget. Returns true when any of
    /// them needs a redraw.
    pub fn dispatch_hypr(&mut self, event: &HyprEvent, state: &BarState) -> bool {
        let mut dirty = false;
        for widget in self.window.child.widgets_mut() {
            dirty |= widget.handle_hypr_event(event, state);
        }
        dirty
    }

    pub fn buffer(&self) -> &Buffer {
        &self.buffer
    }

    pub(crate) fn widget_mut(&mut self, section: Section, idx: usize) -> Option<&mut Box<dyn Widget>> {
        self.window
            .child
            .section_mut(section)
            .and_then(|part| part.children.get_mut(idx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BarConfig;
    use crate::event::{BUTTON_LEFT, WidgetEvent};
    use crate::layout::{CenterBox, Exclusivity, Layer, Margins, WidgetBox, default_anchor};
    use crate::ui::{Label, Separator};
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Records every event it receives.
    struct Probe {
        log: Rc<RefCell<Vec<WidgetEvent>>>,
    }

    impl Widget for Probe {
        fn name(&self) -> &str {
            "probe"
        }
        fn width(&self, _state: &BarState) -> u16 {
            4
        }
        fn render(&mut self, area: Rect, buf: &mut Buffer, _state: &BarState) {
            buf.set_string(area.x, area.y, "PPPP", Style::default());
        }
        fn handle_event(&mut self, event: WidgetEvent, _state: &BarState) {
            self.log.borrow_mut().push(event);
        }
    }

    fn part(section: Section, children: Vec<Box<dyn Widget>>) -> Option<WidgetBox> {
        Some(WidgetBox {
            name: section.box_name().to_string(),
            style_classes: vec!["stbar-part".to_string()],
            children,
        })
    }

    fn window(start: Vec<Box<dyn Widget>>, center: Vec<Box<dyn Widget>>, end: Vec<Box<dyn Widget>>) -> BarWindow {
        BarWindow {
            name: "stbar".to_string(),
            anchor: default_anchor(),
            margins: Margins::default(),
            style_classes: Vec::new(),
            layer: Layer::Top,
            exclusivity: Exclusivity::Auto,
            child: CenterBox {
                name: "inner-bar".to_string(),
                start: part(Section::Start, start),
                center: part(Section::Center, center),
                end: part(Section::End, end),
            },
        }
    }

    fn row(r: &BarRenderer) -> String {
        (0..r.width)
            .map(|x| r.buffer()[(x, 0)].symbol().to_string())
            .collect()
    }

    #[test]
    fn test_sections_are_placed_flush_and_centered() {
        let state = BarState::detached(BarConfig::default());
        let mut r = BarRenderer::new(
            window(
                vec![Box::new(Label::new("a", "AB"))],
                vec![Box::new(Label::new("c", "CC"))],
                vec![Box::new(Label::new("e", "EE"))],
            ),
            10,
            1,
        );
        r.render_frame(&state).unwrap();
        assert_eq!(row(&r), "AB  CC  EE");
    }

    #[test]
    fn test_center_clamped_by_start() {
        let state = BarState::detached(BarConfig::default());
        let mut r = BarRenderer::new(
            window(
                vec![Box::new(Label::new("a", "AAAAAA"))],
                vec![Box::new(Label::new("c", "CC"))],
                Vec::new(),
            ),
            10,
            1,
        );
        r.render_frame(&state).unwrap();
        assert_eq!(row(&r), "AAAAAACC  ");
    }

    #[test]
    fn test_spacing_between_children() {
        let state = BarState::detached(BarConfig::default());
        let mut r = BarRenderer::new(
            window(
                vec![
                    Box::new(Label::new("a", "A")),
                    Box::new(Separator::new("|")),
                    Box::new(Label::new("b", "B")),
                ],
                Vec::new(),
                Vec::new(),
            ),
            8,
            1,
        );
        r.render_frame(&state).unwrap();
        assert_eq!(row(&r), "A | B   ");
    }

    #[test]
    fn test_click_routed_with_local_coordinates() {
        let state = BarState::detached(BarConfig::default());
        let log = Rc::new(RefCell::new(Vec::new()));
        let probe = Probe { log: log.clone() };
        let mut r = BarRenderer::new(window(Vec::new(), Vec::new(), vec![Box::new(probe)]), 10, 1);
        r.render_frame(&state).unwrap();

        let click = WidgetEvent::Click {
            button: BUTTON_LEFT,
            x: 7,
            y: 0,
        };
        r.process_input(7, 0, click, &state);
        r.process_input(0, 0, WidgetEvent::Motion { x: 0, y: 0 }, &state);

        let events = log.borrow();
        assert_eq!(events[0], WidgetEvent::Enter);
        assert_eq!(
            events[1],
            WidgetEvent::Click {
                button: BUTTON_LEFT,
                x: 1,
                y: 0
            }
        );
        assert_eq!(events[2], WidgetEvent::Leave);
        assert_eq!(events.len(), 3);
    }

    #[test]
    fn test_hypr_events_reach_widgets() {
        let state = BarState::detached(BarConfig::default());
        let mut r = BarRenderer::new(window(Vec::new(), Vec::new(), Vec::new()), 4, 1);
        assert!(!r.dispatch_hypr(&HyprEvent::Workspace { name: "1".into() }, &state));
        assert_eq!(r.window().name, "stbar");
    }
}
