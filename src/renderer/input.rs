use super::BarRenderer;
use crate::event::{WidgetEvent, button_label};
use crate::modules::logging::*;
use crate::state::BarState;

impl BarRenderer {
    /// Routes a pointer event at bar cell `(x, y)` to the widget under it,
    /// synthesizing `Enter`/`Leave` as the hovered widget changes.
    pub fn process_input(&mut self, x: u16, y: u16, event: WidgetEvent, state: &BarState) {
        match &event {
            WidgetEvent::Enter => log_debug("INPUT", "Pointer entered bar"),
            WidgetEvent::Leave => log_debug("INPUT", "Pointer left bar"),
            _ => {}
        }

        if let WidgetEvent::Leave = event {
            self.leave_hovered(state);
            return;
        }

        let hit = self
            .hit_map
            .iter()
            .find(|hit| hit.contains(x, y))
            .map(|hit| (hit.section, hit.index, hit.area));

        let Some((section, idx, area)) = hit else {
            self.leave_hovered(state);
            return;
        };

        if self.hovered != Some((section, idx)) {
            self.leave_hovered(state);
            if let Some(widget) = self.widget_mut(section, idx) {
                log_debug("WIDGET", &format!("Enter: {}", widget.name()));
                widget.handle_event(WidgetEvent::Enter, state);
            }
            self.hovered = Some((section, idx));
        }
        if event == WidgetEvent::Enter {
            return;
        }

        let local_event = event.relative_to(area);
        let Some(widget) = self.widget_mut(section, idx) else {
            return;
        };
        match &local_event {
            WidgetEvent::Click { button, .. } => {
                log_info(
                    "INPUT",
                    &format!("Click {} on {}", button_label(*button), widget.name()),
                );
            }
            WidgetEvent::Scroll { dy, .. } => {
                log_debug("INPUT", &format!("Scroll {} on {}", dy, widget.name()));
            }
            _ => {}
        }
        widget.handle_event(local_event, state);
    }

    fn leave_hovered(&mut self, state: &BarState) {
        if let Some((section, idx)) = self.hovered.take() {
            if let Some(widget) = self.widget_mut(section, idx) {
                log_debug("WIDGET", &format!("Leave: {}", widget.name()));
                widget.handle_event(WidgetEvent::Leave, state);
            }
        }
    }
}
