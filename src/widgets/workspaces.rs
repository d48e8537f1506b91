use crate::error::{BuildError, IpcError};
use crate::event::{BUTTON_LEFT, WidgetEvent};
use crate::hyprland::types::{Monitor, Workspace};
use crate::hyprland::{HyprCtl, HyprEvent};
use crate::modules::logging::{log_debug, log_error, log_warn};
use crate::state::BarState;
use crate::ui::{draw_text, text_width};
use crate::widget::{Widget, WidgetArgs};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;

const SPECIAL_PREFIX: &str = "special:";

pub fn is_special(id: i32) -> bool {
    id < 0
}

/// A special workspace is active while any monitor is showing it.
pub fn special_active_in(monitors: &[Monitor], id: i32) -> bool {
    is_special(id) && monitors.iter().any(|m| m.special_workspace.id == id)
}

pub fn button_classes(id: i32, active: bool) -> Vec<String> {
    let mut classes = vec!["workspace".to_string()];
    if is_special(id) {
        classes.push("special-workspace".to_string());
    }
    if active {
        classes.push("active".to_string());
    }
    classes
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkspaceButton {
    pub id: i32,
    pub name: String,
    pub active: bool,
    pub classes: Vec<String>,
}

impl WorkspaceButton {
    fn new(ws: &Workspace, active: bool) -> Self {
        Self {
            id: ws.id,
            name: ws.name.clone(),
            active,
            classes: button_classes(ws.id, active),
        }
    }

    pub fn label(&self) -> String {
        let name = if is_special(self.id) {
            let short = self.name.strip_prefix(SPECIAL_PREFIX).unwrap_or(&self.name);
            if short.is_empty() { "S" } else { short }
        } else {
            self.name.as_str()
        };
        format!(" {} ", name)
    }

    /// The dispatch that focuses this workspace.
    pub fn dispatch(&self) -> String {
        if is_special(self.id) {
            let name = self.name.strip_prefix(SPECIAL_PREFIX).unwrap_or(&self.name);
            format!("togglespecialworkspace {}", name)
        } else {
            format!("workspace {}", self.id)
        }
    }
}

/// Compositor state a refresh works from.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub workspaces: Vec<Workspace>,
    pub active_id: i32,
    pub monitors: Vec<Monitor>,
}

impl Snapshot {
    pub fn query(hypr: &HyprCtl) -> Result<Self, IpcError> {
        Ok(Self {
            workspaces: hypr.workspaces()?,
            active_id: hypr.active_workspace()?.id,
            monitors: hypr.monitors()?,
        })
    }
}

/// One button per workspace, sorted by id.
pub struct Workspaces {
    spacing: u16,
    buttons: Vec<WorkspaceButton>,
    /// Button x-offsets from the last render, relative to the widget.
    spans: Vec<(u16, u16)>,
    classes: Vec<String>,
}

impl Workspaces {
    pub fn new(spacing: u16) -> Self {
        Self {
            spacing,
            buttons: Vec::new(),
            spans: Vec::new(),
            classes: vec!["workspaces".to_string()],
        }
    }

    pub fn buttons(&self) -> &[WorkspaceButton] {
        &self.buttons
    }

    pub fn apply(&mut self, mut snapshot: Snapshot) {
        snapshot.workspaces.sort_by_key(|ws| ws.id);
        self.buttons = snapshot
            .workspaces
            .iter()
            .map(|ws| {
                let active = if is_special(ws.id) {
                    special_active_in(&snapshot.monitors, ws.id)
                } else {
                    ws.id == snapshot.active_id
                };
                WorkspaceButton::new(ws, active)
            })
            .collect();
        self.layout_spans();
    }

    fn refresh(&mut self, state: &BarState) {
        let Some(hypr) = &state.hypr else {
            return;
        };
        match Snapshot::query(hypr) {
            Ok(snapshot) => self.apply(snapshot),
            Err(e) => log_warn("WORKSPACES", &format!("Refresh failed: {}", e)),
        }
    }

    fn layout_spans(&mut self) {
        let mut x = 0u16;
        self.spans = self
            .buttons
            .iter()
            .map(|b| {
                let w = text_width(&b.label());
                let span = (x, w);
                x = x.saturating_add(w).saturating_add(self.spacing);
                span
            })
            .collect();
    }

    /// Button under a widget-relative column.
    pub fn button_at(&self, x: u16) -> Option<&WorkspaceButton> {
        self.spans
            .iter()
            .position(|&(start, w)| x >= start && x < start + w)
            .and_then(|i| self.buttons.get(i))
    }
}

impl Widget for Workspaces {
    fn name(&self) -> &str {
        "workspaces"
    }

    fn style_classes(&self) -> &[String] {
        &self.classes
    }

    fn width(&self, _state: &BarState) -> u16 {
        self.spans.last().map(|&(start, w)| start + w).unwrap_or(0)
    }

    fn render(&mut self, area: Rect, buf: &mut Buffer, state: &BarState) {
        for (button, &(start, w)) in self.buttons.iter().zip(&self.spans) {
            if start >= area.width {
                break;
            }
            let cell = Rect::new(area.x + start, area.y, w.min(area.width - start), area.height);
            draw_text(buf, cell, &button.label(), state.theme.style_for(&button.classes));
        }
    }

    fn mount(&mut self, state: &BarState) {
        self.refresh(state);
    }

    fn handle_event(&mut self, event: WidgetEvent, state: &BarState) {
        let WidgetEvent::Click { button, x, .. } = event else {
            return;
        };
        if button != BUTTON_LEFT {
            return;
        }
        let Some(target) = self.button_at(x) else {
            return;
        };
        let command = target.dispatch();
        log_debug("WORKSPACES", &format!("Dispatching '{}'", command));
        if let Some(hypr) = &state.hypr {
            if let Err(e) = hypr.dispatch(&command) {
                log_error("WORKSPACES", &format!("dispatch '{}' failed: {}", command, e));
            }
        }
    }

    fn handle_hypr_event(&mut self, event: &HyprEvent, state: &BarState) -> bool {
        if !event.touches_workspaces() {
            return false;
        }
        self.refresh(state);
        true
    }
}

/// `workspaces(spacing = 1)`
pub fn main(args: &WidgetArgs<'_>) -> Result<Box<dyn Widget>, BuildError> {
    args.expect_only(&["spacing"])?;
    let spacing = args.int_or("spacing", 1)?;
    let spacing = u16::try_from(spacing).map_err(|_| BuildError::InvalidArgument {
        reference: args.reference().to_string(),
        key: "spacing".to_string(),
        expected: "a non-negative integer",
    })?;
    Ok(Box::new(Workspaces::new(spacing)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BarConfig;
    use crate::hyprland::types::WorkspaceRef;

    fn ws(id: i32, name: &str) -> Workspace {
        Workspace {
            id,
            name: name.to_string(),
            monitor: "DP-1".to_string(),
            windows: 1,
        }
    }

    fn monitor(special: i32) -> Monitor {
        Monitor {
            id: 0,
            name: "DP-1".to_string(),
            focused: true,
            active_workspace: WorkspaceRef {
                id: 1,
                name: "1".into(),
            },
            special_workspace: WorkspaceRef {
                id: special,
                name: String::new(),
            },
        }
    }

    #[test]
    fn test_special_ids() {
        assert!(is_special(-98));
        assert!(is_special(-1));
        assert!(!is_special(0));
        assert!(!is_special(3));
    }

    #[test]
    fn test_non_negative_never_special_active() {
        // A monitor claiming a non-negative special id must not matter.
        let monitors = vec![monitor(3)];
        assert!(!special_active_in(&monitors, 3));
        assert_eq!(button_classes(3, false), vec!["workspace"]);

        let monitors = vec![monitor(0), monitor(-98)];
        assert!(special_active_in(&monitors, -98));
        assert!(!special_active_in(&monitors, -99));
    }

    #[test]
    fn test_apply_sorts_and_marks_active() {
        let mut w = Workspaces::new(1);
        w.apply(Snapshot {
            workspaces: vec![ws(3, "3"), ws(-98, "special:magic"), ws(1, "1")],
            active_id: 3,
            monitors: vec![monitor(-98)],
        });
        let ids: Vec<i32> = w.buttons().iter().map(|b| b.id).collect();
        assert_eq!(ids, vec![-98, 1, 3]);
        assert!(w.buttons()[0].active);
        assert_eq!(
            w.buttons()[0].classes,
            vec!["workspace", "special-workspace", "active"]
        );
        assert!(!w.buttons()[1].active);
        assert!(w.buttons()[2].active);
    }

    #[test]
    fn test_labels_and_dispatch() {
        let special = WorkspaceButton::new(&ws(-98, "special:magic"), false);
        assert_eq!(special.label(), " magic ");
        assert_eq!(special.dispatch(), "togglespecialworkspace magic");

        let bare = WorkspaceButton::new(&ws(-99, "special:"), false);
        assert_eq!(bare.label(), " S ");

        let normal = WorkspaceButton::new(&ws(2, "2"), true);
        assert_eq!(normal.label(), " 2 ");
        assert_eq!(normal.dispatch(), "workspace 2");
    }

    #[test]
    fn test_hit_testing_and_width() {
        let state = BarState::detached(BarConfig::default());
        let mut w = Workspaces::new(1);
        w.apply(Snapshot {
            workspaces: vec![ws(1, "1"), ws(2, "2")],
            active_id: 1,
            monitors: Vec::new(),
        });
        // " 1 " + gap + " 2 "
        assert_eq!(w.width(&state), 7);
        assert_eq!(w.button_at(1).map(|b| b.id), Some(1));
        assert_eq!(w.button_at(3), None);
        assert_eq!(w.button_at(5).map(|b| b.id), Some(2));
    }

    #[test]
    fn test_only_workspace_events_refresh() {
        let state = BarState::detached(BarConfig::default());
        let mut w = Workspaces::new(1);
        assert!(w.handle_hypr_event(&HyprEvent::Workspace { name: "2".into() }, &state));
        assert!(!w.handle_hypr_event(
            &HyprEvent::CloseWindow {
                address: "0x1".into()
            },
            &state
        ));
    }

    #[test]
    fn test_negative_spacing_rejected() {
        let t: toml::Table = "spacing = -2".parse().unwrap();
        assert!(matches!(
            main(&WidgetArgs::new("workspaces", Some(&t))),
            Err(BuildError::InvalidArgument { .. })
        ));
    }
}
