use super::common::{DEFAULT_TITLE_LENGTH, ELLIPSIS, PLACEHOLDER_TITLE, truncate_title};
use crate::apps::DesktopApps;
use crate::error::BuildError;
use crate::hyprland::HyprEvent;
use crate::modules::logging::{log_debug, log_warn};
use crate::state::BarState;
use crate::ui::{Image, Label};
use crate::widget::{Widget, WidgetArgs};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;

pub const DESKTOP_ICON: &str = "user-desktop";
pub const FALLBACK_ICON: &str = "application-x-executable";

/// Icon of the focused window's application.
pub fn icon_for(apps: &DesktopApps, class: &str) -> String {
    if class.is_empty() || class == "unknown" {
        return DESKTOP_ICON.to_string();
    }
    apps.find(class)
        .and_then(|app| app.icon.clone())
        .unwrap_or_else(|| FALLBACK_ICON.to_string())
}

/// Application name when the class is installed, the raw title otherwise.
pub fn display_title(apps: &DesktopApps, class: &str, title: &str) -> String {
    if title.is_empty() {
        return PLACEHOLDER_TITLE.to_string();
    }
    let source = apps.find(class).map(|app| app.name.as_str()).unwrap_or(title);
    truncate_title(source, DEFAULT_TITLE_LENGTH, ELLIPSIS)
}

/// Focused window icon and title.
pub struct WindowTitle {
    icon: Option<Image>,
    title: Option<Label>,
    classes: Vec<String>,
}

impl WindowTitle {
    pub fn new(show_icon: bool, show_title: bool) -> Self {
        Self {
            icon: show_icon.then(|| Image::new("window-icon", DESKTOP_ICON)),
            title: show_title.then(|| Label::new("window-titlename", PLACEHOLDER_TITLE)),
            classes: vec!["window-title".to_string()],
        }
    }

    pub fn icon_name(&self) -> Option<&str> {
        self.icon.as_ref().map(Image::icon_name)
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_ref().map(Label::text)
    }

    fn focus(&mut self, apps: &DesktopApps, class: &str, title: &str) {
        if let Some(icon) = &mut self.icon {
            icon.set_from_icon_name(icon_for(apps, class));
        }
        if let Some(label) = &mut self.title {
            label.set_text(display_title(apps, class, title));
        }
    }

    /// Re-reads the focused window from the control socket.
    fn sync(&mut self, state: &BarState) {
        let Some(hypr) = &state.hypr else {
            return;
        };
        match hypr.active_window() {
            Ok(Some(win)) => self.focus(&state.apps, &win.class, &win.title),
            Ok(None) => self.focus(&state.apps, "", ""),
            Err(e) => log_warn("TITLE", &format!("Failed to query active window: {}", e)),
        }
    }

    fn gap(&self) -> u16 {
        match (&self.icon, &self.title) {
            (Some(icon), Some(_)) if !icon.icon_name().is_empty() => 1,
            _ => 0,
        }
    }
}

impl Widget for WindowTitle {
    fn name(&self) -> &str {
        "window-title"
    }

    fn style_classes(&self) -> &[String] {
        &self.classes
    }

    fn width(&self, state: &BarState) -> u16 {
        let icon = self.icon.as_ref().map(|i| i.width(state)).unwrap_or(0);
        let title = self.title.as_ref().map(|t| t.width(state)).unwrap_or(0);
        icon + self.gap() + title
    }

    fn render(&mut self, area: Rect, buf: &mut Buffer, state: &BarState) {
        let mut x = area.x;
        let gap = self.gap();
        if let Some(icon) = &mut self.icon {
            let w = icon.width(state);
            icon.render(Rect::new(x, area.y, w, area.height).intersection(area), buf, state);
            x += w + gap;
        }
        if let Some(label) = &mut self.title {
            let w = label.width(state);
            label.render(Rect::new(x, area.y, w, area.height).intersection(area), buf, state);
        }
    }

    fn mount(&mut self, state: &BarState) {
        self.sync(state);
    }

    fn handle_hypr_event(&mut self, event: &HyprEvent, state: &BarState) -> bool {
        match event {
            HyprEvent::ActiveWindow { class, title } => {
                log_debug("TITLE", &format!("Focus: {} ({})", class, title));
                self.focus(&state.apps, class, title);
                true
            }
            HyprEvent::CloseWindow { .. } => {
                self.sync(state);
                true
            }
            _ => false,
        }
    }
}

/// `window_title(icon = true, title = true)`
pub fn main(args: &WidgetArgs<'_>) -> Result<Box<dyn Widget>, BuildError> {
    args.expect_only(&["icon", "title"])?;
    Ok(Box::new(WindowTitle::new(
        args.bool_or("icon", true)?,
        args.bool_or("title", true)?,
    )))
}
