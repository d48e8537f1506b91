use crate::apps::DesktopApps;
use crate::config::BarConfig;
use crate::hyprland::HyprCtl;
use crate::modules::logging::log_warn;
use crate::ui::Theme;

/// Read-mostly context shared by every widget during render and event handling.
#[derive(Debug, Clone)]
pub struct BarState {
    pub config: BarConfig,
    pub theme: Theme,
    pub apps: DesktopApps,
    /// Absent when the bar runs outside a Hyprland session.
    pub hypr: Option<HyprCtl>,
}

impl BarState {
    pub fn new(config: BarConfig) -> Self {
        let hypr = match HyprCtl::from_env() {
            Ok(ctl) => Some(ctl),
            Err(e) => {
                log_warn("HYPR", &format!("Compositor IPC unavailable: {}", e));
                None
            }
        };
        Self {
            theme: Theme::from_config(&config.style),
            apps: DesktopApps::load(),
            config,
            hypr,
        }
    }

    /// No compositor, no installed applications.
    pub fn detached(config: BarConfig) -> Self {
        Self {
            theme: Theme::from_config(&config.style),
            apps: DesktopApps::default(),
            config,
            hypr: None,
        }
    }
}
