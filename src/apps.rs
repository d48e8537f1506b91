//! Installed applications, read from freedesktop `.desktop` files.

use crate::modules::logging::{log_debug, log_warn};
use std::collections::HashSet;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppInfo {
    /// Desktop file name without the `.desktop` suffix.
    pub id: String,
    pub name: String,
    pub icon: Option<String>,
    pub wm_class: Option<String>,
}

/// Loaded once at startup and shared read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct DesktopApps {
    apps: Arc<Vec<AppInfo>>,
}

impl DesktopApps {
    pub fn load() -> Self {
        let apps = Self::from_dirs(&application_dirs());
        log_debug("APPS", &format!("Loaded {} desktop entries", apps.len()));
        apps
    }

    /// Scans `dirs` in order. The first entry seen for an id wins.
    pub fn from_dirs(dirs: &[PathBuf]) -> Self {
        let mut seen = HashSet::new();
        let mut apps = Vec::new();
        for dir in dirs {
            let Ok(entries) = fs::read_dir(dir) else {
                continue;
            };
            let mut paths: Vec<PathBuf> = entries.flatten().map(|e| e.path()).collect();
            paths.sort();
            for path in paths {
                if path.extension().is_none_or(|ext| ext != "desktop") {
                    continue;
                }
                match parse_desktop_file(&path) {
                    Some(app) if seen.insert(app.id.clone()) => apps.push(app),
                    Some(_) => {}
                    None => log_debug("APPS", &format!("Skipping {:?}", path)),
                }
            }
        }
        Self {
            apps: Arc::new(apps),
        }
    }

    pub fn len(&self) -> usize {
        self.apps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.apps.is_empty()
    }

    /// Matches a window class: exact desktop id, then `StartupWMClass`,
    /// then a case-insensitive id.
    pub fn find(&self, class: &str) -> Option<&AppInfo> {
        if class.is_empty() {
            return None;
        }
        self.apps
            .iter()
            .find(|a| a.id == class)
            .or_else(|| {
                self.apps
                    .iter()
                    .find(|a| a.wm_class.as_deref() == Some(class))
            })
            .or_else(|| self.apps.iter().find(|a| a.id.eq_ignore_ascii_case(class)))
    }
}

fn application_dirs() -> Vec<PathBuf> {
    let mut dirs = Vec::new();
    if let Some(data_home) = dirs::data_dir() {
        dirs.push(data_home.join("applications"));
    }
    let data_dirs =
        env::var("XDG_DATA_DIRS").unwrap_or_else(|_| "/usr/local/share:/usr/share".to_string());
    dirs.extend(
        data_dirs
            .split(':')
            .filter(|d| !d.is_empty())
            .map(|d| PathBuf::from(d).join("applications")),
    );
    dirs
}

fn parse_desktop_file(path: &Path) -> Option<AppInfo> {
    let id = path.file_stem()?.to_str()?.to_string();
    let content = match fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            log_warn("APPS", &format!("Failed to read {:?}: {}", path, e));
            return None;
        }
    };
    parse_desktop_entry(id, &content)
}

/// Reads the `[Desktop Entry]` group. Hidden entries are dropped.
pub fn parse_desktop_entry(id: String, content: &str) -> Option<AppInfo> {
    let mut in_entry = false;
    let mut name = None;
    let mut icon = None;
    let mut wm_class = None;

    for line in content.lines().map(str::trim) {
        if line.starts_with('[') {
            in_entry = line == "[Desktop Entry]";
            continue;
        }
        if !in_entry || line.starts_with('#') {
            continue;
        }
        let Some((key, value)) = line.split_once('=') else {
            continue;
        };
        let value = value.trim().to_string();
        match key.trim() {
            "Name" => name = Some(value),
            "Icon" => icon = Some(value),
            "StartupWMClass" => wm_class = Some(value),
            "Hidden" if value == "true" => return None,
            _ => {}
        }
    }

    Some(AppInfo {
        id,
        name: name?,
        icon: icon.filter(|i| !i.is_empty()),
        wm_class,
    })
}
