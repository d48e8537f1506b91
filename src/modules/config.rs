use crate::config::BarConfig;
use crate::modules::logging::{log_debug, log_error, log_warn};
use anyhow::{Context, Result};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

pub const APP_DIR: &str = "selvedge";
pub const CONFIG_FILE: &str = "config.toml";

/// `$XDG_CONFIG_HOME/selvedge/config.toml`, or `./config.toml` when no
/// config directory is known.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
        .unwrap_or_else(|| PathBuf::from(CONFIG_FILE))
}

pub fn config_path(explicit: Option<&Path>) -> PathBuf {
    explicit
        .map(Path::to_path_buf)
        .unwrap_or_else(default_config_path)
}

/// Strict load: a missing file gives the defaults, anything unreadable or
/// invalid is an error.
pub fn try_load_bar_config(path: &Path) -> Result<BarConfig> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            log_debug("CONFIG", &format!("No config at {:?}, using defaults", path));
            return Ok(BarConfig::default());
        }
        Err(e) => return Err(e).with_context(|| format!("Failed to read {:?}", path)),
    };
    toml::from_str(&content).with_context(|| format!("Invalid config {:?}", path))
}

/// Lenient variant for the running bar: a broken config is logged and the
/// defaults are used so the bar still comes up.
pub fn or_defaults(loaded: Result<BarConfig>) -> BarConfig {
    match loaded {
        Ok(config) => config,
        Err(e) => {
            log_error("CONFIG", &format!("{:#}", e));
            log_warn("CONFIG", "Falling back to the default config");
            BarConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = try_load_bar_config(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(cfg.bar.name, "stbar");
    }

    #[test]
    fn test_invalid_file_strict_vs_lenient() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[window]\nheight = \"tall\"").unwrap();
        assert!(try_load_bar_config(&path).is_err());
        assert_eq!(or_defaults(try_load_bar_config(&path)).window.height, 30);
    }

    #[test]
    fn test_explicit_path_wins() {
        let explicit = Path::new("/etc/bar.toml");
        assert_eq!(config_path(Some(explicit)), explicit);
        assert!(config_path(None).ends_with(CONFIG_FILE));
    }
}
