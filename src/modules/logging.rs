use crate::modules::cli::Commands;
use anyhow::Context;
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

const PREVIEW_LOG: &str = "preview.log";

/// Where formatted log lines go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogSink {
    Stderr,
    /// Appends to a file. Used while the terminal preview owns the screen.
    File(PathBuf),
}

impl LogSink {
    pub fn for_command(command: Commands) -> Self {
        match command {
            Commands::Preview => LogSink::File(preview_log_path()),
            _ => LogSink::Stderr,
        }
    }
}

/// `$XDG_STATE_HOME/selvedge/preview.log`, or the cache dir where there is no
/// state dir.
pub fn preview_log_path() -> PathBuf {
    dirs::state_dir()
        .or_else(dirs::cache_dir)
        .unwrap_or_else(std::env::temp_dir)
        .join(crate::modules::config::APP_DIR)
        .join(PREVIEW_LOG)
}

fn open_log_file(path: &Path) -> anyhow::Result<fs::File> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create log directory {:?}", parent))?;
    }
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file {:?}", path))
}

fn make_writer(sink: &LogSink) -> anyhow::Result<BoxMakeWriter> {
    Ok(match sink {
        LogSink::Stderr => BoxMakeWriter::new(std::io::stderr),
        LogSink::File(path) => BoxMakeWriter::new(Mutex::new(open_log_file(path)?)),
    })
}

/// Scoped log helpers. The scope shows up as a structured `scope` field so a
/// filter like `RUST_LOG=selvedge=debug` still applies.
pub fn log_info(scope: &str, msg: &str) {
    tracing::info!(scope = scope, "{}", msg);
}

pub fn log_debug(scope: &str, msg: &str) {
    tracing::debug!(scope = scope, "{}", msg);
}

pub fn log_warn(scope: &str, msg: &str) {
    tracing::warn!(scope = scope, "{}", msg);
}

pub fn log_error(scope: &str, msg: &str) {
    tracing::error!(scope = scope, "{}", msg);
}

/// Builds the filter: `RUST_LOG` wins, then the debug filter or the plain level.
pub fn build_filter(enable_debug: bool, config_level: &str, config_filter: &str) -> EnvFilter {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return filter;
    }
    EnvFilter::builder()
        .with_default_directive(tracing::Level::INFO.into())
        .parse_lossy(if enable_debug {
            config_filter
        } else {
            config_level
        })
}

pub fn init_logging(
    sink: &LogSink,
    enable_debug: bool,
    config_level: &str,
    config_filter: &str,
) -> anyhow::Result<()> {
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(make_writer(sink)?)
        .with_ansi(*sink == LogSink::Stderr)
        .with_target(enable_debug);

    tracing_subscriber::registry()
        .with(build_filter(enable_debug, config_level, config_filter))
        .with(fmt_layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to install log subscriber: {}", e))?;

    log_debug(
        "LOG",
        &format!(
            "Logging initialized (debug: {}, level: {})",
            enable_debug,
            if enable_debug { config_filter } else { config_level }
        ),
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tracing_subscriber::fmt::MakeWriter;

    #[test]
    fn test_preview_logs_away_from_the_terminal() {
        assert_eq!(LogSink::for_command(Commands::Run), LogSink::Stderr);
        assert_eq!(LogSink::for_command(Commands::Check), LogSink::Stderr);
        match LogSink::for_command(Commands::Preview) {
            LogSink::File(path) => assert!(path.ends_with("selvedge/preview.log")),
            LogSink::Stderr => panic!("preview must not log to the terminal"),
        }
    }

    #[test]
    fn test_file_sink_creates_and_appends() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("preview.log");
        let sink = LogSink::File(path.clone());

        let writer = make_writer(&sink).unwrap();
        writer.make_writer().write_all(b"first\n").unwrap();
        let writer = make_writer(&sink).unwrap();
        writer.make_writer().write_all(b"second\n").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "first\nsecond\n");
    }
}
