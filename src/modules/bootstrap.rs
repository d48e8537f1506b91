use anyhow::{Context, Result};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::signal::unix::{SignalKind, signal};

use crate::config::BarConfig;
use crate::layout::{BarWindow, assemble};
use crate::modules::logging::{log_error, log_info};
use crate::registry::{Catalog, WidgetRegistry};
use crate::renderer::BarRenderer;
use crate::state::BarState;

/// Builds the bar described by `config` against the built-in catalog.
pub fn build_window(config: &BarConfig) -> Result<BarWindow> {
    let catalog = Catalog::builtin();
    let mut registry = WidgetRegistry::new();
    assemble(&config.bar, &catalog, &mut registry, &config.widget)
        .context("Failed to assemble the bar layout")
}

/// Spawns the SIGINT/SIGTERM listener. The returned flag flips once a
/// signal arrives; the event loops poll it.
pub fn spawn_signal_handler() -> Result<Arc<AtomicBool>> {
    let mut term = signal(SignalKind::terminate()).context("Failed to listen for SIGTERM")?;
    let mut int = signal(SignalKind::interrupt()).context("Failed to listen for SIGINT")?;
    let shutdown = Arc::new(AtomicBool::new(false));
    let flag = shutdown.clone();

    tokio::spawn(async move {
        tokio::select! {
            _ = term.recv() => log_info("BAR", "Received SIGTERM, shutting down..."),
            _ = int.recv() => log_info("BAR", "Received SIGINT, shutting down..."),
        }
        flag.store(true, Ordering::SeqCst);
    });
    Ok(shutdown)
}

/// State, assembled widgets and renderer, with every widget mounted.
pub fn init_application(config: BarConfig, width: u16, height: u16) -> Result<(BarState, BarRenderer)> {
    let window = build_window(&config).inspect_err(|e| log_error("BAR", &format!("{:#}", e)))?;
    let state = BarState::new(config);
    let mut renderer = BarRenderer::new(window, width, height);
    renderer.mount(&state);
    Ok((state, renderer))
}
