use anyhow::{Context, Result, anyhow};
use smithay_client_toolkit::reexports::calloop::EventLoop;
use smithay_client_toolkit::reexports::calloop_wayland_source::WaylandSource;
use std::sync::atomic::Ordering;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedReceiver;

use crate::config::BarConfig;
use crate::hyprland::{HyprEvent, events};
use crate::modules::bootstrap;
use crate::modules::logging::*;
use crate::renderer::BarRenderer;
use crate::state::BarState;
use crate::tui;
use crate::wayland::{self, state::WaylandState};

const FRAME: Duration = Duration::from_millis(16);

/// Subscribes to compositor events. Outside Hyprland the bar still runs,
/// it just never refreshes.
async fn subscribe(state: &BarState) -> Option<UnboundedReceiver<HyprEvent>> {
    state.hypr.as_ref()?;
    match events::spawn_listener().await {
        Ok(rx) => Some(rx),
        Err(e) => {
            log_warn("HYPR", &format!("Event socket unavailable: {}", e));
            None
        }
    }
}

fn drain_hypr_events(
    rx: &mut Option<UnboundedReceiver<HyprEvent>>,
    renderer: &mut BarRenderer,
    state: &BarState,
) -> bool {
    let Some(receiver) = rx else {
        return false;
    };
    let mut dirty = false;
    while let Ok(event) = receiver.try_recv() {
        log_debug("HYPR", &format!("{:?}", event));
        dirty |= renderer.dispatch_hypr(&event, state);
    }
    dirty
}

pub async fn run_server(config: BarConfig) -> Result<()> {
    log_debug("BAR", "Starting server initialization");
    let shutdown = bootstrap::spawn_signal_handler()?;

    let rows = 1;
    let (bar_state, mut renderer) = bootstrap::init_application(config, 0, rows)
        .context("Failed to bootstrap application")?;
    let mut hypr_rx = subscribe(&bar_state).await;

    let wayland::WaylandBar {
        connection,
        state: mut wayland_state,
        event_queue,
        layer_surface: _layer_surface,
    } = wayland::init(renderer.window(), &bar_state.config.window)
        .context("Failed to initialize Wayland")?;
    log_info("WAYLAND", "Wayland integration initialized");

    let mut event_loop: EventLoop<WaylandState> =
        EventLoop::try_new().context("Failed to create event loop")?;
    WaylandSource::new(connection, event_queue)
        .insert(event_loop.handle())
        .map_err(|e| anyhow!("Failed to insert Wayland source: {}", e.error))?;

    log_info("BAR", "Starting Wayland event loop");
    loop {
        event_loop
            .dispatch(FRAME, &mut wayland_state)
            .context("Wayland dispatch failed")?;

        if drain_hypr_events(&mut hypr_rx, &mut renderer, &bar_state) {
            wayland_state.redraw_requested = true;
        }
        if let Err(e) = handle_frame(&mut wayland_state, &mut renderer, &bar_state) {
            log_error("WAYLAND", &format!("Frame failed: {:#}", e));
            return Err(e);
        }

        if wayland_state.exit || shutdown.load(Ordering::SeqCst) {
            log_info("BAR", "Exiting...");
            break;
        }
    }

    log_debug("BAR", "Server shutdown complete");
    Ok(())
}

/// Resizes the cell grid to the configured surface, routes pointer input and
/// draws when anything changed.
fn handle_frame(
    wayland_state: &mut WaylandState,
    renderer: &mut BarRenderer,
    bar_state: &BarState,
) -> Result<()> {
    if !wayland_state.configured {
        return Ok(());
    }

    let (cols, rows) = wayland_state
        .text_renderer
        .grid_size(wayland_state.width, wayland_state.height);
    if renderer.width != cols || renderer.height != rows {
        log_debug(
            "WAYLAND",
            &format!(
                "Grid {}x{} cells for {}x{} px",
                cols, rows, wayland_state.width, wayland_state.height
            ),
        );
        renderer.resize(cols, rows);
        wayland_state.redraw_requested = true;
    }

    let inputs = wayland_state.take_cell_events(renderer.height);
    if !inputs.is_empty() {
        // Hit testing uses the last frame's layout, so draw before routing.
        if wayland_state.redraw_requested {
            renderer.render_frame(bar_state)?;
        }
        for (x, y, event) in inputs {
            renderer.process_input(x, y, event, bar_state);
        }
        wayland_state.redraw_requested = true;
    }

    if wayland_state.redraw_requested {
        renderer.render_frame(bar_state)?;
        wayland_state.draw(renderer.buffer(), &bar_state.theme)?;
    }
    Ok(())
}

/// Terminal preview. Uses the compositor for live data when reachable.
pub async fn run_preview(config: BarConfig) -> Result<()> {
    let (bar_state, renderer) =
        bootstrap::init_application(config, 0, 1).context("Failed to bootstrap application")?;
    let hypr_rx = subscribe(&bar_state).await;
    tui::run_preview(renderer, &bar_state, hypr_rx)
}
