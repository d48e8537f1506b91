pub mod blitter;
pub mod handlers;
pub mod state;
pub mod text;

use crate::config::WindowConfig;
use crate::layout::{BarWindow, Edge, Exclusivity, Layer as BarLayer};
use crate::modules::logging::{log_debug, log_info};
use anyhow::{Context, Result};
use smithay_client_toolkit::{
    compositor::CompositorState,
    output::OutputState,
    reexports::client::{Connection, EventQueue, globals::registry_queue_init},
    registry::RegistryState,
    seat::SeatState,
    shell::WaylandSurface,
    shell::wlr_layer::{Anchor, Layer, LayerShell, LayerSurface},
    shm::{Shm, slot::SlotPool},
};
use state::WaylandState;
use text::TextRenderer;

pub struct WaylandBar {
    pub connection: Connection,
    pub state: WaylandState,
    pub event_queue: EventQueue<WaylandState>,
    pub layer_surface: LayerSurface,
}

pub fn anchor_bits(edges: &[Edge]) -> Anchor {
    edges.iter().fold(Anchor::empty(), |acc, edge| {
        acc | match edge {
            Edge::Top => Anchor::TOP,
            Edge::Right => Anchor::RIGHT,
            Edge::Bottom => Anchor::BOTTOM,
            Edge::Left => Anchor::LEFT,
        }
    })
}

/// Requested surface size. A zero width lets the compositor stretch the bar
/// between its left and right anchors.
pub fn surface_size(window: &BarWindow, config: &WindowConfig) -> (u32, u32) {
    let stretched = window.is_anchored(Edge::Left) && window.is_anchored(Edge::Right);
    let width = if stretched { 0 } else { config.width };
    (width, config.height)
}

/// Space reserved along the anchored edge so maximized windows stay clear.
pub fn exclusive_zone(window: &BarWindow, height: u32) -> i32 {
    if window.exclusivity == Exclusivity::None {
        return 0;
    }
    let spans_width = window.is_anchored(Edge::Left) && window.is_anchored(Edge::Right);
    let top = window.is_anchored(Edge::Top);
    let bottom = window.is_anchored(Edge::Bottom);
    if spans_width && top != bottom {
        i32::try_from(height).unwrap_or(i32::MAX)
    } else {
        0
    }
}

fn shell_layer(layer: BarLayer) -> Layer {
    match layer {
        BarLayer::Background => Layer::Background,
        BarLayer::Bottom => Layer::Bottom,
        BarLayer::Top => Layer::Top,
        BarLayer::Overlay => Layer::Overlay,
    }
}

/// Connects to the compositor and maps `window` as a layer-shell surface.
pub fn init(window: &BarWindow, config: &WindowConfig) -> Result<WaylandBar> {
    let connection = Connection::connect_to_env().context("Failed to connect to Wayland")?;

    let (globals, mut event_queue) = registry_queue_init::<WaylandState>(&connection)
        .context("Failed to init registry queue")?;
    let qh = event_queue.handle();

    let registry_state = RegistryState::new(&globals);
    let compositor_state =
        CompositorState::bind(&globals, &qh).context("Failed to bind compositor")?;
    let layer_shell = LayerShell::bind(&globals, &qh).context("Failed to bind layer shell")?;
    let shm = Shm::bind(&globals, &qh).context("Failed to bind shm")?;
    let output_state = OutputState::new(&globals, &qh);
    let seat_state = SeatState::new(&globals, &qh);

    let pool = SlotPool::new(1920 * 1080 * 4, &shm).context("Failed to create Shm pool")?;

    let font_size = config.font_size();
    let text_renderer = TextRenderer::new(config.font.as_deref(), font_size)
        .context("Failed to initialize text renderer")?;

    let mut state = WaylandState {
        registry_state,
        seat_state,
        output_state,
        compositor_state,
        shm,
        layer_shell,
        pool,
        redraw_requested: true,
        exit: false,
        surface: None,
        configured: false,
        width: 0,
        height: 0,
        text_renderer,
        cursor_x: 0.0,
        cursor_y: 0.0,
        input_events: Vec::new(),
    };

    event_queue
        .roundtrip(&mut state)
        .context("Failed initial roundtrip")?;

    let output = config.monitor().and_then(|name| {
        state.output_state.outputs().find(|o| {
            state
                .output_state
                .info(o)
                .is_some_and(|info| info.name.as_deref() == Some(name))
        })
    });
    if let (Some(name), None) = (config.monitor(), &output) {
        log_info(
            "WAYLAND",
            &format!("Monitor '{}' not found, letting the compositor choose", name),
        );
    }

    let surface = state.compositor_state.create_surface(&qh);
    let layer_surface = state.layer_shell.create_layer_surface(
        &qh,
        surface.clone(),
        shell_layer(window.layer),
        Some(window.name.clone()),
        output.as_ref(),
    );

    let (width, height) = surface_size(window, config);
    let margins = window.margins;
    layer_surface.set_anchor(anchor_bits(&window.anchor));
    layer_surface.set_size(width, height);
    layer_surface.set_margin(margins.top, margins.right, margins.bottom, margins.left);
    layer_surface.set_exclusive_zone(exclusive_zone(window, height));
    layer_surface.commit();

    log_debug(
        "WAYLAND",
        &format!(
            "Layer surface '{}' anchored [{}], size {}x{}, margin {}",
            window.name,
            window.anchor_string(),
            width,
            height,
            margins.to_css()
        ),
    );

    state.surface = Some(surface);

    Ok(WaylandBar {
        connection,
        state,
        event_queue,
        layer_surface,
    })
}
