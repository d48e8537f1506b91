use crate::event::WidgetEvent;
use crate::ui::Theme;
use crate::wayland::blitter::{Canvas, blit_buffer_to_pixels};
use crate::wayland::text::TextRenderer;
use anyhow::Context;
use ratatui::buffer::Buffer;
use smithay_client_toolkit::reexports::client::protocol::wl_shm;
use smithay_client_toolkit::{
    compositor::CompositorState,
    output::OutputState,
    reexports::client::protocol::wl_surface::WlSurface,
    registry::RegistryState,
    seat::SeatState,
    shell::wlr_layer::LayerShell,
    shm::{Shm, slot::SlotPool},
};

/// Pointer input in surface pixels, converted to cells by the runner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerInput {
    Enter { x: f64, y: f64 },
    Leave,
    Motion { x: f64, y: f64 },
    Press { button: u32, x: f64, y: f64 },
    Scroll { dx: f64, dy: f64 },
}

pub struct WaylandState {
    pub registry_state: RegistryState,
    pub seat_state: SeatState,
    pub output_state: OutputState,
    pub compositor_state: CompositorState,
    pub shm: Shm,
    pub layer_shell: LayerShell,

    pub pool: SlotPool,
    pub redraw_requested: bool,

    pub exit: bool,
    pub surface: Option<WlSurface>,
    pub configured: bool,
    pub width: u32,
    pub height: u32,

    pub text_renderer: TextRenderer,
    pub cursor_x: f64,
    pub cursor_y: f64,
    pub input_events: Vec<PointerInput>,
}

impl WaylandState {
    pub fn draw(&mut self, buffer: &Buffer, theme: &Theme) -> anyhow::Result<()> {
        let (width, height) = (self.width, self.height);
        if width == 0 || height == 0 {
            return Ok(());
        }

        let (wl_buffer, pixels) = self
            .pool
            .create_buffer(
                width as i32,
                height as i32,
                width as i32 * 4,
                wl_shm::Format::Argb8888,
            )
            .context("Failed to create buffer")?;

        let mut canvas = Canvas::new(pixels, width, height);
        blit_buffer_to_pixels(buffer, &mut canvas, &mut self.text_renderer, theme);

        if let Some(surface) = &self.surface {
            surface.attach(Some(wl_buffer.wl_buffer()), 0, 0);
            surface.damage_buffer(0, 0, width as i32, height as i32);
            surface.commit();
        }

        self.redraw_requested = false;
        Ok(())
    }

    /// Converts queued pointer input to cell events, each paired with the
    /// cell it happened over.
    pub fn take_cell_events(&mut self, rows: u16) -> Vec<(u16, u16, WidgetEvent)> {
        let inputs: Vec<PointerInput> = self.input_events.drain(..).collect();
        let mut out = Vec::with_capacity(inputs.len());
        for input in inputs {
            let (px, py) = match input {
                PointerInput::Enter { x, y }
                | PointerInput::Motion { x, y }
                | PointerInput::Press { x, y, .. } => (x, y),
                PointerInput::Leave | PointerInput::Scroll { .. } => (self.cursor_x, self.cursor_y),
            };
            let (cx, cy) = self.text_renderer.cell_at(px, py, self.height, rows);
            let event = match input {
                PointerInput::Enter { .. } => WidgetEvent::Enter,
                PointerInput::Leave => WidgetEvent::Leave,
                PointerInput::Motion { .. } => WidgetEvent::Motion { x: cx, y: cy },
                PointerInput::Press { button, .. } => WidgetEvent::Click {
                    button,
                    x: cx,
                    y: cy,
                },
                PointerInput::Scroll { dx, dy } => WidgetEvent::Scroll { dx, dy },
            };
            out.push((cx, cy, event));
        }
        out
    }
}
