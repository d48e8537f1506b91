//! Terminal preview of the bar, for trying layouts without a Wayland session.

pub mod event;
pub mod ui;

use crate::hyprland::HyprEvent;
use crate::modules::logging::log_debug;
use crate::renderer::BarRenderer;
use crate::state::BarState;
use anyhow::Result;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use event::AppSignal;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedReceiver;

pub fn run_preview(
    mut renderer: BarRenderer,
    state: &BarState,
    mut hypr_events: Option<UnboundedReceiver<HyprEvent>>,
) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut renderer, state, &mut hypr_events);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    res
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    renderer: &mut BarRenderer,
    state: &BarState,
    hypr_events: &mut Option<UnboundedReceiver<HyprEvent>>,
) -> Result<()> {
    let mut dirty = true;
    loop {
        if let Some(rx) = hypr_events {
            while let Ok(ev) = rx.try_recv() {
                dirty |= renderer.dispatch_hypr(&ev, state);
            }
        }

        if dirty {
            terminal.draw(|f| ui::draw(f, renderer, state))?;
            dirty = false;
        }

        if !crossterm::event::poll(Duration::from_millis(50))? {
            continue;
        }
        match event::translate(crossterm::event::read()?) {
            AppSignal::Quit => {
                log_debug("PREVIEW", "Quit requested");
                return Ok(());
            }
            AppSignal::Pointer(x, y, ev) => {
                renderer.process_input(x, y, ev, state);
                dirty = true;
            }
            AppSignal::Redraw => dirty = true,
            AppSignal::Continue => {}
        }
    }
}
