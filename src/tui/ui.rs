use crate::renderer::BarRenderer;
use crate::state::BarState;
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

/// Bar on the first row, a key hint on the last.
pub fn draw(f: &mut Frame, renderer: &mut BarRenderer, state: &BarState) {
    let size = f.area();
    if size.height == 0 {
        return;
    }

    renderer.resize(size.width, 1);
    if let Err(e) = renderer.render_frame(state) {
        crate::modules::logging::log_error("PREVIEW", &format!("Render failed: {}", e));
        return;
    }
    f.buffer_mut().merge(renderer.buffer());

    if size.height > 2 {
        draw_footer(f, renderer, state, Rect::new(0, size.height - 1, size.width, 1));
    }
}

fn draw_footer(f: &mut Frame, renderer: &BarRenderer, state: &BarState, area: Rect) {
    let window = renderer.window();
    let hint = Line::from(vec![
        Span::styled(
            window.name.clone(),
            Style::default()
                .fg(state.theme.accent)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!(
            "  [{}]  {} sections  ",
            window.anchor_string(),
            window.child.populated()
        )),
        Span::styled("q/Esc quit", Style::default().add_modifier(Modifier::DIM)),
    ]);
    f.render_widget(Paragraph::new(hint).alignment(Alignment::Center), area);
}
