use super::BarRenderer;
use super::types::HitWidget;
use crate::layout::{Section, WidgetBox};
use crate::state::BarState;
use ratatui::prelude::*;

impl BarRenderer {
    pub(crate) fn render_section(
        buffer: &mut Buffer,
        area: Rect,
        part: &mut WidgetBox,
        hit_map: &mut Vec<HitWidget>,
        section: Section,
        state: &BarState,
    ) {
        if part.children.is_empty() || area.is_empty() {
            return;
        }
        let part_style = state.theme.style_for(&part.style_classes);
        if part_style.bg.is_some() {
            buffer.set_style(area, part_style);
        }

        let spacing = state.theme.spacing;
        let mut current_x = area.x;
        for (i, widget) in part.children.iter_mut().enumerate() {
            let w = widget.width(state);
            // Empty widgets take no room and no spacing.
            if w == 0 {
                continue;
            }
            let render_area = Rect::new(current_x, area.y, w, area.height);
            let intersection = render_area.intersection(area);
            if !intersection.is_empty() {
                widget.render(intersection, buffer, state);
                hit_map.push(HitWidget {
                    area: intersection,
                    section,
                    index: i,
                });
            }
            current_x = current_x.saturating_add(w).saturating_add(spacing);
        }
    }

    /// Start flush left, end flush right, center centered on the bar but
    /// clamped so it never overlaps the other two.
    pub(crate) fn calculate_flex_rects(&self, area: Rect, state: &BarState) -> [Rect; 3] {
        let width_of = |section| {
            self.window
                .child
                .section(section)
                .map(|part| Self::calc_width(part, state))
                .unwrap_or(0)
        };
        let start_w = width_of(Section::Start);
        let center_w = width_of(Section::Center);
        let end_w = width_of(Section::End);

        let final_start_w = start_w.min(area.width);
        let remaining_after_start = area.width.saturating_sub(final_start_w);
        let final_end_w = end_w.min(remaining_after_start);
        let remaining_for_center = remaining_after_start.saturating_sub(final_end_w);
        let final_center_w = center_w.min(remaining_for_center);

        let start_rect = Rect::new(area.x, area.y, final_start_w, area.height);
        let end_x = area.x + area.width - final_end_w;
        let end_rect = Rect::new(end_x, area.y, final_end_w, area.height);

        let ideal_center_x = area.x + (area.width.saturating_sub(final_center_w)) / 2;
        let min_center_x = start_rect.x + start_rect.width;
        let max_center_x = end_rect.x.saturating_sub(final_center_w).max(min_center_x);
        let final_center_x = ideal_center_x.clamp(min_center_x, max_center_x);
        let center_rect = Rect::new(final_center_x, area.y, final_center_w, area.height);

        [start_rect, center_rect, end_rect]
    }

    pub(crate) fn calc_width(part: &WidgetBox, state: &BarState) -> u16 {
        let widths: Vec<u16> = part
            .children
            .iter()
            .map(|w| w.width(state))
            .filter(|w| *w > 0)
            .collect();
        if widths.is_empty() {
            return 0;
        }
        let sum = widths.iter().fold(0u16, |acc, w| acc.saturating_add(*w));
        let gaps = (widths.len() as u16).saturating_sub(1);
        sum.saturating_add(gaps.saturating_mul(state.theme.spacing))
    }
}
