use crate::layout::Section;
use ratatui::prelude::Rect;

pub(crate) struct HitWidget {
    pub area: Rect,
    pub section: Section,
    pub index: usize,
}

impl HitWidget {
    pub fn contains(&self, x: u16, y: u16) -> bool {
        x >= self.area.x
            && x < self.area.x + self.area.width
            && y >= self.area.y
            && y < self.area.y + self.area.height
    }
}
