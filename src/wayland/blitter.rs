use crate::ui::Theme;
use crate::wayland::text::{LINE_HEIGHT_FACTOR, TextRenderer, vertical_offset};
use cosmic_text::{Attrs, Buffer, Color as CosmicColor, Family, Metrics, Shaping};
use ratatui::buffer::Buffer as RatatuiBuffer;
use ratatui::style::Color;

/// An ARGB8888 framebuffer (little endian, so bytes are B, G, R, A).
pub struct Canvas<'a> {
    pixels: &'a mut [u8],
    width: usize,
    height: usize,
}

impl<'a> Canvas<'a> {
    pub fn new(pixels: &'a mut [u8], width: u32, height: u32) -> Self {
        Self {
            pixels,
            width: width as usize,
            height: height as usize,
        }
    }

    pub fn fill(&mut self, rgb: (u8, u8, u8)) {
        for chunk in self.pixels.chunks_exact_mut(4) {
            chunk.copy_from_slice(&[rgb.2, rgb.1, rgb.0, 255]);
        }
    }

    pub fn fill_rect(&mut self, x: usize, y: usize, w: usize, h: usize, rgb: (u8, u8, u8)) {
        for py in y..(y + h).min(self.height) {
            for px in x..(x + w).min(self.width) {
                let offset = (py * self.width + px) * 4;
                if let Some(p) = self.pixels.get_mut(offset..offset + 4) {
                    p.copy_from_slice(&[rgb.2, rgb.1, rgb.0, 255]);
                }
            }
        }
    }

    /// Alpha-blends one pixel of `rgb` over what is already there.
    pub fn blend(&mut self, x: i32, y: i32, rgb: (u8, u8, u8), alpha: u8) {
        if alpha == 0 || x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return;
        }
        let offset = (y as usize * self.width + x as usize) * 4;
        let Some(p) = self.pixels.get_mut(offset..offset + 4) else {
            return;
        };
        let a = alpha as f32 / 255.0;
        let mix = |src: u8, dst: u8| (src as f32 * a + dst as f32 * (1.0 - a)) as u8;
        p[0] = mix(rgb.2, p[0]);
        p[1] = mix(rgb.1, p[1]);
        p[2] = mix(rgb.0, p[2]);
        p[3] = 255;
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<(u8, u8, u8)> {
        let offset = (y * self.width + x) * 4;
        self.pixels
            .get(offset..offset + 4)
            .map(|p| (p[2], p[1], p[0]))
    }
}

/// Rasterizes the cell buffer. Adjacent cells sharing colors are shaped as
/// one run so ligatures and kerning survive.
pub fn blit_buffer_to_pixels(
    buffer: &RatatuiBuffer,
    canvas: &mut Canvas<'_>,
    text_renderer: &mut TextRenderer,
    theme: &Theme,
) {
    canvas.fill(color_to_rgb(theme.bg));

    let area = buffer.area();
    let cols = area.width as usize;
    let rows = area.height as usize;
    let top = vertical_offset(canvas.height, rows, text_renderer.char_height);

    for y in 0..rows {
        let mut run = String::new();
        let mut run_style = (Color::Reset, Color::Reset);
        let mut run_start = 0;

        for x in 0..cols {
            let cell = &buffer.content()[y * cols + x];
            let style = (cell.fg, cell.bg);
            if !run.is_empty() && style != run_style {
                let cells = x - run_start;
                draw_run(canvas, text_renderer, theme, &run, run_style, (run_start, y, cells), top);
                run.clear();
            }
            if run.is_empty() {
                run_style = style;
                run_start = x;
            }
            run.push_str(cell.symbol());
        }
        if !run.is_empty() {
            let cells = cols - run_start;
            draw_run(canvas, text_renderer, theme, &run, run_style, (run_start, y, cells), top);
        }
    }
}

fn draw_run(
    canvas: &mut Canvas<'_>,
    text_renderer: &mut TextRenderer,
    theme: &Theme,
    text: &str,
    (fg, bg): (Color, Color),
    (cell_x, cell_y, cells): (usize, usize, usize),
    top: usize,
) {
    let char_w = text_renderer.char_width;
    let char_h = text_renderer.char_height;
    let origin_x = cell_x * char_w;
    let origin_y = top + cell_y * char_h;

    if bg != Color::Reset {
        canvas.fill_rect(origin_x, origin_y, cells * char_w, char_h, color_to_rgb(bg));
    }
    if text.trim().is_empty() {
        return;
    }

    let fg = if fg == Color::Reset { theme.fg } else { fg };
    let rgb = color_to_rgb(fg);

    let font_size = text_renderer.font_size;
    let mut shaped = Buffer::new(
        &mut text_renderer.font_system,
        Metrics::new(font_size, font_size * LINE_HEIGHT_FACTOR),
    );
    shaped.set_text(
        &mut text_renderer.font_system,
        text,
        &Attrs::new().family(Family::Name(&text_renderer.font_family)),
        Shaping::Advanced,
        None,
    );
    shaped.shape_until_scroll(&mut text_renderer.font_system, false);

    let base_x = origin_x as i32;
    let base_y = origin_y as i32;
    shaped.draw(
        &mut text_renderer.font_system,
        &mut text_renderer.swash_cache,
        CosmicColor::rgb(rgb.0, rgb.1, rgb.2),
        |x, y, w, h, color| {
            for dy in 0..h as i32 {
                for dx in 0..w as i32 {
                    canvas.blend(base_x + x + dx, base_y + y + dy, rgb, color.a());
                }
            }
        },
    );
}

pub fn color_to_rgb(color: Color) -> (u8, u8, u8) {
    match color {
        Color::Black | Color::Reset => (0, 0, 0),
        Color::Red => (205, 49, 49),
        Color::Green => (13, 188, 121),
        Color::Yellow => (229, 229, 16),
        Color::Blue => (36, 114, 200),
        Color::Magenta => (188, 63, 188),
        Color::Cyan => (17, 168, 205),
        Color::Gray => (128, 128, 128),
        Color::DarkGray => (64, 64, 64),
        Color::LightRed => (241, 76, 76),
        Color::LightGreen => (35, 209, 139),
        Color::LightYellow => (245, 245, 67),
        Color::LightBlue => (59, 142, 234),
        Color::LightMagenta => (214, 112, 214),
        Color::LightCyan => (41, 184, 219),
        Color::White => (229, 229, 229),
        Color::Rgb(r, g, b) => (r, g, b),
        Color::Indexed(i) => (i, i, i),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fill_and_rect_write_bgra() {
        let mut pixels = vec![0u8; 4 * 4 * 2];
        let mut canvas = Canvas::new(&mut pixels, 4, 2);
        canvas.fill((1, 2, 3));
        canvas.fill_rect(2, 1, 10, 10, (9, 8, 7));
        assert_eq!(canvas.pixel(0, 0), Some((1, 2, 3)));
        assert_eq!(canvas.pixel(3, 1), Some((9, 8, 7)));
        assert_eq!(canvas.pixel(1, 1), Some((1, 2, 3)));
        assert_eq!(&pixels[0..4], &[3, 2, 1, 255]);
    }

    #[test]
    fn test_blend_clips_and_mixes() {
        let mut pixels = vec![0u8; 4 * 2 * 2];
        let mut canvas = Canvas::new(&mut pixels, 2, 2);
        canvas.fill((0, 0, 0));
        canvas.blend(-1, 0, (255, 255, 255), 255);
        canvas.blend(5, 5, (255, 255, 255), 255);
        canvas.blend(0, 0, (255, 255, 255), 255);
        canvas.blend(1, 0, (200, 0, 0), 0);
        assert_eq!(canvas.pixel(0, 0), Some((255, 255, 255)));
        assert_eq!(canvas.pixel(1, 0), Some((0, 0, 0)));
    }

    #[test]
    fn test_rgb_passthrough() {
        assert_eq!(color_to_rgb(Color::Rgb(30, 30, 46)), (30, 30, 46));
        assert_eq!(color_to_rgb(Color::Reset), (0, 0, 0));
    }
}
