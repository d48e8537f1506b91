use crate::modules::logging::{log_debug, log_warn};
use anyhow::Result;
use cosmic_text::fontdb::{Database, Source};
use cosmic_text::{Attrs, Buffer, Family, FontSystem, Metrics, Shaping, SwashCache};
use std::path::PathBuf;
use std::process::Command;
use std::sync::Arc;

pub const LINE_HEIGHT_FACTOR: f32 = 1.2;
const DEFAULT_FAMILY: &str = "monospace";

/// Font state for rasterizing the cell grid. Cells are sized from the
/// advance of `M` in the loaded face.
pub struct TextRenderer {
    pub font_system: FontSystem,
    pub swash_cache: SwashCache,
    pub char_width: usize,
    pub char_height: usize,
    pub font_family: String,
    pub font_size: f32,
}

impl TextRenderer {
    /// `font` is either a file path or a fontconfig pattern.
    pub fn new(font: Option<&str>, font_size: f32) -> Result<Self> {
        let requested = font.unwrap_or(DEFAULT_FAMILY);
        let font_file = locate_font(requested).or_else(|| {
            log_warn(
                "FONT",
                &format!("Could not find font '{}', using {}", requested, DEFAULT_FAMILY),
            );
            locate_font(DEFAULT_FAMILY)
        });

        // Only the chosen face is loaded; scanning every system font is slow.
        let mut db = Database::new();
        match font_file {
            Some(path) => match std::fs::read(&path) {
                Ok(data) => {
                    db.load_font_source(Source::Binary(Arc::new(data)));
                    log_debug("FONT", &format!("Loaded font file: {:?}", path));
                }
                Err(e) => log_warn("FONT", &format!("Failed to read {:?}: {}", path, e)),
            },
            None => log_warn("FONT", "No font file available, text may not render"),
        }

        let mut font_system = FontSystem::new_with_locale_and_db("en-US".into(), db);
        // The loaded face is addressed by its real family name when we know it.
        let font_family = font_system
            .db()
            .faces()
            .next()
            .and_then(|face| face.families.first().map(|(name, _)| name.clone()))
            .unwrap_or_else(|| requested.to_string());

        let line_height = font_size * LINE_HEIGHT_FACTOR;
        let mut probe = Buffer::new(&mut font_system, Metrics::new(font_size, line_height));
        probe.set_text(
            &mut font_system,
            "M",
            &Attrs::new().family(Family::Name(&font_family)),
            Shaping::Advanced,
            None,
        );
        probe.shape_until_scroll(&mut font_system, false);

        let char_width = probe
            .layout_runs()
            .next()
            .map(|run| run.line_w.ceil() as usize)
            .unwrap_or((font_size * 0.6) as usize)
            .max(1);
        let char_height = (line_height.ceil() as usize).max(1);

        log_debug(
            "FONT",
            &format!(
                "Cell grid {}x{} px for '{}' at {}px",
                char_width, char_height, font_family, font_size
            ),
        );

        Ok(Self {
            font_system,
            swash_cache: SwashCache::new(),
            char_width,
            char_height,
            font_family,
            font_size,
        })
    }

    /// Converts a surface size in pixels to whole cells.
    pub fn grid_size(&self, width: u32, height: u32) -> (u16, u16) {
        let cols = width as usize / self.char_width;
        let rows = (height as usize / self.char_height).max(1);
        (
            u16::try_from(cols).unwrap_or(u16::MAX),
            u16::try_from(rows).unwrap_or(u16::MAX),
        )
    }

    /// Cell under a surface-local pixel position.
    pub fn cell_at(&self, x: f64, y: f64, surface_height: u32, rows: u16) -> (u16, u16) {
        let offset = vertical_offset(surface_height as usize, rows as usize, self.char_height);
        let cx = (x.max(0.0) as usize) / self.char_width;
        let cy = (y.max(0.0) as usize).saturating_sub(offset) / self.char_height;
        (
            u16::try_from(cx).unwrap_or(u16::MAX),
            u16::try_from(cy).unwrap_or(u16::MAX),
        )
    }
}

/// Top padding that centers `rows` cells in a surface `height` pixels tall.
pub fn vertical_offset(height: usize, rows: usize, char_height: usize) -> usize {
    height.saturating_sub(rows * char_height) / 2
}

fn locate_font(name: &str) -> Option<PathBuf> {
    let path = PathBuf::from(name);
    if path.is_file() {
        return Some(path);
    }
    fc_match(name).map(PathBuf::from)
}

fn fc_match(pattern: &str) -> Option<String> {
    let output = match Command::new("fc-match")
        .arg("--format=%{file}")
        .arg(pattern)
        .output()
    {
        Ok(output) => output,
        Err(e) => {
            log_debug("FONT", &format!("Failed to run fc-match: {}", e));
            return None;
        }
    };
    if !output.status.success() {
        return None;
    }
    let file = String::from_utf8_lossy(&output.stdout).trim().to_string();
    (!file.is_empty()).then_some(file)
}
