use super::draw_text;
use crate::error::BuildError;
use crate::state::BarState;
use crate::widget::{Widget, WidgetArgs};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;

/// An icon drawn as a single Nerd Font glyph.
pub struct Image {
    name: String,
    icon_name: String,
    classes: Vec<String>,
}

impl Image {
    pub fn new(name: impl Into<String>, icon_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            icon_name: icon_name.into(),
            classes: Vec::new(),
        }
    }

    pub fn icon_name(&self) -> &str {
        &self.icon_name
    }

    pub fn set_from_icon_name(&mut self, icon_name: impl Into<String>) {
        self.icon_name = icon_name.into();
    }
}

impl Widget for Image {
    fn name(&self) -> &str {
        &self.name
    }

    fn style_classes(&self) -> &[String] {
        &self.classes
    }

    fn width(&self, _state: &BarState) -> u16 {
        if self.icon_name.is_empty() { 0 } else { 1 }
    }

    fn render(&mut self, area: Rect, buf: &mut Buffer, state: &BarState) {
        if self.icon_name.is_empty() {
            return;
        }
        let glyph = glyph_for(&self.icon_name).to_string();
        draw_text(buf, area, &glyph, state.theme.style_for(&self.classes));
    }
}

/// Maps a freedesktop icon name to a glyph. Unknown names fall back to
/// their first letter so distinct apps still look distinct.
pub fn glyph_for(icon_name: &str) -> char {
    let key = icon_name
        .rsplit('/')
        .next()
        .unwrap_or(icon_name)
        .trim_end_matches(".svg")
        .trim_end_matches(".png")
        .to_ascii_lowercase();

    match key.as_str() {
        "user-desktop" => '\u{f108}',
        "application-x-executable" => '\u{f489}',
        "firefox" | "org.mozilla.firefox" => '\u{f269}',
        "chromium" | "google-chrome" => '\u{f268}',
        "kitty" | "alacritty" | "foot" | "org.wezfurlong.wezterm" | "utilities-terminal" => {
            '\u{f489}'
        }
        "code" | "visual-studio-code" | "vscodium" => '\u{e70c}',
        "org.gnome.nautilus" | "system-file-manager" | "thunar" => '\u{f07b}',
        "spotify" | "spotify-client" => '\u{f1bc}',
        "discord" | "vesktop" => '\u{f392}',
        "steam" => '\u{f1b6}',
        "thunderbird" | "org.mozilla.thunderbird" => '\u{f0e0}',
        _ => key
            .chars()
            .find(|c| c.is_alphanumeric())
            .map(|c| c.to_ascii_uppercase())
            .unwrap_or('?'),
    }
}

/// `ui:Image(icon = "")`
pub fn main(args: &WidgetArgs<'_>) -> Result<Box<dyn Widget>, BuildError> {
    args.expect_only(&["icon"])?;
    Ok(Box::new(Image::new("image", args.str_or("icon", "")?)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_and_fallback_glyphs() {
        assert_eq!(glyph_for("user-desktop"), '\u{f108}');
        assert_eq!(glyph_for("/usr/share/icons/firefox.png"), '\u{f269}');
        assert_eq!(glyph_for("obsidian"), 'O');
        assert_eq!(glyph_for("--"), '?');
    }

    #[test]
    fn test_empty_icon_takes_no_space() {
        let state = BarState::detached(Default::default());
        let mut img = Image::new("window-icon", "");
        assert_eq!(img.width(&state), 0);
        img.set_from_icon_name("kitty");
        assert_eq!(img.width(&state), 1);
        assert_eq!(img.icon_name(), "kitty");
    }
}
