//! Text helpers shared by first-party widgets. Registered as a module without
//! `main`, so it cannot be placed on the bar by itself.

pub const DEFAULT_TITLE_LENGTH: usize = 40;
pub const ELLIPSIS: &str = "...";
pub const PLACEHOLDER_TITLE: &str = "Desktop";

/// Capitalizes the first letter of every word and lowercases the rest.
/// A word starts after any character that is not a letter.
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_letter = false;
    for c in s.chars() {
        if c.is_alphabetic() {
            if prev_letter {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_letter = true;
        } else {
            out.push(c);
            prev_letter = false;
        }
    }
    out
}

/// Title-cases `s`, turns `-` and `_` into spaces, maps `Unknown` to the
/// placeholder and cuts the result to `length` characters including `suffix`.
pub fn truncate_title(s: &str, length: usize, suffix: &str) -> String {
    let titled = title_case(s).replace(['-', '_'], " ");
    if titled == "Unknown" {
        return PLACEHOLDER_TITLE.to_string();
    }
    if titled.chars().count() <= length {
        return titled;
    }
    let keep = length.saturating_sub(suffix.chars().count());
    let mut out: String = titled.chars().take(keep).collect();
    out.push_str(suffix);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("hello WORLD"), "Hello World");
        assert_eq!(title_case("org.gnome.nautilus"), "Org.Gnome.Nautilus");
        assert_eq!(title_case("2nd-try"), "2Nd-Try");
    }

    #[test]
    fn test_truncate_long_title() {
        let title = "a".repeat(50);
        let out = truncate_title(&title, DEFAULT_TITLE_LENGTH, ELLIPSIS);
        assert_eq!(out.chars().count(), 40);
        assert!(out.ends_with("..."));
        assert!(out.starts_with("Aaaa"));
    }

    #[test]
    fn test_short_title_kept() {
        assert_eq!(truncate_title("google-chrome", 40, ELLIPSIS), "Google Chrome");
        assert_eq!(truncate_title(&"x".repeat(40), 40, ELLIPSIS).len(), 40);
    }

    #[test]
    fn test_unknown_maps_to_desktop() {
        for s in ["Unknown", "unknown", "UNKNOWN", "uNkNoWn"] {
            assert_eq!(truncate_title(s, 40, ELLIPSIS), "Desktop");
        }
        assert_eq!(truncate_title("unknown app", 40, ELLIPSIS), "Unknown App");
    }

    #[test]
    fn test_multibyte_truncation() {
        let out = truncate_title(&"é".repeat(45), 40, ELLIPSIS);
        assert_eq!(out.chars().count(), 40);
    }
}
