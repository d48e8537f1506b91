use colored::Colorize;

use crate::layout::{BarWindow, Section};
use crate::registry::Catalog;
use crate::state::BarState;

/// Human readable outline of an assembled bar, printed by `check`.
pub fn render_tree(window: &BarWindow, state: &BarState) -> String {
    let mut out = String::new();
    let classes = if window.style_classes.is_empty() {
        String::new()
    } else {
        format!(" .{}", window.style_classes.join(" ."))
    };
    out.push_str(&format!(
        "{}{} anchor=[{}] margin={}\n",
        window.name.bold(),
        classes.dimmed(),
        window.anchor_string(),
        window.margins.to_css()
    ));
    out.push_str(&format!("└─ {}\n", window.child.name.cyan()));

    let populated: Vec<Section> = Section::ALL
        .into_iter()
        .filter(|s| window.child.section(*s).is_some())
        .collect();
    for (i, section) in populated.iter().enumerate() {
        let Some(part) = window.child.section(*section) else {
            continue;
        };
        let last = i + 1 == populated.len();
        let (branch, stem) = if last { ("└─", "   ") } else { ("├─", "│  ") };
        out.push_str(&format!("   {} {}\n", branch, part.name.green()));
        for (j, widget) in part.children.iter().enumerate() {
            let leaf = if j + 1 == part.children.len() { "└─" } else { "├─" };
            out.push_str(&format!(
                "   {}{} {} {}\n",
                stem,
                leaf,
                widget.name(),
                format!("({} cells)", widget.width(state)).dimmed()
            ));
        }
    }
    out
}

/// Every reference a config may use, one per line.
pub fn list_widgets(catalog: &Catalog) -> String {
    catalog
        .references()
        .into_iter()
        .map(|r| format!("{}\n", r))
        .collect()
}
