//! Widget reference strings.
//!
//! A reference is either a bare first-party widget path (`workspaces`,
//! `clock.digital`) or a qualified toolkit path with one or more class names
//! (`ui:Label`, `ui:Label:Separator`).

use crate::error::ResolveError;

/// Strict and reserved keywords. A reference segment may not be any of these.
const RESERVED: &[&str] = &[
    "as", "async", "await", "break", "const", "continue", "crate", "dyn", "else", "enum",
    "extern", "false", "fn", "for", "if", "impl", "in", "let", "loop", "match", "mod", "move",
    "mut", "pub", "ref", "return", "self", "Self", "static", "struct", "super", "trait", "true",
    "type", "unsafe", "use", "where", "while", "abstract", "become", "box", "do", "final",
    "gen", "macro", "override", "priv", "try", "typeof", "unsized", "virtual", "yield",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetRef {
    identifier: String,
    classes: Vec<String>,
}

impl WidgetRef {
    /// Parses and validates a reference. Nothing is looked up here.
    pub fn parse(raw: &str) -> Result<Self, ResolveError> {
        let raw = raw.trim();
        let mut parts = raw.split(':');
        let identifier = parts.next().unwrap_or_default().to_string();

        if !identifier.split('.').all(is_valid_segment) {
            return Err(ResolveError::InvalidIdentifier(identifier));
        }

        let classes: Vec<String> = parts.map(str::to_string).collect();
        if let Some(bad) = classes.iter().find(|c| !is_valid_segment(c)) {
            return Err(ResolveError::InvalidIdentifier(bad.clone()));
        }

        Ok(Self {
            identifier,
            classes,
        })
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn is_qualified(&self) -> bool {
        !self.classes.is_empty()
    }

    /// First dotted segment, e.g. `ui` for `ui.extra:Label`.
    pub fn namespace(&self) -> &str {
        self.identifier
            .split('.')
            .next()
            .unwrap_or(&self.identifier)
    }

    /// Registry keys this reference produces once resolved.
    pub fn keys(&self) -> Vec<String> {
        if self.classes.is_empty() {
            vec![self.identifier.clone()]
        } else {
            self.classes
                .iter()
                .map(|class| format!("{}:{}", self.identifier, class))
                .collect()
        }
    }
}

pub fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || c == '_')
}

pub fn is_reserved(s: &str) -> bool {
    RESERVED.contains(&s)
}

fn is_valid_segment(s: &str) -> bool {
    is_identifier(s) && !is_reserved(s)
}
