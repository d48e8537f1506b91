//! Bar layout: what the user asks for ([`LayoutSpec`]) and what gets built
//! from it ([`BarWindow`]).

use crate::error::BuildError;
use crate::factory::create_widget;
use crate::modules::logging::{log_debug, log_info};
use crate::registry::{Catalog, WidgetRegistry};
use crate::widget::{Widget, WidgetArgsMap};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Edge {
    Top,
    Right,
    Bottom,
    Left,
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Edge::Top => "top",
            Edge::Right => "right",
            Edge::Bottom => "bottom",
            Edge::Left => "left",
        };
        f.write_str(s)
    }
}

/// Pixel margins for all four edges.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Margins {
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
    pub left: i32,
}

impl Margins {
    /// User-supplied edges laid over an all-zero default.
    pub fn overlay(partial: &HashMap<Edge, i32>) -> Self {
        let mut margins = Self::default();
        for (edge, value) in partial {
            match edge {
                Edge::Top => margins.top = *value,
                Edge::Right => margins.right = *value,
                Edge::Bottom => margins.bottom = *value,
                Edge::Left => margins.left = *value,
            }
        }
        margins
    }

    /// CSS shorthand order: top, right, bottom, left.
    pub fn to_css(&self) -> String {
        format!(
            "{}px {}px {}px {}px",
            self.top, self.right, self.bottom, self.left
        )
    }
}

/// A single reference or a list of them.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

impl OneOrMany {
    pub fn to_vec(&self) -> Vec<String> {
        match self {
            OneOrMany::One(s) => vec![s.clone()],
            OneOrMany::Many(v) => v.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct SectionsSpec {
    #[serde(default)]
    pub start: Option<OneOrMany>,
    #[serde(default)]
    pub center: Option<OneOrMany>,
    #[serde(default)]
    pub end: Option<OneOrMany>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Start,
    Center,
    End,
}

impl Section {
    pub const ALL: [Section; 3] = [Section::Start, Section::Center, Section::End];

    pub fn box_name(self) -> &'static str {
        match self {
            Section::Start => "stbar-start",
            Section::Center => "stbar-center",
            Section::End => "stbar-end",
        }
    }
}

impl SectionsSpec {
    /// References for a section. Absent and empty entries both yield nothing.
    pub fn references(&self, section: Section) -> Vec<String> {
        let entry = match section {
            Section::Start => &self.start,
            Section::Center => &self.center,
            Section::End => &self.end,
        };
        entry.as_ref().map(OneOrMany::to_vec).unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct LayoutSpec {
    #[serde(default = "default_anchor")]
    pub anchor: Vec<Edge>,
    #[serde(default)]
    pub margins: HashMap<Edge, i32>,
    #[serde(default)]
    pub widgets: SectionsSpec,
    #[serde(default = "default_name")]
    pub name: String,
    #[serde(default)]
    pub style_classes: Option<OneOrMany>,
}

impl Default for LayoutSpec {
    fn default() -> Self {
        Self {
            anchor: default_anchor(),
            margins: HashMap::new(),
            widgets: SectionsSpec::default(),
            name: default_name(),
            style_classes: None,
        }
    }
}

pub fn default_anchor() -> Vec<Edge> {
    vec![Edge::Left, Edge::Top, Edge::Right]
}

fn default_name() -> String {
    "stbar".to_string()
}

/// Layer-shell stacking layer. `assemble` always picks `Top`; the other
/// layers are for code that builds a [`BarWindow`] by hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layer {
    Background,
    Bottom,
    Top,
    Overlay,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exclusivity {
    /// Reserve as much space as the bar occupies along its anchored edge.
    Auto,
    /// Overlap other surfaces. Only reachable when building a [`BarWindow`]
    /// by hand.
    None,
}

/// Horizontal run of widgets forming one section of the bar.
pub struct WidgetBox {
    pub name: String,
    pub style_classes: Vec<String>,
    pub children: Vec<Box<dyn Widget>>,
}

/// Three-region container: start flush left, center centered, end flush right.
pub struct CenterBox {
    pub name: String,
    pub start: Option<WidgetBox>,
    pub center: Option<WidgetBox>,
    pub end: Option<WidgetBox>,
}

impl CenterBox {
    pub fn section(&self, section: Section) -> Option<&WidgetBox> {
        match section {
            Section::Start => self.start.as_ref(),
            Section::Center => self.center.as_ref(),
            Section::End => self.end.as_ref(),
        }
    }

    pub fn section_mut(&mut self, section: Section) -> Option<&mut WidgetBox> {
        match section {
            Section::Start => self.start.as_mut(),
            Section::Center => self.center.as_mut(),
            Section::End => self.end.as_mut(),
        }
    }

    pub fn populated(&self) -> usize {
        Section::ALL
            .iter()
            .filter(|s| self.section(**s).is_some())
            .count()
    }

    pub fn widgets_mut(&mut self) -> impl Iterator<Item = &mut Box<dyn Widget>> {
        [&mut self.start, &mut self.center, &mut self.end]
            .into_iter()
            .flatten()
            .flat_map(|b| b.children.iter_mut())
    }
}

/// The top-level anchored window holding the bar.
pub struct BarWindow {
    pub name: String,
    pub anchor: Vec<Edge>,
    pub margins: Margins,
    pub style_classes: Vec<String>,
    pub layer: Layer,
    pub exclusivity: Exclusivity,
    pub child: CenterBox,
}

impl BarWindow {
    pub fn is_anchored(&self, edge: Edge) -> bool {
        self.anchor.contains(&edge)
    }

    pub fn anchor_string(&self) -> String {
        self.anchor
            .iter()
            .map(Edge::to_string)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Resolves every reference in `spec`, then builds the window.
///
/// Nothing is constructed until all references resolve. The first failure
/// aborts the whole bar.
pub fn assemble(
    spec: &LayoutSpec,
    catalog: &Catalog,
    registry: &mut WidgetRegistry,
    args: &WidgetArgsMap,
) -> Result<BarWindow, BuildError> {
    let mut keys: HashMap<&'static str, Vec<String>> = HashMap::new();
    for section in Section::ALL {
        let mut section_keys = Vec::new();
        for reference in spec.widgets.references(section) {
            section_keys.extend(registry.resolve(catalog, &reference)?);
        }
        keys.insert(section.box_name(), section_keys);
    }
    log_debug(
        "LAYOUT",
        &format!("Resolved {} widget references", registry.len()),
    );

    let mut build = |section: Section| -> Result<Option<WidgetBox>, BuildError> {
        let section_keys = keys.remove(section.box_name()).unwrap_or_default();
        if section_keys.is_empty() {
            return Ok(None);
        }
        let children = section_keys
            .iter()
            .map(|key| create_widget(registry, key, args))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Some(WidgetBox {
            name: section.box_name().to_string(),
            style_classes: vec!["stbar-part".to_string()],
            children,
        }))
    };

    let child = CenterBox {
        name: "inner-bar".to_string(),
        start: build(Section::Start)?,
        center: build(Section::Center)?,
        end: build(Section::End)?,
    };

    let window = BarWindow {
        name: spec.name.clone(),
        anchor: spec.anchor.clone(),
        margins: Margins::overlay(&spec.margins),
        style_classes: spec
            .style_classes
            .as_ref()
            .map(OneOrMany::to_vec)
            .unwrap_or_default(),
        layer: Layer::Top,
        exclusivity: Exclusivity::Auto,
        child,
    };

    log_info(
        "LAYOUT",
        &format!(
            "Assembled '{}' with {} sections (anchor: {}, margin: {})",
            window.name,
            window.child.populated(),
            window.anchor_string(),
            window.margins.to_css()
        ),
    );
    Ok(window)
}
