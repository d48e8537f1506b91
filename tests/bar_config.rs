use selvedge::config::BarConfig;
use selvedge::error::{BuildError, ResolveError};
use selvedge::layout::{Edge, Section, assemble};
use selvedge::modules::config::try_load_bar_config;
use selvedge::registry::{Catalog, WidgetRegistry};
use selvedge::renderer::BarRenderer;
use selvedge::state::BarState;

const CONFIG: &str = r#"
[bar]
name = "topbar"
anchor = ["left", "top", "right"]
margins = { top = 4, left = 8, right = 8 }
style_classes = ["floating", "rounded"]

[bar.widgets]
start = ["workspaces", "ui:Separator"]
center = "window_title"
end = "ui:Label:Button"

[window]
height = 28

[style]
spacing = 2

[widget.workspaces]
spacing = 0

[widget."ui:Label"]
text = "selvedge"

[widget."ui:Button"]
label = "menu"
command = "exec wofi --show drun"
"#;

#[test]
fn assembles_bar_from_toml() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, CONFIG).unwrap();

    let config = try_load_bar_config(&path).unwrap();
    assert_eq!(config.window.height, 28);
    assert_eq!(config.style.spacing, 2);

    let catalog = Catalog::builtin();
    let mut registry = WidgetRegistry::new();
    let window = assemble(&config.bar, &catalog, &mut registry, &config.widget).unwrap();

    assert_eq!(window.name, "topbar");
    assert_eq!(window.style_classes, vec!["floating", "rounded"]);
    assert!(window.is_anchored(Edge::Top));
    assert!(!window.is_anchored(Edge::Bottom));
    assert_eq!(window.margins.to_css(), "4px 8px 0px 8px");
    assert_eq!(window.child.populated(), 3);

    let names = |section| -> Vec<String> {
        window
            .child
            .section(section)
            .unwrap()
            .children
            .iter()
            .map(|w| w.name().to_string())
            .collect()
    };
    assert_eq!(names(Section::Start), vec!["workspaces", "separator"]);
    assert_eq!(names(Section::Center), vec!["window-title"]);
    assert_eq!(names(Section::End), vec!["label", "button"]);
    assert_eq!(registry.len(), 5);
}

#[test]
fn renders_without_compositor() {
    let config: BarConfig = toml::from_str(CONFIG).unwrap();
    let catalog = Catalog::builtin();
    let mut registry = WidgetRegistry::new();
    let window = assemble(&config.bar, &catalog, &mut registry, &config.widget).unwrap();
    let state = BarState::detached(config);

    let mut renderer = BarRenderer::new(window, 40, 1);
    renderer.mount(&state);
    renderer.render_frame(&state).unwrap();

    let row: String = (0..40)
        .map(|x| renderer.buffer()[(x, 0)].symbol().to_string())
        .collect();
    // No workspaces without Hyprland, so the separator leads.
    assert!(row.starts_with('|'));
    assert!(row.ends_with("selvedge   menu "));
    assert!(row.contains("Desktop"));
}

#[test]
fn bad_reference_aborts_assembly() {
    let config: BarConfig = toml::from_str(
        r#"
        [bar.widgets]
        start = "workspaces"
        end = ["window_title", "battery"]
        "#,
    )
    .unwrap();
    let catalog = Catalog::builtin();
    let mut registry = WidgetRegistry::new();
    let err = assemble(&config.bar, &catalog, &mut registry, &config.widget).err();
    assert!(matches!(
        err,
        Some(BuildError::Resolve(ResolveError::ModuleNotFound { .. }))
    ));
}

#[test]
fn unknown_widget_argument_is_rejected() {
    let config: BarConfig = toml::from_str(
        r#"
        [bar.widgets]
        start = "workspaces"
        [widget.workspaces]
        monitor = "DP-1"
        "#,
    )
    .unwrap();
    let catalog = Catalog::builtin();
    let mut registry = WidgetRegistry::new();
    let err = assemble(&config.bar, &catalog, &mut registry, &config.widget).err();
    assert!(matches!(err, Some(BuildError::UnexpectedArgument { .. })));
}
