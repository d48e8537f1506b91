use crate::error::BuildError;
use crate::modules::logging::log_debug;
use crate::registry::WidgetRegistry;
use crate::widget::{Widget, WidgetArgs, WidgetArgsMap};

/// Builds one widget for a resolved registry key.
///
/// Keyword arguments are looked up in `args` under the same key. A missing
/// entry calls the factory with no arguments.
pub fn create_widget(
    registry: &WidgetRegistry,
    name: &str,
    args: &WidgetArgsMap,
) -> Result<Box<dyn Widget>, BuildError> {
    let name = name.trim();
    if !registry.contains(name) {
        return Err(BuildError::Unresolved(name.to_string()));
    }

    let bundle = match args.get(name) {
        None => None,
        Some(toml::Value::Table(table)) => Some(table),
        Some(_) => {
            return Err(BuildError::InvalidArgument {
                reference: name.to_string(),
                key: name.to_string(),
                expected: "a table of keyword arguments",
            });
        }
    };

    log_debug(
        "WIDGET",
        &format!(
            "Creating {} ({} args)",
            name,
            bundle.map(|t| t.len()).unwrap_or(0)
        ),
    );
    registry.create(name, &WidgetArgs::new(name, bundle))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::Catalog;

    fn resolved(names: &[&str]) -> WidgetRegistry {
        let catalog = Catalog::builtin();
        let mut registry = WidgetRegistry::new();
        for name in names {
            registry.resolve(&catalog, name).unwrap();
        }
        registry
    }

    #[test]
    fn test_unresolved_reference() {
        let registry = resolved(&[]);
        let err = create_widget(&registry, "workspaces", &WidgetArgsMap::new()).err();
        assert_eq!(err, Some(BuildError::Unresolved("workspaces".into())));
    }

    #[test]
    fn test_create_without_arguments() {
        let registry = resolved(&["workspaces", "ui:Separator"]);
        let w = create_widget(&registry, "workspaces", &WidgetArgsMap::new()).unwrap();
        assert_eq!(w.name(), "workspaces");
        let s = create_widget(&registry, " ui:Separator ", &WidgetArgsMap::new()).unwrap();
        assert_eq!(s.name(), "separator");
    }

    #[test]
    fn test_arguments_keyed_by_reference() {
        let registry = resolved(&["ui:Label"]);
        let args: WidgetArgsMap = toml::from_str("[\"ui:Label\"]\ntext = \"hello\"").unwrap();
        let w = create_widget(&registry, "ui:Label", &args).unwrap();
        assert_eq!(w.name(), "label");
    }

    #[test]
    fn test_arguments_must_be_a_table() {
        let registry = resolved(&["workspaces"]);
        let args: WidgetArgsMap = toml::from_str("workspaces = 5").unwrap();
        assert!(matches!(
            create_widget(&registry, "workspaces", &args),
            Err(BuildError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn test_unexpected_argument_propagates() {
        let registry = resolved(&["window_title"]);
        let args: WidgetArgsMap = toml::from_str("[window_title]\nfont = \"x\"").unwrap();
        assert!(matches!(
            create_widget(&registry, "window_title", &args),
            Err(BuildError::UnexpectedArgument { key, .. }) if key == "font"
        ));
    }
}
