//! Static widget catalog and the registry of resolved references.
//!
//! The [`Catalog`] lists every module a reference may point at. The
//! [`WidgetRegistry`] only ever holds keys that went through
//! [`WidgetRegistry::resolve`].

use crate::error::{BuildError, ResolveError};
use crate::reference::WidgetRef;
use crate::widget::{Widget, WidgetArgs, WidgetFactory};
use crate::{ui, widgets};
use std::collections::{BTreeMap, HashMap};

/// Namespace first-party widget modules live under.
pub const WIDGETS_NAMESPACE: &str = "widgets";
/// The only namespace qualified (`module:Class`) references may name.
pub const TOOLKIT_NAMESPACE: &str = "ui";

#[derive(Clone, Copy)]
pub enum ClassKind {
    Widget(WidgetFactory),
    /// Exported by a module but not constructible as a widget.
    Other,
}

#[derive(Clone, Default)]
pub struct ModuleEntry {
    pub main: Option<WidgetFactory>,
    pub classes: BTreeMap<String, ClassKind>,
}

impl ModuleEntry {
    pub fn with_main(main: WidgetFactory) -> Self {
        Self {
            main: Some(main),
            classes: BTreeMap::new(),
        }
    }

    pub fn class(mut self, name: &str, kind: ClassKind) -> Self {
        self.classes.insert(name.to_string(), kind);
        self
    }
}

#[derive(Clone, Default)]
pub struct Catalog {
    modules: BTreeMap<String, ModuleEntry>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every module shipped with the bar.
    pub fn builtin() -> Self {
        let mut catalog = Self::new();
        widgets::register(&mut catalog);
        ui::register(&mut catalog);
        catalog
    }

    pub fn register_module(&mut self, path: &str, entry: ModuleEntry) {
        self.modules.insert(path.to_string(), entry);
    }

    pub fn module(&self, path: &str) -> Option<&ModuleEntry> {
        self.modules.get(path)
    }

    /// All references a config may use, in display order.
    pub fn references(&self) -> Vec<String> {
        let mut refs = Vec::new();
        for (path, entry) in &self.modules {
            if let Some(bare) = path
                .strip_prefix(WIDGETS_NAMESPACE)
                .and_then(|p| p.strip_prefix('.'))
            {
                if entry.main.is_some() {
                    refs.push(bare.to_string());
                }
                continue;
            }
            for (class, kind) in &entry.classes {
                if matches!(kind, ClassKind::Widget(_)) {
                    refs.push(format!("{}:{}", path, class));
                }
            }
        }
        refs
    }
}

#[derive(Default)]
pub struct WidgetRegistry {
    entries: HashMap<String, WidgetFactory>,
}

impl WidgetRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates `name` against `catalog` and registers its keys.
    /// Returns the keys registered, in reference order.
    pub fn resolve(&mut self, catalog: &Catalog, name: &str) -> Result<Vec<String>, ResolveError> {
        let reference = WidgetRef::parse(name)?;
        let not_found = || ResolveError::ModuleNotFound {
            name: name.trim().to_string(),
        };

        if reference.is_qualified() {
            if reference.namespace() != TOOLKIT_NAMESPACE {
                return Err(not_found());
            }
            let module = catalog.module(reference.identifier()).ok_or_else(not_found)?;

            // Check every class before registering any of them.
            let mut resolved = Vec::with_capacity(reference.classes().len());
            for (class, key) in reference.classes().iter().zip(reference.keys()) {
                match module.classes.get(class) {
                    Some(ClassKind::Widget(factory)) => resolved.push((key, *factory)),
                    _ => {
                        return Err(ResolveError::NotAWidget {
                            reference: name.trim().to_string(),
                            class: class.clone(),
                        });
                    }
                }
            }
            let keys = resolved.iter().map(|(k, _)| k.clone()).collect();
            self.entries.extend(resolved);
            return Ok(keys);
        }

        let path = format!("{}.{}", WIDGETS_NAMESPACE, reference.identifier());
        let module = catalog.module(&path).ok_or_else(not_found)?;
        let main = module
            .main
            .ok_or_else(|| ResolveError::NotCallable(reference.identifier().to_string()))?;
        let key = reference.identifier().to_string();
        self.entries.insert(key.clone(), main);
        Ok(vec![key])
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key.trim())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(crate) fn create(&self, key: &str, args: &WidgetArgs<'_>) -> Result<Box<dyn Widget>, BuildError> {
        let factory = self
            .entries
            .get(key)
            .ok_or_else(|| BuildError::Unresolved(key.to_string()))?;
        factory(args)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolve(name: &str) -> (WidgetRegistry, Result<Vec<String>, ResolveError>) {
        let catalog = Catalog::builtin();
        let mut registry = WidgetRegistry::new();
        let res = registry.resolve(&catalog, name);
        (registry, res)
    }

    #[test]
    fn test_bare_first_party_widgets() {
        for name in ["workspaces", "window_title", " workspaces "] {
            let (registry, res) = resolve(name);
            assert_eq!(res.unwrap(), vec![name.trim().to_string()]);
            assert!(registry.contains(name));
        }
    }

    #[test]
    fn test_module_without_main_is_not_callable() {
        let (registry, res) = resolve("common");
        assert_eq!(res, Err(ResolveError::NotCallable("common".into())));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_unknown_bare_module() {
        let (_, res) = resolve("battery");
        let err = res.unwrap_err();
        assert_eq!(
            err,
            ResolveError::ModuleNotFound {
                name: "battery".into()
            }
        );
        let msg = err.to_string();
        assert!(msg.contains("widgets.battery") && msg.contains("'battery'"));
    }

    #[test]
    fn test_qualified_outside_trusted_namespace() {
        for name in ["widgets:Label", "gtk:Label", "workspaces:Button", "uix:Label"] {
            let (registry, res) = resolve(name);
            assert!(
                matches!(res, Err(ResolveError::ModuleNotFound { .. })),
                "{name} should not be found"
            );
            assert!(registry.is_empty());
        }
    }

    #[test]
    fn test_qualified_toolkit_classes() {
        let (registry, res) = resolve("ui:Label:Separator");
        assert_eq!(
            res.unwrap(),
            vec!["ui:Label".to_string(), "ui:Separator".to_string()]
        );
        assert!(registry.contains("ui:Label"));
        assert!(registry.contains("ui:Separator"));
        assert!(!registry.contains("ui:Label:Separator"));
    }

    #[test]
    fn test_non_widget_class_registers_nothing() {
        let (registry, res) = resolve("ui:Label:Theme");
        assert_eq!(
            res,
            Err(ResolveError::NotAWidget {
                reference: "ui:Label:Theme".into(),
                class: "Theme".into()
            })
        );
        assert!(registry.is_empty());

        let (_, res) = resolve("ui:Missing");
        assert!(matches!(res, Err(ResolveError::NotAWidget { class, .. }) if class == "Missing"));
    }

    #[test]
    fn test_invalid_identifier_before_lookup() {
        let (_, res) = resolve("ui.match:Label");
        assert_eq!(res, Err(ResolveError::InvalidIdentifier("ui.match".into())));
    }

    #[test]
    fn test_resolve_is_idempotent() {
        let catalog = Catalog::builtin();
        let mut registry = WidgetRegistry::new();
        registry.resolve(&catalog, "workspaces").unwrap();
        registry.resolve(&catalog, "workspaces").unwrap();
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_catalog_lists_references() {
        let refs = Catalog::builtin().references();
        assert!(refs.contains(&"workspaces".to_string()));
        assert!(refs.contains(&"window_title".to_string()));
        assert!(refs.contains(&"ui:Label".to_string()));
        assert!(!refs.contains(&"common".to_string()));
        assert!(!refs.contains(&"ui:Theme".to_string()));
    }

    #[test]
    fn test_embedder_registration() {
        fn spacer(_args: &WidgetArgs<'_>) -> Result<Box<dyn Widget>, BuildError> {
            Ok(Box::new(crate::ui::Separator::new(" ")))
        }
        let mut catalog = Catalog::builtin();
        catalog.register_module("widgets.spacer", ModuleEntry::with_main(spacer));
        let mut registry = WidgetRegistry::new();
        assert_eq!(
            registry.resolve(&catalog, "spacer").unwrap(),
            vec!["spacer".to_string()]
        );
    }
}
