//! First-party widgets, reachable from configs by bare module name.

pub mod common;
pub mod window_title;
pub mod workspaces;

use crate::registry::{Catalog, ModuleEntry, WIDGETS_NAMESPACE};

pub fn register(catalog: &mut Catalog) {
    let path = |module: &str| format!("{}.{}", WIDGETS_NAMESPACE, module);
    catalog.register_module(&path("common"), ModuleEntry::default());
    catalog.register_module(&path("window_title"), ModuleEntry::with_main(window_title::main));
    catalog.register_module(&path("workspaces"), ModuleEntry::with_main(workspaces::main));
}
