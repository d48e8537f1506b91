pub mod apps;
pub mod config;
pub mod error;
pub mod event;
pub mod factory;
pub mod hyprland;
pub mod layout;
pub mod reference;
pub mod registry;
pub mod renderer;
pub mod state;
pub mod widget;

pub mod modules;
pub mod tui;
pub mod ui;
pub mod wayland;
pub mod widgets;

pub mod prelude {
    pub use crate::config::BarConfig;
    pub use crate::error::{BuildError, ResolveError};
    pub use crate::event::WidgetEvent;
    pub use crate::factory::create_widget;
    pub use crate::layout::{BarWindow, LayoutSpec, assemble};
    pub use crate::registry::{Catalog, ClassKind, ModuleEntry, WidgetRegistry};
    pub use crate::state::BarState;
    pub use crate::widget::{Widget, WidgetArgs, WidgetArgsMap};
    pub use ratatui::prelude::*;
}
