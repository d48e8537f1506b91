use thiserror::Error;

/// Failures while turning a widget reference into a registry entry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    #[error("'{0}' is not a valid identifier")]
    InvalidIdentifier(String),

    #[error(
        "neither 'widgets.{name}' nor '{name}' exist; register the widget under `widgets.` or name a `ui:` component"
    )]
    ModuleNotFound { name: String },

    #[error("no callable named 'main' in 'widgets.{0}'")]
    NotCallable(String),

    #[error("{class} is not a widget type (in '{reference}')")]
    NotAWidget { reference: String, class: String },
}

/// Failures while assembling the bar or constructing a single widget.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error("widget '{0}' was never resolved")]
    Unresolved(String),

    #[error("widget '{reference}' got an unexpected argument '{key}'")]
    UnexpectedArgument { reference: String, key: String },

    #[error("widget '{reference}': argument '{key}' must be {expected}")]
    InvalidArgument {
        reference: String,
        key: String,
        expected: &'static str,
    },
}

/// Failures talking to Hyprland's sockets.
#[derive(Debug, Error)]
pub enum IpcError {
    #[error("Hyprland is not running (HYPRLAND_INSTANCE_SIGNATURE is unset)")]
    NotRunning,

    #[error("Hyprland socket I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed Hyprland reply: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Hyprland rejected '{command}': {reply}")]
    Rejected { command: String, reply: String },
}
