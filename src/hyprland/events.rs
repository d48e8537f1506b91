use super::ipc::event_socket_path;
use crate::error::IpcError;
use crate::modules::logging::{log_debug, log_error, log_info};
use std::path::Path;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::net::UnixStream;
use tokio::sync::mpsc;

/// One line from Hyprland's event socket (`EVENT>>DATA`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HyprEvent {
    ActiveWindow { class: String, title: String },
    CloseWindow { address: String },
    Workspace { name: String },
    WorkspaceV2 { id: i32, name: String },
    CreateWorkspace { name: String },
    DestroyWorkspace { name: String },
    /// `name` is empty when the special workspace was hidden.
    ActiveSpecial { name: String, monitor: String },
    FocusedMonitor { monitor: String, workspace: String },
    Other { name: String, data: String },
}

impl HyprEvent {
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim_end_matches(['\r', '\n']);
        let (name, data) = line.split_once(">>")?;
        let pair = || {
            let (a, b) = data.split_once(',').unwrap_or((data, ""));
            (a.to_string(), b.to_string())
        };

        let event = match name {
            // Titles may contain commas; the class never does.
            "activewindow" => {
                let (class, title) = pair();
                HyprEvent::ActiveWindow { class, title }
            }
            "closewindow" => HyprEvent::CloseWindow {
                address: data.to_string(),
            },
            "workspace" => HyprEvent::Workspace {
                name: data.to_string(),
            },
            "workspacev2" => {
                let (id, name) = pair();
                match id.parse() {
                    Ok(id) => HyprEvent::WorkspaceV2 { id, name },
                    Err(_) => HyprEvent::Other {
                        name: "workspacev2".to_string(),
                        data: data.to_string(),
                    },
                }
            }
            "createworkspace" => HyprEvent::CreateWorkspace {
                name: data.to_string(),
            },
            "createworkspacev2" => HyprEvent::CreateWorkspace { name: pair().1 },
            "destroyworkspace" => HyprEvent::DestroyWorkspace {
                name: data.to_string(),
            },
            "destroyworkspacev2" => HyprEvent::DestroyWorkspace { name: pair().1 },
            "activespecial" => {
                let (name, monitor) = pair();
                HyprEvent::ActiveSpecial { name, monitor }
            }
            "focusedmon" => {
                let (monitor, workspace) = pair();
                HyprEvent::FocusedMonitor { monitor, workspace }
            }
            _ => HyprEvent::Other {
                name: name.to_string(),
                data: data.to_string(),
            },
        };
        Some(event)
    }

    /// Events that can change the set or state of workspaces.
    pub fn touches_workspaces(&self) -> bool {
        matches!(
            self,
            HyprEvent::Workspace { .. }
                | HyprEvent::WorkspaceV2 { .. }
                | HyprEvent::CreateWorkspace { .. }
                | HyprEvent::DestroyWorkspace { .. }
                | HyprEvent::ActiveSpecial { .. }
                | HyprEvent::FocusedMonitor { .. }
        )
    }
}

/// Subscribes to the event socket on a background task. Events arrive on the
/// returned channel; it closes when the socket does.
pub async fn spawn_listener() -> Result<mpsc::UnboundedReceiver<HyprEvent>, IpcError> {
    spawn_listener_at(&event_socket_path()?).await
}

pub async fn spawn_listener_at(path: &Path) -> Result<mpsc::UnboundedReceiver<HyprEvent>, IpcError> {
    let stream = UnixStream::connect(path).await?;
    log_info("HYPR", &format!("Subscribed to {:?}", path));

    let (tx, rx) = mpsc::unbounded_channel();
    tokio::spawn(async move {
        let mut reader = BufReader::new(stream);
        let mut raw = Vec::new();
        loop {
            raw.clear();
            match reader.read_until(b'\n', &mut raw).await {
                Ok(0) => {
                    log_info("HYPR", "Event socket closed");
                    break;
                }
                Ok(_) => {
                    // Window titles are not guaranteed to be UTF-8.
                    let line = String::from_utf8_lossy(&raw);
                    let Some(event) = HyprEvent::parse(&line) else {
                        continue;
                    };
                    if tx.send(event).is_err() {
                        log_debug("HYPR", "Event receiver dropped, stopping listener");
                        break;
                    }
                }
                Err(e) => {
                    log_error("HYPR", &format!("Event socket read failed: {}", e));
                    break;
                }
            }
        }
    });
    Ok(rx)
}
