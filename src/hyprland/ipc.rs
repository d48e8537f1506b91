use super::types::{ActiveWindow, Monitor, Workspace};
use crate::error::IpcError;
use crate::modules::logging::log_debug;
use serde::de::DeserializeOwned;
use std::env;
use std::io::{Read, Write};
use std::os::unix::net::UnixStream;
use std::path::{Path, PathBuf};

const CONTROL_SOCKET: &str = ".socket.sock";
const EVENT_SOCKET: &str = ".socket2.sock";

/// Directory holding the sockets of the running Hyprland instance.
pub fn socket_dir() -> Result<PathBuf, IpcError> {
    let signature = env::var("HYPRLAND_INSTANCE_SIGNATURE").map_err(|_| IpcError::NotRunning)?;
    let runtime = env::var_os("XDG_RUNTIME_DIR").map(PathBuf::from);
    Ok(pick_socket_dir(runtime.as_deref(), &signature))
}

/// Newer Hyprland keeps its sockets under `$XDG_RUNTIME_DIR/hypr`, older
/// releases under `/tmp/hypr`.
fn pick_socket_dir(runtime: Option<&Path>, signature: &str) -> PathBuf {
    if let Some(dir) = runtime.map(|r| r.join("hypr").join(signature))
        && dir.exists()
    {
        return dir;
    }
    PathBuf::from("/tmp/hypr").join(signature)
}

pub fn event_socket_path() -> Result<PathBuf, IpcError> {
    Ok(socket_dir()?.join(EVENT_SOCKET))
}

/// Request/reply client for Hyprland's control socket. Every call opens a
/// fresh connection, as `hyprctl` does.
#[derive(Debug, Clone)]
pub struct HyprCtl {
    socket: PathBuf,
}

impl HyprCtl {
    pub fn from_env() -> Result<Self, IpcError> {
        Ok(Self::at(socket_dir()?.join(CONTROL_SOCKET)))
    }

    pub fn at(socket: impl Into<PathBuf>) -> Self {
        Self {
            socket: socket.into(),
        }
    }

    /// One blocking round trip.
    pub fn send_command(&self, command: &str) -> Result<String, IpcError> {
        let mut stream = UnixStream::connect(&self.socket)?;
        stream.write_all(command.as_bytes())?;
        let mut reply = String::new();
        stream.read_to_string(&mut reply)?;
        log_debug("HYPR", &format!("{} -> {} bytes", command, reply.len()));
        Ok(reply)
    }

    fn query<T: DeserializeOwned>(&self, what: &str) -> Result<T, IpcError> {
        let reply = self.send_command(&format!("j/{}", what))?;
        Ok(serde_json::from_str(&reply)?)
    }

    pub fn monitors(&self) -> Result<Vec<Monitor>, IpcError> {
        self.query("monitors")
    }

    pub fn workspaces(&self) -> Result<Vec<Workspace>, IpcError> {
        self.query("workspaces")
    }

    pub fn active_workspace(&self) -> Result<Workspace, IpcError> {
        self.query("activeworkspace")
    }

    /// `None` when nothing has focus (Hyprland replies `{}`).
    pub fn active_window(&self) -> Result<Option<ActiveWindow>, IpcError> {
        let value: serde_json::Value = self.query("activewindow")?;
        if value.as_object().is_none_or(|o| o.is_empty()) {
            return Ok(None);
        }
        Ok(Some(serde_json::from_value(value)?))
    }

    /// Runs `dispatch <args>`; Hyprland answers `ok` on success.
    pub fn dispatch(&self, args: &str) -> Result<(), IpcError> {
        let command = format!("dispatch {}", args);
        let reply = self.send_command(&command)?;
        if reply.trim() == "ok" {
            Ok(())
        } else {
            Err(IpcError::Rejected {
                command,
                reply: reply.trim().to_string(),
            })
        }
    }
}
