//! Client side of Hyprland's two sockets: the request/reply control socket
//! (`.socket.sock`, JSON replies with the `j/` prefix) and the event socket
//! (`.socket2.sock`, one `EVENT>>DATA` line per event).

pub mod events;
pub mod ipc;
pub mod types;

pub use events::HyprEvent;
pub use ipc::HyprCtl;
