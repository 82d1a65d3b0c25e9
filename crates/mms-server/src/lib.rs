//! Development server with live reload for the MMS site.
//!
//! Serves the page rendered on every request, rebuilds the output directory
//! when the catalog or assets change, and tells connected browsers to reload
//! over a WebSocket.

pub mod server;
pub mod watcher;
pub mod websocket;

pub use server::{DevServer, DevServerConfig, ServerError};
pub use watcher::{FileWatcher, WatchEvent};
pub use websocket::{HmrHub, HmrMessage};
