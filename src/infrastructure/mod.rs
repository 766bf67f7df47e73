//! Infrastructure layer - Adapter implementations
//!
//! Contains concrete implementations of the port interfaces, integrating with
//! external systems like the native capture host, AnkiConnect, and the
//! desktop notification service.

pub mod anki;
pub mod config;
pub mod history;
pub mod host;
pub mod notification;
pub mod recording;

// Re-export adapters
pub use anki::AnkiConnectExporter;
pub use config::XdgConfigStore;
pub use history::FileHistoryRepository;
pub use host::NativeHostClient;
#[cfg(unix)]
pub use host::{SocketPath, UnixSocketTransport};
pub use notification::NotifyRustNotifier;
pub use recording::{
    FallbackRecorder, NativeProcessRecorder, OffscreenStreamRecorder, PageStreamRecorder,
};
