//! Port interfaces (traits) for external systems
//!
//! These traits define the boundaries between the application
//! and infrastructure layers.

pub mod bus;
pub mod capture;
pub mod config;
pub mod exporter;
pub mod history;
pub mod notifier;
pub mod recorder;

// Re-export common types
pub use bus::{BusError, CaptureCommand, CaptureReply, CardEvent, MessageBus};
pub use capture::{CaptureHandle, CaptureHandleError, CaptureHandleProvider};
pub use config::ConfigStore;
pub use exporter::{CardExporter, ExportError, ExportMode};
pub use history::{HistoryError, HistoryRecord, HistoryRepository};
pub use notifier::{NotificationError, NotificationIcon, Notifier};
pub use recorder::{AudioRecorderDelegate, CapturedAudioSender};
