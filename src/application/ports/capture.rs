//! Capture handle provider port

use async_trait::async_trait;
use thiserror::Error;

/// Opaque handle granting an isolated context capture access to the media
/// stream playing in a tab.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CaptureHandle(String);

impl CaptureHandle {
    /// Wrap a shell-issued handle token
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Get the handle token
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Capture handle acquisition errors
#[derive(Debug, Clone, Error)]
pub enum CaptureHandleError {
    #[error("No capturable media stream in tab {tab_id}")]
    NoStream { tab_id: u32 },

    #[error("Capture handle acquisition failed: {0}")]
    AcquisitionFailed(String),
}

/// Port for mapping a tab to a capture-stream handle
#[async_trait]
pub trait CaptureHandleProvider: Send + Sync {
    /// Resolve a capture handle for the media stream playing in `tab_id`.
    async fn handle_for_tab(&self, tab_id: u32) -> Result<CaptureHandle, CaptureHandleError>;
}
