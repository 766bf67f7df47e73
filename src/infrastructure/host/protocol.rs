//! Wire protocol types for the native capture host

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Request sent to the capture host. Exactly one per connection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "camelCase")]
pub enum HostRequest {
    /// Probe that the host is installed and answering
    Ping,
    /// Record for `duration` milliseconds, then deliver the clip
    #[serde(rename_all = "camelCase")]
    Record { duration: u64, encode_mp3: bool },
}

/// Reply from the capture host. Superset of the ping and record reply shapes;
/// the responder closes the connection after sending it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HostResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio_system: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio_base64: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl HostResponse {
    /// Reply synthesized when the recording-duration race expires before the
    /// host answers.
    pub fn timed_out() -> Self {
        Self {
            success: false,
            error: Some("Recording timed out".to_string()),
            ..Default::default()
        }
    }
}

/// Errors at the capture host client boundary.
///
/// An end-of-stream before any reply is a protocol violation and gets its own
/// variant so callers can tell it apart from a clean close after the reply.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum HostError {
    #[error("Failed to connect to capture host: {0}")]
    ConnectFailed(String),

    #[error("Failed to send request to capture host: {0}")]
    SendFailed(String),

    #[error("Capture host response timeout")]
    ResponseTimeout,

    #[error("Capture host disconnected without sending a response")]
    DisconnectedWithoutResponse,

    #[error("Capture host transport error: {0}")]
    Transport(String),

    #[error("Malformed reply from capture host: {0}")]
    MalformedReply(String),
}
