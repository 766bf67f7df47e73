//! Recording start/stop outcome types
//!
//! Failures cross the recorder delegate boundary as structured values, never
//! as panics. The `DrmProtected` start code is the signal the composite
//! recorder keys its fallback decision off.

use std::fmt;

use thiserror::Error;

/// Classification of a failed start
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StartErrorCode {
    /// The playback surface refused raw sample access due to content protection
    DrmProtected,
    /// Any other start failure
    Other,
}

impl StartErrorCode {
    /// Get the string representation
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::DrmProtected => "drm-protected",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for StartErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Structured failure returned when a recording could not be started
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct StartError {
    pub code: StartErrorCode,
    pub message: String,
}

impl StartError {
    /// Content-protection refusal
    pub fn drm_protected(message: impl Into<String>) -> Self {
        Self {
            code: StartErrorCode::DrmProtected,
            message: message.into(),
        }
    }

    /// Any other start failure
    pub fn other(message: impl Into<String>) -> Self {
        Self {
            code: StartErrorCode::Other,
            message: message.into(),
        }
    }

    /// Whether this failure should trigger the fallback strategy
    pub fn is_drm_protected(&self) -> bool {
        self.code == StartErrorCode::DrmProtected
    }
}

/// Classification of a failed stop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StopErrorCode {
    /// Stop was called with no recording in progress
    NoRecording,
    /// Any other stop failure
    Other,
}

impl StopErrorCode {
    /// Get the string representation
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::NoRecording => "no-recording",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for StopErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Structured failure returned when a recording could not be stopped
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct StopError {
    pub code: StopErrorCode,
    pub message: String,
}

impl StopError {
    /// Stop without a recording in progress
    pub fn no_recording() -> Self {
        Self {
            code: StopErrorCode::NoRecording,
            message: "No recording in progress".to_string(),
        }
    }

    /// Any other stop failure
    pub fn other(message: impl Into<String>) -> Self {
        Self {
            code: StopErrorCode::Other,
            message: message.into(),
        }
    }
}

/// Final payload of a successful stop.
///
/// Callback-based variants leave `audio_base64` unset; for them the
/// captured-audio channel is authoritative, because stop may be issued before
/// the asynchronous producer has finished.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StopAudio {
    pub audio_base64: Option<String>,
}

impl StopAudio {
    /// Stop acknowledgment with no inline audio
    pub const fn empty() -> Self {
        Self { audio_base64: None }
    }

    /// Stop acknowledgment carrying the captured clip inline
    pub fn with_audio(audio_base64: impl Into<String>) -> Self {
        Self {
            audio_base64: Some(audio_base64.into()),
        }
    }
}
