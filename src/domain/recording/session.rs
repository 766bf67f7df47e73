//! Recording session identity value objects

use std::fmt;

/// Identifies the playback context that issued a recording request.
/// Immutable for the lifetime of one recording.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Requester {
    /// Tab hosting the media element
    pub tab_id: u32,
    /// Source locator of the media element within the tab
    pub src: String,
}

impl Requester {
    /// Create a new requester identity
    pub fn new(tab_id: u32, src: impl Into<String>) -> Self {
        Self {
            tab_id,
            src: src.into(),
        }
    }
}

/// Opaque, caller-generated id, unique per recording request.
/// Out-of-band audio delivery is keyed by this id.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RequestId(String);

impl RequestId {
    /// Create a request id from a caller-supplied string
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the id as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Audio delivered out-of-band by a callback-based recorder variant.
///
/// `audio_base64` is empty when the recording failed; the message is still
/// delivered so the consumer's state machine is never left waiting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedAudio {
    pub request_id: RequestId,
    pub audio_base64: String,
}

impl CapturedAudio {
    /// Whether the capture produced no audio
    pub fn is_empty(&self) -> bool {
        self.audio_base64.is_empty()
    }
}
