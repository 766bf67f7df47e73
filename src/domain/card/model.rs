//! Flashcard model and post-capture actions

use serde::{Deserialize, Serialize};

/// What to do with a card after it has been persisted.
/// At most one post-capture action runs per published card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PostCaptureAction {
    /// Persist only
    #[default]
    None,
    /// Open the review dialog in the playback context
    ShowDialog,
    /// Overwrite the most recently exported card
    UpdateLastCard,
    /// Export a fresh card immediately
    ExportCard,
}

/// A captured flashcard.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CardModel {
    /// Pre-assigned id, if the caller already has one
    pub id: Option<String>,
    /// Subtitle or sentence text the card was mined from
    pub text: String,
    /// Playback position of the capture, in milliseconds
    pub media_timestamp_ms: u64,
    /// Base64-encoded audio clip, when one was captured
    pub audio_base64: Option<String>,
    /// Page the card was mined from
    pub source_url: Option<String>,
}

impl CardModel {
    /// Display name for the card: the mined text, or the playback position
    /// when the card has no text.
    pub fn card_name(&self) -> String {
        if self.text.trim().is_empty() {
            human_readable_time(self.media_timestamp_ms)
        } else {
            self.text.clone()
        }
    }
}

/// Format a media timestamp as `m:ss.mmm`, with hours included when nonzero.
pub fn human_readable_time(ms: u64) -> String {
    let millis = ms % 1000;
    let total_secs = ms / 1000;
    let seconds = total_secs % 60;
    let minutes = (total_secs / 60) % 60;
    let hours = total_secs / 3600;

    if hours > 0 {
        format!("{}:{:02}:{:02}.{:03}", hours, minutes, seconds, millis)
    } else {
        format!("{}:{:02}.{:03}", minutes, seconds, millis)
    }
}
