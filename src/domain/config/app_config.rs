//! Application configuration value object

use serde::{Deserialize, Serialize};

/// Default AnkiConnect endpoint
pub const DEFAULT_ANKI_URL: &str = "http://127.0.0.1:8765";
/// Default deck cards are exported into
pub const DEFAULT_DECK: &str = "Mining";
/// Default note type used for exported cards
pub const DEFAULT_NOTE_TYPE: &str = "Basic";
/// Default note field receiving the mined sentence
pub const DEFAULT_SENTENCE_FIELD: &str = "Front";
/// Default note field receiving the audio clip
pub const DEFAULT_AUDIO_FIELD: &str = "Back";
/// Default cap on persisted capture history entries
pub const DEFAULT_HISTORY_LIMIT: usize = 1000;

/// Application configuration.
/// All fields are optional to support partial configs and merging.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    pub anki_url: Option<String>,
    pub deck: Option<String>,
    pub note_type: Option<String>,
    pub sentence_field: Option<String>,
    pub audio_field: Option<String>,
    pub tags: Option<Vec<String>>,
    pub history_limit: Option<usize>,
    pub host_socket: Option<String>,
    pub notify: Option<bool>,
}

/// Resolved Anki export settings, with defaults applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnkiSettings {
    pub url: String,
    pub deck: String,
    pub note_type: String,
    pub sentence_field: String,
    pub audio_field: String,
    pub tags: Vec<String>,
}

impl AppConfig {
    /// Create config with default values
    pub fn defaults() -> Self {
        Self {
            anki_url: Some(DEFAULT_ANKI_URL.to_string()),
            deck: Some(DEFAULT_DECK.to_string()),
            note_type: Some(DEFAULT_NOTE_TYPE.to_string()),
            sentence_field: Some(DEFAULT_SENTENCE_FIELD.to_string()),
            audio_field: Some(DEFAULT_AUDIO_FIELD.to_string()),
            tags: Some(vec!["clip-miner".to_string()]),
            history_limit: Some(DEFAULT_HISTORY_LIMIT),
            host_socket: None,
            notify: Some(false),
        }
    }

    /// Create an empty config (all None)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Merge this config with another, where other takes precedence.
    /// Only non-None values from other will override this.
    pub fn merge(self, other: Self) -> Self {
        Self {
            anki_url: other.anki_url.or(self.anki_url),
            deck: other.deck.or(self.deck),
            note_type: other.note_type.or(self.note_type),
            sentence_field: other.sentence_field.or(self.sentence_field),
            audio_field: other.audio_field.or(self.audio_field),
            tags: other.tags.or(self.tags),
            history_limit: other.history_limit.or(self.history_limit),
            host_socket: other.host_socket.or(self.host_socket),
            notify: other.notify.or(self.notify),
        }
    }

    /// Resolve the Anki export settings, filling gaps with defaults
    pub fn anki_settings(&self) -> AnkiSettings {
        AnkiSettings {
            url: self
                .anki_url
                .clone()
                .unwrap_or_else(|| DEFAULT_ANKI_URL.to_string()),
            deck: self.deck.clone().unwrap_or_else(|| DEFAULT_DECK.to_string()),
            note_type: self
                .note_type
                .clone()
                .unwrap_or_else(|| DEFAULT_NOTE_TYPE.to_string()),
            sentence_field: self
                .sentence_field
                .clone()
                .unwrap_or_else(|| DEFAULT_SENTENCE_FIELD.to_string()),
            audio_field: self
                .audio_field
                .clone()
                .unwrap_or_else(|| DEFAULT_AUDIO_FIELD.to_string()),
            tags: self
                .tags
                .clone()
                .unwrap_or_else(|| vec!["clip-miner".to_string()]),
        }
    }

    /// Get the history cap, or the default if not set
    pub fn history_limit_or_default(&self) -> usize {
        self.history_limit.unwrap_or(DEFAULT_HISTORY_LIMIT)
    }

    /// Get the notify setting, or false if not set
    pub fn notify_or_default(&self) -> bool {
        self.notify.unwrap_or(false)
    }
}
