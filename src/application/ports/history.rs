//! Capture history repository port

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::card::CardModel;

/// History persistence errors
#[derive(Debug, Clone, Error)]
pub enum HistoryError {
    #[error("Failed to read history: {0}")]
    ReadFailed(String),

    #[error("Failed to write history: {0}")]
    WriteFailed(String),
}

/// A persisted capture history entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryRecord {
    pub id: String,
    pub text: String,
    pub media_timestamp_ms: u64,
    pub source_url: Option<String>,
    pub audio_base64: Option<String>,
    /// Unix timestamp in milliseconds at save time
    pub saved_at_ms: u64,
}

impl HistoryRecord {
    /// Build a history entry from a card, stamping the current time.
    /// A card that already carries an id keeps it; `fallback_id` is used
    /// otherwise.
    pub fn from_card(fallback_id: &str, card: &CardModel) -> Self {
        let saved_at_ms = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0);

        Self {
            id: card.id.clone().unwrap_or_else(|| fallback_id.to_string()),
            text: card.text.clone(),
            media_timestamp_ms: card.media_timestamp_ms,
            source_url: card.source_url.clone(),
            audio_base64: card.audio_base64.clone(),
            saved_at_ms,
        }
    }
}

/// Port for capture history persistence
#[async_trait]
pub trait HistoryRepository: Send + Sync {
    /// Persist one history entry.
    async fn save(&self, record: &HistoryRecord) -> Result<(), HistoryError>;

    /// List all persisted entries, oldest first.
    async fn list(&self) -> Result<Vec<HistoryRecord>, HistoryError>;

    /// Delete all persisted entries.
    async fn clear(&self) -> Result<(), HistoryError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_card_keeps_existing_id() {
        let card = CardModel {
            id: Some("card-id".to_string()),
            text: "hello".to_string(),
            ..Default::default()
        };
        let record = HistoryRecord::from_card("fallback", &card);
        assert_eq!(record.id, "card-id");
    }

    #[test]
    fn from_card_uses_fallback_id() {
        let card = CardModel {
            text: "hello".to_string(),
            ..Default::default()
        };
        let record = HistoryRecord::from_card("fallback", &card);
        assert_eq!(record.id, "fallback");
        assert!(record.saved_at_ms > 0);
    }
}
