//! Card exporter port interface

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::card::CardModel;
use crate::domain::config::AnkiSettings;

/// How an export call should treat the collection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportMode {
    /// Add a fresh note
    #[default]
    Default,
    /// Overwrite the most recently added note instead of creating one
    UpdateLast,
}

/// Export errors
#[derive(Debug, Clone, Error)]
pub enum ExportError {
    #[error("Note already exists in the collection")]
    DuplicateNote,

    #[error("No recently added note to update")]
    NoRecentNote,

    #[error("Export request failed: {0}")]
    RequestFailed(String),

    #[error("Exporter error: {0}")]
    Api(String),
}

/// Port for exporting cards to the flashcard application
#[async_trait]
pub trait CardExporter: Send + Sync {
    /// Export a card and return the name it was stored under.
    async fn export(
        &self,
        card: &CardModel,
        settings: &AnkiSettings,
        mode: ExportMode,
    ) -> Result<String, ExportError>;
}
