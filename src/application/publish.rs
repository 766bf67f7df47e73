//! Card publication use case

use std::sync::atomic::{AtomicBool, Ordering};

use thiserror::Error;
use uuid::Uuid;

use crate::domain::card::{CardModel, PostCaptureAction};
use crate::domain::config::AnkiSettings;
use crate::domain::error::ConfigError;
use crate::domain::recording::Requester;

use super::ports::{
    CardEvent, CardExporter, ConfigStore, ExportError, ExportMode, HistoryRecord,
    HistoryRepository, MessageBus,
};

/// Errors from the publication use case
#[derive(Debug, Error)]
pub enum PublishError {
    #[error("Export failed: {0}")]
    Export(#[from] ExportError),

    #[error("Failed to load settings: {0}")]
    Settings(#[from] ConfigError),
}

/// Publication flow for captured cards.
///
/// Every published card is persisted to the capture history first; at most one
/// post-capture action follows. Bulk export never halts the batch: each card
/// produces exactly one forwarded event, failures encoded as fields on it.
pub struct CardPublisher<C, E, H, B>
where
    C: ConfigStore,
    E: CardExporter,
    H: HistoryRepository,
    B: MessageBus,
{
    config: C,
    exporter: E,
    history: H,
    bus: B,
    bulk_export_cancelled: AtomicBool,
}

impl<C, E, H, B> CardPublisher<C, E, H, B>
where
    C: ConfigStore,
    E: CardExporter,
    H: HistoryRepository,
    B: MessageBus,
{
    /// Create a new publisher
    pub fn new(config: C, exporter: E, history: H, bus: B) -> Self {
        Self {
            config,
            exporter,
            history,
            bus,
            bulk_export_cancelled: AtomicBool::new(false),
        }
    }

    /// Abort any bulk export in progress; subsequent bulk publishes only
    /// persist.
    pub fn cancel_bulk_export(&self) {
        self.bulk_export_cancelled.store(true, Ordering::SeqCst);
    }

    /// Re-arm bulk exporting after a cancellation
    pub fn reset_bulk_export(&self) {
        self.bulk_export_cancelled.store(false, Ordering::SeqCst);
    }

    /// Persist a card and run its post-capture action.
    ///
    /// Without a requester there is no playback context to talk back to, so
    /// the card is only persisted. Failures of the post-capture action are
    /// forwarded to the playback context as an error event and returned.
    pub async fn publish(
        &self,
        card: CardModel,
        action: PostCaptureAction,
        requester: Option<&Requester>,
    ) -> Result<(), PublishError> {
        let id = Uuid::new_v4().to_string();
        let saved = self.save_to_history(&id, &card).await;

        let Some(requester) = requester else {
            return Ok(());
        };

        let result = self.post_capture(&card, &id, action, saved, requester).await;

        if let Err(ref e) = result {
            let _ = self
                .bus
                .notify_page(
                    requester,
                    CardEvent::Error {
                        message: e.to_string(),
                    },
                )
                .await;
        }

        result
    }

    /// Persist a card as part of a bulk export and forward exactly one
    /// exported event, even when the export fails.
    pub async fn publish_bulk(
        &self,
        card: CardModel,
        requester: Option<&Requester>,
    ) -> Result<(), PublishError> {
        let id = Uuid::new_v4().to_string();
        let _ = self.save_to_history(&id, &card).await;

        let Some(requester) = requester else {
            return Ok(());
        };

        if self.bulk_export_cancelled.load(Ordering::SeqCst) {
            return Ok(());
        }

        self.export_bulk(&card, requester).await;
        Ok(())
    }

    async fn post_capture(
        &self,
        card: &CardModel,
        id: &str,
        action: PostCaptureAction,
        saved: bool,
        requester: &Requester,
    ) -> Result<(), PublishError> {
        match action {
            PostCaptureAction::ShowDialog => {
                let _ = self
                    .bus
                    .notify_page(
                        requester,
                        CardEvent::ShowReviewDialog {
                            card: card.clone(),
                            id: id.to_string(),
                        },
                    )
                    .await;
                Ok(())
            }
            PostCaptureAction::UpdateLastCard => {
                let settings = self.anki_settings().await?;
                let card_name = self
                    .exporter
                    .export(card, &settings, ExportMode::UpdateLast)
                    .await?;
                let _ = self
                    .bus
                    .notify_page(
                        requester,
                        CardEvent::Updated {
                            card: card.clone(),
                            card_name,
                        },
                    )
                    .await;
                Ok(())
            }
            PostCaptureAction::ExportCard => {
                let settings = self.anki_settings().await?;
                let card_name = self
                    .exporter
                    .export(card, &settings, ExportMode::Default)
                    .await?;
                let _ = self
                    .bus
                    .notify_page(
                        requester,
                        CardEvent::Exported {
                            card: card.clone(),
                            card_name,
                            bulk: false,
                            skipped_duplicate: false,
                            export_error: None,
                        },
                    )
                    .await;
                Ok(())
            }
            PostCaptureAction::None => {
                if saved {
                    let _ = self
                        .bus
                        .notify_page(
                            requester,
                            CardEvent::Saved {
                                card: card.clone(),
                                card_name: card.card_name(),
                            },
                        )
                        .await;
                }
                Ok(())
            }
        }
    }

    /// One exported event per card, no matter what. A duplicate is a skip,
    /// anything else rides along as `export_error`.
    async fn export_bulk(&self, card: &CardModel, requester: &Requester) {
        let event = match self.anki_settings().await {
            Ok(settings) => match self.exporter.export(card, &settings, ExportMode::Default).await
            {
                Ok(card_name) => CardEvent::Exported {
                    card: card.clone(),
                    card_name,
                    bulk: true,
                    skipped_duplicate: false,
                    export_error: None,
                },
                Err(ExportError::DuplicateNote) => CardEvent::Exported {
                    card: card.clone(),
                    card_name: String::new(),
                    bulk: true,
                    skipped_duplicate: true,
                    export_error: None,
                },
                Err(e) => CardEvent::Exported {
                    card: card.clone(),
                    card_name: String::new(),
                    bulk: true,
                    skipped_duplicate: false,
                    export_error: Some(e.to_string()),
                },
            },
            Err(e) => CardEvent::Exported {
                card: card.clone(),
                card_name: String::new(),
                bulk: true,
                skipped_duplicate: false,
                export_error: Some(e.to_string()),
            },
        };

        let _ = self.bus.notify_page(requester, event).await;
    }

    async fn save_to_history(&self, id: &str, card: &CardModel) -> bool {
        let record = HistoryRecord::from_card(id, card);
        match self.history.save(&record).await {
            Ok(()) => true,
            Err(e) => {
                eprintln!("Warning: failed to save capture history: {}", e);
                false
            }
        }
    }

    async fn anki_settings(&self) -> Result<AnkiSettings, PublishError> {
        Ok(self.config.load().await?.anki_settings())
    }
}
