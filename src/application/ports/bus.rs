//! Cross-context message bus port
//!
//! The consuming shell routes these messages between the privileged process,
//! the playback context in a tab, and the isolated offscreen capture context.

use async_trait::async_trait;
use thiserror::Error;

use super::capture::CaptureHandle;
use crate::domain::card::CardModel;
use crate::domain::recording::{Duration, RequestId, Requester, StartError, StopAudio, StopError};

/// Message delivery errors
#[derive(Debug, Clone, Error)]
pub enum BusError {
    #[error("No receiver in the target context: {0}")]
    Unreachable(String),

    #[error("Message delivery failed: {0}")]
    DeliveryFailed(String),
}

/// Capture command relayed to a capture-capable context
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptureCommand {
    /// Record for a fixed duration, then deliver keyed by `request_id`
    StartWithTimeout {
        timeout: Duration,
        encode_mp3: bool,
        request_id: RequestId,
    },
    /// Record until a matching stop command arrives
    Start { request_id: RequestId },
    /// End the recording in progress
    Stop { encode_mp3: bool },
}

/// Reply produced by a capture-capable context
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptureReply {
    Started,
    StartFailed(StartError),
    Stopped(StopAudio),
    StopFailed(StopError),
}

/// Card lifecycle event forwarded to the playback context
#[derive(Debug, Clone, PartialEq)]
pub enum CardEvent {
    /// The card was persisted to the capture history
    Saved { card: CardModel, card_name: String },
    /// The most recent export was overwritten with this card
    Updated { card: CardModel, card_name: String },
    /// The card was exported (or, in bulk mode, an export was attempted)
    Exported {
        card: CardModel,
        card_name: String,
        bulk: bool,
        skipped_duplicate: bool,
        export_error: Option<String>,
    },
    /// Ask the playback context to open the review dialog for this card
    ShowReviewDialog { card: CardModel, id: String },
    /// Publication failed; show the message to the user
    Error { message: String },
}

/// Port for delivering commands and events across execution contexts
#[async_trait]
pub trait MessageBus: Send + Sync {
    /// Deliver a capture command to the playback context identified by the
    /// requester and return its reply.
    async fn send_to_page(
        &self,
        requester: &Requester,
        command: CaptureCommand,
    ) -> Result<CaptureReply, BusError>;

    /// Deliver a capture command to the isolated offscreen capture context.
    /// Start commands carry the capture handle the context should record from;
    /// stop commands carry none.
    async fn send_to_offscreen(
        &self,
        command: CaptureCommand,
        handle: Option<&CaptureHandle>,
    ) -> Result<CaptureReply, BusError>;

    /// Forward a card lifecycle event to the playback context.
    async fn notify_page(&self, requester: &Requester, event: CardEvent) -> Result<(), BusError>;
}
