//! In-page stream capture delegate
//!
//! Relays start/stop commands to the playback context, which captures directly
//! from its media element. A content-protected surface refuses raw sample
//! access; that refusal comes back as a `DrmProtected` start failure and is
//! what the composite recorder keys its fallback off.

use async_trait::async_trait;

use crate::application::ports::{
    AudioRecorderDelegate, CaptureCommand, CaptureReply, MessageBus,
};
use crate::domain::recording::{
    Duration, RequestId, Requester, StartError, StopAudio, StopError,
};

/// Recorder that captures inside the page via the message bus
pub struct PageStreamRecorder<B: MessageBus> {
    bus: B,
}

impl<B: MessageBus> PageStreamRecorder<B> {
    /// Create a page-stream recorder over the given bus
    pub fn new(bus: B) -> Self {
        Self { bus }
    }
}

#[async_trait]
impl<B: MessageBus> AudioRecorderDelegate for PageStreamRecorder<B> {
    async fn start_with_timeout(
        &self,
        duration: Duration,
        encode_mp3: bool,
        request_id: &RequestId,
        requester: &Requester,
    ) -> Result<(), StartError> {
        let command = CaptureCommand::StartWithTimeout {
            timeout: duration,
            encode_mp3,
            request_id: request_id.clone(),
        };

        match self.bus.send_to_page(requester, command).await {
            Ok(CaptureReply::Started) => Ok(()),
            Ok(CaptureReply::StartFailed(e)) => Err(e),
            Ok(reply) => Err(StartError::other(format!(
                "Unexpected reply to start command: {:?}",
                reply
            ))),
            Err(e) => Err(StartError::other(e.to_string())),
        }
    }

    async fn start(
        &self,
        request_id: &RequestId,
        requester: &Requester,
    ) -> Result<(), StartError> {
        let command = CaptureCommand::Start {
            request_id: request_id.clone(),
        };

        match self.bus.send_to_page(requester, command).await {
            Ok(CaptureReply::Started) => Ok(()),
            Ok(CaptureReply::StartFailed(e)) => Err(e),
            Ok(reply) => Err(StartError::other(format!(
                "Unexpected reply to start command: {:?}",
                reply
            ))),
            Err(e) => Err(StartError::other(e.to_string())),
        }
    }

    async fn stop(
        &self,
        encode_mp3: bool,
        requester: &Requester,
    ) -> Result<StopAudio, StopError> {
        match self
            .bus
            .send_to_page(requester, CaptureCommand::Stop { encode_mp3 })
            .await
        {
            Ok(CaptureReply::Stopped(audio)) => Ok(audio),
            Ok(CaptureReply::StopFailed(e)) => Err(e),
            Ok(reply) => Err(StopError::other(format!(
                "Unexpected reply to stop command: {:?}",
                reply
            ))),
            Err(e) => Err(StopError::other(e.to_string())),
        }
    }
}
