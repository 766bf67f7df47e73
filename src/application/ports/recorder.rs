//! Recorder delegate port interface

use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::domain::recording::{
    CapturedAudio, Duration, RequestId, Requester, StartError, StopAudio, StopError,
};

/// Channel sender used by callback-based recorder variants to deliver audio
/// out-of-band from `stop`, keyed by request id.
pub type CapturedAudioSender = mpsc::UnboundedSender<CapturedAudio>;

/// Port for the audio capture capability, implemented by each capture strategy.
///
/// Failures are returned as structured values; implementations must not panic
/// across this boundary. Callers are expected to issue start/stop pairs
/// sequentially per delegate instance.
#[async_trait]
pub trait AudioRecorderDelegate: Send + Sync {
    /// Begin a bounded recording.
    ///
    /// Returns once the recording has been initiated, never after the full
    /// `duration`. A successful return is a promise that the recording will
    /// eventually resolve (timed completion, explicit stop, or failure).
    async fn start_with_timeout(
        &self,
        duration: Duration,
        encode_mp3: bool,
        request_id: &RequestId,
        requester: &Requester,
    ) -> Result<(), StartError>;

    /// Begin an open-ended recording.
    ///
    /// Variants that only support timed capture return a structured failure
    /// with an explanatory message rather than panicking.
    async fn start(&self, request_id: &RequestId, requester: &Requester)
        -> Result<(), StartError>;

    /// End the current recording for this delegate and return final status.
    ///
    /// Callback-based variants return no inline audio; their captured-audio
    /// channel is authoritative.
    async fn stop(&self, encode_mp3: bool, requester: &Requester)
        -> Result<StopAudio, StopError>;
}

/// Blanket implementation for boxed delegates
#[async_trait]
impl AudioRecorderDelegate for Box<dyn AudioRecorderDelegate> {
    async fn start_with_timeout(
        &self,
        duration: Duration,
        encode_mp3: bool,
        request_id: &RequestId,
        requester: &Requester,
    ) -> Result<(), StartError> {
        self.as_ref()
            .start_with_timeout(duration, encode_mp3, request_id, requester)
            .await
    }

    async fn start(
        &self,
        request_id: &RequestId,
        requester: &Requester,
    ) -> Result<(), StartError> {
        self.as_ref().start(request_id, requester).await
    }

    async fn stop(
        &self,
        encode_mp3: bool,
        requester: &Requester,
    ) -> Result<StopAudio, StopError> {
        self.as_ref().stop(encode_mp3, requester).await
    }
}
