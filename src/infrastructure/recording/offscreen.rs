//! Offscreen-document stream capture delegate
//!
//! Same contract as in-page capture, but the recording runs in an isolated
//! offscreen context: a capture handle is resolved for the requesting tab and
//! attached to the start command; stop is relayed without one.

use async_trait::async_trait;

use crate::application::ports::{
    AudioRecorderDelegate, CaptureCommand, CaptureHandleProvider, CaptureReply, MessageBus,
};
use crate::domain::recording::{
    Duration, RequestId, Requester, StartError, StopAudio, StopError,
};

/// Recorder that captures in the offscreen context
pub struct OffscreenStreamRecorder<P, B>
where
    P: CaptureHandleProvider,
    B: MessageBus,
{
    handles: P,
    bus: B,
}

impl<P, B> OffscreenStreamRecorder<P, B>
where
    P: CaptureHandleProvider,
    B: MessageBus,
{
    /// Create an offscreen recorder over the given handle provider and bus
    pub fn new(handles: P, bus: B) -> Self {
        Self { handles, bus }
    }

    async fn start_command(
        &self,
        tab_id: u32,
        command: CaptureCommand,
    ) -> Result<(), StartError> {
        let handle = self
            .handles
            .handle_for_tab(tab_id)
            .await
            .map_err(|e| StartError::other(e.to_string()))?;

        match self.bus.send_to_offscreen(command, Some(&handle)).await {
            Ok(CaptureReply::Started) => Ok(()),
            Ok(CaptureReply::StartFailed(e)) => Err(e),
            Ok(reply) => Err(StartError::other(format!(
                "Unexpected reply to start command: {:?}",
                reply
            ))),
            Err(e) => Err(StartError::other(e.to_string())),
        }
    }
}

#[async_trait]
impl<P, B> AudioRecorderDelegate for OffscreenStreamRecorder<P, B>
where
    P: CaptureHandleProvider,
    B: MessageBus,
{
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
        self.start_command(requester.tab_id, command).await
    }

    async fn start(
        &self,
        request_id: &RequestId,
        requester: &Requester,
    ) -> Result<(), StartError> {
        let command = CaptureCommand::Start {
            request_id: request_id.clone(),
        };
        self.start_command(requester.tab_id, command).await
    }

    async fn stop(
        &self,
        encode_mp3: bool,
        _requester: &Requester,
    ) -> Result<StopAudio, StopError> {
        match self
            .bus
            .send_to_offscreen(CaptureCommand::Stop { encode_mp3 }, None)
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
