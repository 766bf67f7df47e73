//! Native-process capture delegate
//!
//! Delegates entirely to the out-of-process capture host. The host's model is
//! "record for N ms, then deliver", so only timed recording is supported.
//! Audio reaches the caller through the captured-audio channel rather than the
//! stop reply, because stop may be issued before the host has finished.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{oneshot, Mutex};

use crate::application::ports::{AudioRecorderDelegate, CapturedAudioSender};
use crate::domain::recording::{
    CapturedAudio, Duration, RequestId, Requester, StartError, StopAudio, StopError,
};
use crate::infrastructure::host::{HostTransport, NativeHostClient};

const HOST_MISSING: &str =
    "Native capture host is not installed. See the installation guide for setup instructions.";

/// Recorder backed by the native capture host
pub struct NativeProcessRecorder<T: HostTransport> {
    client: Arc<NativeHostClient<T>>,
    audio_tx: CapturedAudioSender,
    /// Completion signal of the in-flight recording task. Starting a new
    /// recording while one is outstanding replaces this slot (last writer
    /// wins); overlapping recordings on one delegate are out of contract.
    pending: Mutex<Option<oneshot::Receiver<()>>>,
}

impl<T: HostTransport + 'static> NativeProcessRecorder<T> {
    /// Create a recorder over the given client; captured audio is delivered
    /// through `audio_tx`, keyed by request id.
    pub fn new(client: Arc<NativeHostClient<T>>, audio_tx: CapturedAudioSender) -> Self {
        Self {
            client,
            audio_tx,
            pending: Mutex::new(None),
        }
    }
}

#[async_trait]
impl<T: HostTransport + 'static> AudioRecorderDelegate for NativeProcessRecorder<T> {
    async fn start_with_timeout(
        &self,
        duration: Duration,
        encode_mp3: bool,
        request_id: &RequestId,
        _requester: &Requester,
    ) -> Result<(), StartError> {
        if !self.client.check_availability().await {
            return Err(StartError::other(HOST_MISSING));
        }

        let client = Arc::clone(&self.client);
        let audio_tx = self.audio_tx.clone();
        let request_id = request_id.clone();
        let (done_tx, done_rx) = oneshot::channel();

        tokio::spawn(async move {
            let audio_base64 = match client.record_audio(duration, encode_mp3).await {
                Ok(reply) if reply.success => reply.audio_base64.unwrap_or_default(),
                Ok(reply) => {
                    eprintln!(
                        "Warning: native capture failed: {}",
                        reply.error.unwrap_or_else(|| "unknown error".to_string())
                    );
                    String::new()
                }
                Err(e) => {
                    eprintln!("Warning: native capture error: {}", e);
                    String::new()
                }
            };

            // Deliver even when empty so the consumer is never left waiting
            let _ = audio_tx.send(CapturedAudio {
                request_id,
                audio_base64,
            });
            let _ = done_tx.send(());
        });

        *self.pending.lock().await = Some(done_rx);
        Ok(())
    }

    async fn start(
        &self,
        _request_id: &RequestId,
        _requester: &Requester,
    ) -> Result<(), StartError> {
        Err(StartError::other(
            "Native capture host only supports timed recording",
        ))
    }

    async fn stop(
        &self,
        _encode_mp3: bool,
        _requester: &Requester,
    ) -> Result<StopAudio, StopError> {
        let pending = self.pending.lock().await.take();
        let Some(done) = pending else {
            return Err(StopError::no_recording());
        };

        // The channel is authoritative for the audio; stop only waits for the
        // in-flight recording to settle.
        let _ = done.await;
        Ok(StopAudio::empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::host::{HostConnection, HostError, HostRequest, HostResponse};
    use tokio::sync::mpsc;

    struct CannedTransport {
        reply: Result<HostResponse, HostError>,
    }

    #[async_trait]
    impl HostTransport for CannedTransport {
        async fn connect(&self) -> Result<Box<dyn HostConnection>, HostError> {
            Ok(Box::new(CannedConnection {
                reply: self.reply.clone(),
            }))
        }
    }

    struct CannedConnection {
        reply: Result<HostResponse, HostError>,
    }

    #[async_trait]
    impl HostConnection for CannedConnection {
        async fn send(&mut self, _request: &HostRequest) -> Result<(), HostError> {
            Ok(())
        }

        async fn receive(&mut self) -> Result<HostResponse, HostError> {
            self.reply.clone()
        }
    }

    struct UnreachableTransport;

    #[async_trait]
    impl HostTransport for UnreachableTransport {
        async fn connect(&self) -> Result<Box<dyn HostConnection>, HostError> {
            Err(HostError::ConnectFailed("no such socket".to_string()))
        }
    }

    fn recorder_with_reply(
        reply: Result<HostResponse, HostError>,
    ) -> (
        NativeProcessRecorder<CannedTransport>,
        mpsc::UnboundedReceiver<CapturedAudio>,
    ) {
        let client = Arc::new(NativeHostClient::new(CannedTransport { reply }));
        let (tx, rx) = mpsc::unbounded_channel();
        (NativeProcessRecorder::new(client, tx), rx)
    }

    fn requester() -> Requester {
        Requester::new(1, "https://example.com/video.mp4")
    }

    fn recording_reply(audio: &str) -> HostResponse {
        HostResponse {
            success: true,
            audio_base64: Some(audio.to_string()),
            format: Some("wav".to_string()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn delivers_audio_through_the_channel() {
        let (recorder, mut rx) = recorder_with_reply(Ok(recording_reply("QUJD")));

        recorder
            .start_with_timeout(
                Duration::from_millis(100),
                false,
                &RequestId::new("r1"),
                &requester(),
            )
            .await
            .unwrap();

        let captured = rx.recv().await.unwrap();
        assert_eq!(captured.request_id, RequestId::new("r1"));
        assert_eq!(captured.audio_base64, "QUJD");
    }

    #[tokio::test]
    async fn failed_recording_still_delivers_empty_audio() {
        let reply = HostResponse {
            success: false,
            error: Some("device busy".to_string()),
            ..Default::default()
        };
        let (recorder, mut rx) = recorder_with_reply(Ok(reply));

        recorder
            .start_with_timeout(
                Duration::from_millis(100),
                false,
                &RequestId::new("r1"),
                &requester(),
            )
            .await
            .unwrap();

        let captured = rx.recv().await.unwrap();
        assert!(captured.is_empty());
    }

    #[tokio::test]
    async fn stop_waits_for_completion_and_returns_no_audio() {
        let (recorder, mut rx) = recorder_with_reply(Ok(recording_reply("QUJD")));
        let requester = requester();

        recorder
            .start_with_timeout(
                Duration::from_millis(100),
                false,
                &RequestId::new("r1"),
                &requester,
            )
            .await
            .unwrap();

        let audio = recorder.stop(false, &requester).await.unwrap();
        assert!(audio.audio_base64.is_none());

        // The channel already has the clip by the time stop returns
        let captured = rx.try_recv().unwrap();
        assert_eq!(captured.audio_base64, "QUJD");
    }

    #[tokio::test]
    async fn stop_without_start_is_no_recording() {
        let (recorder, _rx) = recorder_with_reply(Ok(recording_reply("QUJD")));

        let err = recorder.stop(false, &requester()).await.unwrap_err();
        assert_eq!(err, StopError::no_recording());
    }

    #[tokio::test]
    async fn second_stop_is_no_recording() {
        let (recorder, _rx) = recorder_with_reply(Ok(recording_reply("QUJD")));
        let requester = requester();

        recorder
            .start_with_timeout(
                Duration::from_millis(100),
                false,
                &RequestId::new("r1"),
                &requester,
            )
            .await
            .unwrap();

        recorder.stop(false, &requester).await.unwrap();
        let err = recorder.stop(false, &requester).await.unwrap_err();
        assert_eq!(err, StopError::no_recording());
    }

    #[tokio::test]
    async fn unbounded_start_is_unsupported() {
        let (recorder, _rx) = recorder_with_reply(Ok(recording_reply("QUJD")));

        let err = recorder
            .start(&RequestId::new("r1"), &requester())
            .await
            .unwrap_err();
        assert!(!err.is_drm_protected());
        assert!(err.message.contains("timed recording"));
    }

    #[tokio::test]
    async fn missing_host_fails_start_without_channel_message() {
        let client = Arc::new(NativeHostClient::new(UnreachableTransport));
        let (tx, mut rx) = mpsc::unbounded_channel();
        let recorder = NativeProcessRecorder::new(client, tx);

        let err = recorder
            .start_with_timeout(
                Duration::from_millis(100),
                false,
                &RequestId::new("r1"),
                &requester(),
            )
            .await
            .unwrap_err();

        assert!(err.message.contains("not installed"));
        assert!(rx.try_recv().is_err());
    }
}
