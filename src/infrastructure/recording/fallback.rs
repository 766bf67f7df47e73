//! Composite fallback recorder
//!
//! Tries in-page capture first and falls back to the native capture host when
//! the playback surface refuses raw sample access. The switch is invisible to
//! the user except for a one-time notice when the host itself is missing.

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::application::ports::{AudioRecorderDelegate, NotificationIcon, Notifier};
use crate::domain::recording::{
    Duration, RequestId, Requester, StartError, StopAudio, StopError,
};

/// Which wrapped variant serves `stop` for the most recent recording
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum LiveStrategy {
    #[default]
    Primary,
    Fallback,
}

/// Composite recorder with primary-then-fallback start semantics.
///
/// Exactly one fallback attempt per start, no further cascading. `stop`
/// routes to whichever variant was marked live by the most recent successful
/// start; with none live it goes to the primary, whose own "no recording"
/// failure is the natural answer.
pub struct FallbackRecorder<P, F, N>
where
    P: AudioRecorderDelegate,
    F: AudioRecorderDelegate,
    N: Notifier,
{
    primary: P,
    fallback: F,
    notifier: N,
    live: Mutex<LiveStrategy>,
    notice_shown: AtomicBool,
}

impl<P, F, N> FallbackRecorder<P, F, N>
where
    P: AudioRecorderDelegate,
    F: AudioRecorderDelegate,
    N: Notifier,
{
    /// Create a composite over the given primary and fallback variants
    pub fn new(primary: P, fallback: F, notifier: N) -> Self {
        Self {
            primary,
            fallback,
            notifier,
            live: Mutex::new(LiveStrategy::Primary),
            notice_shown: AtomicBool::new(false),
        }
    }

    /// Shown at most once per recorder lifetime, however many recordings fail
    /// the same way afterwards.
    async fn note_host_missing(&self) {
        if self.notice_shown.swap(true, Ordering::SeqCst) {
            return;
        }

        let _ = self
            .notifier
            .notify(
                "ClipMiner: native capture host required",
                "Recording audio from protected media needs the native capture host. \
                 See the installation guide for setup instructions.",
                NotificationIcon::Warning,
            )
            .await;
    }
}

#[async_trait]
impl<P, F, N> AudioRecorderDelegate for FallbackRecorder<P, F, N>
where
    P: AudioRecorderDelegate,
    F: AudioRecorderDelegate,
    N: Notifier,
{
    async fn start_with_timeout(
        &self,
        duration: Duration,
        encode_mp3: bool,
        request_id: &RequestId,
        requester: &Requester,
    ) -> Result<(), StartError> {
        match self
            .primary
            .start_with_timeout(duration, encode_mp3, request_id, requester)
            .await
        {
            Ok(()) => {
                *self.live.lock().await = LiveStrategy::Primary;
                Ok(())
            }
            Err(e) if e.is_drm_protected() => {
                let fallback_result = self
                    .fallback
                    .start_with_timeout(duration, encode_mp3, request_id, requester)
                    .await;

                match &fallback_result {
                    Ok(()) => *self.live.lock().await = LiveStrategy::Fallback,
                    Err(_) => {
                        *self.live.lock().await = LiveStrategy::Primary;
                        self.note_host_missing().await;
                    }
                }

                fallback_result
            }
            Err(e) => Err(e),
        }
    }

    async fn start(
        &self,
        request_id: &RequestId,
        requester: &Requester,
    ) -> Result<(), StartError> {
        match self.primary.start(request_id, requester).await {
            Ok(()) => {
                *self.live.lock().await = LiveStrategy::Primary;
                Ok(())
            }
            // The host cannot do open-ended capture, so a protection refusal
            // keeps the primary's failure.
            Err(e) => Err(e),
        }
    }

    async fn stop(
        &self,
        encode_mp3: bool,
        requester: &Requester,
    ) -> Result<StopAudio, StopError> {
        let live = *self.live.lock().await;
        match live {
            LiveStrategy::Primary => self.primary.stop(encode_mp3, requester).await,
            LiveStrategy::Fallback => self.fallback.stop(encode_mp3, requester).await,
        }
    }
}
