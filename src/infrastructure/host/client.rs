//! Capture host client with availability caching and timeout handling

use std::time::Duration as StdDuration;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tokio::time::{sleep, timeout};

use super::protocol::{HostError, HostRequest, HostResponse};
use crate::domain::recording::Duration;

/// Slack added to the requested duration before a record call gives up
pub const RECORDING_GRACE_MS: u64 = 5_000;

/// Absolute ceiling on the recording-duration race
pub const RECORDING_TIMEOUT_CAP_MS: u64 = 30_000;

/// Ceiling on waiting for any single reply, dead or hung peers included.
/// Independent of the requested recording duration.
pub const LIVENESS_TIMEOUT: StdDuration = StdDuration::from_secs(60);

/// Connection factory for one-request/one-reply exchanges with the capture
/// host. Each exchange opens a fresh connection.
#[async_trait]
pub trait HostTransport: Send + Sync {
    async fn connect(&self) -> Result<Box<dyn HostConnection>, HostError>;
}

/// A single-use connection to the capture host.
#[async_trait]
pub trait HostConnection: Send {
    /// Send the one request for this connection.
    async fn send(&mut self, request: &HostRequest) -> Result<(), HostError>;

    /// Wait for the one reply. Implementations must report an end-of-stream
    /// before any reply as `HostError::DisconnectedWithoutResponse`.
    async fn receive(&mut self) -> Result<HostResponse, HostError>;
}

/// Client for the out-of-process capture host.
///
/// Availability is probed once and cached for the lifetime of this instance.
/// The cache is read-then-write without a lock held across the probe; a race
/// costs at most a redundant probe, never wrong state.
pub struct NativeHostClient<T: HostTransport> {
    transport: T,
    availability: Mutex<Option<bool>>,
}

impl<T: HostTransport> NativeHostClient<T> {
    /// Create a client over the given transport
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            availability: Mutex::new(None),
        }
    }

    /// Whether the capture host is installed and answering.
    ///
    /// A connection or protocol failure counts as unavailable rather than an
    /// error; callers treat unavailability as a normal outcome.
    pub async fn check_availability(&self) -> bool {
        if let Some(available) = *self.availability.lock().await {
            return available;
        }

        let available = matches!(self.ping().await, Ok(reply) if reply.success);
        *self.availability.lock().await = Some(available);
        available
    }

    /// Probe the host
    pub async fn ping(&self) -> Result<HostResponse, HostError> {
        self.exchange(&HostRequest::Ping).await
    }

    /// Record for `duration`, racing the host's reply against
    /// `min(duration + RECORDING_GRACE_MS, RECORDING_TIMEOUT_CAP_MS)`.
    ///
    /// A lost race yields a synthesized failure reply; the abandoned exchange
    /// is dropped along with its per-call connection, so no explicit cleanup
    /// of the slower side is needed.
    pub async fn record_audio(
        &self,
        duration: Duration,
        encode_mp3: bool,
    ) -> Result<HostResponse, HostError> {
        let deadline = StdDuration::from_millis(
            (duration.as_millis() + RECORDING_GRACE_MS).min(RECORDING_TIMEOUT_CAP_MS),
        );
        let request = HostRequest::Record {
            duration: duration.as_millis(),
            encode_mp3,
        };

        tokio::select! {
            reply = self.exchange(&request) => reply,
            _ = sleep(deadline) => Ok(HostResponse::timed_out()),
        }
    }

    /// One request, one reply, fresh connection. The liveness timeout bounds
    /// the wait for the reply; on expiry the connection is dropped unanswered
    /// and the call fails with a timeout error.
    async fn exchange(&self, request: &HostRequest) -> Result<HostResponse, HostError> {
        let mut connection = self.transport.connect().await?;
        connection.send(request).await?;

        match timeout(LIVENESS_TIMEOUT, connection.receive()).await {
            Ok(reply) => reply,
            Err(_) => Err(HostError::ResponseTimeout),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    /// Transport that counts connections and hands out canned connections
    struct CannedTransport {
        connects: Arc<AtomicUsize>,
        reply: Result<HostResponse, HostError>,
    }

    impl CannedTransport {
        fn new(reply: Result<HostResponse, HostError>) -> Self {
            Self {
                connects: Arc::new(AtomicUsize::new(0)),
                reply,
            }
        }
    }

    #[async_trait]
    impl HostTransport for CannedTransport {
        async fn connect(&self) -> Result<Box<dyn HostConnection>, HostError> {
            self.connects.fetch_add(1, Ordering::SeqCst);
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

    /// Transport whose connections never produce a reply
    struct SilentTransport;

    #[async_trait]
    impl HostTransport for SilentTransport {
        async fn connect(&self) -> Result<Box<dyn HostConnection>, HostError> {
            Ok(Box::new(SilentConnection))
        }
    }

    struct SilentConnection;

    #[async_trait]
    impl HostConnection for SilentConnection {
        async fn send(&mut self, _request: &HostRequest) -> Result<(), HostError> {
            Ok(())
        }

        async fn receive(&mut self) -> Result<HostResponse, HostError> {
            std::future::pending().await
        }
    }

    /// Transport that refuses to connect
    struct UnreachableTransport;

    #[async_trait]
    impl HostTransport for UnreachableTransport {
        async fn connect(&self) -> Result<Box<dyn HostConnection>, HostError> {
            Err(HostError::ConnectFailed("no such socket".to_string()))
        }
    }

    fn pong() -> HostResponse {
        HostResponse {
            success: true,
            audio_system: Some("pulse".to_string()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn availability_probe_is_cached() {
        let transport = CannedTransport::new(Ok(pong()));
        let connects = Arc::clone(&transport.connects);
        let client = NativeHostClient::new(transport);

        assert!(client.check_availability().await);
        assert!(client.check_availability().await);

        assert_eq!(connects.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn connect_failure_means_unavailable() {
        let client = NativeHostClient::new(UnreachableTransport);
        assert!(!client.check_availability().await);
    }

    #[tokio::test]
    async fn unsuccessful_pong_means_unavailable() {
        let reply = HostResponse {
            success: false,
            error: Some("no audio system".to_string()),
            ..Default::default()
        };
        let client = NativeHostClient::new(CannedTransport::new(Ok(reply)));
        assert!(!client.check_availability().await);
    }

    #[tokio::test]
    async fn unavailability_is_cached_too() {
        let transport = CannedTransport::new(Err(HostError::ConnectFailed("gone".to_string())));
        let connects = Arc::clone(&transport.connects);
        let client = NativeHostClient::new(transport);

        assert!(!client.check_availability().await);
        assert!(!client.check_availability().await);

        assert_eq!(connects.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn record_returns_host_reply() {
        let reply = HostResponse {
            success: true,
            audio_base64: Some("QUJD".to_string()),
            format: Some("wav".to_string()),
            ..Default::default()
        };
        let client = NativeHostClient::new(CannedTransport::new(Ok(reply.clone())));

        let got = client
            .record_audio(Duration::from_millis(1000), false)
            .await
            .unwrap();
        assert_eq!(got, reply);
    }

    #[tokio::test(start_paused = true)]
    async fn record_times_out_with_synthesized_reply() {
        let client = NativeHostClient::new(SilentTransport);

        let got = client
            .record_audio(Duration::from_millis(1000), false)
            .await
            .unwrap();

        assert!(!got.success);
        assert_eq!(got.error.as_deref(), Some("Recording timed out"));
    }

    #[tokio::test(start_paused = true)]
    async fn ping_hits_liveness_timeout() {
        let client = NativeHostClient::new(SilentTransport);

        let err = client.ping().await.unwrap_err();
        assert_eq!(err, HostError::ResponseTimeout);
    }

    #[tokio::test]
    async fn disconnect_without_response_is_distinguishable() {
        let client = NativeHostClient::new(CannedTransport::new(Err(
            HostError::DisconnectedWithoutResponse,
        )));

        let err = client.ping().await.unwrap_err();
        assert_eq!(err, HostError::DisconnectedWithoutResponse);
    }
}
