//! Native capture host protocol integration tests
//!
//! Exercise the socket transport and client against a scripted host on a real
//! Unix socket.

#![cfg(unix)]

use std::path::{Path, PathBuf};

use clip_miner::infrastructure::host::{
    HostError, NativeHostClient, SocketPath, UnixSocketTransport,
};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::UnixListener;

fn client_for(path: &Path) -> NativeHostClient<UnixSocketTransport> {
    NativeHostClient::new(UnixSocketTransport::new(SocketPath::with_path(path)))
}

/// Serve scripted connections: each entry is the reply line to send, or None
/// to disconnect without responding. Requests are collected for assertions.
fn spawn_host(
    listener: UnixListener,
    replies: Vec<Option<String>>,
) -> tokio::sync::mpsc::UnboundedReceiver<String> {
    let (tx, rx) = tokio::sync::mpsc::unbounded_channel();

    tokio::spawn(async move {
        for reply in replies {
            let Ok((stream, _)) = listener.accept().await else {
                return;
            };
            let (reader, mut writer) = stream.into_split();
            let mut reader = BufReader::new(reader);

            let mut line = String::new();
            let _ = reader.read_line(&mut line).await;
            let _ = tx.send(line.trim().to_string());

            if let Some(reply) = reply {
                let _ = writer.write_all(reply.as_bytes()).await;
                let _ = writer.write_all(b"\n").await;
                let _ = writer.flush().await;
            }
            // The connection drops here, closing the per-call channel
        }
    });

    rx
}

fn temp_socket() -> (tempfile::TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("host.sock");
    (dir, path)
}

#[tokio::test]
async fn ping_round_trip() {
    let (_dir, path) = temp_socket();
    let listener = UnixListener::bind(&path).unwrap();
    let mut requests = spawn_host(
        listener,
        vec![Some(r#"{"success":true,"audioSystem":"pulse"}"#.to_string())],
    );

    let client = client_for(&path);
    let reply = client.ping().await.unwrap();

    assert!(reply.success);
    assert_eq!(reply.audio_system.as_deref(), Some("pulse"));
    assert_eq!(requests.recv().await.unwrap(), r#"{"command":"ping"}"#);
}

#[tokio::test]
async fn record_round_trip() {
    let (_dir, path) = temp_socket();
    let listener = UnixListener::bind(&path).unwrap();
    let mut requests = spawn_host(
        listener,
        vec![Some(
            r#"{"success":true,"audioBase64":"QUJD","format":"wav"}"#.to_string(),
        )],
    );

    let client = client_for(&path);
    let reply = client
        .record_audio(clip_miner::domain::recording::Duration::from_millis(250), true)
        .await
        .unwrap();

    assert!(reply.success);
    assert_eq!(reply.audio_base64.as_deref(), Some("QUJD"));

    let request = requests.recv().await.unwrap();
    assert_eq!(
        request,
        r#"{"command":"record","duration":250,"encodeMp3":true}"#
    );
}

#[tokio::test]
async fn disconnect_without_response_is_a_protocol_violation() {
    let (_dir, path) = temp_socket();
    let listener = UnixListener::bind(&path).unwrap();
    spawn_host(listener, vec![None]);

    let client = client_for(&path);
    let err = client.ping().await.unwrap_err();

    assert_eq!(err, HostError::DisconnectedWithoutResponse);
}

#[tokio::test]
async fn malformed_reply_is_reported() {
    let (_dir, path) = temp_socket();
    let listener = UnixListener::bind(&path).unwrap();
    spawn_host(listener, vec![Some("not json".to_string())]);

    let client = client_for(&path);
    let err = client.ping().await.unwrap_err();

    assert!(matches!(err, HostError::MalformedReply(_)));
}

#[tokio::test]
async fn missing_socket_means_unavailable() {
    let (_dir, path) = temp_socket();
    let client = client_for(&path);

    assert!(!client.check_availability().await);
}

#[tokio::test]
async fn availability_is_resolved_by_a_single_probe() {
    let (_dir, path) = temp_socket();
    let listener = UnixListener::bind(&path).unwrap();
    // The scripted host accepts exactly one connection
    spawn_host(
        listener,
        vec![Some(r#"{"success":true}"#.to_string())],
    );

    let client = client_for(&path);
    assert!(client.check_availability().await);
    assert!(client.check_availability().await);
}
