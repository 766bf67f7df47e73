//! Unix domain socket transport for the capture host
//!
//! Newline-delimited JSON over a per-call connection: one request, one reply,
//! the responder closes.

use std::io;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::unix::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::UnixStream;

use super::client::{HostConnection, HostTransport};
use super::protocol::{HostError, HostRequest, HostResponse};

/// Socket path resolver
#[derive(Debug, Clone)]
pub struct SocketPath {
    path: PathBuf,
}

impl SocketPath {
    /// Create socket path, preferring XDG_RUNTIME_DIR
    pub fn new() -> Self {
        let path = std::env::var("XDG_RUNTIME_DIR")
            .map(|dir| PathBuf::from(dir).join("clip-miner-host.sock"))
            .unwrap_or_else(|_| std::env::temp_dir().join("clip-miner-host.sock"));
        Self { path }
    }

    /// Create with a custom path
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Get the socket path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Check if the socket file exists
    pub fn exists(&self) -> bool {
        self.path.exists()
    }
}

impl Default for SocketPath {
    fn default() -> Self {
        Self::new()
    }
}

/// Transport opening a fresh connection to the host socket per exchange
pub struct UnixSocketTransport {
    socket_path: SocketPath,
}

impl UnixSocketTransport {
    /// Create a transport for the given socket path
    pub fn new(socket_path: SocketPath) -> Self {
        Self { socket_path }
    }
}

#[async_trait]
impl HostTransport for UnixSocketTransport {
    async fn connect(&self) -> Result<Box<dyn HostConnection>, HostError> {
        let stream = UnixStream::connect(self.socket_path.path())
            .await
            .map_err(|e| HostError::ConnectFailed(e.to_string()))?;
        let (reader, writer) = stream.into_split();
        Ok(Box::new(UnixSocketConnection {
            reader: BufReader::new(reader),
            writer,
        }))
    }
}

struct UnixSocketConnection {
    reader: BufReader<OwnedReadHalf>,
    writer: OwnedWriteHalf,
}

#[async_trait]
impl HostConnection for UnixSocketConnection {
    async fn send(&mut self, request: &HostRequest) -> Result<(), HostError> {
        let mut line =
            serde_json::to_string(request).map_err(|e| HostError::SendFailed(e.to_string()))?;
        line.push('\n');

        self.writer
            .write_all(line.as_bytes())
            .await
            .map_err(|e| HostError::SendFailed(e.to_string()))?;
        self.writer
            .flush()
            .await
            .map_err(|e| HostError::SendFailed(e.to_string()))
    }

    async fn receive(&mut self) -> Result<HostResponse, HostError> {
        let mut line = String::new();
        let read = self
            .reader
            .read_line(&mut line)
            .await
            .map_err(map_receive_error)?;

        // EOF before any reply is a protocol violation, not a clean close
        if read == 0 {
            return Err(HostError::DisconnectedWithoutResponse);
        }

        serde_json::from_str(line.trim()).map_err(|e| HostError::MalformedReply(e.to_string()))
    }
}

fn map_receive_error(e: io::Error) -> HostError {
    HostError::Transport(e.to_string())
}
