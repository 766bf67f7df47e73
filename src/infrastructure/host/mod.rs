//! Native capture host client
//!
//! The capture host is a separate, privileged process that can record system
//! audio the in-page strategy cannot reach (protected media). This module
//! speaks its one-request/one-reply JSON protocol and owns availability
//! probing and per-call timeout handling.

pub mod client;
pub mod protocol;
#[cfg(unix)]
pub mod socket;

pub use client::{
    HostConnection, HostTransport, NativeHostClient, LIVENESS_TIMEOUT, RECORDING_GRACE_MS,
    RECORDING_TIMEOUT_CAP_MS,
};
pub use protocol::{HostError, HostRequest, HostResponse};
#[cfg(unix)]
pub use socket::{SocketPath, UnixSocketTransport};
