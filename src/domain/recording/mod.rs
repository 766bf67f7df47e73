//! Recording value objects and outcome types

pub mod duration;
pub mod response;
pub mod session;

pub use duration::Duration;
pub use response::{StartError, StartErrorCode, StopAudio, StopError, StopErrorCode};
pub use session::{CapturedAudio, RequestId, Requester};
