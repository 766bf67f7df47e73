//! Recorder delegate implementations
//!
//! Three capture strategies behind one delegate port, plus the composite that
//! falls back from in-page capture to the native host when the playback
//! surface refuses raw sample access.

pub mod fallback;
pub mod native_process;
pub mod offscreen;
pub mod page_stream;

pub use fallback::FallbackRecorder;
pub use native_process::NativeProcessRecorder;
pub use offscreen::OffscreenStreamRecorder;
pub use page_stream::PageStreamRecorder;
