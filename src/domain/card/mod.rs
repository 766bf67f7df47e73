//! Flashcard value objects

pub mod model;

pub use model::{human_readable_time, CardModel, PostCaptureAction};
