//! ClipMiner - audio-clip capture and flashcard publication engine
//!
//! This crate provides the capture orchestration used when mining study
//! flashcards from media playback: recorder delegates with a transparent
//! fallback to an out-of-process capture host for protected media, and the
//! publication flow that persists and exports the resulting cards.
//!
//! # Architecture
//!
//! The crate follows hexagonal (ports & adapters) architecture:
//!
//! - **Domain**: Core value objects, entities, and errors
//! - **Application**: Use cases and port interfaces (traits)
//! - **Infrastructure**: Adapter implementations (capture host client, recorder
//!   delegates, AnkiConnect, history store, etc.)
//! - **CLI**: Diagnostic command-line interface (host probing, timed capture,
//!   config and history management)

pub mod application;
pub mod cli;
pub mod domain;
pub mod infrastructure;
