//! Anki export adapters

pub mod connect;

pub use connect::AnkiConnectExporter;
