//! AnkiConnect exporter adapter
//!
//! Talks to a running Anki instance through the AnkiConnect add-on's JSON API.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::application::ports::{CardExporter, ExportError, ExportMode};
use crate::domain::card::CardModel;
use crate::domain::config::AnkiSettings;

/// AnkiConnect API version pinned by this adapter
const API_VERSION: u64 = 6;

// Request/response envelope for the AnkiConnect API

#[derive(Debug, Serialize)]
struct AnkiRequest {
    action: String,
    version: u64,
    params: Value,
}

#[derive(Debug, Deserialize)]
struct AnkiResponse {
    result: Option<Value>,
    error: Option<String>,
}

/// Exporter backed by AnkiConnect
pub struct AnkiConnectExporter {
    client: reqwest::Client,
}

impl AnkiConnectExporter {
    /// Create a new exporter
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    async fn invoke(&self, url: &str, action: &str, params: Value) -> Result<Value, ExportError> {
        let body = AnkiRequest {
            action: action.to_string(),
            version: API_VERSION,
            params,
        };

        let response = self
            .client
            .post(url)
            .json(&body)
            .send()
            .await
            .map_err(|e| ExportError::RequestFailed(e.to_string()))?;

        let response: AnkiResponse = response
            .json()
            .await
            .map_err(|e| ExportError::RequestFailed(e.to_string()))?;

        if let Some(error) = response.error {
            return Err(Self::classify_error(error));
        }

        Ok(response.result.unwrap_or(Value::Null))
    }

    /// AnkiConnect reports duplicates only through the error string
    fn classify_error(error: String) -> ExportError {
        if error.to_lowercase().contains("duplicate") {
            ExportError::DuplicateNote
        } else {
            ExportError::Api(error)
        }
    }

    fn note_fields(card: &CardModel, settings: &AnkiSettings) -> Value {
        let mut fields = serde_json::Map::new();
        fields.insert(
            settings.sentence_field.clone(),
            Value::String(card.text.clone()),
        );
        Value::Object(fields)
    }

    fn audio_attachment(card: &CardModel, settings: &AnkiSettings) -> Option<Value> {
        card.audio_base64.as_ref().map(|data| {
            json!([{
                "data": data,
                "filename": format!("clip-miner-{}.mp3", card.media_timestamp_ms),
                "fields": [settings.audio_field],
            }])
        })
    }

    async fn add_note(&self, card: &CardModel, settings: &AnkiSettings) -> Result<(), ExportError> {
        let mut note = json!({
            "deckName": settings.deck,
            "modelName": settings.note_type,
            "fields": Self::note_fields(card, settings),
            "tags": settings.tags,
            "options": { "allowDuplicate": false },
        });
        if let Some(audio) = Self::audio_attachment(card, settings) {
            note["audio"] = audio;
        }

        self.invoke(&settings.url, "addNote", json!({ "note": note }))
            .await?;
        Ok(())
    }

    async fn update_last_note(
        &self,
        card: &CardModel,
        settings: &AnkiSettings,
    ) -> Result<(), ExportError> {
        let result = self
            .invoke(
                &settings.url,
                "findNotes",
                json!({ "query": format!("deck:\"{}\" added:1", settings.deck) }),
            )
            .await?;

        let ids: Vec<u64> = serde_json::from_value(result)
            .map_err(|e| ExportError::Api(format!("Unexpected findNotes result: {}", e)))?;

        // Note ids are creation timestamps, so the max is the newest
        let Some(last) = ids.into_iter().max() else {
            return Err(ExportError::NoRecentNote);
        };

        let mut note = json!({
            "id": last,
            "fields": Self::note_fields(card, settings),
        });
        if let Some(audio) = Self::audio_attachment(card, settings) {
            note["audio"] = audio;
        }

        self.invoke(&settings.url, "updateNoteFields", json!({ "note": note }))
            .await?;
        Ok(())
    }
}

impl Default for AnkiConnectExporter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CardExporter for AnkiConnectExporter {
    async fn export(
        &self,
        card: &CardModel,
        settings: &AnkiSettings,
        mode: ExportMode,
    ) -> Result<String, ExportError> {
        match mode {
            ExportMode::Default => self.add_note(card, settings).await?,
            ExportMode::UpdateLast => self.update_last_note(card, settings).await?,
        }
        Ok(card.card_name())
    }
}
