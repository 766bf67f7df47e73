//! File-backed capture history store
//!
//! One JSON object per line under the XDG data dir, trimmed oldest-first to
//! the configured limit so the mining history cannot grow without bound.

use std::path::PathBuf;

use async_trait::async_trait;
use tokio::fs;

use crate::application::ports::{HistoryError, HistoryRecord, HistoryRepository};

/// File-backed history repository
pub struct FileHistoryRepository {
    path: PathBuf,
    limit: usize,
}

impl FileHistoryRepository {
    /// Create a repository at the default XDG data path
    pub fn new(limit: usize) -> Self {
        let data_dir = dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("~/.local/share"))
            .join("clip-miner");

        Self {
            path: data_dir.join("history.jsonl"),
            limit,
        }
    }

    /// Create with a custom path
    pub fn with_path(path: impl Into<PathBuf>, limit: usize) -> Self {
        Self {
            path: path.into(),
            limit,
        }
    }

    /// Get the history file path
    pub fn path(&self) -> PathBuf {
        self.path.clone()
    }

    async fn read_all(&self) -> Result<Vec<HistoryRecord>, HistoryError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(&self.path)
            .await
            .map_err(|e| HistoryError::ReadFailed(e.to_string()))?;

        // A corrupt line loses one record, not the whole history
        Ok(content
            .lines()
            .filter(|line| !line.trim().is_empty())
            .filter_map(|line| serde_json::from_str(line).ok())
            .collect())
    }

    async fn write_all(&self, records: &[HistoryRecord]) -> Result<(), HistoryError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| HistoryError::WriteFailed(e.to_string()))?;
        }

        let mut content = String::new();
        for record in records {
            let line = serde_json::to_string(record)
                .map_err(|e| HistoryError::WriteFailed(e.to_string()))?;
            content.push_str(&line);
            content.push('\n');
        }

        fs::write(&self.path, content)
            .await
            .map_err(|e| HistoryError::WriteFailed(e.to_string()))
    }
}

#[async_trait]
impl HistoryRepository for FileHistoryRepository {
    async fn save(&self, record: &HistoryRecord) -> Result<(), HistoryError> {
        let mut records = self.read_all().await?;
        records.push(record.clone());

        if records.len() > self.limit {
            let excess = records.len() - self.limit;
            records.drain(..excess);
        }

        self.write_all(&records).await
    }

    async fn list(&self) -> Result<Vec<HistoryRecord>, HistoryError> {
        self.read_all().await
    }

    async fn clear(&self) -> Result<(), HistoryError> {
        if self.path.exists() {
            fs::remove_file(&self.path)
                .await
                .map_err(|e| HistoryError::WriteFailed(e.to_string()))?;
        }
        Ok(())
    }
}
