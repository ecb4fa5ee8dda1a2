use super::{sha256_hex, write_json};
use crate::error::{Result, ScoreError};
use crate::types::analysis::Analysis;
use crate::types::evidence::RepoMeta;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const ID_LEN: usize = 12;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryItem {
    pub id: String,
    pub repo: RepoMeta,
    pub score: u8,
    pub timestamp: DateTime<Utc>,
    pub analysis: Analysis,
}

/// Newest-first list of past analyses, one entry per repository.
#[derive(Debug, Clone)]
pub struct History {
    path: PathBuf,
    limit: usize,
}

impl History {
    pub fn new(data_dir: &Path, limit: usize) -> Self {
        Self {
            path: data_dir.join("history.json"),
            limit: limit.max(1),
        }
    }

    pub fn list(&self) -> Result<Vec<HistoryItem>> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(error) => return Err(ScoreError::Io(error)),
        };
        Ok(serde_json::from_str(&content)?)
    }

    pub fn get(&self, id: &str) -> Result<HistoryItem> {
        self.list()?
            .into_iter()
            .find(|item| item.id == id)
            .ok_or_else(|| ScoreError::HistoryEntryNotFound(id.to_string()))
    }

    /// Records an analysis at the top, replacing any earlier entry for the
    /// same repository.
    pub fn save(
        &self,
        repo: &RepoMeta,
        analysis: &Analysis,
        now: DateTime<Utc>,
    ) -> Result<HistoryItem> {
        let mut items = self.list()?;
        items.retain(|item| !item.repo.full_name.eq_ignore_ascii_case(&repo.full_name));

        let material = format!("{}\n{}", repo.full_name, now.to_rfc3339());
        let item = HistoryItem {
            id: sha256_hex(material.as_bytes())[..ID_LEN].to_string(),
            repo: repo.clone(),
            score: analysis.overall_score,
            timestamp: now,
            analysis: analysis.clone(),
        };
        items.insert(0, item.clone());
        items.truncate(self.limit);

        write_json(&self.path, &items)?;
        tracing::debug!(id = %item.id, entries = items.len(), "history updated");
        Ok(item)
    }

    pub fn delete(&self, id: &str) -> Result<()> {
        let mut items = self.list()?;
        let before = items.len();
        items.retain(|item| item.id != id);
        if items.len() == before {
            return Err(ScoreError::HistoryEntryNotFound(id.to_string()));
        }
        write_json(&self.path, &items)
    }

    pub fn clear(&self) -> Result<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(error) => Err(ScoreError::Io(error)),
        }
    }
}
