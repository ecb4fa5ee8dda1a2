use super::{sha256_hex, write_json};
use crate::error::Result;
use crate::narrative::{Role, Style};
use crate::types::analysis::Analysis;
use crate::types::evidence::Evidence;
use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};

/// File-backed cache of finished analyses.
#[derive(Debug, Clone)]
pub struct AnalysisCache {
    dir: PathBuf,
}

impl AnalysisCache {
    pub fn new(data_dir: &Path) -> Self {
        Self {
            dir: data_dir.join("cache"),
        }
    }

    /// Key over everything an analysis depends on: repository name (case
    /// folded), style, role, the evidence snapshot and the UTC day, which
    /// bounds how stale the commit recency can get.
    pub fn key(
        evidence: &Evidence,
        style: Style,
        role: &Role,
        now: DateTime<Utc>,
    ) -> Result<String> {
        let mut folded = evidence.clone();
        folded.repo_meta.full_name = folded.repo_meta.full_name.to_lowercase();
        let snapshot = serde_json::to_string(&folded)?;
        let material = format!(
            "{}\n{}\n{}\n{}",
            style,
            role,
            now.format("%Y-%m-%d"),
            snapshot
        );
        Ok(sha256_hex(material.as_bytes()))
    }

    pub fn get(&self, key: &str) -> Option<Analysis> {
        let path = self.path_for(key);
        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => return None,
            Err(error) => {
                tracing::warn!(path = %path.display(), %error, "cache entry unreadable");
                return None;
            }
        };
        match serde_json::from_str(&content) {
            Ok(analysis) => {
                tracing::debug!(key, "cache hit");
                Some(analysis)
            }
            Err(error) => {
                tracing::warn!(path = %path.display(), %error, "ignoring corrupt cache entry");
                None
            }
        }
    }

    pub fn put(&self, key: &str, analysis: &Analysis) -> Result<PathBuf> {
        let path = self.path_for(key);
        write_json(&path, analysis)?;
        Ok(path)
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}
