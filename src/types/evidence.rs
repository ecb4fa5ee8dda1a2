use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// README text used by providers when the repository has no README.
/// The documentation agent branches on this literal, not on emptiness.
pub const README_ABSENT: &str = "No README.md found.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    File,
    Dir,
}

/// One entry of the flat repository root listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileEntry {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: EntryKind,
}

impl FileEntry {
    pub fn file(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: EntryKind::File,
        }
    }

    pub fn dir(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: EntryKind::Dir,
        }
    }

    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Dir
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitRecord {
    pub message: String,
    pub date: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepoMeta {
    pub full_name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub license: Option<String>,
}

/// Snapshot of repository facts consumed by the agents. Built once per
/// analysis and discarded afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Evidence {
    #[serde(default)]
    pub files: Vec<FileEntry>,
    /// Newest first.
    #[serde(default)]
    pub commits: Vec<CommitRecord>,
    #[serde(default = "absent_readme")]
    pub readme: String,
    #[serde(default)]
    pub dependency_manifest: String,
    #[serde(default)]
    pub repo_meta: RepoMeta,
}

fn absent_readme() -> String {
    README_ABSENT.to_string()
}

impl Default for Evidence {
    fn default() -> Self {
        Self {
            files: Vec::new(),
            commits: Vec::new(),
            readme: absent_readme(),
            dependency_manifest: String::new(),
            repo_meta: RepoMeta::default(),
        }
    }
}

impl Evidence {
    /// Restores the newest-first commit order. The sort is stable so commits
    /// sharing a timestamp keep the provider's order.
    pub fn normalize(mut self) -> Self {
        let ordered = self
            .commits
            .windows(2)
            .all(|pair| pair[0].date >= pair[1].date);
        if !ordered {
            tracing::debug!(
                commits = self.commits.len(),
                "reordering commits newest-first"
            );
            self.commits.sort_by(|a, b| b.date.cmp(&a.date));
        }
        self
    }

    pub fn from_json(content: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<Self>(content).map(Self::normalize)
    }
}
