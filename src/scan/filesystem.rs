use crate::types::evidence::FileEntry;
use std::path::Path;
use walkdir::WalkDir;

/// Flat listing of the repository root, sorted by name. `.git` is left out
/// to match what a hosting API reports.
pub fn list_root(root: &Path) -> Vec<FileEntry> {
    WalkDir::new(root)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(error) => {
                tracing::warn!(%error, "skipping unreadable entry");
                None
            }
        })
        .filter_map(|entry| {
            let name = entry.file_name().to_str()?.to_string();
            if name == ".git" {
                return None;
            }
            Some(if entry.file_type().is_dir() {
                FileEntry::dir(name)
            } else {
                FileEntry::file(name)
            })
        })
        .collect()
}

pub fn read_to_string_if_exists(path: &Path) -> Option<String> {
    match std::fs::read_to_string(path) {
        Ok(content) => Some(content),
        Err(error) if error.kind() == std::io::ErrorKind::NotFound => None,
        Err(error) => {
            tracing::warn!(path = %path.display(), %error, "could not read file");
            None
        }
    }
}
