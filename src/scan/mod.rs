//! Local repository data provider: turns a checkout on disk into an
//! [`Evidence`] snapshot. Gaps in the data degrade to empty values.

pub mod docs;
pub mod filesystem;
pub mod git_meta;
pub mod manifest;

use crate::error::{Result, ScoreError};
use crate::types::config::ScoreConfig;
use crate::types::evidence::{Evidence, FileEntry, RepoMeta};
use std::path::Path;

pub fn discover(root: &Path, config: &ScoreConfig) -> Evidence {
    let files = filesystem::list_root(root);
    let readme = docs::read_readme(root, &files);
    let manifest = manifest::read_manifest(root, &files);
    let commits = git_meta::recent_commits(root, config.commit_window());
    let repo_meta = detect_meta(root, &files, manifest.as_ref(), config);

    tracing::info!(
        repo = %repo_meta.full_name,
        entries = files.len(),
        commits = commits.len(),
        manifest = manifest.as_ref().map_or("none", |(name, _)| name.as_str()),
        "collected evidence"
    );

    Evidence {
        files,
        commits,
        readme,
        dependency_manifest: manifest.map(|(_, content)| content).unwrap_or_default(),
        repo_meta,
    }
    .normalize()
}

/// Reads a provider snapshot previously saved as JSON.
pub fn load_snapshot(path: &Path) -> Result<Evidence> {
    let content = std::fs::read_to_string(path)?;
    Evidence::from_json(&content)
        .map_err(|e| ScoreError::Evidence(format!("{}: {}", path.display(), e)))
}

fn detect_meta(
    root: &Path,
    files: &[FileEntry],
    manifest: Option<&(String, String)>,
    config: &ScoreConfig,
) -> RepoMeta {
    let project = &config.project;
    let full_name = project
        .name
        .clone()
        .or_else(|| git_meta::origin_full_name(root))
        .or_else(|| directory_name(root))
        .unwrap_or_else(|| "unknown".to_string());
    let description = project.description.clone().or_else(|| {
        manifest.and_then(|(name, content)| manifest::description_from(name, content))
    });
    let language = project.language.clone().or_else(|| {
        manifest
            .and_then(|(name, _)| manifest::language_for(name))
            .map(str::to_string)
    });
    let license = project
        .license
        .clone()
        .or_else(|| detect_license(root, files));

    RepoMeta {
        full_name,
        description,
        language,
        license,
    }
}

fn directory_name(root: &Path) -> Option<String> {
    root.canonicalize()
        .ok()?
        .file_name()?
        .to_str()
        .map(str::to_string)
}

fn detect_license(root: &Path, files: &[FileEntry]) -> Option<String> {
    let entry = files.iter().find(|entry| {
        let upper = entry.name.to_uppercase();
        !entry.is_dir()
            && (upper.starts_with("LICENSE")
                || upper.starts_with("LICENCE")
                || upper.starts_with("COPYING"))
    })?;
    let text = filesystem::read_to_string_if_exists(&root.join(&entry.name)).unwrap_or_default();
    Some(
        license_name(&text)
            .map(str::to_string)
            .unwrap_or_else(|| entry.name.clone()),
    )
}

fn license_name(text: &str) -> Option<&'static str> {
    const KNOWN: [(&str, &str); 6] = [
        ("MIT License", "MIT License"),
        ("Apache License", "Apache License 2.0"),
        ("GNU GENERAL PUBLIC LICENSE", "GNU General Public License"),
        ("GNU LESSER GENERAL PUBLIC LICENSE", "GNU Lesser General Public License"),
        ("Mozilla Public License", "Mozilla Public License 2.0"),
        ("BSD", "BSD License"),
    ];
    let head = text.lines().take(5).collect::<Vec<_>>().join(" ");
    KNOWN
        .iter()
        .find(|(needle, _)| head.contains(needle))
        .map(|(_, name)| *name)
}
