use super::filesystem::read_to_string_if_exists;
use crate::types::evidence::FileEntry;
use serde::Deserialize;
use std::path::Path;

/// Manifests whose text is handed to the tech stack agent, in lookup order.
const FETCHED_MANIFESTS: [&str; 6] = [
    "package.json",
    "requirements.txt",
    "go.mod",
    "Cargo.toml",
    "pom.xml",
    "build.gradle",
];

/// Name and text of the first known manifest at the root.
pub fn read_manifest(root: &Path, files: &[FileEntry]) -> Option<(String, String)> {
    let name = FETCHED_MANIFESTS.iter().find(|candidate| {
        files
            .iter()
            .any(|entry| !entry.is_dir() && entry.name == **candidate)
    })?;
    let content = read_to_string_if_exists(&root.join(name))?;
    Some((name.to_string(), content))
}

pub fn language_for(manifest: &str) -> Option<&'static str> {
    match manifest {
        "package.json" => Some("JavaScript"),
        "requirements.txt" => Some("Python"),
        "go.mod" => Some("Go"),
        "Cargo.toml" => Some("Rust"),
        "pom.xml" | "build.gradle" => Some("Java"),
        _ => None,
    }
}

#[derive(Deserialize)]
struct PackageJson {
    description: Option<String>,
}

#[derive(Deserialize)]
struct CargoManifest {
    package: Option<CargoPackage>,
}

#[derive(Deserialize)]
struct CargoPackage {
    description: Option<String>,
}

/// Project description declared in the manifest, when the format has one.
pub fn description_from(manifest: &str, content: &str) -> Option<String> {
    let description = match manifest {
        "package.json" => serde_json::from_str::<PackageJson>(content)
            .ok()
            .and_then(|package| package.description),
        "Cargo.toml" => toml::from_str::<CargoManifest>(content)
            .ok()
            .and_then(|manifest| manifest.package)
            .and_then(|package| package.description),
        _ => None,
    }?;
    let trimmed = description.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
