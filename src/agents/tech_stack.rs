use crate::types::evidence::FileEntry;
use crate::types::scoring::AgentResult;

pub const MANIFEST_FILES: [&str; 8] = [
    "package.json",
    "requirements.txt",
    "go.mod",
    "Cargo.toml",
    "pom.xml",
    "build.gradle",
    "composer.json",
    "Gemfile",
];

pub const LOCK_FILES: [&str; 7] = [
    "package-lock.json",
    "yarn.lock",
    "pnpm-lock.yaml",
    "go.sum",
    "Cargo.lock",
    "Gemfile.lock",
    "composer.lock",
];

const SUBSTANTIAL_MANIFEST_CHARS: usize = 50;

pub fn tech_stack_agent(files: &[FileEntry], dependency_manifest: &str) -> AgentResult {
    let has_manifest = files
        .iter()
        .any(|entry| MANIFEST_FILES.contains(&entry.name.as_str()));
    let has_lock = files
        .iter()
        .any(|entry| LOCK_FILES.contains(&entry.name.as_str()));
    let manifest_chars = dependency_manifest.chars().count();

    let mut score = 20;
    if has_manifest {
        score += 40;
    }
    if manifest_chars > SUBSTANTIAL_MANIFEST_CHARS {
        score += 20;
    }
    if has_lock {
        score += 20;
    }

    AgentResult {
        score,
        evidence: format!(
            "Dependency file: {has_manifest}. Lock file: {has_lock}. Content length: {manifest_chars}."
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_repo_scores_base() {
        assert_eq!(tech_stack_agent(&[], "").score, 20);
    }

    #[test]
    fn locked_manifest_with_content_scores_maximum() {
        let files = vec![FileEntry::file("Cargo.toml"), FileEntry::file("Cargo.lock")];
        let manifest = "[package]\nname = \"demo\"\nversion = \"0.1.0\"\n\n[dependencies]\nserde = \"1\"\n";
        let result = tech_stack_agent(&files, manifest);
        assert_eq!(result.score, 100);
        assert!(result.evidence.contains("Lock file: true"));
    }

    #[test]
    fn manifest_names_are_case_sensitive() {
        let files = vec![FileEntry::file("cargo.toml"), FileEntry::file("gemfile.lock")];
        assert_eq!(tech_stack_agent(&files, "").score, 20);
    }

    #[test]
    fn manifest_text_must_exceed_fifty_characters() {
        assert_eq!(tech_stack_agent(&[], &"x".repeat(50)).score, 20);
        assert_eq!(tech_stack_agent(&[], &"x".repeat(51)).score, 40);
    }
}
