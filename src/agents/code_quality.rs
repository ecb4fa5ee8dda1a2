use crate::types::evidence::FileEntry;
use crate::types::scoring::AgentResult;

const LINTER_MARKERS: [&str; 5] = ["eslint", "prettier", "flake8", "rubocop", "stylelint"];
const SOURCE_DIRS: [&str; 4] = ["src", "lib", "app", "components"];

pub fn code_quality_agent(files: &[FileEntry]) -> AgentResult {
    let has_linter = files
        .iter()
        .any(|entry| LINTER_MARKERS.iter().any(|marker| entry.name.contains(marker)));
    let has_source_dir = files
        .iter()
        .any(|entry| SOURCE_DIRS.contains(&entry.name.as_str()));
    let has_gitignore = files.iter().any(|entry| entry.name == ".gitignore");
    let is_nested = files
        .iter()
        .any(|entry| entry.is_dir() && !entry.name.starts_with('.'));

    let mut score = 40;
    if has_linter {
        score += 20;
    }
    if has_source_dir {
        score += 20;
    }
    if has_gitignore {
        score += 10;
    }
    if is_nested {
        score += 10;
    }

    AgentResult {
        score,
        evidence: format!(
            "Linter/formatter config: {has_linter}. Standard source folder: {has_source_dir}. \
             .gitignore: {has_gitignore}. Non-flat structure: {is_nested}."
        ),
    }
}
