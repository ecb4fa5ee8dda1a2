use crate::types::evidence::FileEntry;
use crate::types::scoring::AgentResult;

const TEST_DIRS: [&str; 5] = ["test", "tests", "__tests__", "spec", "specs"];
const CI_CONFIGS: [&str; 6] = [
    ".github",
    ".travis.yml",
    "circle.yml",
    "jenkinsfile",
    ".gitlab-ci.yml",
    "azure-pipelines.yml",
];
const TEST_FILE_MARKERS: [&str; 3] = [".test.", ".spec.", "_test."];

pub fn test_coverage_agent(files: &[FileEntry]) -> AgentResult {
    let lowered = files
        .iter()
        .map(|entry| entry.name.to_lowercase())
        .collect::<Vec<_>>();
    let has_test_dir = lowered
        .iter()
        .any(|name| TEST_DIRS.contains(&name.as_str()));
    let has_ci = lowered
        .iter()
        .any(|name| CI_CONFIGS.contains(&name.as_str()));
    let has_test_files = files.iter().any(|entry| {
        TEST_FILE_MARKERS
            .iter()
            .any(|marker| entry.name.contains(marker))
    });

    let mut score = 20;
    if has_test_dir {
        score += 30;
    }
    if has_ci {
        score += 30;
    }
    if has_test_files {
        score += 20;
    }

    AgentResult {
        score,
        evidence: format!(
            "Test dir: {has_test_dir}. CI config: {has_ci}. Test files: {has_test_files}."
        ),
    }
}
