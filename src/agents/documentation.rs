use crate::types::evidence::{RepoMeta, README_ABSENT};
use crate::types::scoring::AgentResult;

pub fn documentation_agent(readme: &str, meta: &RepoMeta) -> AgentResult {
    let lowered = readme.to_lowercase();
    let has_readme = !readme.is_empty() && readme != README_ABSENT;
    let has_install = ["installation", "install", "setup"]
        .iter()
        .any(|needle| lowered.contains(needle));
    let has_usage = ["usage", "getting started"]
        .iter()
        .any(|needle| lowered.contains(needle));
    let has_description = meta
        .description
        .as_ref()
        .map(|description| description.chars().count() > 20)
        .unwrap_or(false);
    let has_license = meta.license.is_some();

    let mut score = 0;
    if has_readme {
        score += 30;
    }
    if has_install {
        score += 20;
    }
    if has_usage {
        score += 20;
    }
    if has_description {
        score += 20;
    }
    if has_license {
        score += 10;
    }

    AgentResult {
        score,
        evidence: format!(
            "README present: {has_readme}. Install section: {has_install}. \
             Usage section: {has_usage}. Description: {has_description}. License: {has_license}."
        ),
    }
}
