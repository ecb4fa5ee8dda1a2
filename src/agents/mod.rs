pub mod code_quality;
pub mod commit_health;
pub mod documentation;
pub mod tech_stack;
pub mod test_coverage;

use crate::types::evidence::Evidence;
use crate::types::scoring::{AgentEvidence, AgentScores};
use chrono::{DateTime, Utc};

/// Scores from all five agents. Every field is always populated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentReport {
    pub scores: AgentScores,
    pub evidence: AgentEvidence,
}

/// Runs every agent over one evidence snapshot. The agents are pure and
/// independent, so evaluation order does not affect the result.
pub fn run_all(evidence: &Evidence, now: DateTime<Utc>) -> AgentReport {
    let code = code_quality::code_quality_agent(&evidence.files);
    let docs = documentation::documentation_agent(&evidence.readme, &evidence.repo_meta);
    let commits = commit_health::commit_health_agent(&evidence.commits, now);
    let tests = test_coverage::test_coverage_agent(&evidence.files);
    let stack = tech_stack::tech_stack_agent(&evidence.files, &evidence.dependency_manifest);

    tracing::debug!(
        code_quality = code.score,
        documentation = docs.score,
        commit_health = commits.score,
        test_coverage = tests.score,
        tech_stack = stack.score,
        "agents finished"
    );

    AgentReport {
        scores: AgentScores {
            code_quality: code.score,
            documentation: docs.score,
            commit_health: commits.score,
            test_coverage: tests.score,
            tech_stack: stack.score,
        },
        evidence: AgentEvidence {
            code_quality: code.evidence,
            documentation: docs.evidence,
            commit_health: commits.evidence,
            test_coverage: tests.evidence,
            tech_stack: stack.evidence,
        },
    }
}
