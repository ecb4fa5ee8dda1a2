use crate::agents;
use crate::aggregate::aggregate;
use crate::error::Result;
use crate::narrative::{self, Role, Style, TextGenerator};
use crate::types::analysis::Analysis;
use crate::types::evidence::Evidence;
use crate::types::scoring::ScoreReport;
use chrono::{DateTime, Utc};

/// Agents plus aggregation; no external calls.
pub fn score(evidence: &Evidence, now: DateTime<Utc>) -> ScoreReport {
    let agents = agents::run_all(evidence, now);
    let overall_score = aggregate(&agents.scores);
    tracing::info!(
        repo = %evidence.repo_meta.full_name,
        overall = overall_score,
        "scored repository"
    );
    ScoreReport {
        overall_score,
        agent_scores: agents.scores,
        agent_evidence: agents.evidence,
    }
}

/// Full analysis. The generator is called once, after every score exists;
/// any failure there aborts the whole analysis.
pub fn analyze(
    evidence: &Evidence,
    style: Style,
    role: &Role,
    generator: &dyn TextGenerator,
    now: DateTime<Utc>,
) -> Result<Analysis> {
    let report = score(evidence, now);
    let request = narrative::build_request(evidence, &report, style, role);
    let payload = request.to_payload()?;

    let reply = generator.generate(&payload)?;
    let response = narrative::parse_response(&reply)?;
    Ok(narrative::compose(&report, response, style, role))
}
