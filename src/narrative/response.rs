use super::request::{EXPECTED_ROADMAP_ITEMS, EXPECTED_STRENGTHS, EXPECTED_WEAKNESSES};
use super::{Role, Style};
use crate::error::GenerationFailure;
use crate::types::analysis::{Analysis, RoadmapItem};
use crate::types::scoring::ScoreReport;
use serde::Deserialize;

/// Narrative fields accepted from the generator. Any `overallScore` or
/// `agentScores` it echoes back are not read.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NarrativeResponse {
    pub summary: String,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub roadmap: Vec<RoadmapItem>,
}

pub fn parse_response(text: &str) -> Result<NarrativeResponse, GenerationFailure> {
    let body = strip_code_fence(text.trim());
    if body.is_empty() {
        return Err(GenerationFailure::Empty);
    }

    let response: NarrativeResponse =
        serde_json::from_str(body).map_err(|e| GenerationFailure::Parse(e.to_string()))?;
    response.normalize()
}

fn strip_code_fence(text: &str) -> &str {
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}

impl NarrativeResponse {
    fn normalize(self) -> Result<Self, GenerationFailure> {
        let summary = self.summary.trim().to_string();
        if summary.is_empty() {
            return Err(GenerationFailure::Parse("summary is empty".to_string()));
        }

        let strengths = tidy_list("strengths", self.strengths, EXPECTED_STRENGTHS);
        let weaknesses = tidy_list("weaknesses", self.weaknesses, EXPECTED_WEAKNESSES);

        let mut roadmap = self
            .roadmap
            .into_iter()
            .map(|item| RoadmapItem {
                title: item.title.trim().to_string(),
                description: item.description.trim().to_string(),
                ..item
            })
            .filter(|item| !item.title.is_empty())
            .collect::<Vec<_>>();
        if roadmap.len() < EXPECTED_ROADMAP_ITEMS {
            tracing::warn!(
                received = roadmap.len(),
                expected = EXPECTED_ROADMAP_ITEMS,
                "narrative roadmap is short"
            );
        }
        roadmap.truncate(EXPECTED_ROADMAP_ITEMS);

        Ok(Self {
            summary,
            strengths,
            weaknesses,
            roadmap,
        })
    }
}

fn tidy_list(field: &str, items: Vec<String>, expected: usize) -> Vec<String> {
    let mut tidied = items
        .into_iter()
        .map(|item| item.trim().to_string())
        .filter(|item| !item.is_empty())
        .collect::<Vec<_>>();
    if tidied.len() < expected {
        tracing::warn!(field, received = tidied.len(), expected, "narrative list is short");
    }
    tidied.truncate(expected);
    tidied
}

/// Builds the final analysis. Scores and evidence come only from `report`.
pub fn compose(
    report: &ScoreReport,
    narrative: NarrativeResponse,
    style: Style,
    role: &Role,
) -> Analysis {
    Analysis {
        overall_score: report.overall_score,
        agent_scores: report.agent_scores,
        agent_evidence: report.agent_evidence.clone(),
        summary: narrative.summary,
        strengths: narrative.strengths,
        weaknesses: narrative.weaknesses,
        roadmap: narrative.roadmap,
        summary_style: style,
        role: role.clone(),
    }
}
