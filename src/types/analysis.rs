use crate::narrative::{Role, Style};
use crate::types::scoring::{AgentEvidence, AgentScores, Score};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    Documentation,
    #[serde(rename = "Code Quality", alias = "CodeQuality")]
    CodeQuality,
    DevOps,
    Features,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoadmapItem {
    pub title: String,
    pub description: String,
    pub difficulty: Difficulty,
    pub category: Category,
}

/// Final report for one repository. Immutable once produced; scores and
/// evidence always come from the local agents, never from the generator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Analysis {
    pub overall_score: Score,
    pub agent_scores: AgentScores,
    pub agent_evidence: AgentEvidence,
    pub summary: String,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub roadmap: Vec<RoadmapItem>,
    pub summary_style: Style,
    pub role: Role,
}
