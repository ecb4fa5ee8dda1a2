use serde::{Deserialize, Serialize};

pub type Score = u8;

pub const MAX_SCORE: Score = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AgentKind {
    CodeQuality,
    Documentation,
    CommitHealth,
    TestCoverage,
    TechStack,
}

impl AgentKind {
    pub const ALL: [AgentKind; 5] = [
        AgentKind::CodeQuality,
        AgentKind::Documentation,
        AgentKind::CommitHealth,
        AgentKind::TestCoverage,
        AgentKind::TechStack,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Self::CodeQuality => "codeQuality",
            Self::Documentation => "documentation",
            Self::CommitHealth => "commitHealth",
            Self::TestCoverage => "testCoverage",
            Self::TechStack => "techStack",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::CodeQuality => "Code Quality",
            Self::Documentation => "Documentation",
            Self::CommitHealth => "Commit Health",
            Self::TestCoverage => "Test Coverage",
            Self::TechStack => "Tech Stack",
        }
    }
}

/// Output of one agent. The evidence text is for display and audit only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentResult {
    pub score: Score,
    pub evidence: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentScores {
    pub code_quality: Score,
    pub documentation: Score,
    pub commit_health: Score,
    pub test_coverage: Score,
    pub tech_stack: Score,
}

impl AgentScores {
    pub fn get(&self, kind: AgentKind) -> Score {
        match kind {
            AgentKind::CodeQuality => self.code_quality,
            AgentKind::Documentation => self.documentation,
            AgentKind::CommitHealth => self.commit_health,
            AgentKind::TestCoverage => self.test_coverage,
            AgentKind::TechStack => self.tech_stack,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentEvidence {
    pub code_quality: String,
    pub documentation: String,
    pub commit_health: String,
    pub test_coverage: String,
    pub tech_stack: String,
}

impl AgentEvidence {
    pub fn get(&self, kind: AgentKind) -> &str {
        match kind {
            AgentKind::CodeQuality => &self.code_quality,
            AgentKind::Documentation => &self.documentation,
            AgentKind::CommitHealth => &self.commit_health,
            AgentKind::TestCoverage => &self.test_coverage,
            AgentKind::TechStack => &self.tech_stack,
        }
    }
}

/// Deterministic part of an analysis: what the agents and the aggregator
/// produce without any narrative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreReport {
    pub overall_score: Score,
    pub agent_scores: AgentScores,
    pub agent_evidence: AgentEvidence,
}

impl ScoreReport {
    pub fn result(&self, kind: AgentKind) -> AgentResult {
        AgentResult {
            score: self.agent_scores.get(kind),
            evidence: self.agent_evidence.get(kind).to_string(),
        }
    }
}
