//! Narrative stage: builds the deterministic payload for the external text
//! generator and folds its reply back into an [`Analysis`].
//!
//! [`Analysis`]: crate::types::analysis::Analysis

pub mod generator;
pub mod request;
pub mod response;

pub use generator::{CommandGenerator, TextGenerator};
pub use request::build_request;
pub use response::{compose, parse_response};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Writing style requested for the summary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Style {
    #[default]
    Clarity,
    Naturalness,
    Professional,
    Informativeness,
}

impl Style {
    pub const ALL: [Style; 4] = [
        Style::Clarity,
        Style::Naturalness,
        Style::Professional,
        Style::Informativeness,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Clarity => "Clarity",
            Self::Naturalness => "Naturalness",
            Self::Professional => "Professional",
            Self::Informativeness => "Informativeness",
        }
    }

    pub fn instruction(self) -> &'static str {
        match self {
            Self::Clarity => {
                "Focus on easy-to-understand sentences, logical flow, and no ambiguity. Use simple language."
            }
            Self::Naturalness => {
                "Use human-like, conversational but professional language. Avoid robotic phrasing."
            }
            Self::Professional => {
                "Use a formal, mentoring tone. Avoid slang. Be objective and authoritative."
            }
            Self::Informativeness => {
                "Be highly actionable, specific, and detailed. Prioritize density of information over fluff."
            }
        }
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Style {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        Self::ALL
            .into_iter()
            .find(|style| style.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| {
                format!(
                    "unknown style '{trimmed}' (expected one of: Clarity, Naturalness, Professional, Informativeness)"
                )
            })
    }
}

/// Audience the report is written for. Only the exact variant names select a
/// built-in role; any other text, including a different casing, becomes
/// [`Role::Custom`] verbatim.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Role {
    #[default]
    Student,
    Mentor,
    Recruiter,
    Developer,
    Custom(String),
}

impl Role {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Student => "Student",
            Self::Mentor => "Mentor",
            Self::Recruiter => "Recruiter",
            Self::Developer => "Developer",
            Self::Custom(name) => name,
        }
    }

    pub fn instruction(&self) -> String {
        match self {
            Self::Student => "Focus on educational value. Explain *why* certain practices are important. \
                Suggest learning resources where applicable. The roadmap should be a learning path."
                .to_string(),
            Self::Mentor => "Provide evaluative and constructive feedback. Highlight potential pitfalls \
                and best practices. Use a coaching tone."
                .to_string(),
            Self::Recruiter => "Focus on employability, code standards, and project maturity. Highlight \
                if the candidate demonstrates industry-ready skills."
                .to_string(),
            Self::Developer => "Focus on technical depth, architecture, scalability, and maintainability. \
                Be concise and technical. Roadmap should be advanced refactoring or scaling steps."
                .to_string(),
            Self::Custom(name) => format!(
                "Focus on values important to a {name}. Provide a balanced and comprehensive analysis suitable for this role."
            ),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for Role {
    fn from(value: String) -> Self {
        match value.as_str() {
            "Student" => Self::Student,
            "Mentor" => Self::Mentor,
            "Recruiter" => Self::Recruiter,
            "Developer" => Self::Developer,
            _ => Self::Custom(value),
        }
    }
}

impl From<&str> for Role {
    fn from(value: &str) -> Self {
        Self::from(value.to_string())
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        role.as_str().to_string()
    }
}
