//! Follow-up conversation about a finished analysis.
//!
//! The conversation is a plain value owned by the caller. Each turn is an
//! explicit transition from one conversation to the next; the generator
//! receives the whole history every time and keeps no session of its own.

use crate::error::{Result, ScoreError};
use crate::narrative::TextGenerator;
use crate::types::analysis::{Analysis, RoadmapItem};
use crate::types::evidence::RepoMeta;
use crate::types::scoring::{AgentScores, Score};
use serde::{Deserialize, Serialize};
use serde_json::json;

const EMPTY_REPLY_FALLBACK: &str = "I'm having trouble thinking right now. Please try again.";

const SYSTEM_INSTRUCTION: &str = "You are a mentor chatbot attached to a repository evaluation report.
Greet users politely, answer questions about the analysed repository using only the evaluation data provided, \
explain scores and roadmap items, and answer general software engineering questions when they are not repository-specific.
Rules:
- Never change or recompute any score.
- Never invent issues or strengths that are not in the analysis.
- Keep a friendly, professional mentoring tone.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Speaker {
    User,
    Model,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub speaker: Speaker,
    pub text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conversation {
    pub history: Vec<Turn>,
}

impl Conversation {
    /// New conversation opened by the mentor's greeting.
    pub fn greeting(repo_name: &str) -> Self {
        Self {
            history: vec![Turn {
                speaker: Speaker::Model,
                text: format!(
                    "Hi! I'm your mentor for **{repo_name}**. I've read the analysis and I'm ready \
                     to help you improve the repository. Ask me about the scores or the roadmap!"
                ),
            }],
        }
    }

    fn with_turn(mut self, speaker: Speaker, text: String) -> Self {
        self.history.push(Turn { speaker, text });
        self
    }
}

/// Analysis facts the mentor may rely on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatContext {
    pub repository: String,
    pub language: Option<String>,
    pub description: Option<String>,
    pub scores: AgentScores,
    pub final_score: Score,
    pub summary: String,
    pub roadmap: Vec<RoadmapItem>,
}

impl ChatContext {
    pub fn new(meta: &RepoMeta, analysis: &Analysis) -> Self {
        Self {
            repository: meta.full_name.clone(),
            language: meta.language.clone(),
            description: meta.description.clone(),
            scores: analysis.agent_scores,
            final_score: analysis.overall_score,
            summary: analysis.summary.clone(),
            roadmap: analysis.roadmap.clone(),
        }
    }
}

/// Sends `message` and returns the extended conversation with the reply.
/// On error the caller still holds the unchanged input conversation.
pub fn send(
    conversation: &Conversation,
    context: &ChatContext,
    message: &str,
    generator: &dyn TextGenerator,
) -> Result<(Conversation, String)> {
    let message = message.trim();
    if message.is_empty() {
        return Err(ScoreError::EmptyChatMessage);
    }

    let payload = json!({
        "systemInstruction": SYSTEM_INSTRUCTION,
        "context": context,
        "history": conversation.history,
        "message": message,
    });
    let reply = generator.generate(&payload)?;
    let reply = match reply.trim() {
        "" => EMPTY_REPLY_FALLBACK.to_string(),
        text => text.to_string(),
    };

    let next = conversation
        .clone()
        .with_turn(Speaker::User, message.to_string())
        .with_turn(Speaker::Model, reply.clone());
    Ok((next, reply))
}
