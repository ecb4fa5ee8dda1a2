use super::{Role, Style};
use crate::aggregate::FORMULA;
use crate::types::evidence::Evidence;
use crate::types::scoring::{AgentKind, AgentResult, Score, ScoreReport};
use serde::Serialize;
use serde_json::{json, Value};

const RECENT_MESSAGES: usize = 3;
const MANIFEST_SNIPPET_CHARS: usize = 500;

pub const EXPECTED_STRENGTHS: usize = 3;
pub const EXPECTED_WEAKNESSES: usize = 3;
pub const EXPECTED_ROADMAP_ITEMS: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RepositorySummary {
    pub full_name: String,
    pub description: Option<String>,
    pub language: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AgentEntry {
    pub agent: &'static str,
    pub label: &'static str,
    #[serde(flatten)]
    pub result: AgentResult,
}

/// Everything the narrative generator receives. Built only from local,
/// deterministic values, so identical evidence yields an identical payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NarrativeRequest {
    pub repository: RepositorySummary,
    pub agents: Vec<AgentEntry>,
    pub overall_score: Score,
    pub formula: &'static str,
    pub style: Style,
    pub style_instruction: &'static str,
    pub role: Role,
    pub role_instruction: String,
    pub recent_commit_messages: Vec<String>,
    pub manifest_snippet: String,
    pub prompt: String,
    pub response_schema: Value,
}

impl NarrativeRequest {
    pub fn to_payload(&self) -> Result<Value, serde_json::Error> {
        serde_json::to_value(self)
    }
}

pub fn build_request(
    evidence: &Evidence,
    report: &ScoreReport,
    style: Style,
    role: &Role,
) -> NarrativeRequest {
    let meta = &evidence.repo_meta;
    let repository = RepositorySummary {
        full_name: meta.full_name.clone(),
        description: meta.description.clone(),
        language: meta.language.clone(),
    };
    let agents = AgentKind::ALL
        .into_iter()
        .map(|kind| AgentEntry {
            agent: kind.key(),
            label: kind.label(),
            result: report.result(kind),
        })
        .collect::<Vec<_>>();
    let recent_commit_messages = evidence
        .commits
        .iter()
        .take(RECENT_MESSAGES)
        .map(|commit| commit.message.clone())
        .collect::<Vec<_>>();
    let manifest_snippet = evidence
        .dependency_manifest
        .chars()
        .take(MANIFEST_SNIPPET_CHARS)
        .collect::<String>();
    let mut request = NarrativeRequest {
        repository,
        agents,
        overall_score: report.overall_score,
        formula: FORMULA,
        style,
        style_instruction: style.instruction(),
        role: role.clone(),
        role_instruction: role.instruction(),
        recent_commit_messages,
        manifest_snippet,
        prompt: String::new(),
        response_schema: response_schema(),
    };
    request.prompt = render_prompt(&request);
    request
}

fn render_prompt(request: &NarrativeRequest) -> String {
    let repository = &request.repository;
    let style = request.style;
    let role = &request.role;

    let mut prompt = String::from(
        "You evaluate public source repositories. Identical input must yield identical \
         strengths, weaknesses and roadmap.\n",
    );
    prompt.push_str(&format!(
        "\n## Audience\nThe report is for a {role}. {}\n",
        request.role_instruction
    ));
    prompt.push_str("\n## Repository\n");
    prompt.push_str(&format!("Name: {}\n", repository.full_name));
    prompt.push_str(&format!(
        "Description: {}\n",
        repository.description.as_deref().unwrap_or("None")
    ));
    prompt.push_str(&format!(
        "Language: {}\n",
        repository.language.as_deref().unwrap_or("Unknown")
    ));

    prompt.push_str("\n## Rule-based scores (final, do not recompute)\n");
    for entry in &request.agents {
        prompt.push_str(&format!(
            "[{}] {}/100 - {}\n",
            entry.label, entry.result.score, entry.result.evidence
        ));
    }
    if !request.recent_commit_messages.is_empty() {
        prompt.push_str(&format!(
            "Recent commits: {}\n",
            request.recent_commit_messages.join(" | ")
        ));
    }
    if !request.manifest_snippet.is_empty() {
        prompt.push_str(&format!(
            "Dependency manifest excerpt:\n{}\n",
            request.manifest_snippet
        ));
    }

    prompt.push_str(&format!(
        "\n## Overall score\n{}/100 = {}\n",
        request.overall_score, request.formula
    ));
    prompt.push_str(&format!(
        "\n## Style: {style}\n{}\n",
        request.style_instruction
    ));
    prompt.push_str(&format!(
        "\n## Output\nReturn only JSON matching the response schema: a summary in the \
         {style} style for a {role}, {EXPECTED_STRENGTHS} strengths, {EXPECTED_WEAKNESSES} \
         weaknesses and {EXPECTED_ROADMAP_ITEMS} roadmap items grounded in the data above.\n"
    ));
    prompt
}

/// Output contract handed to the generator alongside the prompt.
pub fn response_schema() -> Value {
    let number = json!({ "type": "number" });
    json!({
        "type": "object",
        "properties": {
            "overallScore": number,
            "agentScores": {
                "type": "object",
                "properties": {
                    "codeQuality": number,
                    "documentation": number,
                    "commitHealth": number,
                    "testCoverage": number,
                    "techStack": number
                },
                "required": ["codeQuality", "documentation", "commitHealth", "testCoverage", "techStack"]
            },
            "summary": { "type": "string" },
            "strengths": { "type": "array", "items": { "type": "string" } },
            "weaknesses": { "type": "array", "items": { "type": "string" } },
            "roadmap": {
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": {
                        "title": { "type": "string" },
                        "description": { "type": "string" },
                        "difficulty": { "type": "string", "enum": ["Beginner", "Intermediate", "Advanced"] },
                        "category": { "type": "string", "enum": ["Documentation", "Code Quality", "DevOps", "Features"] }
                    },
                    "required": ["title", "description", "difficulty", "category"]
                }
            }
        },
        "required": ["overallScore", "agentScores", "summary", "strengths", "weaknesses", "roadmap"]
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline;
    use crate::types::evidence::{CommitRecord, RepoMeta};
    use chrono::{TimeZone, Utc};

    fn evidence() -> Evidence {
        let date = Utc
            .with_ymd_and_hms(2024, 5, 30, 0, 0, 0)
            .single()
            .expect("valid date");
        Evidence {
            commits: ["fix: one", "feat: two", "chore: three", "docs: four"]
                .iter()
                .map(|message| CommitRecord {
                    message: message.to_string(),
                    date,
                })
                .collect(),
            dependency_manifest: "é".repeat(600),
            repo_meta: RepoMeta {
                full_name: "octo/demo".to_string(),
                description: None,
                language: Some("Rust".to_string()),
                license: None,
            },
            ..Evidence::default()
        }
    }

    fn request(role: Role) -> NarrativeRequest {
        let evidence = evidence();
        let now = Utc
            .with_ymd_and_hms(2024, 6, 1, 0, 0, 0)
            .single()
            .expect("valid date");
        let report = pipeline::score(&evidence, now);
        build_request(&evidence, &report, Style::Informativeness, &role)
    }

    #[test]
    fn request_carries_all_agents_in_fixed_order() {
        let request = request(Role::Developer);
        let keys = request
            .agents
            .iter()
            .map(|entry| entry.agent)
            .collect::<Vec<_>>();
        assert_eq!(
            keys,
            vec!["codeQuality", "documentation", "commitHealth", "testCoverage", "techStack"]
        );
        assert_eq!(request.style_instruction, Style::Informativeness.instruction());
        assert!(request.role_instruction.contains("technical depth"));
    }

    #[test]
    fn excerpts_are_bounded() {
        let request = request(Role::Student);
        assert_eq!(request.recent_commit_messages, vec!["fix: one", "feat: two", "chore: three"]);
        assert_eq!(request.manifest_snippet.chars().count(), 500);
    }

    #[test]
    fn custom_role_uses_fallback_instruction() {
        let request = request(Role::from("Hiring Manager"));
        assert!(request
            .role_instruction
            .contains("Focus on values important to a Hiring Manager"));
        assert!(request.prompt.contains("for a Hiring Manager"));
    }

    #[test]
    fn prompt_lists_scores_and_overall() {
        let request = request(Role::Mentor);
        assert!(request
            .prompt
            .starts_with("You evaluate public source repositories."));
        assert!(request.prompt.contains("## Audience\nThe report is for a Mentor."));
        assert!(request.prompt.contains("Name: octo/demo\nDescription: None\nLanguage: Rust\n"));
        assert!(request.prompt.contains("Recent commits: fix: one | feat: two | chore: three\n"));
        assert!(request
            .prompt
            .contains(&format!("{}/100 = {FORMULA}", request.overall_score)));
        assert!(request.prompt.ends_with("roadmap items grounded in the data above.\n"));
    }

    #[test]
    fn payload_is_deterministic_and_camel_cased() {
        let first = request(Role::Mentor).to_payload().expect("payload");
        let second = request(Role::Mentor).to_payload().expect("payload");
        assert_eq!(first, second);
        assert!(first.get("overallScore").is_some());
        assert_eq!(first["agents"][2]["agent"], "commitHealth");
        assert!(first["agents"][2]["evidence"].is_string());
        assert_eq!(first["responseSchema"]["type"], "object");
    }
}
