use crate::types::analysis::{Analysis, Category};
use crate::types::evidence::RepoMeta;
use crate::types::scoring::{AgentEvidence, AgentKind, AgentScores, ScoreReport};

pub fn score_to_markdown(report: &ScoreReport, repo: &RepoMeta) -> String {
    let mut output = String::new();
    output.push_str(&format!("# Repository Score: {}\n\n", repo.full_name));
    output.push_str(&format!("Overall score: {}/100\n\n", report.overall_score));
    push_agents(&mut output, &report.agent_scores, &report.agent_evidence);
    output
}

pub fn analysis_to_markdown(analysis: &Analysis, repo: &RepoMeta) -> String {
    let mut output = String::new();
    output.push_str(&format!("# Repository Analysis: {}\n\n", repo.full_name));
    output.push_str(&format!(
        "Overall score: {}/100 ({} style, for a {})\n\n",
        analysis.overall_score, analysis.summary_style, analysis.role
    ));
    push_agents(&mut output, &analysis.agent_scores, &analysis.agent_evidence);

    output.push_str("## Summary\n\n");
    output.push_str(&analysis.summary);
    output.push_str("\n\n");

    push_list(&mut output, "Strengths", &analysis.strengths);
    push_list(&mut output, "Weaknesses", &analysis.weaknesses);

    output.push_str("## Roadmap\n\n");
    if analysis.roadmap.is_empty() {
        output.push_str("- none\n");
    } else {
        for (index, item) in analysis.roadmap.iter().enumerate() {
            output.push_str(&format!(
                "{}. {} ({:?}, {}): {}\n",
                index + 1,
                item.title,
                item.difficulty,
                category_label(item.category),
                item.description
            ));
        }
    }

    output
}

fn push_agents(output: &mut String, scores: &AgentScores, evidence: &AgentEvidence) {
    output.push_str("## Agent Scores\n\n");
    for kind in AgentKind::ALL {
        output.push_str(&format!(
            "- {}: {} ({})\n",
            kind.label(),
            scores.get(kind),
            evidence.get(kind)
        ));
    }
    output.push('\n');
}

fn push_list(output: &mut String, title: &str, items: &[String]) {
    output.push_str(&format!("## {title}\n\n"));
    if items.is_empty() {
        output.push_str("- none\n\n");
        return;
    }
    for item in items {
        output.push_str(&format!("- {item}\n"));
    }
    output.push('\n');
}

fn category_label(category: Category) -> &'static str {
    match category {
        Category::Documentation => "Documentation",
        Category::CodeQuality => "Code Quality",
        Category::DevOps => "DevOps",
        Category::Features => "Features",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::narrative::{Role, Style};
    use crate::types::analysis::{Difficulty, RoadmapItem};

    fn repo() -> RepoMeta {
        RepoMeta {
            full_name: "octo/demo".to_string(),
            ..RepoMeta::default()
        }
    }

    fn scores() -> AgentScores {
        AgentScores {
            code_quality: 80,
            documentation: 60,
            commit_health: 40,
            test_coverage: 100,
            tech_stack: 20,
        }
    }

    #[test]
    fn score_report_lists_every_agent() {
        let report = ScoreReport {
            overall_score: 64,
            agent_scores: scores(),
            agent_evidence: AgentEvidence::default(),
        };
        let rendered = score_to_markdown(&report, &repo());
        assert!(rendered.contains("# Repository Score: octo/demo"));
        assert!(rendered.contains("Overall score: 64/100"));
        for kind in AgentKind::ALL {
            assert!(rendered.contains(kind.label()));
        }
    }

    #[test]
    fn analysis_report_contains_sections() {
        let analysis = Analysis {
            overall_score: 64,
            agent_scores: scores(),
            agent_evidence: AgentEvidence::default(),
            summary: "Well organised.".to_string(),
            strengths: vec!["Layout".to_string()],
            weaknesses: Vec::new(),
            roadmap: vec![RoadmapItem {
                title: "Add CI".to_string(),
                description: "Run tests on push.".to_string(),
                difficulty: Difficulty::Intermediate,
                category: Category::DevOps,
            }],
            summary_style: Style::Naturalness,
            role: Role::Recruiter,
        };

        let rendered = analysis_to_markdown(&analysis, &repo());
        assert!(rendered.contains("(Naturalness style, for a Recruiter)"));
        assert!(rendered.contains("## Summary\n\nWell organised."));
        assert!(rendered.contains("## Weaknesses\n\n- none"));
        assert!(rendered.contains("1. Add CI (Intermediate, DevOps): Run tests on push."));
    }
}
