pub mod json;
pub mod md;

use crate::error::ScoreError;
use crate::types::analysis::Analysis;
use crate::types::evidence::RepoMeta;
use crate::types::scoring::ScoreReport;

#[derive(Debug, Clone, Copy)]
pub enum OutputFormat {
    Json,
    Md,
}

pub fn render_score(
    report: &ScoreReport,
    repo: &RepoMeta,
    format: OutputFormat,
) -> Result<String, ScoreError> {
    match format {
        OutputFormat::Json => json::to_json(report).map_err(ScoreError::Json),
        OutputFormat::Md => Ok(md::score_to_markdown(report, repo)),
    }
}

pub fn render_analysis(
    analysis: &Analysis,
    repo: &RepoMeta,
    format: OutputFormat,
) -> Result<String, ScoreError> {
    match format {
        OutputFormat::Json => json::to_json(analysis).map_err(ScoreError::Json),
        OutputFormat::Md => Ok(md::analysis_to_markdown(analysis, repo)),
    }
}
