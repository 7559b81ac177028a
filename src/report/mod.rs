pub mod json;
pub mod md;

use crate::error::ScoreError;
use crate::types::report::{CompanyReport, ExplainReport, ScoreReport};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Md,
}

pub fn render_scores(report: &ScoreReport, format: OutputFormat) -> Result<String, ScoreError> {
    match format {
        OutputFormat::Json => json::to_json(report).map_err(ScoreError::Json),
        OutputFormat::Md => Ok(md::scores_to_markdown(report)),
    }
}

pub fn render_company(report: &CompanyReport, format: OutputFormat) -> Result<String, ScoreError> {
    match format {
        OutputFormat::Json => json::to_json(report).map_err(ScoreError::Json),
        OutputFormat::Md => Ok(md::company_to_markdown(report)),
    }
}

pub fn render_explain(report: &ExplainReport, format: OutputFormat) -> Result<String, ScoreError> {
    match format {
        OutputFormat::Json => json::to_json(report).map_err(ScoreError::Json),
        OutputFormat::Md => Ok(md::explain_to_markdown(report)),
    }
}
