use crate::types::scoring::{CompanyScore, ScoreExplanation, ScoreResult};
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredApplication {
    pub id: Option<String>,
    pub name: String,
    #[serde(flatten)]
    pub score: ScoreResult,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreReport {
    pub generated_at: DateTime<Utc>,
    pub applications: Vec<ScoredApplication>,
}

impl ScoreReport {
    pub fn below(&self, min_score: u32) -> impl Iterator<Item = &ScoredApplication> {
        self.applications
            .iter()
            .filter(move |application| application.score.total_score < min_score)
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyReport {
    pub generated_at: DateTime<Utc>,
    pub company: Option<String>,
    pub score: CompanyScore,
    pub applications: Vec<ScoredApplication>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExplainedApplication {
    pub id: Option<String>,
    pub name: String,
    #[serde(flatten)]
    pub explanation: ScoreExplanation,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExplainReport {
    pub generated_at: DateTime<Utc>,
    pub applications: Vec<ExplainedApplication>,
}
