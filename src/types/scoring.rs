use crate::types::application::ToolCategory;
use serde::Serialize;

pub type Score = u32;

/// Score breakdown for one application. `total_score` is always the sum of
/// the two independently rounded sub-scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreResult {
    pub knowledge_score: Score,
    pub tool_score: Score,
    pub total_score: Score,
}

impl ScoreResult {
    pub fn new(knowledge_score: Score, tool_score: Score) -> Self {
        Self {
            knowledge_score,
            tool_score,
            total_score: knowledge_score + tool_score,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyScore {
    pub application_count: usize,
    pub knowledge_score: Score,
    pub tool_score: Score,
    pub total_score: Score,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum CategoryStatus {
    NotApplicable,
    Missing,
    Implemented {
        tool: String,
        integration_level: String,
        integration_weight: f64,
        tool_weight: f64,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryAssessment {
    pub category: ToolCategory,
    #[serde(flatten)]
    pub status: CategoryStatus,
    pub max_points: f64,
    pub achieved_points: f64,
}

/// Per-category tool coverage before normalization.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolAssessment {
    pub risk_weight: f64,
    pub categories: Vec<CategoryAssessment>,
}

impl ToolAssessment {
    pub fn possible_points(&self) -> f64 {
        self.categories
            .iter()
            .map(|category| category.max_points)
            .sum()
    }

    pub fn achieved_points(&self) -> f64 {
        self.categories
            .iter()
            .map(|category| category.achieved_points)
            .sum()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KnowledgeAssessment {
    pub filled_fields: usize,
    pub total_fields: usize,
    pub fresh_review: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreExplanation {
    pub knowledge: KnowledgeAssessment,
    pub tools: ToolAssessment,
    pub score: ScoreResult,
}
