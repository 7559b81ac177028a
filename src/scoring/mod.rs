pub mod company;
pub mod knowledge;
pub mod risk;
pub mod tools;

use crate::types::application::ApplicationRecord;
use crate::types::config::ScoringConfig;
use crate::types::scoring::{Score, ScoreExplanation, ScoreResult};
use chrono::{DateTime, Utc};

pub use company::company_score;

/// Points available to each of the knowledge and tool sub-scores.
pub const MAX_SCORE_PER_CATEGORY: f64 = 50.0;

/// Stateless scorer borrowing the tables loaded at startup.
#[derive(Debug, Clone, Copy)]
pub struct ApplicationScorer<'a> {
    config: &'a ScoringConfig,
}

impl<'a> ApplicationScorer<'a> {
    pub fn new(config: &'a ScoringConfig) -> Self {
        Self { config }
    }

    pub fn score(&self, app: &ApplicationRecord) -> ScoreResult {
        self.score_at(app, Utc::now())
    }

    pub fn score_at(&self, app: &ApplicationRecord, now: DateTime<Utc>) -> ScoreResult {
        let knowledge_score = knowledge::knowledge_score(app, now);
        let tool_score = tools::tool_usage_score(app, self.config);
        tracing::debug!(
            application = %app.display_name(),
            knowledge_score,
            tool_score,
            "scored application"
        );
        ScoreResult::new(knowledge_score, tool_score)
    }

    pub fn explain_at(&self, app: &ApplicationRecord, now: DateTime<Utc>) -> ScoreExplanation {
        let knowledge = knowledge::assess_knowledge(app, now);
        let tools = tools::assess_tools(app, self.config);
        let score = ScoreResult::new(
            knowledge::knowledge_points(&knowledge),
            tools::tool_points(&tools),
        );
        ScoreExplanation {
            knowledge,
            tools,
            score,
        }
    }
}

/// Half-up rounding; sub-score inputs are never negative.
pub(crate) fn round_score(value: f64) -> Score {
    value.round() as Score
}
