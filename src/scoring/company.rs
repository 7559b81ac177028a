use crate::types::scoring::{CompanyScore, Score, ScoreResult};

use super::round_score;

/// Means each sub-score across the company's applications, then rounds each
/// mean on its own. No applications yields all zeros.
pub fn company_score(scores: &[ScoreResult]) -> CompanyScore {
    if scores.is_empty() {
        return CompanyScore {
            application_count: 0,
            knowledge_score: 0,
            tool_score: 0,
            total_score: 0,
        };
    }

    let knowledge_score = mean_score(scores.iter().map(|score| score.knowledge_score));
    let tool_score = mean_score(scores.iter().map(|score| score.tool_score));

    CompanyScore {
        application_count: scores.len(),
        knowledge_score,
        tool_score,
        total_score: knowledge_score + tool_score,
    }
}

fn mean_score(values: impl ExactSizeIterator<Item = Score>) -> Score {
    let count = values.len() as f64;
    round_score(values.map(f64::from).sum::<f64>() / count)
}
