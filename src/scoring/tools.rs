use crate::types::application::{ApplicationRecord, ToolCategory};
use crate::types::config::ScoringConfig;
use crate::types::scoring::{CategoryAssessment, CategoryStatus, Score, ToolAssessment};

use super::risk::risk_weight;
use super::{round_score, MAX_SCORE_PER_CATEGORY};

pub fn assess_tools(app: &ApplicationRecord, config: &ScoringConfig) -> ToolAssessment {
    let base_points = MAX_SCORE_PER_CATEGORY / ToolCategory::ALL.len() as f64;
    let risk_weight = risk_weight(app, &config.risk_factors);
    let max_points = base_points * risk_weight;

    let categories = ToolCategory::ALL
        .into_iter()
        .map(|category| assess_category(app, config, category, max_points))
        .collect();

    ToolAssessment {
        risk_weight,
        categories,
    }
}

fn assess_category(
    app: &ApplicationRecord,
    config: &ScoringConfig,
    category: ToolCategory,
    max_points: f64,
) -> CategoryAssessment {
    let slot = app.tool_slot(category);

    if slot.not_applicable {
        return CategoryAssessment {
            category,
            status: CategoryStatus::NotApplicable,
            max_points,
            achieved_points: max_points,
        };
    }

    match (slot.tool, slot.integration_level) {
        (Some(tool), Some(level)) => {
            let integration_weight = config.integration_weight(level);
            let tool_weight = config.tool_quality.weight_for(tool);
            CategoryAssessment {
                category,
                status: CategoryStatus::Implemented {
                    tool: tool.to_string(),
                    integration_level: level.to_string(),
                    integration_weight,
                    tool_weight,
                },
                max_points,
                achieved_points: max_points * integration_weight * tool_weight,
            }
        }
        _ => CategoryAssessment {
            category,
            status: CategoryStatus::Missing,
            max_points,
            achieved_points: 0.0,
        },
    }
}

pub fn tool_usage_score(app: &ApplicationRecord, config: &ScoringConfig) -> Score {
    tool_points(&assess_tools(app, config))
}

/// Normalizes achieved over possible points onto the 0-50 scale.
pub(crate) fn tool_points(assessment: &ToolAssessment) -> Score {
    let possible = assessment.possible_points();
    if possible <= 0.0 {
        return 0;
    }
    round_score(assessment.achieved_points() / possible * MAX_SCORE_PER_CATEGORY)
}
