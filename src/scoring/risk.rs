use crate::types::application::ApplicationRecord;
use crate::types::config::RiskFactors;

pub const BASE_RISK_WEIGHT: f64 = 1.0;

/// Largest multiplier triggered by the facing classification or any single
/// data type. Multipliers never stack.
pub fn risk_weight(app: &ApplicationRecord, factors: &RiskFactors) -> f64 {
    let facing = app
        .facing
        .as_deref()
        .filter(|facing| !facing.is_empty())
        .and_then(|facing| factors.facing_multiplier(facing));
    let data_types = app
        .data_type_labels()
        .filter_map(|label| factors.data_type_multiplier(label));

    facing
        .into_iter()
        .chain(data_types)
        .fold(BASE_RISK_WEIGHT, f64::max)
}
