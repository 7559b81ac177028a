use crate::error::ScoreError;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Fallback weight for tools found in neither the managed nor the
/// approved-unmanaged table, used when `toolQuality.other` is missing or zero.
pub const DEFAULT_OTHER_TOOL_WEIGHT: f64 = 0.8;

pub const DEFAULT_TABLES_DIR: &str = "config/scoring";

/// Scoring tables loaded once at startup and borrowed by the scorer.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoringConfig {
    pub integration_levels: HashMap<String, IntegrationLevel>,
    pub tool_quality: ToolQuality,
    pub risk_factors: RiskFactors,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct IntegrationLevel {
    pub weight: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolQuality {
    #[serde(default)]
    pub managed: HashMap<String, f64>,
    #[serde(default)]
    pub approved_unmanaged: HashMap<String, f64>,
    #[serde(default)]
    pub other: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskFactors {
    #[serde(default)]
    pub facing: HashMap<String, f64>,
    #[serde(default)]
    pub data_types: HashMap<String, f64>,
}

impl ScoringConfig {
    /// Weight of an integration level; unknown keys earn nothing.
    pub fn integration_weight(&self, level: &str) -> f64 {
        self.integration_levels
            .get(level)
            .map(|level| level.weight)
            .filter(|weight| *weight > 0.0)
            .unwrap_or(0.0)
    }

    pub fn validate(&self) -> Result<(), ScoreError> {
        for (key, level) in &self.integration_levels {
            ensure_key("integrationLevels", key)?;
            ensure_unit_range(&format!("integrationLevels.{key}.weight"), level.weight)?;
        }

        for (table, weights) in [
            ("toolQuality.managed", &self.tool_quality.managed),
            ("toolQuality.approvedUnmanaged", &self.tool_quality.approved_unmanaged),
        ] {
            for (tool, weight) in weights {
                ensure_key(table, tool)?;
                ensure_unit_range(&format!("{table}.{tool}"), *weight)?;
            }
        }
        if let Some(other) = self.tool_quality.other {
            ensure_unit_range("toolQuality.other", other)?;
        }

        for (table, multipliers) in [
            ("riskFactors.facing", &self.risk_factors.facing),
            ("riskFactors.dataTypes", &self.risk_factors.data_types),
        ] {
            for (key, multiplier) in multipliers {
                ensure_key(table, key)?;
                if !multiplier.is_finite() || *multiplier < 1.0 {
                    return Err(ScoreError::ConfigParse(format!(
                        "{table}.{key} must be a multiplier >= 1.0 (found {multiplier})"
                    )));
                }
            }
        }

        Ok(())
    }
}

impl ToolQuality {
    /// Managed table first, then approved-unmanaged, then the `other` default.
    /// A zero weight counts as unlisted.
    pub fn weight_for(&self, tool: &str) -> f64 {
        self.managed
            .get(tool)
            .copied()
            .filter(|weight| *weight > 0.0)
            .or_else(|| {
                self.approved_unmanaged
                    .get(tool)
                    .copied()
                    .filter(|weight| *weight > 0.0)
            })
            .unwrap_or_else(|| self.other_weight())
    }

    pub fn other_weight(&self) -> f64 {
        self.other
            .filter(|weight| *weight > 0.0)
            .unwrap_or(DEFAULT_OTHER_TOOL_WEIGHT)
    }
}

impl RiskFactors {
    pub fn facing_multiplier(&self, facing: &str) -> Option<f64> {
        self.facing.get(facing).copied()
    }

    pub fn data_type_multiplier(&self, data_type: &str) -> Option<f64> {
        self.data_types.get(data_type).copied()
    }
}

fn ensure_key(table: &str, key: &str) -> Result<(), ScoreError> {
    if key.trim().is_empty() {
        return Err(ScoreError::ConfigParse(format!(
            "{table} entries must have non-empty keys"
        )));
    }
    Ok(())
}

fn ensure_unit_range(name: &str, value: f64) -> Result<(), ScoreError> {
    if !value.is_finite() || !(0.0..=1.0).contains(&value) {
        return Err(ScoreError::ConfigParse(format!(
            "{name} must be between 0.0 and 1.0 (found {value})"
        )));
    }
    Ok(())
}

/// Optional TOML settings layered from global, project and local files.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub scoring: ScoringSettings,
    #[serde(default)]
    pub report: ReportSettings,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScoringSettings {
    pub tables_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReportSettings {
    pub format: Option<String>,
    pub min_score: Option<u32>,
}

impl Settings {
    pub fn tables_dir(&self, root: &Path) -> PathBuf {
        let dir = self
            .scoring
            .tables_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_TABLES_DIR));
        if dir.is_absolute() {
            dir
        } else {
            root.join(dir)
        }
    }

    pub fn validate(&self) -> Result<(), ScoreError> {
        if let Some(format) = &self.report.format {
            if !matches!(format.as_str(), "md" | "json") {
                return Err(ScoreError::ConfigParse(format!(
                    "unsupported report.format: {format}"
                )));
            }
        }
        if let Some(min_score) = self.report.min_score {
            if min_score > 100 {
                return Err(ScoreError::ConfigParse(
                    "report.min_score must be between 0 and 100".to_string(),
                ));
            }
        }
        Ok(())
    }
}
