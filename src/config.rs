use crate::error::{Result, ScoreError};
use crate::types::config::{
    IntegrationLevel, RiskFactors, ScoringConfig, Settings, ToolQuality,
};
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use toml::map::Map;
use toml::Value;

pub const DEFAULT_SETTINGS_FILE: &str = "appsec-score.toml";
pub const DEFAULT_LOCAL_FILE: &str = ".appsec-score/local.toml";
pub const DEFAULT_GLOBAL_SETTINGS_FILE: &str = ".config/appsec-score/config.toml";

pub const INTEGRATION_LEVELS_FILE: &str = "integrationLevels.json";
pub const TOOL_QUALITY_FILE: &str = "toolQuality.json";
pub const RISK_FACTORS_FILE: &str = "riskFactors.json";

pub fn load_settings(root: &Path) -> Result<Settings> {
    let global = std::env::var_os("HOME")
        .map(PathBuf::from)
        .map(|home| home.join(DEFAULT_GLOBAL_SETTINGS_FILE));
    load_settings_with_global(root, global.as_deref())
}

pub(crate) fn load_settings_with_global(
    root: &Path,
    global_path: Option<&Path>,
) -> Result<Settings> {
    let mut merged = Value::Table(Map::new());
    if let Some(path) = global_path {
        merge_file_if_exists(&mut merged, path)?;
    }
    merge_file_if_exists(&mut merged, &root.join(DEFAULT_SETTINGS_FILE))?;
    merge_file_if_exists(&mut merged, &root.join(DEFAULT_LOCAL_FILE))?;

    let settings: Settings = merged
        .try_into()
        .map_err(|e: toml::de::Error| ScoreError::ConfigParse(e.to_string()))?;
    settings.validate()?;
    Ok(settings)
}

/// Reads the three scoring tables from `dir`. Any missing or malformed
/// table is fatal.
pub fn load_scoring_config(dir: &Path) -> Result<ScoringConfig> {
    let integration_levels: HashMap<String, IntegrationLevel> =
        read_json_table(&dir.join(INTEGRATION_LEVELS_FILE))?;
    let tool_quality: ToolQuality = read_json_table(&dir.join(TOOL_QUALITY_FILE))?;
    let risk_factors: RiskFactors = read_json_table(&dir.join(RISK_FACTORS_FILE))?;

    let config = ScoringConfig {
        integration_levels,
        tool_quality,
        risk_factors,
    };
    config.validate()?;
    tracing::debug!(
        dir = %dir.display(),
        integration_levels = config.integration_levels.len(),
        managed_tools = config.tool_quality.managed.len(),
        approved_unmanaged_tools = config.tool_quality.approved_unmanaged.len(),
        "loaded scoring tables"
    );
    Ok(config)
}

fn read_json_table<T: DeserializeOwned>(path: &Path) -> Result<T> {
    if !path.exists() {
        return Err(ScoreError::ConfigNotFound(path.display().to_string()));
    }
    let content = std::fs::read_to_string(path)?;
    serde_json::from_str(&content)
        .map_err(|e| ScoreError::ConfigParse(format!("{}: {}", path.display(), e)))
}

fn merge_file_if_exists(merged: &mut Value, path: &Path) -> Result<()> {
    if !path.exists() {
        return Ok(());
    }
    tracing::debug!(path = %path.display(), "merging settings file");
    let value = read_toml_value(path)?;
    merge_toml(merged, value);
    Ok(())
}

fn read_toml_value(path: &Path) -> Result<Value> {
    let content = std::fs::read_to_string(path)?;
    toml::from_str(&content)
        .map_err(|e| ScoreError::ConfigParse(format!("{}: {}", path.display(), e)))
}

fn merge_toml(base: &mut Value, overlay: Value) {
    match (base, overlay) {
        (Value::Table(base_table), Value::Table(overlay_table)) => {
            for (key, value) in overlay_table {
                match base_table.get_mut(&key) {
                    Some(existing) => merge_toml(existing, value),
                    None => {
                        base_table.insert(key, value);
                    }
                }
            }
        }
        (slot, value) => {
            *slot = value;
        }
    }
}
