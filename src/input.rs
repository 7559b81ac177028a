use crate::error::{Result, ScoreError};
use crate::types::application::ApplicationRecord;
use serde::Deserialize;
use serde_json::Value;
use std::path::Path;

/// Applications read from one input document, optionally under a company.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Portfolio {
    pub company: Option<String>,
    pub applications: Vec<ApplicationRecord>,
}

#[derive(Deserialize)]
struct CompanyDocument {
    #[serde(default)]
    name: Option<String>,
    applications: Vec<ApplicationRecord>,
}

pub fn load_portfolio(path: &Path) -> Result<Portfolio> {
    if !path.exists() {
        return Err(ScoreError::InputNotFound(path.display().to_string()));
    }
    let content = std::fs::read_to_string(path)?;
    let portfolio = parse_portfolio(&content)
        .map_err(|e| ScoreError::InputParse(format!("{}: {}", path.display(), e)))?;
    tracing::debug!(
        path = %path.display(),
        applications = portfolio.applications.len(),
        "loaded applications"
    );
    Ok(portfolio)
}

/// An object carrying `applications` must decode as a company document;
/// arrays are record lists and any other object is a single record.
pub fn parse_portfolio(content: &str) -> std::result::Result<Portfolio, serde_json::Error> {
    let document: Value = serde_json::from_str(content)?;
    let is_company = document
        .as_object()
        .map(|object| object.contains_key("applications"))
        .unwrap_or(false);

    if is_company {
        let company: CompanyDocument = serde_json::from_value(document)?;
        return Ok(Portfolio {
            company: company.name,
            applications: company.applications,
        });
    }

    match document {
        Value::Array(_) => Ok(Portfolio {
            company: None,
            applications: serde_json::from_value(document)?,
        }),
        _ => Ok(Portfolio {
            company: None,
            applications: vec![serde_json::from_value(document)?],
        }),
    }
}
