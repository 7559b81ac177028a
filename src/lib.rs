//! Application security scoring: metadata completeness plus risk-weighted
//! tool coverage, each worth up to 50 points.

pub mod config;
pub mod error;
pub mod input;
pub mod report;
pub mod scoring;
pub mod telemetry;
pub mod types;

pub use error::{Result, ScoreError};
pub use scoring::{company_score, ApplicationScorer};
pub use types::application::ApplicationRecord;
pub use types::config::ScoringConfig;
pub use types::scoring::{CompanyScore, ScoreResult};
