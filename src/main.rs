mod cli;

use appsec_score::scoring::{self, ApplicationScorer};
use appsec_score::types::application::{parse_timestamp, ApplicationRecord};
use appsec_score::types::config::Settings;
use appsec_score::types::report::{
    CompanyReport, ExplainReport, ExplainedApplication, ScoreReport, ScoredApplication,
};
use appsec_score::types::scoring::ScoreResult;
use appsec_score::{config, input, report, telemetry, ScoreError};
use chrono::{DateTime, Utc};
use clap::Parser;

pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const BELOW_THRESHOLD: i32 = 1;
    pub const RUNTIME_FAILURE: i32 = 3;
}

fn run() -> Result<i32, ScoreError> {
    let cli = cli::Cli::parse();
    telemetry::init(cli.verbose, cli.quiet)?;

    let settings = config::load_settings(&cli.root)?;
    let tables_dir = cli
        .tables
        .clone()
        .unwrap_or_else(|| settings.tables_dir(&cli.root));
    let scoring_config = config::load_scoring_config(&tables_dir)?;
    let scorer = ApplicationScorer::new(&scoring_config);

    match cli.command {
        cli::Commands::Score(cmd) => {
            let now = resolve_now(cmd.output.as_of.as_deref())?;
            let portfolio = input::load_portfolio(&cmd.input)?;
            let score_report = ScoreReport {
                generated_at: now,
                applications: portfolio
                    .applications
                    .iter()
                    .map(|app| scored(app, scorer.score_at(app, now)))
                    .collect(),
            };

            let format = output_format(cmd.output.format, &settings);
            let rendered = report::render_scores(&score_report, format)?;
            println!("{rendered}");

            let Some(min_score) = cmd.min_score.or(settings.report.min_score) else {
                return Ok(exit_code::SUCCESS);
            };
            let below = score_report.below(min_score).collect::<Vec<_>>();
            if below.is_empty() {
                return Ok(exit_code::SUCCESS);
            }
            for application in &below {
                eprintln!(
                    "warning: {} scored {} (minimum {})",
                    application.name, application.score.total_score, min_score
                );
            }
            Ok(exit_code::BELOW_THRESHOLD)
        }
        cli::Commands::Company(cmd) => {
            let now = resolve_now(cmd.output.as_of.as_deref())?;
            let portfolio = input::load_portfolio(&cmd.input)?;
            let applications = portfolio
                .applications
                .iter()
                .map(|app| scored(app, scorer.score_at(app, now)))
                .collect::<Vec<_>>();
            let scores = applications
                .iter()
                .map(|application| application.score)
                .collect::<Vec<_>>();

            let company_report = CompanyReport {
                generated_at: now,
                company: portfolio.company,
                score: scoring::company_score(&scores),
                applications,
            };
            let format = output_format(cmd.output.format, &settings);
            let rendered = report::render_company(&company_report, format)?;
            println!("{rendered}");
            Ok(exit_code::SUCCESS)
        }
        cli::Commands::Explain(cmd) => {
            let now = resolve_now(cmd.output.as_of.as_deref())?;
            let portfolio = input::load_portfolio(&cmd.input)?;
            let explain_report = ExplainReport {
                generated_at: now,
                applications: portfolio
                    .applications
                    .iter()
                    .map(|app| ExplainedApplication {
                        id: app.id.clone(),
                        name: app.display_name(),
                        explanation: scorer.explain_at(app, now),
                    })
                    .collect(),
            };
            let format = output_format(cmd.output.format, &settings);
            let rendered = report::render_explain(&explain_report, format)?;
            println!("{rendered}");
            Ok(exit_code::SUCCESS)
        }
        cli::Commands::Check => {
            if !cli.quiet {
                println!("scoring tables ok: {}", tables_dir.display());
                println!(
                    "- integration levels: {}",
                    scoring_config.integration_levels.len()
                );
                println!(
                    "- managed tools: {}",
                    scoring_config.tool_quality.managed.len()
                );
                println!(
                    "- approved unmanaged tools: {}",
                    scoring_config.tool_quality.approved_unmanaged.len()
                );
                println!(
                    "- other tool weight: {:.2}",
                    scoring_config.tool_quality.other_weight()
                );
                println!(
                    "- risk factors: {} facing, {} data types",
                    scoring_config.risk_factors.facing.len(),
                    scoring_config.risk_factors.data_types.len()
                );
            }
            Ok(exit_code::SUCCESS)
        }
    }
}

fn scored(app: &ApplicationRecord, score: ScoreResult) -> ScoredApplication {
    ScoredApplication {
        id: app.id.clone(),
        name: app.display_name(),
        score,
    }
}

fn resolve_now(as_of: Option<&str>) -> Result<DateTime<Utc>, ScoreError> {
    match as_of {
        Some(raw) => {
            parse_timestamp(raw).ok_or_else(|| ScoreError::InvalidTimestamp(raw.to_string()))
        }
        None => Ok(Utc::now()),
    }
}

fn output_format(flag: Option<cli::ReportFormat>, settings: &Settings) -> report::OutputFormat {
    match flag {
        Some(cli::ReportFormat::Json) => report::OutputFormat::Json,
        Some(cli::ReportFormat::Md) => report::OutputFormat::Md,
        None => match settings.report.format.as_deref() {
            Some("json") => report::OutputFormat::Json,
            _ => report::OutputFormat::Md,
        },
    }
}

fn main() {
    match run() {
        Ok(code) => {
            if code != 0 {
                std::process::exit(code);
            }
        }
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(exit_code::RUNTIME_FAILURE);
        }
    }
}
