use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "appsec-score",
    version,
    about = "Application security tooling and metadata scoring CLI"
)]
pub struct Cli {
    /// Increase verbosity (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Directory holding integrationLevels.json, toolQuality.json and riskFactors.json
    #[arg(long, global = true)]
    pub tables: Option<PathBuf>,

    /// Directory searched for appsec-score.toml
    #[arg(long, global = true, default_value = ".")]
    pub root: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Score every application in a JSON document
    Score(ScoreCommand),
    /// Average application scores across a company
    Company(CompanyCommand),
    /// Show the per-category breakdown behind each score
    Explain(ExplainCommand),
    /// Load and validate the scoring tables
    Check,
}

#[derive(Args)]
pub struct OutputArgs {
    #[arg(short, long, value_enum)]
    pub format: Option<ReportFormat>,

    /// Evaluate review freshness as of this timestamp instead of now
    #[arg(long)]
    pub as_of: Option<String>,
}

#[derive(Args)]
pub struct ScoreCommand {
    pub input: PathBuf,
    #[command(flatten)]
    pub output: OutputArgs,
    /// Exit with status 1 when any application totals below this score
    #[arg(long, value_parser = clap::value_parser!(u32).range(0..=100))]
    pub min_score: Option<u32>,
}

#[derive(Args)]
pub struct CompanyCommand {
    pub input: PathBuf,
    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Args)]
pub struct ExplainCommand {
    pub input: PathBuf,
    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ReportFormat {
    Json,
    Md,
}
