use crate::error::ScoreError;
use tracing_subscriber::EnvFilter;

/// `RUST_LOG` wins; otherwise the level follows the -v/-q flags.
pub fn init(verbose: u8, quiet: bool) -> Result<(), ScoreError> {
    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::new(default_level(verbose, quiet)),
    };

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .with_ansi(false)
        .try_init()
        .map_err(|e| ScoreError::Telemetry(e.to_string()))
}

fn default_level(verbose: u8, quiet: bool) -> &'static str {
    if quiet {
        return "error";
    }
    match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    }
}
