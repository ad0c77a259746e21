use clap::Parser;
use love_match::config::Settings;
use love_match::models::{parse_top_k, sanitize_top_k};
use love_match::services::{AnthropicScorer, ScorerError};
use love_match::telemetry;
use love_match::{BoostWeights, MatchError, MatchPipeline, MatchRequest, PersonProfile};
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;
use thiserror::Error;

/// Rank candidate profiles against a seeker and print the results as JSON
#[derive(Debug, Parser)]
#[command(name = "love-match-cli", version)]
struct Args {
    /// Seeker profile JSON file
    #[arg(long, default_value = "data/seeker.json")]
    seeker: PathBuf,

    /// JSON array of candidate profiles
    #[arg(long, default_value = "data/candidates.json")]
    candidates: PathBuf,

    /// Number of results to keep; leading digits are used, anything else falls back to 5
    #[arg(long, allow_hyphen_values = true)]
    top: Option<String>,
}

#[derive(Debug, Error)]
enum CliError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error(transparent)]
    Scorer(#[from] ScorerError),

    #[error(transparent)]
    Match(#[from] MatchError),

    #[error("failed to encode results: {0}")]
    Encode(serde_json::Error),
}

async fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, CliError> {
    let content = tokio::fs::read_to_string(path).await.map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    serde_json::from_str(&content).map_err(|source| CliError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

async fn run(args: Args, settings: Settings) -> Result<String, CliError> {
    let seeker: PersonProfile = read_json(&args.seeker).await?;
    let candidates: Vec<PersonProfile> = read_json(&args.candidates).await?;

    let top_k = sanitize_top_k(args.top.as_deref().and_then(parse_top_k));
    let request = MatchRequest::new(seeker, candidates).with_top_k(top_k);

    let scorer = AnthropicScorer::new(settings.scorer.to_options())?;
    let pipeline = MatchPipeline::new(Arc::new(scorer), BoostWeights::from(&settings.matching.boost))
        .with_max_concurrency(settings.matching.max_concurrency);

    let results = pipeline.run(&request).await?;

    serde_json::to_string_pretty(&results).map_err(CliError::Encode)
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenv::dotenv().ok();
    let args = Args::parse();

    let settings = match Settings::load() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Pipeline failed: {}", CliError::from(e));
            return ExitCode::FAILURE;
        }
    };

    telemetry::init(&settings.logging);

    match run(args, settings).await {
        Ok(json) => {
            println!("{}", json);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Pipeline failed: {}", e);
            ExitCode::FAILURE
        }
    }
}
