//! Spoilage Predict - Command Line Entry Point
//!
//! Reads one reading (or an array of readings) as JSON from `--input` or
//! stdin and prints the report(s) to stdout. Logs go to stderr.

use std::io::Read;
use std::path::PathBuf;

use clap::Parser;

use grain_spoilage::api::{self, EngineStatusReport};
use grain_spoilage::constants::{APP_NAME, APP_VERSION};
use grain_spoilage::logic::features::LayoutInfo;
use grain_spoilage::{EngineConfig, SpoilageEngine};

/// Grain spoilage risk and time-to-spoilage estimation
#[derive(Parser)]
#[command(name = "spoilage-predict")]
#[command(version)]
struct Cli {
    /// Classifier artifact path (overrides SPOILAGE_MODEL_PATH)
    #[arg(long)]
    model: Option<PathBuf>,

    /// Model identity reported on successful assessments (overrides SPOILAGE_MODEL_NAME)
    #[arg(long = "model-name")]
    model_name: Option<String>,

    /// Expected SHA-256 of the artifact (overrides SPOILAGE_MODEL_SHA256)
    #[arg(long = "model-sha256")]
    model_sha256: Option<String>,

    /// Read the request from a file instead of stdin
    #[arg(long)]
    input: Option<PathBuf>,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,

    /// Print engine status instead of running a prediction
    #[arg(long)]
    status: bool,
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stderr)
        .init();

    let cli = Cli::parse();

    let mut config = EngineConfig::from_env();
    if let Some(path) = cli.model {
        config = config.with_model_path(path);
    }
    if let Some(name) = cli.model_name {
        config = config.with_model_name(name);
    }
    if let Some(digest) = cli.model_sha256 {
        config = config.with_model_sha256(digest);
    }

    log::info!("Starting {} v{}...", APP_NAME, APP_VERSION);
    let layout = LayoutInfo::current();
    log::debug!(
        "Feature layout v{} (hash {:08x}, {} features)",
        layout.version,
        layout.hash,
        layout.feature_count
    );

    let engine = SpoilageEngine::new(config);

    if cli.status {
        let status = EngineStatusReport::collect(&engine);
        println!("{}", serde_json::to_string_pretty(&status)?);
        return Ok(());
    }

    let raw = match &cli.input {
        Some(path) => std::fs::read(path),
        None => {
            let mut buffer = Vec::new();
            std::io::stdin().read_to_end(&mut buffer).map(|_| buffer)
        }
    };

    let output = api::run_prediction_bytes(&engine, raw, cli.pretty)?;
    println!("{}", output);

    let stats = engine.stats();
    log::debug!(
        "Done: {} assessment(s), {} fallback(s), avg {:.2} ms",
        stats.invocations,
        stats.fallbacks,
        stats.avg_latency_ms
    );

    Ok(())
}
