//! EduRAG command-line driver
//!
//! Runs one question through the same pipeline as the gateway and prints
//! the retrieved documents, the assembled context and the answer.

mod args;
mod report;

use args::Args;
use clap::Parser;
use edurag_common::{AppConfig, RagPipeline};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(args.log_filter()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let mut config = match &args.config {
        Some(path) => AppConfig::from_file(&path.to_string_lossy())?,
        None => AppConfig::load()?,
    };
    args.apply(&mut config);

    let missing = config.missing_credentials();
    if !missing.is_empty() {
        tracing::warn!(missing = ?missing, "Credentials not configured");
    }

    let pipeline = RagPipeline::from_config(&config)?;
    let run = pipeline.run(&args.question()).await;

    if args.quiet {
        print!("{}", report::render_answer(&run));
    } else {
        print!("{}", report::render(&run));
    }

    if let Some(error) = run.outcome.error() {
        eprintln!("error: {}", error);
        return Ok(ExitCode::FAILURE);
    }

    Ok(ExitCode::SUCCESS)
}
