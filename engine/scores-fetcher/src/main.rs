use anyhow::Result;
use chrono::{DateTime, Utc};
use clap::Parser;
use scores_fetcher::logging::initialize_logging;
use scores_fetcher::{write_board, BatchRunner, EspnScoresFetcher, FetcherConfig};
use std::path::PathBuf;
use tracing::{info, warn};

/// Fetch the latest games and write the sports board
#[derive(Parser, Debug)]
#[command(name = "sports-update", version)]
struct Args {
    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output file, overrides run.output_path
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Reference instant for the run (RFC 3339), defaults to the current time
    #[arg(long)]
    now: Option<DateTime<Utc>>,

    /// Log level when RUST_LOG is not set
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Log format: compact, pretty or json
    #[arg(long, default_value = "compact")]
    log_format: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    initialize_logging(&args.log_level, &args.log_format)?;

    let mut config = FetcherConfig::load(args.config.as_deref())?;
    if let Some(output) = args.output {
        config.run.output_path = output;
    }
    let output_path = config.run.output_path.clone();

    let fetcher = EspnScoresFetcher::new(config.provider.clone())?;
    let runner = BatchRunner::new(config, fetcher)?;

    let now = args.now.unwrap_or_else(Utc::now);
    let (board, report) = runner.run(now).await;

    if report.failed + report.timed_out > 0 {
        warn!(
            "{} of {} sources did not return data, their slots are empty",
            report.failed + report.timed_out,
            report.total()
        );
    }

    write_board(&output_path, &board).await?;
    info!("sports board updated");
    Ok(())
}
