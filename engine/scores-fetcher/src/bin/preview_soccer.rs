use anyhow::Result;
use chrono::{DateTime, Utc};
use clap::Parser;
use fixture_engine::rank_candidates;
use scores_fetcher::logging::initialize_logging;
use scores_fetcher::{BatchRunner, EspnScoresFetcher, FetcherConfig};
use std::path::PathBuf;
use tracing::info;

/// Print the ranked soccer fixtures without writing the board
#[derive(Parser, Debug)]
#[command(name = "preview-soccer")]
struct Args {
    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Reference instant (RFC 3339), defaults to the current time
    #[arg(long)]
    now: Option<DateTime<Utc>>,

    /// How many ranked fixtures to print
    #[arg(long, default_value_t = 10)]
    show: usize,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    initialize_logging("info", "compact")?;

    let config = FetcherConfig::load(args.config.as_deref())?;
    let fetcher = EspnScoresFetcher::new(config.provider.clone())?;
    let runner = BatchRunner::new(config, fetcher)?;

    let now = args.now.unwrap_or_else(Utc::now);
    let feeds = runner.fetch_soccer_feeds().await;
    info!("Fetched {} soccer events", feeds.len());

    let ranked = rank_candidates(
        &feeds,
        &runner.config().soccer.priority,
        runner.selection_window(),
        now,
    );
    let limit = runner.selection_window().limit;

    for (i, candidate) in ranked.iter().take(args.show).enumerate() {
        let marker = if i < limit { "*" } else { " " };
        println!(
            "{marker} {:>2}. {:>7.2}  {}  {} vs {}  [{}]",
            i + 1,
            candidate.score,
            candidate.start.format("%a %d %b %H:%M UTC"),
            candidate.record.home.name,
            candidate.record.away.name,
            candidate.competition
        );
    }

    if ranked.is_empty() {
        println!("No fixtures inside the selection window");
    }
    Ok(())
}
