//! Scores Fetcher
//!
//! Batch job that fetches team schedules, league scoreboards and soccer
//! competition scoreboards from the scores provider, resolves and ranks them
//! with the fixture engine, and writes one sports board JSON file.

pub mod config;
pub mod error;
pub mod fetcher;
pub mod logging;
pub mod output;
pub mod runner;

pub use config::FetcherConfig;
pub use error::FetchError;
pub use fetcher::{EspnScoresFetcher, ScoresProvider};
pub use output::{write_board, SportsBoard};
pub use runner::{BatchRunner, RunReport};
