use crate::config::{FetcherConfig, MAX_RUN_TIMEOUT_SECS};
use crate::error::FetchError;
use crate::fetcher::ScoresProvider;
use crate::output::SportsBoard;
use anyhow::Result;
use chrono::{DateTime, FixedOffset, Utc};
use fixture_engine::{resolve_from_values, select_top_fixtures, SelectionWindow};
use futures::future::join_all;
use serde_json::Value;
use std::future::Future;
use std::time::Duration;
use tokio::sync::Semaphore;
use tokio::time::{timeout_at, Instant};
use tracing::{info, warn};

/// Sport path segment for soccer scoreboards
const SOCCER_SPORT: &str = "soccer";

/// Result of fetching one source
#[derive(Debug)]
enum SegmentOutcome {
    Fetched(Vec<Value>),
    Failed,
    TimedOut,
}

/// Per-run tally of source outcomes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunReport {
    pub fetched: usize,
    pub failed: usize,
    pub timed_out: usize,
}

impl RunReport {
    fn record(&mut self, outcome: &SegmentOutcome) {
        match outcome {
            SegmentOutcome::Fetched(_) => self.fetched += 1,
            SegmentOutcome::Failed => self.failed += 1,
            SegmentOutcome::TimedOut => self.timed_out += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.fetched + self.failed + self.timed_out
    }
}

impl SegmentOutcome {
    fn into_events(self) -> Vec<Value> {
        match self {
            SegmentOutcome::Fetched(events) => events,
            SegmentOutcome::Failed | SegmentOutcome::TimedOut => Vec::new(),
        }
    }
}

/// One batch run: fetch every source concurrently, then resolve and rank
pub struct BatchRunner<P: ScoresProvider> {
    config: FetcherConfig,
    provider: P,
    permits: Semaphore,
    zone: FixedOffset,
    window: SelectionWindow,
}

impl<P: ScoresProvider> BatchRunner<P> {
    /// Create a runner; fails only on invalid configuration
    pub fn new(config: FetcherConfig, provider: P) -> Result<Self> {
        config.validate()?;
        let zone = config.reference_zone()?;
        let window = config.selection_window();
        let permits = Semaphore::new(config.run.max_concurrent_fetches);

        Ok(Self { config, provider, permits, zone, window })
    }

    pub fn config(&self) -> &FetcherConfig {
        &self.config
    }

    /// Run one batch with `now` as the single reference instant
    ///
    /// Always produces a complete board: sources that fail or miss the run
    /// deadline leave empty records behind.
    pub async fn run(&self, now: DateTime<Utc>) -> (SportsBoard, RunReport) {
        let deadline = self.run_deadline();
        info!(
            "Starting batch run at {} ({} teams, {} leagues, {} competitions)",
            now,
            self.config.teams.len(),
            self.config.leagues.len(),
            self.config.soccer.competitions.len()
        );

        let teams = join_all(self.config.teams.iter().map(|team| {
            self.guarded(
                format!("team {}", team.key),
                deadline,
                self.provider.team_events(&team.sport, &team.league, &team.team),
            )
        }));
        let leagues = join_all(self.config.leagues.iter().map(|league| {
            self.guarded(
                format!("league {}", league.key),
                deadline,
                self.provider.scoreboard(&league.sport, &league.league),
            )
        }));
        let soccer = self.soccer_outcomes(deadline);

        let (teams, leagues, soccer) = tokio::join!(teams, leagues, soccer);

        let mut report = RunReport::default();
        let mut board = SportsBoard::new(now);

        for (team, outcome) in self.config.teams.iter().zip(teams) {
            report.record(&outcome);
            let record = resolve_from_values(
                &outcome.into_events(),
                team.include_records,
                now,
                self.window.grace,
                self.zone,
            );
            board.teams.insert(team.key.clone(), record);
        }

        for (league, outcome) in self.config.leagues.iter().zip(leagues) {
            report.record(&outcome);
            let record =
                resolve_from_values(&outcome.into_events(), false, now, self.window.grace, self.zone);
            board.leagues.insert(league.key.clone(), record);
        }

        let mut feeds = Vec::new();
        for (competition, outcome) in self.config.soccer.competitions.iter().zip(soccer) {
            report.record(&outcome);
            feeds.extend(outcome.into_events().into_iter().map(|e| (competition.name.clone(), e)));
        }
        board.soccer = select_top_fixtures(&feeds, &self.config.soccer.priority, &self.window, now);

        info!(
            "Batch run finished: {} sources fetched, {} failed, {} timed out, {} empty slots, {} soccer fixtures",
            report.fetched,
            report.failed,
            report.timed_out,
            board.empty_slots(),
            board.soccer.len()
        );
        (board, report)
    }

    /// Fetch every soccer competition and pair its events with the competition name
    pub async fn fetch_soccer_feeds(&self) -> Vec<(String, Value)> {
        let deadline = self.run_deadline();
        let outcomes = self.soccer_outcomes(deadline).await;

        self.config
            .soccer
            .competitions
            .iter()
            .zip(outcomes)
            .flat_map(|(competition, outcome)| {
                outcome.into_events().into_iter().map(|e| (competition.name.clone(), e))
            })
            .collect()
    }

    pub fn selection_window(&self) -> &SelectionWindow {
        &self.window
    }

    /// Deadline shared by every fetch of one run
    fn run_deadline(&self) -> Instant {
        let started = Instant::now();
        started
            .checked_add(self.config.run_timeout())
            .unwrap_or_else(|| started + Duration::from_secs(MAX_RUN_TIMEOUT_SECS))
    }

    async fn soccer_outcomes(&self, deadline: Instant) -> Vec<SegmentOutcome> {
        join_all(self.config.soccer.competitions.iter().map(|competition| {
            self.guarded(
                format!("competition {}", competition.league),
                deadline,
                self.provider.scoreboard(SOCCER_SPORT, &competition.league),
            )
        }))
        .await
    }

    /// Bound a fetch by the shared permit pool and the run deadline
    async fn guarded<F>(&self, label: String, deadline: Instant, fetch: F) -> SegmentOutcome
    where
        F: Future<Output = Result<Vec<Value>, FetchError>>,
    {
        let result = timeout_at(deadline, async {
            let _permit = self.permits.acquire().await;
            fetch.await
        })
        .await;

        match result {
            Ok(Ok(events)) => SegmentOutcome::Fetched(events),
            Ok(Err(e)) => {
                warn!("Source {} failed: {}", label, e);
                SegmentOutcome::Failed
            }
            Err(_) => {
                warn!("Source {} did not finish before the run deadline", label);
                SegmentOutcome::TimedOut
            }
        }
    }
}
