use anyhow::{bail, Context, Result};
use chrono::FixedOffset;
use fixture_engine::{CompetitionPriority, SelectionWindow};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Prefix for environment overrides, e.g. `SPORTS__RUN__OUTPUT_PATH`
pub const ENV_PREFIX: &str = "SPORTS";

/// Output keys that teams and leagues may not use
pub const RESERVED_KEYS: [&str; 2] = ["updated", "soccer"];

/// Upper bounds on time settings; anything larger overflows date arithmetic
pub const MAX_GRACE_HOURS: i64 = 48;
pub const MAX_HORIZON_DAYS: i64 = 365;
pub const MAX_REQUEST_TIMEOUT_SECS: u64 = 300;
pub const MAX_RUN_TIMEOUT_SECS: u64 = 3_600;

/// Configuration for one scores batch run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetcherConfig {
    /// Scores provider API configuration
    pub provider: ProviderConfig,

    /// Followed teams, one output key each
    pub teams: Vec<TeamSource>,

    /// Followed leagues, one output key each
    pub leagues: Vec<LeagueSource>,

    /// Soccer aggregation
    pub soccer: SoccerConfig,

    /// Batch run settings
    pub run: RunConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Base URL, sport and league path segments are appended
    pub base_url: String,

    /// Per-request timeout in seconds
    pub request_timeout_secs: u64,

    /// Retry configuration
    pub retry: RetryConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Retries after the first attempt
    pub max_retries: u32,

    /// Initial retry delay in milliseconds
    pub initial_delay_ms: u64,

    /// Maximum retry delay in milliseconds
    pub max_delay_ms: u64,

    /// Backoff multiplier
    pub backoff_multiplier: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamSource {
    /// Output key (e.g., "eagles")
    pub key: String,
    pub sport: String,
    pub league: String,
    /// Provider team id or abbreviation
    pub team: String,
    /// Include season record summaries
    #[serde(default = "default_true")]
    pub include_records: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeagueSource {
    /// Output key (e.g., "nba")
    pub key: String,
    pub sport: String,
    pub league: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompetitionSource {
    /// Provider league slug (e.g., "uefa.champions")
    pub league: String,
    /// Competition name used for scoring
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SoccerConfig {
    pub competitions: Vec<CompetitionSource>,
    pub priority: CompetitionPriority,
    pub grace_hours: i64,
    pub horizon_days: i64,
    pub limit: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunConfig {
    /// Fetches allowed in flight at once
    pub max_concurrent_fetches: usize,

    /// Whole-run deadline in seconds
    pub run_timeout_secs: u64,

    /// Offset of the reference zone used for "same day" checks
    pub reference_utc_offset_hours: i32,

    /// Where the board JSON is written
    pub output_path: PathBuf,
}

fn default_true() -> bool {
    true
}

fn team(key: &str, sport: &str, league: &str, team: &str) -> TeamSource {
    TeamSource {
        key: key.to_string(),
        sport: sport.to_string(),
        league: league.to_string(),
        team: team.to_string(),
        include_records: true,
    }
}

fn league(key: &str, sport: &str, league: &str) -> LeagueSource {
    LeagueSource { key: key.to_string(), sport: sport.to_string(), league: league.to_string() }
}

fn competition(league: &str, name: &str) -> CompetitionSource {
    CompetitionSource { league: league.to_string(), name: name.to_string() }
}

impl Default for FetcherConfig {
    fn default() -> Self {
        let window = SelectionWindow::default();
        Self {
            provider: ProviderConfig {
                base_url: "https://site.api.espn.com/apis/site/v2/sports".to_string(),
                request_timeout_secs: 10,
                retry: RetryConfig {
                    max_retries: 2,
                    initial_delay_ms: 500,
                    max_delay_ms: 4_000,
                    backoff_multiplier: 2.0,
                },
            },
            teams: vec![
                team("eagles", "football", "nfl", "phi"),
                team("sixers", "basketball", "nba", "phi"),
                team("phillies", "baseball", "mlb", "phi"),
                team("flyers", "hockey", "nhl", "phi"),
            ],
            leagues: vec![
                league("nfl", "football", "nfl"),
                league("nba", "basketball", "nba"),
                league("mlb", "baseball", "mlb"),
                league("nhl", "hockey", "nhl"),
            ],
            soccer: SoccerConfig {
                competitions: vec![
                    competition("fifa.world", "FIFA World Cup"),
                    competition("uefa.euro", "UEFA European Championship"),
                    competition("uefa.champions", "UEFA Champions League"),
                    competition("uefa.europa", "UEFA Europa League"),
                    competition("eng.1", "English Premier League"),
                    competition("esp.1", "Spanish LALIGA"),
                    competition("ita.1", "Italian Serie A"),
                    competition("ger.1", "German Bundesliga"),
                    competition("usa.1", "MLS"),
                    competition("club.friendly", "Club Friendly"),
                ],
                priority: CompetitionPriority::default(),
                grace_hours: window.grace.num_hours(),
                horizon_days: window.horizon.num_days(),
                limit: window.limit,
            },
            run: RunConfig {
                max_concurrent_fetches: 8,
                run_timeout_secs: 45,
                reference_utc_offset_hours: -5,
                output_path: PathBuf::from("sports.json"),
            },
        }
    }
}

impl FetcherConfig {
    /// Load configuration: defaults, then an optional TOML file, then
    /// `SPORTS__*` environment overrides
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let defaults = config::Config::try_from(&Self::default())
            .context("Failed to serialize default configuration")?;

        let mut builder = config::Config::builder().add_source(defaults);
        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path).required(true));
        }
        builder = builder.add_source(
            config::Environment::with_prefix(ENV_PREFIX).separator("__").try_parsing(true),
        );

        let config: Self = builder
            .build()
            .context("Failed to load configuration")?
            .try_deserialize()
            .context("Invalid configuration")?;

        config.validate()?;
        Ok(config)
    }

    /// Reject settings that would make a run misbehave silently
    pub fn validate(&self) -> Result<()> {
        if self.run.max_concurrent_fetches == 0 {
            bail!("run.max_concurrent_fetches must be at least 1");
        }
        if self.soccer.limit == 0 {
            bail!("soccer.limit must be at least 1");
        }
        if !(0..=MAX_GRACE_HOURS).contains(&self.soccer.grace_hours) {
            bail!("soccer.grace_hours must be within 0..={MAX_GRACE_HOURS}, got {}", self.soccer.grace_hours);
        }
        if !(0..=MAX_HORIZON_DAYS).contains(&self.soccer.horizon_days) {
            bail!(
                "soccer.horizon_days must be within 0..={MAX_HORIZON_DAYS}, got {}",
                self.soccer.horizon_days
            );
        }
        if !(1..=MAX_REQUEST_TIMEOUT_SECS).contains(&self.provider.request_timeout_secs) {
            bail!(
                "provider.request_timeout_secs must be within 1..={MAX_REQUEST_TIMEOUT_SECS}, got {}",
                self.provider.request_timeout_secs
            );
        }
        if !(1..=MAX_RUN_TIMEOUT_SECS).contains(&self.run.run_timeout_secs) {
            bail!(
                "run.run_timeout_secs must be within 1..={MAX_RUN_TIMEOUT_SECS}, got {}",
                self.run.run_timeout_secs
            );
        }
        self.reference_zone()?;

        let mut seen = HashSet::new();
        for key in self.teams.iter().map(|t| &t.key).chain(self.leagues.iter().map(|l| &l.key)) {
            if key.trim().is_empty() {
                bail!("team and league keys must not be empty");
            }
            if RESERVED_KEYS.contains(&key.as_str()) {
                bail!("output key {key:?} is reserved");
            }
            if !seen.insert(key.as_str()) {
                bail!("duplicate output key {key:?}");
            }
        }

        Ok(())
    }

    pub fn selection_window(&self) -> SelectionWindow {
        SelectionWindow::new(self.soccer.grace_hours, self.soccer.horizon_days, self.soccer.limit)
    }

    /// Reference zone for "earlier today" checks
    pub fn reference_zone(&self) -> Result<FixedOffset> {
        let hours = self.run.reference_utc_offset_hours;
        if !(-23..=23).contains(&hours) {
            bail!("run.reference_utc_offset_hours must be within -23..=23, got {hours}");
        }
        FixedOffset::east_opt(hours * 3600)
            .with_context(|| format!("Invalid reference offset: {hours} hours"))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.provider.request_timeout_secs)
    }

    pub fn run_timeout(&self) -> Duration {
        Duration::from_secs(self.run.run_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config_is_valid() {
        let config = FetcherConfig::default();
        config.validate().unwrap();

        assert_eq!(config.selection_window(), SelectionWindow::default());
        assert_eq!(config.reference_zone().unwrap(), FixedOffset::west_opt(5 * 3600).unwrap());
        assert_eq!(config.request_timeout(), Duration::from_secs(10));
    }

    #[test]
    fn test_validate_rejects_bad_settings() {
        let mut config = FetcherConfig::default();
        config.run.max_concurrent_fetches = 0;
        assert!(config.validate().is_err());

        let mut config = FetcherConfig::default();
        config.soccer.limit = 0;
        assert!(config.validate().is_err());

        let mut config = FetcherConfig::default();
        config.run.reference_utc_offset_hours = 30;
        assert!(config.validate().is_err());

        let mut config = FetcherConfig::default();
        config.leagues.push(league("eagles", "football", "nfl"));
        assert!(config.validate().is_err());

        let mut config = FetcherConfig::default();
        config.teams.push(team("soccer", "soccer", "eng.1", "359"));
        assert!(config.validate().is_err());

        let mut config = FetcherConfig::default();
        config.soccer.horizon_days = 100_000_000;
        assert!(config.validate().is_err());

        let mut config = FetcherConfig::default();
        config.soccer.grace_hours = i64::MAX;
        assert!(config.validate().is_err());

        let mut config = FetcherConfig::default();
        config.soccer.grace_hours = -1;
        assert!(config.validate().is_err());

        let mut config = FetcherConfig::default();
        config.run.run_timeout_secs = u64::MAX;
        assert!(config.validate().is_err());

        let mut config = FetcherConfig::default();
        config.run.run_timeout_secs = 0;
        assert!(config.validate().is_err());

        let mut config = FetcherConfig::default();
        config.provider.request_timeout_secs = u64::MAX;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_accepts_upper_bounds() {
        let mut config = FetcherConfig::default();
        config.soccer.grace_hours = MAX_GRACE_HOURS;
        config.soccer.horizon_days = MAX_HORIZON_DAYS;
        config.provider.request_timeout_secs = MAX_REQUEST_TIMEOUT_SECS;
        config.run.run_timeout_secs = MAX_RUN_TIMEOUT_SECS;
        config.validate().unwrap();
    }

    #[test]
    fn test_load_from_file_overrides_defaults() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
[run]
max_concurrent_fetches = 2
run_timeout_secs = 20
reference_utc_offset_hours = 1
output_path = "out/board.json"

[[teams]]
key = "arsenal"
sport = "soccer"
league = "eng.1"
team = "359"
include_records = false

[[leagues]]
key = "epl"
sport = "soccer"
league = "eng.1"
"#
        )
        .unwrap();

        let config = FetcherConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.run.max_concurrent_fetches, 2);
        assert_eq!(config.run.output_path, PathBuf::from("out/board.json"));
        assert_eq!(config.teams.len(), 1);
        assert_eq!(config.teams[0].key, "arsenal");
        assert!(!config.teams[0].include_records);
        assert_eq!(config.leagues[0].key, "epl");
        // Untouched sections keep their defaults
        assert_eq!(config.soccer.limit, 3);
        assert_eq!(config.provider.request_timeout_secs, 10);
    }

    #[test]
    fn test_example_config_loads() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("sports.example.toml");
        let config = FetcherConfig::load(Some(&path)).unwrap();

        assert_eq!(config.teams.len(), 2);
        assert!(config.teams[0].include_records);
        assert_eq!(config.soccer.competitions.len(), 2);
        assert_eq!(config.soccer.priority.top_teams.len(), 3);
    }

    #[test]
    fn test_load_missing_file_fails() {
        assert!(FetcherConfig::load(Some(Path::new("/nonexistent/sports.toml"))).is_err());
    }
}
