use crate::config::{ProviderConfig, RetryConfig};
use crate::error::FetchError;
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::future::Future;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, info, warn};

/// Source of raw event payloads
///
/// Both calls return the provider's event objects untouched; normalization
/// happens in the fixture engine.
#[async_trait]
pub trait ScoresProvider: Send + Sync {
    /// Upcoming (or just played) events for one team
    async fn team_events(&self, sport: &str, league: &str, team: &str)
        -> Result<Vec<Value>, FetchError>;

    /// Today's and upcoming events for one league or competition
    async fn scoreboard(&self, sport: &str, league: &str) -> Result<Vec<Value>, FetchError>;
}

/// Scores provider backed by the ESPN site API
pub struct EspnScoresFetcher {
    config: ProviderConfig,
    client: Client,
}

impl EspnScoresFetcher {
    /// Create a new fetcher instance
    pub fn new(config: ProviderConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { config, client })
    }

    fn url(&self, path: &[&str]) -> String {
        let mut url = self.config.base_url.trim_end_matches('/').to_string();
        for segment in path {
            url.push('/');
            url.push_str(segment.trim_matches('/'));
        }
        url
    }

    async fn get_json(&self, url: &str) -> Result<Value, FetchError> {
        debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| FetchError::Http { url: url.to_string(), source })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status { url: url.to_string(), status });
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| FetchError::Decode { url: url.to_string(), message: e.to_string() })
    }

    async fn get_json_with_retry(&self, url: &str) -> Result<Value, FetchError> {
        run_with_retry(|| self.get_json(url), &self.config.retry).await
    }
}

#[async_trait]
impl ScoresProvider for EspnScoresFetcher {
    async fn team_events(
        &self,
        sport: &str,
        league: &str,
        team: &str,
    ) -> Result<Vec<Value>, FetchError> {
        let url = self.url(&[sport, league, "teams", team]);
        let body = self.get_json_with_retry(&url).await?;
        let events = extract_events(&body, "/team/nextEvent");

        info!("Fetched {} upcoming events for {}/{} team {}", events.len(), sport, league, team);
        Ok(events)
    }

    async fn scoreboard(&self, sport: &str, league: &str) -> Result<Vec<Value>, FetchError> {
        let url = self.url(&[sport, league, "scoreboard"]);
        let body = self.get_json_with_retry(&url).await?;
        let events = extract_events(&body, "/events");

        info!("Fetched {} scoreboard events for {}/{}", events.len(), sport, league);
        Ok(events)
    }
}

/// Pull the event array at `pointer`; a missing or non-array value means no events
pub fn extract_events(body: &Value, pointer: &str) -> Vec<Value> {
    body.pointer(pointer).and_then(Value::as_array).cloned().unwrap_or_default()
}

/// Run a request with exponential backoff on retryable errors
pub async fn run_with_retry<F, Fut, T>(mut f: F, retry: &RetryConfig) -> Result<T, FetchError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, FetchError>>,
{
    let mut delay = Duration::from_millis(retry.initial_delay_ms);
    let mut attempt = 0;

    loop {
        attempt += 1;
        match f().await {
            Ok(result) => return Ok(result),
            Err(e) if attempt <= retry.max_retries && e.is_retryable() => {
                warn!("Attempt {} failed: {}, retrying in {:?}", attempt, e, delay);
                sleep(delay).await;

                // Exponential backoff
                delay = Duration::from_millis(
                    (delay.as_millis() as f64 * retry.backoff_multiplier)
                        .min(retry.max_delay_ms as f64) as u64,
                );
            }
            Err(e) => return Err(e),
        }
    }
}
