//! Raw scoreboard payloads as delivered by the scores provider.
//!
//! Every field is optional: the provider omits fields freely depending on the
//! endpoint (team schedule vs. league scoreboard) and on the fixture state.
//! Callers go through the accessor methods, which return `Option` and leave
//! the choice of default to the normalizer.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Deserialize;

/// One event (fixture) entry from a scoreboard or a team's `nextEvent` list
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct RawEvent {
    pub id: Option<String>,
    pub name: Option<String>,
    pub date: Option<String>,
    pub competitions: Vec<RawCompetition>,
    pub status: Option<RawStatus>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct RawCompetition {
    pub date: Option<String>,
    pub competitors: Vec<RawCompetitor>,
    pub status: Option<RawStatus>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct RawCompetitor {
    pub home_away: Option<String>,
    pub team: Option<RawTeam>,
    pub score: Option<RawScore>,
    pub records: Vec<RawRecord>,
    /// Team schedule endpoints use `record` instead of `records`
    pub record: Vec<RawRecord>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct RawTeam {
    pub display_name: Option<String>,
    pub short_display_name: Option<String>,
    pub logo: Option<String>,
    pub logos: Vec<RawLogo>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawLogo {
    pub href: Option<String>,
}

/// Scores arrive as text on scoreboards and as an object on team schedules
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawScore {
    Text(String),
    Number(f64),
    Detailed(RawScoreDetail),
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct RawScoreDetail {
    pub value: Option<f64>,
    pub display_value: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct RawRecord {
    pub summary: Option<String>,
    pub display_value: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct RawStatus {
    pub display_clock: Option<String>,
    pub period: Option<u32>,
    #[serde(rename = "type")]
    pub status_type: Option<RawStatusType>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct RawStatusType {
    pub state: Option<String>,
    pub description: Option<String>,
    pub detail: Option<String>,
    pub completed: Option<bool>,
}

/// Which side of the fixture a competitor plays on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Home,
    Away,
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

impl RawEvent {
    /// Parse a payload, returning `None` when its structure does not match
    pub fn from_value(value: &serde_json::Value) -> Option<Self> {
        Self::deserialize(value).ok()
    }

    pub fn competition(&self) -> Option<&RawCompetition> {
        self.competitions.first()
    }

    pub fn competitors(&self) -> &[RawCompetitor] {
        self.competition().map(|c| c.competitors.as_slice()).unwrap_or(&[])
    }

    /// Kickoff text, preferring the event date over the competition date
    pub fn start_text(&self) -> Option<&str> {
        non_empty(&self.date).or_else(|| self.competition().and_then(|c| non_empty(&c.date)))
    }

    /// Status object, preferring the competition's over the event's
    pub fn status(&self) -> Option<&RawStatus> {
        self.competition().and_then(|c| c.status.as_ref()).or(self.status.as_ref())
    }

    pub fn label(&self) -> &str {
        non_empty(&self.name).or_else(|| non_empty(&self.id)).unwrap_or("<unnamed event>")
    }
}

impl RawCompetitor {
    pub fn side(&self) -> Option<Side> {
        match self.home_away.as_deref().map(str::trim) {
            Some(s) if s.eq_ignore_ascii_case("home") => Some(Side::Home),
            Some(s) if s.eq_ignore_ascii_case("away") => Some(Side::Away),
            _ => None,
        }
    }

    pub fn display_name(&self) -> Option<&str> {
        self.team.as_ref().and_then(|t| non_empty(&t.display_name))
    }

    pub fn short_name(&self) -> Option<&str> {
        self.team.as_ref().and_then(|t| non_empty(&t.short_display_name))
    }

    pub fn logo(&self) -> Option<&str> {
        let team = self.team.as_ref()?;
        non_empty(&team.logo).or_else(|| team.logos.first().and_then(|l| non_empty(&l.href)))
    }

    pub fn score_text(&self) -> Option<String> {
        match self.score.as_ref()? {
            RawScore::Text(text) => Some(text.trim().to_string()).filter(|s| !s.is_empty()),
            RawScore::Number(value) => Some(format_score(*value)),
            RawScore::Detailed(detail) => non_empty(&detail.display_value)
                .map(str::to_string)
                .or_else(|| detail.value.map(format_score)),
        }
    }

    pub fn record_summary(&self) -> Option<&str> {
        self.records
            .iter()
            .chain(self.record.iter())
            .find_map(|r| non_empty(&r.summary).or_else(|| non_empty(&r.display_value)))
    }
}

impl RawStatus {
    pub fn state(&self) -> Option<&str> {
        self.status_type.as_ref().and_then(|t| non_empty(&t.state))
    }

    /// Explicit completed flag, `None` when the provider leaves it out
    pub fn completed(&self) -> Option<bool> {
        self.status_type.as_ref().and_then(|t| t.completed)
    }

    pub fn description(&self) -> Option<&str> {
        self.status_type
            .as_ref()
            .and_then(|t| non_empty(&t.description).or_else(|| non_empty(&t.detail)))
    }

    pub fn clock(&self) -> Option<&str> {
        non_empty(&self.display_clock)
    }
}

fn format_score(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}

/// Parse a provider timestamp into UTC
///
/// Accepts RFC 3339 with any offset notation, plus the minute-precision
/// `YYYY-MM-DDTHH:MMZ` form the scoreboard endpoints use.
pub fn parse_start_time(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(text) {
        return Some(parsed.with_timezone(&Utc));
    }
    if let Some(naive) = text.strip_suffix('Z').or_else(|| text.strip_suffix('z')) {
        return NaiveDateTime::parse_from_str(naive, "%Y-%m-%dT%H:%M")
            .ok()
            .map(|dt| dt.and_utc());
    }
    DateTime::parse_from_str(text, "%Y-%m-%dT%H:%M%:z")
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn test_parse_start_time_variants() {
        let expected = Utc.with_ymd_and_hms(2024, 5, 1, 19, 0, 0).unwrap();

        assert_eq!(parse_start_time("2024-05-01T19:00Z"), Some(expected));
        assert_eq!(parse_start_time("2024-05-01T19:00:00Z"), Some(expected));
        assert_eq!(parse_start_time("2024-05-01T21:00:00+02:00"), Some(expected));
        assert_eq!(parse_start_time("2024-05-01T14:00-05:00"), Some(expected));
        assert_eq!(parse_start_time(" 2024-05-01T19:00Z "), Some(expected));

        assert_eq!(parse_start_time(""), None);
        assert_eq!(parse_start_time("tomorrow"), None);
        assert_eq!(parse_start_time("2024-05-01"), None);
    }

    #[test]
    fn test_score_shapes() {
        let event = RawEvent::from_value(&json!({
            "competitions": [{
                "competitors": [
                    { "score": "2" },
                    { "score": 3.0 },
                    { "score": { "value": 1.0, "displayValue": "1" } },
                    { "score": { "value": 4.0 } },
                    { "score": "" },
                    {}
                ]
            }]
        }))
        .unwrap();

        let scores: Vec<Option<String>> =
            event.competitors().iter().map(RawCompetitor::score_text).collect();
        assert_eq!(
            scores,
            vec![
                Some("2".to_string()),
                Some("3".to_string()),
                Some("1".to_string()),
                Some("4".to_string()),
                None,
                None,
            ]
        );
    }

    #[test]
    fn test_logo_and_record_fallbacks() {
        let event = RawEvent::from_value(&json!({
            "competitions": [{
                "competitors": [
                    {
                        "team": { "displayName": "Boston Celtics", "logos": [{ "href": "https://a/bos.png" }] },
                        "record": [{ "displayValue": "50-20" }]
                    },
                    {
                        "team": { "displayName": "Los Angeles Lakers", "logo": "https://a/lal.png" },
                        "records": [{ "summary": "40-30" }]
                    }
                ]
            }]
        }))
        .unwrap();

        let comps = event.competitors();
        assert_eq!(comps[0].logo(), Some("https://a/bos.png"));
        assert_eq!(comps[0].record_summary(), Some("50-20"));
        assert_eq!(comps[1].logo(), Some("https://a/lal.png"));
        assert_eq!(comps[1].record_summary(), Some("40-30"));
        assert_eq!(comps[1].short_name(), None);
    }

    #[test]
    fn test_status_prefers_competition() {
        let event = RawEvent::from_value(&json!({
            "status": { "type": { "state": "pre" } },
            "competitions": [{ "status": { "type": { "state": "in" }, "period": 2 } }]
        }))
        .unwrap();

        let status = event.status().unwrap();
        assert_eq!(status.state(), Some("in"));
        assert_eq!(status.period, Some(2));
    }

    #[test]
    fn test_malformed_payload_is_rejected() {
        assert!(RawEvent::from_value(&json!("not an event")).is_none());
        assert!(RawEvent::from_value(&json!({ "competitions": "nope" })).is_none());
    }
}
