//! Event normalizer: raw payload -> `GameRecord`

use crate::error::NormalizeError;
use crate::models::{GameRecord, GameStatus, TeamSide};
use crate::payload::{parse_start_time, RawCompetitor, RawEvent, Side};
use tracing::debug;

/// Normalize a raw JSON payload
///
/// Never fails: anything that cannot be normalized becomes the empty record.
pub fn normalize_value(value: &serde_json::Value, include_records: bool) -> GameRecord {
    match RawEvent::from_value(value) {
        Some(event) => normalize(&event, include_records),
        None => {
            debug!("Dropping payload: {}", NormalizeError::Malformed);
            GameRecord::empty()
        }
    }
}

/// Normalize a typed payload, falling back to the empty record
pub fn normalize(event: &RawEvent, include_records: bool) -> GameRecord {
    try_normalize(event, include_records).unwrap_or_else(|e| {
        debug!("Dropping event {}: {}", event.label(), e);
        GameRecord::empty()
    })
}

/// Normalize a typed payload, reporting why it was rejected
pub fn try_normalize(event: &RawEvent, include_records: bool) -> Result<GameRecord, NormalizeError> {
    let competitors = event.competitors();
    if competitors.len() != 2 {
        return Err(NormalizeError::MissingCompetitors { found: competitors.len() });
    }

    let start_text = event.start_text().ok_or(NormalizeError::MissingStartTime)?;
    let start = parse_start_time(start_text)
        .ok_or_else(|| NormalizeError::InvalidStartTime(start_text.to_string()))?;

    let (home, away) = split_sides(competitors);
    if home.display_name().is_none() {
        return Err(NormalizeError::MissingTeamName { side: "home" });
    }
    if away.display_name().is_none() {
        return Err(NormalizeError::MissingTeamName { side: "away" });
    }

    let status = event.status();
    // The provider reports postponed and canceled games as "post" without
    // marking them completed
    if status.is_some_and(|s| s.state() == Some("post") && s.completed() == Some(false)) {
        return Err(NormalizeError::NotPlayed);
    }
    let game_status = GameStatus::from_provider(
        status.and_then(|s| s.state()),
        status.and_then(|s| s.completed()).unwrap_or(false),
    );

    Ok(GameRecord {
        home: team_side(home, include_records),
        away: team_side(away, include_records),
        start: Some(start),
        status: game_status,
        detail: status.and_then(|s| s.description()).unwrap_or_default().to_string(),
        clock: status.and_then(|s| s.clock()).unwrap_or_default().to_string(),
        period: status.and_then(|s| s.period).unwrap_or(0),
        live: game_status == GameStatus::InProgress,
    })
}

/// Pick home and away from exactly two competitors
///
/// Explicit side markers are authoritative. When they are missing or
/// contradictory (both "home"), the payload order is used: first is home.
fn split_sides(competitors: &[RawCompetitor]) -> (&RawCompetitor, &RawCompetitor) {
    let (first, second) = (&competitors[0], &competitors[1]);
    match (first.side(), second.side()) {
        (Some(Side::Away), Some(Side::Home))
        | (Some(Side::Away), None)
        | (None, Some(Side::Home)) => (second, first),
        _ => (first, second),
    }
}

fn team_side(competitor: &RawCompetitor, include_records: bool) -> TeamSide {
    let name = competitor.display_name().unwrap_or_default().to_string();
    let short_name = competitor.short_name().map(str::to_string).unwrap_or_else(|| name.clone());
    let record = if include_records {
        competitor.record_summary().unwrap_or_default().to_string()
    } else {
        String::new()
    };

    TeamSide {
        name,
        short_name,
        score: competitor.score_text().unwrap_or_default(),
        logo: competitor.logo().unwrap_or_default().to_string(),
        record,
    }
}
