//! Game resolver: pick the one "current or next" game for a team or league

use crate::models::{GameRecord, GameStatus};
use crate::normalizer::normalize_value;
use chrono::{DateTime, Duration, FixedOffset, Utc};

/// Resolve the game to show from a team's or league's candidate events
///
/// Preference order:
/// 1. a game currently in progress (earliest kickoff if several),
/// 2. the earliest scheduled game kicking off at or after `now - grace`, so
///    a delayed start that has not gone live yet is still shown,
/// 3. a final that kicked off earlier on the same local calendar day in
///    `zone` (the most recent one),
/// 4. the empty record.
pub fn resolve_current_or_next(
    candidates: &[GameRecord],
    now: DateTime<Utc>,
    grace: Duration,
    zone: FixedOffset,
) -> GameRecord {
    let with_start = || candidates.iter().filter_map(|r| r.start.map(|start| (start, r)));

    if let Some((_, live)) = with_start().filter(|(_, r)| r.is_live()).min_by_key(|(start, _)| *start) {
        return live.clone();
    }

    let earliest = now.checked_sub_signed(grace);
    if let Some((_, next)) = with_start()
        .filter(|(start, r)| {
            r.status == GameStatus::Scheduled && earliest.map_or(true, |earliest| *start >= earliest)
        })
        .min_by_key(|(start, _)| *start)
    {
        return next.clone();
    }

    let today = now.with_timezone(&zone).date_naive();
    with_start()
        .filter(|(start, r)| {
            r.status == GameStatus::Final
                && *start <= now
                && start.with_timezone(&zone).date_naive() == today
        })
        .max_by_key(|(start, _)| *start)
        .map(|(_, finished)| finished.clone())
        .unwrap_or_else(GameRecord::empty)
}

/// Normalize raw payloads and resolve them in one step
pub fn resolve_from_values(
    payloads: &[serde_json::Value],
    include_records: bool,
    now: DateTime<Utc>,
    grace: Duration,
    zone: FixedOffset,
) -> GameRecord {
    let records: Vec<GameRecord> = payloads
        .iter()
        .map(|p| normalize_value(p, include_records))
        .filter(|r| !r.is_empty())
        .collect();
    resolve_current_or_next(&records, now, grace, zone)
}
