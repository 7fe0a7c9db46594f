//! Fixture selector: normalize, window, deduplicate, score, rank, truncate

use crate::config::{CompetitionPriority, SelectionWindow};
use crate::models::GameRecord;
use crate::normalizer::normalize_value;
use crate::scorer::score;
use chrono::{DateTime, Utc};
use std::cmp::Ordering;
use std::collections::HashMap;
use tracing::debug;

/// A scored fixture held only while ranking
#[derive(Debug, Clone, PartialEq)]
pub struct RankedCandidate {
    pub record: GameRecord,
    pub competition: String,
    pub score: f64,
    pub start: DateTime<Utc>,
}

impl RankedCandidate {
    /// Ranking order: higher score first, then earlier kickoff, then matchup
    /// name so equal fixtures still come out in a stable order
    fn rank_cmp(&self, other: &Self) -> Ordering {
        other
            .score
            .total_cmp(&self.score)
            .then_with(|| self.start.cmp(&other.start))
            .then_with(|| self.record.matchup_key().cmp(&other.record.matchup_key()))
    }
}

/// Whether a kickoff falls inside `[now - grace, now + horizon]`
///
/// A bound that falls outside chrono's representable range leaves that side
/// of the window open.
pub fn within_window(start: DateTime<Utc>, window: &SelectionWindow, now: DateTime<Utc>) -> bool {
    let after_earliest = now.checked_sub_signed(window.grace).map_or(true, |earliest| start >= earliest);
    let before_latest = now.checked_add_signed(window.horizon).map_or(true, |latest| start <= latest);
    after_earliest && before_latest
}

/// Score and rank every usable fixture from a set of competition feeds
///
/// Each input pair is (competition name, raw event payload). The result is
/// fully ordered but not truncated.
pub fn rank_candidates(
    feeds: &[(String, serde_json::Value)],
    priority: &CompetitionPriority,
    window: &SelectionWindow,
    now: DateTime<Utc>,
) -> Vec<RankedCandidate> {
    let mut best: HashMap<(String, String), RankedCandidate> = HashMap::new();

    for (competition, payload) in feeds {
        let record = normalize_value(payload, false);
        let Some(start) = record.start else {
            continue;
        };
        if !within_window(start, window, now) {
            debug!(
                "Skipping {} vs {} ({}): kickoff {} outside window",
                record.home.name, record.away.name, competition, start
            );
            continue;
        }

        let candidate = RankedCandidate {
            score: score(&record, competition, priority, now),
            competition: competition.clone(),
            start,
            record,
        };

        // Same matchup from several feeds: keep the best-ranked occurrence
        match best.entry(candidate.record.matchup_key()) {
            std::collections::hash_map::Entry::Occupied(mut slot) => {
                if candidate.rank_cmp(slot.get()) == Ordering::Less {
                    slot.insert(candidate);
                }
            }
            std::collections::hash_map::Entry::Vacant(slot) => {
                slot.insert(candidate);
            }
        }
    }

    let mut ranked: Vec<RankedCandidate> = best.into_values().collect();
    ranked.sort_by(RankedCandidate::rank_cmp);
    ranked
}

/// Pick the top fixtures across competitions
///
/// Returns at most `window.limit` records and never pads with empty ones.
pub fn select_top_fixtures(
    feeds: &[(String, serde_json::Value)],
    priority: &CompetitionPriority,
    window: &SelectionWindow,
    now: DateTime<Utc>,
) -> Vec<GameRecord> {
    let ranked = rank_candidates(feeds, priority, window, now);
    debug!("Ranked {} fixture candidates from {} payloads", ranked.len(), feeds.len());

    ranked.into_iter().take(window.limit).map(|c| c.record).collect()
}
