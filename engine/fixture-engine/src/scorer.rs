//! Relevance scorer for soccer fixtures
//!
//! Pure function of (record, competition name, priority table, now). The
//! caller captures `now` once per run; nothing here reads the clock.

use crate::config::{CompetitionPriority, CompetitionTier};
use crate::models::{GameRecord, TeamSide};
use chrono::{DateTime, Utc};

/// Bonus for a world or continental championship
pub const CONTINENTAL_BONUS: f64 = 100.0;

/// Bonus for a top domestic league
pub const DOMESTIC_BONUS: f64 = 50.0;

/// Bonus per side that is a headline club or nation
pub const TOP_TEAM_BONUS: f64 = 20.0;

/// Penalty per hour until kickoff
pub const HOURLY_PENALTY: f64 = 0.1;

/// Score a fixture; higher is more relevant
///
/// Kickoffs at or before `now` carry no time penalty. The empty record
/// scores 0 from competition and team bonuses only.
pub fn score(
    record: &GameRecord,
    competition: &str,
    priority: &CompetitionPriority,
    now: DateTime<Utc>,
) -> f64 {
    let competition_bonus = match priority.tier(competition) {
        CompetitionTier::Continental => CONTINENTAL_BONUS,
        CompetitionTier::Domestic => DOMESTIC_BONUS,
        CompetitionTier::Other => 0.0,
    };

    let team_bonus = [&record.home, &record.away]
        .into_iter()
        .filter(|side| is_top_side(side, priority))
        .count() as f64
        * TOP_TEAM_BONUS;

    competition_bonus + team_bonus - time_penalty(record, now)
}

fn is_top_side(side: &TeamSide, priority: &CompetitionPriority) -> bool {
    priority.is_top_team(&side.name) || priority.is_top_team(&side.short_name)
}

fn time_penalty(record: &GameRecord, now: DateTime<Utc>) -> f64 {
    match record.start {
        Some(start) if start > now => {
            let hours = (start - now).num_seconds() as f64 / 3600.0;
            hours * HOURLY_PENALTY
        }
        _ => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn fixture(home: &str, away: &str, start: DateTime<Utc>) -> GameRecord {
        let mut record = GameRecord::empty();
        record.home.name = home.to_string();
        record.home.short_name = home.to_string();
        record.away.name = away.to_string();
        record.away.short_name = away.to_string();
        record.start = Some(start);
        record
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 4, 10, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_competition_and_team_bonuses() {
        let priority = CompetitionPriority::default();
        let record = fixture("Real Madrid", "Manchester City", now());

        assert_eq!(score(&record, "UEFA Champions League", &priority, now()), 140.0);
        assert_eq!(score(&record, "English Premier League", &priority, now()), 90.0);
        assert_eq!(score(&record, "Club Friendly", &priority, now()), 40.0);

        let record = fixture("Girona", "Manchester City", now());
        assert_eq!(score(&record, "Club Friendly", &priority, now()), 20.0);

        let record = fixture("Girona", "Getafe", now());
        assert_eq!(score(&record, "Club Friendly", &priority, now()), 0.0);
    }

    #[test]
    fn test_short_name_counts_as_top_team() {
        let priority = CompetitionPriority::default();
        let mut record = fixture("FC Barcelona", "Girona", now());
        record.home.short_name = "Barcelona".to_string();
        assert_eq!(score(&record, "", &priority, now()), 20.0);
    }

    #[test]
    fn test_sooner_kickoff_scores_higher() {
        let priority = CompetitionPriority::default();
        let soon = fixture("A", "B", now() + Duration::hours(2));
        let later = fixture("C", "D", now() + Duration::hours(30));

        let soon_score = score(&soon, "UEFA Champions League", &priority, now());
        let later_score = score(&later, "UEFA Champions League", &priority, now());

        assert!((soon_score - 99.8).abs() < 1e-9);
        assert!((later_score - 97.0).abs() < 1e-9);
        assert!(soon_score > later_score);
    }

    #[test]
    fn test_started_fixture_has_no_penalty() {
        let priority = CompetitionPriority::default();
        let started = fixture("A", "B", now() - Duration::hours(1));
        assert_eq!(score(&started, "Club Friendly", &priority, now()), 0.0);
    }

    #[test]
    fn test_horizon_penalty_stays_below_one_team_bonus() {
        let priority = CompetitionPriority::default();
        let far = fixture("Liverpool", "Girona", now() + Duration::days(7));
        let near = fixture("Everton", "Girona", now());

        assert!(score(&far, "", &priority, now()) > score(&near, "", &priority, now()));
    }

    #[test]
    fn test_score_is_deterministic() {
        let priority = CompetitionPriority::default();
        let record = fixture("Arsenal", "Chelsea", now() + Duration::minutes(95));

        let first = score(&record, "English Premier League", &priority, now());
        let second = score(&record, "English Premier League", &priority, now());
        assert_eq!(first.to_bits(), second.to_bits());
    }
}
