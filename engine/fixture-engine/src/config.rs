//! Static ranking configuration

use chrono::Duration;
use serde::{Deserialize, Serialize};

/// Competitions and teams that make a fixture worth showing
///
/// Loaded once per run and passed by reference into the scorer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CompetitionPriority {
    /// World and continental championships (highest tier)
    pub continental: Vec<String>,

    /// Top domestic leagues
    pub domestic: Vec<String>,

    /// Headline clubs and national teams
    pub top_teams: Vec<String>,
}

/// Tier a competition name falls into
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum CompetitionTier {
    Other,
    Domestic,
    Continental,
}

fn to_owned_list(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

impl Default for CompetitionPriority {
    fn default() -> Self {
        Self {
            continental: to_owned_list(&[
                "FIFA World Cup",
                "UEFA European Championship",
                "Copa America",
                "UEFA Champions League",
                "Copa Libertadores",
                "UEFA Europa League",
                "UEFA Nations League",
                "FIFA Club World Cup",
            ]),
            domestic: to_owned_list(&[
                "English Premier League",
                "Spanish LALIGA",
                "Italian Serie A",
                "German Bundesliga",
                "French Ligue 1",
                "MLS",
            ]),
            top_teams: to_owned_list(&[
                "Real Madrid",
                "Barcelona",
                "Manchester City",
                "Manchester United",
                "Liverpool",
                "Arsenal",
                "Chelsea",
                "Bayern Munich",
                "Paris Saint-Germain",
                "Juventus",
                "Inter Milan",
                "AC Milan",
                "Inter Miami CF",
                "Argentina",
                "Brazil",
                "France",
                "England",
                "Spain",
                "Germany",
                "Portugal",
                "United States",
            ]),
        }
    }
}

impl CompetitionPriority {
    /// Classify a competition by case-insensitive substring match
    ///
    /// Continental entries are checked first so "UEFA Champions League
    /// Qualifying" does not fall through to a domestic entry.
    pub fn tier(&self, competition: &str) -> CompetitionTier {
        let competition = competition.trim().to_lowercase();
        if competition.is_empty() {
            return CompetitionTier::Other;
        }
        let matches = |names: &[String]| {
            names.iter().any(|n| {
                let n = n.trim().to_lowercase();
                !n.is_empty() && competition.contains(&n)
            })
        };

        if matches(&self.continental) {
            CompetitionTier::Continental
        } else if matches(&self.domestic) {
            CompetitionTier::Domestic
        } else {
            CompetitionTier::Other
        }
    }

    /// Whether a team name is on the headline list (case-insensitive equality)
    pub fn is_top_team(&self, name: &str) -> bool {
        let name = name.trim().to_lowercase();
        !name.is_empty() && self.top_teams.iter().any(|t| t.trim().to_lowercase() == name)
    }
}

/// Time window and size of the ranked fixture list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionWindow {
    /// How far in the past a kickoff may be and still count
    pub grace: Duration,

    /// How far in the future a kickoff may be
    pub horizon: Duration,

    /// Maximum number of fixtures returned
    pub limit: usize,
}

impl Default for SelectionWindow {
    fn default() -> Self {
        Self { grace: Duration::hours(3), horizon: Duration::days(7), limit: 3 }
    }
}

impl SelectionWindow {
    pub fn new(grace_hours: i64, horizon_days: i64, limit: usize) -> Self {
        Self { grace: Duration::hours(grace_hours), horizon: Duration::days(horizon_days), limit }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_matching() {
        let priority = CompetitionPriority::default();

        assert_eq!(priority.tier("UEFA Champions League"), CompetitionTier::Continental);
        assert_eq!(priority.tier("uefa champions league qualifying"), CompetitionTier::Continental);
        assert_eq!(priority.tier("English Premier League"), CompetitionTier::Domestic);
        assert_eq!(priority.tier("Scottish Premiership"), CompetitionTier::Other);
        assert_eq!(priority.tier(""), CompetitionTier::Other);
        assert!(CompetitionTier::Continental > CompetitionTier::Domestic);
    }

    #[test]
    fn test_blank_entries_never_match() {
        let priority = CompetitionPriority {
            continental: vec!["  ".to_string()],
            domestic: vec![],
            top_teams: vec!["".to_string()],
        };
        assert_eq!(priority.tier("Anything"), CompetitionTier::Other);
        assert!(!priority.is_top_team(""));
        assert!(!priority.is_top_team("Anything"));
    }

    #[test]
    fn test_top_team_matching() {
        let priority = CompetitionPriority::default();
        assert!(priority.is_top_team("Arsenal"));
        assert!(priority.is_top_team(" real madrid "));
        assert!(!priority.is_top_team("Real"));

        let priority = CompetitionPriority {
            top_teams: vec!["Atlético Madrid".to_string()],
            ..CompetitionPriority::default()
        };
        assert!(priority.is_top_team("ATLÉTICO MADRID"));
        assert!(priority.is_top_team("atlético madrid"));
    }

    #[test]
    fn test_window_defaults() {
        let window = SelectionWindow::default();
        assert_eq!(window, SelectionWindow::new(3, 7, 3));
    }
}
