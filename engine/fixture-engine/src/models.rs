use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Status classification of a fixture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum GameStatus {
    #[default]
    Scheduled,
    InProgress,
    Final,
}

impl GameStatus {
    /// Classify a provider status.
    ///
    /// `"in"` is the only live state. `"post"` or an explicit completed flag
    /// marks the game as final; everything else is still scheduled.
    pub fn from_provider(state: Option<&str>, completed: bool) -> Self {
        match state {
            Some("in") => GameStatus::InProgress,
            Some("post") => GameStatus::Final,
            _ if completed => GameStatus::Final,
            _ => GameStatus::Scheduled,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GameStatus::Scheduled => "scheduled",
            GameStatus::InProgress => "in_progress",
            GameStatus::Final => "final",
        }
    }
}

impl std::fmt::Display for GameStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One side of a fixture
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct TeamSide {
    /// Full display name (e.g., "Manchester City")
    pub name: String,

    /// Short display name, falls back to `name`
    pub short_name: String,

    /// Score as text, empty when unavailable
    pub score: String,

    /// Logo URL, empty when unavailable
    pub logo: String,

    /// Season record summary (e.g., "10-4-2"), empty unless requested
    pub record: String,
}

/// Canonical representation of one fixture
///
/// Every downstream component consumes this shape. The serialized form is
/// identical whether the record carries real data or is the empty record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct GameRecord {
    pub home: TeamSide,
    pub away: TeamSide,

    /// Scheduled kickoff in UTC, `None` only for the empty record
    pub start: Option<DateTime<Utc>>,

    pub status: GameStatus,

    /// Provider's human-readable status (e.g., "Halftime", "Final")
    pub detail: String,

    /// Live clock display (e.g., "67'", "5:42")
    pub clock: String,

    /// Period / quarter / half indicator, 0 before kickoff
    pub period: u32,

    /// Mirrors `status == InProgress`
    pub live: bool,
}

impl GameRecord {
    /// The record that stands in for "no game"
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.start.is_none()
    }

    pub fn is_live(&self) -> bool {
        self.status == GameStatus::InProgress
    }

    /// Unordered, case-insensitive key identifying the matchup
    ///
    /// (A, B) and (B, A) produce the same key.
    pub fn matchup_key(&self) -> (String, String) {
        let home = self.home.name.trim().to_lowercase();
        let away = self.away.name.trim().to_lowercase();
        if home <= away {
            (home, away)
        } else {
            (away, home)
        }
    }
}
