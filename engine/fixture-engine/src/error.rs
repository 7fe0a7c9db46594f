//! Error types for fixture normalization

use thiserror::Error;

/// Reasons a single payload cannot become a canonical record
///
/// None of these are fatal: `normalize` maps every variant to the empty record.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NormalizeError {
    #[error("payload does not match the event schema")]
    Malformed,

    #[error("expected exactly 2 competitors, found {found}")]
    MissingCompetitors { found: usize },

    #[error("payload has no start time")]
    MissingStartTime,

    #[error("unparseable start time: {0}")]
    InvalidStartTime(String),

    #[error("{side} competitor has no team name")]
    MissingTeamName { side: &'static str },

    #[error("game was postponed or canceled")]
    NotPlayed,
}
