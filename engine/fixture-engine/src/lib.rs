//! Fixture Engine
//!
//! Turns raw scoreboard payloads into canonical game records, resolves the
//! current-or-next game for teams and leagues, and ranks soccer fixtures by
//! importance and kickoff time.
//!
//! Everything in this crate is synchronous and free of I/O. Time-dependent
//! operations take the run's captured `now` explicitly.

pub mod config;
pub mod error;
pub mod models;
pub mod normalizer;
pub mod payload;
pub mod resolver;
pub mod scorer;
pub mod selector;

pub use config::{CompetitionPriority, CompetitionTier, SelectionWindow};
pub use error::NormalizeError;
pub use models::{GameRecord, GameStatus, TeamSide};
pub use normalizer::{normalize, normalize_value, try_normalize};
pub use resolver::{resolve_current_or_next, resolve_from_values};
pub use scorer::score;
pub use selector::{rank_candidates, select_top_fixtures, within_window, RankedCandidate};
