//! Sports board assembly and the JSON output writer

use anyhow::{Context, Result};
use chrono::{DateTime, SecondsFormat, Utc};
use fixture_engine::GameRecord;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::info;

/// Final output of one run
///
/// Serialized as a single flat object: `updated`, one key per team, one key
/// per league, and `soccer` with the ranked fixture list.
#[derive(Debug, Clone, PartialEq)]
pub struct SportsBoard {
    pub updated: DateTime<Utc>,
    pub teams: BTreeMap<String, GameRecord>,
    pub leagues: BTreeMap<String, GameRecord>,
    pub soccer: Vec<GameRecord>,
}

impl SportsBoard {
    pub fn new(updated: DateTime<Utc>) -> Self {
        Self { updated, teams: BTreeMap::new(), leagues: BTreeMap::new(), soccer: Vec::new() }
    }

    pub fn to_json(&self) -> Result<Value> {
        let mut object = Map::new();
        object.insert(
            "updated".to_string(),
            Value::String(self.updated.to_rfc3339_opts(SecondsFormat::Secs, true)),
        );
        for (key, record) in self.teams.iter().chain(self.leagues.iter()) {
            let value = serde_json::to_value(record)
                .with_context(|| format!("Failed to serialize record for {key}"))?;
            object.insert(key.clone(), value);
        }
        object.insert(
            "soccer".to_string(),
            serde_json::to_value(&self.soccer).context("Failed to serialize soccer fixtures")?,
        );
        Ok(Value::Object(object))
    }

    /// Slots that ended up without a game
    pub fn empty_slots(&self) -> usize {
        self.teams.values().chain(self.leagues.values()).filter(|r| r.is_empty()).count()
    }
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_else(|| "board".into());
    name.push(".tmp");
    path.with_file_name(name)
}

/// Write the board as pretty JSON, replacing the previous file atomically
pub async fn write_board(path: &Path, board: &SportsBoard) -> Result<()> {
    let json = serde_json::to_string_pretty(&board.to_json()?)
        .context("Failed to render sports board")?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }

    let tmp = temp_path(path);
    tokio::fs::write(&tmp, json)
        .await
        .with_context(|| format!("Failed to write {}", tmp.display()))?;
    tokio::fs::rename(&tmp, path)
        .await
        .with_context(|| format!("Failed to move board into place at {}", path.display()))?;

    info!("Wrote sports board to {}", path.display());
    Ok(())
}
