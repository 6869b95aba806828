//! Roster exports and team filtering.
//!
//! A roster is a JSON document with a top-level `data` array, one object per
//! player:
//!
//! ```json
//! {"data": [{"Name": "Stone", "Age": 27, "Position": "D (C)", "Club": "Valencia",
//!            "Highest Role Score": 14.0, "cdd": 14.0, "fbs": 11.0}]}
//! ```
//!
//! `Name` is required. Numeric attributes besides `Age` (role scores and the
//! best-score anchor) become metrics; other text is carried through. A player
//! without `Age` is logged and has no known age.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;
use serde_json::Value;
use squadforge_core::{PlayerRecord, Pool};
use thiserror::Error;
use tracing::{info, warn};

/// Roster loading error
#[derive(Debug, Error)]
pub enum RosterError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Deserialize)]
struct RosterDocument {
    data: Vec<RawPlayer>,
}

#[derive(Debug, Deserialize)]
struct RawPlayer {
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "Age", default)]
    age: Option<f64>,
    #[serde(rename = "Position", alias = "Positions", default)]
    position: Option<String>,
    #[serde(rename = "Club", default)]
    club: Option<String>,
    #[serde(rename = "Nat", default)]
    nationality: Option<String>,
    #[serde(rename = "Transfer Value", default)]
    transfer_value: Option<String>,
    #[serde(rename = "Wage", default)]
    wage: Option<String>,
    #[serde(flatten)]
    rest: BTreeMap<String, Value>,
}

impl RawPlayer {
    fn into_record(self) -> PlayerRecord {
        let mut record = PlayerRecord::new(self.name);
        match self.age {
            Some(age) => record = record.with_age(age),
            None => warn!(event = "missing_age", player = record.name()),
        }
        if let Some(position) = self.position {
            record = record.with_position(position);
        }
        if let Some(club) = self.club {
            record = record.with_club(club);
        }
        if let Some(nat) = self.nationality {
            record = record.with_nationality(nat);
        }
        if let Some(value) = self.transfer_value {
            record = record.with_transfer_value(value);
        }
        if let Some(wage) = self.wage {
            record = record.with_wage(wage);
        }
        for (key, value) in self.rest {
            record = match value {
                Value::Number(n) => match n.as_f64() {
                    Some(v) => record.with_metric(key, v),
                    None => record,
                },
                Value::String(s) => record.with_attribute(key, s),
                Value::Bool(b) => record.with_attribute(key, b.to_string()),
                Value::Null | Value::Array(_) | Value::Object(_) => record,
            };
        }
        record
    }
}

/// Every player of an export, across all clubs and nationalities.
#[derive(Debug, Clone, Default)]
pub struct Roster {
    pool: Pool,
}

impl Roster {
    /// Parses a roster from JSON text.
    ///
    /// # Errors
    ///
    /// [`RosterError::Json`] for malformed JSON, a missing `data` array or a
    /// player without `Name`.
    pub fn from_json_str(s: &str) -> Result<Self, RosterError> {
        let document: RosterDocument = serde_json::from_str(s)?;
        let pool: Pool = document.data.into_iter().map(RawPlayer::into_record).collect();
        info!(
            event = "roster_loaded",
            player_count = pool.len(),
            column_count = pool.columns().len(),
        );
        Ok(Self { pool })
    }

    /// Reads and parses a roster file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, RosterError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    pub fn pool(&self) -> &Pool {
        &self.pool
    }

    pub fn len(&self) -> usize {
        self.pool.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pool.is_empty()
    }

    /// Players matching `filter`, with the full roster schema.
    pub fn select(&self, filter: &RosterFilter) -> Pool {
        filter.apply(&self.pool)
    }
}

/// Which players of a roster a selection draws from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterFilter {
    /// Club name, or nationality when `national_squad` is set. Matched exactly.
    pub team: String,
    pub national_squad: bool,
    /// Players excluded by name.
    pub remove: Vec<String>,
}

impl RosterFilter {
    pub fn club(team: impl Into<String>) -> Self {
        Self {
            team: team.into(),
            national_squad: false,
            remove: Vec::new(),
        }
    }

    pub fn nation(team: impl Into<String>) -> Self {
        Self {
            national_squad: true,
            ..Self::club(team)
        }
    }

    pub fn with_national_squad(mut self, enabled: bool) -> Self {
        self.national_squad = enabled;
        self
    }

    pub fn removing<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.remove.extend(names.into_iter().map(Into::into));
        self
    }

    fn matches_team(&self, player: &PlayerRecord) -> bool {
        let team = if self.national_squad {
            player.nationality()
        } else {
            player.club()
        };
        team == Some(self.team.as_str())
    }

    /// Keeps the team's players minus the removed names.
    pub fn apply(&self, pool: &Pool) -> Pool {
        let selected = pool
            .filtered(|p| self.matches_team(p))
            .without_names(self.remove.iter().map(String::as_str));
        info!(
            event = "roster_filter",
            team = self.team.as_str(),
            player_count = selected.len(),
            removed = self.remove.len(),
        );
        selected
    }
}
