//! Threshold suppression of weak role scores.
//!
//! For each player, every numeric attribute other than the anchor is zeroed
//! when it is strictly below `anchor - offset`. Rows are independent, so the
//! transform runs in parallel.

use rayon::prelude::*;
use squadforge_core::{PlayerRecord, Pool, Result, SelectionError};
use tracing::info;

/// Zeroes role scores below a per-player cutoff derived from the anchor.
///
/// There is no default offset: callers pass the value they intend.
///
/// # Example
///
/// ```
/// use squadforge_core::{PlayerRecord, Pool};
/// use squadforge_scoring::ThresholdSuppressor;
///
/// let pool = Pool::new(vec![PlayerRecord::new("A")
///     .with_metric("Highest Role Score", 14.0)
///     .with_metric("cdd", 14.0)
///     .with_metric("fbs", 13.6)
///     .with_metric("dms", 12.0)]);
///
/// let suppressed = ThresholdSuppressor::new("Highest Role Score", 0.5)
///     .apply(&pool)
///     .unwrap();
/// let a = suppressed.get("A").unwrap();
/// assert_eq!(a.role_score("fbs"), 13.6);
/// assert_eq!(a.role_score("dms"), 0.0);
/// ```
#[derive(Debug, Clone)]
pub struct ThresholdSuppressor {
    score_attribute: String,
    offset: f64,
}

impl ThresholdSuppressor {
    pub fn new(score_attribute: impl Into<String>, offset: f64) -> Self {
        Self {
            score_attribute: score_attribute.into(),
            offset,
        }
    }

    pub fn score_attribute(&self) -> &str {
        &self.score_attribute
    }

    pub fn offset(&self) -> f64 {
        self.offset
    }

    /// Returns a new pool with weak scores zeroed.
    ///
    /// # Errors
    ///
    /// [`SelectionError::MissingColumn`] if the anchor is not in the pool schema.
    pub fn apply(&self, pool: &Pool) -> Result<Pool> {
        suppress(pool, &self.score_attribute, self.offset)
    }
}

/// Zeroes every non-anchor attribute strictly below `anchor - offset`.
///
/// A player without the anchor value has all attributes zeroed.
pub fn suppress(pool: &Pool, score_attribute: &str, offset: f64) -> Result<Pool> {
    if !pool.has_column(score_attribute) {
        return Err(SelectionError::MissingColumn(score_attribute.to_string()));
    }

    let (players, zeroed): (Vec<PlayerRecord>, Vec<usize>) = pool
        .players()
        .par_iter()
        .map(|player| suppress_player(player, score_attribute, offset))
        .unzip();

    info!(
        event = "suppress",
        player_count = players.len(),
        zeroed = zeroed.iter().sum::<usize>(),
        offset = offset,
    );

    Ok(Pool::from_parts(players, pool.columns().clone()))
}

fn suppress_player(player: &PlayerRecord, score_attribute: &str, offset: f64) -> (PlayerRecord, usize) {
    let cutoff = player.metric(score_attribute).map(|anchor| anchor - offset);
    let mut out = player.clone();
    let mut zeroed = 0;

    for (key, &value) in player.metrics() {
        if key == score_attribute {
            continue;
        }
        let keep = cutoff.is_some_and(|c| value >= c);
        if !keep {
            out.set_metric(key.as_str(), 0.0);
            if value != 0.0 {
                zeroed += 1;
            }
        }
    }
    (out, zeroed)
}

#[cfg(test)]
mod tests;
