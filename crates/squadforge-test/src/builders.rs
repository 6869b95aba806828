//! Terse constructors for test data.

use squadforge_core::{Formation, PlayerRecord, Pool};

/// Anchor column used by roster exports.
pub const SCORE_ATTRIBUTE: &str = "Highest Role Score";

/// Creates a player with role scores and the anchor set to the best score.
pub fn player(name: &str, roles: &[(&str, f64)]) -> PlayerRecord {
    let best = roles.iter().map(|(_, s)| *s).fold(0.0, f64::max);
    roles
        .iter()
        .fold(PlayerRecord::new(name), |p, (role, score)| {
            p.with_metric(*role, *score)
        })
        .with_metric(SCORE_ATTRIBUTE, best)
}

/// Creates a player with age, position text and role scores.
pub fn scored_player(name: &str, age: f64, position: &str, roles: &[(&str, f64)]) -> PlayerRecord {
    player(name, roles).with_age(age).with_position(position)
}

/// Builds a pool from players.
pub fn pool(players: Vec<PlayerRecord>) -> Pool {
    Pool::new(players)
}

/// Builds a formation, panicking on invalid input.
pub fn formation(entries: &[(&str, u32)]) -> Formation {
    Formation::new(entries.iter().map(|(r, c)| (*r, *c))).expect("valid test formation")
}

/// A goalkeeper and two defenders.
///
/// | name | gkd | cdd |
/// |------|-----|-----|
/// | A    | 10  | 0   |
/// | B    | 0   | 12  |
/// | C    | 0   | 8   |
pub fn three_player_pool() -> Pool {
    pool(vec![
        scored_player("A", 25.0, "GK", &[("gkd", 10.0), ("cdd", 0.0)]),
        scored_player("B", 27.0, "D (C)", &[("gkd", 0.0), ("cdd", 12.0)]),
        scored_player("C", 21.0, "D (LC)", &[("gkd", 0.0), ("cdd", 8.0)]),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_anchor_is_best_score() {
        let p = player("X", &[("cdd", 11.0), ("bpdd", 13.5)]);
        assert_eq!(p.metric(SCORE_ATTRIBUTE), Some(13.5));
    }

    #[test]
    fn test_three_player_pool() {
        let pool = three_player_pool();
        assert_eq!(pool.len(), 3);
        assert_eq!(pool.get("B").unwrap().role_score("cdd"), 12.0);
    }
}
