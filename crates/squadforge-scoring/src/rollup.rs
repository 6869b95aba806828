//! Per-role ranking of eligible players.
//!
//! A read-only view over a prepared pool: for each formation role, the players
//! with a nonzero score for it, best first. No optimization is involved.

use squadforge_core::{Formation, Pool};

/// A player and their score for one role.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RankedPlayer {
    pub name: String,
    pub score: f64,
}

/// Ranking for a single role.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RoleRanking {
    pub role: String,
    pub players: Vec<RankedPlayer>,
}

/// Rankings for every role of a formation, in formation order.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct PositionRollup {
    rankings: Vec<RoleRanking>,
}

impl PositionRollup {
    pub fn rankings(&self) -> &[RoleRanking] {
        &self.rankings
    }

    /// Ranking for a role, `None` if the role is not in the formation.
    pub fn get(&self, role: &str) -> Option<&[RankedPlayer]> {
        self.rankings
            .iter()
            .find(|r| r.role == role)
            .map(|r| r.players.as_slice())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RoleRanking> {
        self.rankings.iter()
    }

    pub fn len(&self) -> usize {
        self.rankings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rankings.is_empty()
    }
}

/// Ranks, per formation role, the players with a nonzero score.
///
/// Scores are sorted descending; equal scores keep pool order.
pub fn rollup(pool: &Pool, formation: &Formation) -> PositionRollup {
    let rankings = formation
        .roles()
        .map(|role| {
            let mut players: Vec<RankedPlayer> = pool
                .iter()
                .map(|p| RankedPlayer {
                    name: p.name().to_string(),
                    score: p.role_score(role),
                })
                .filter(|r| r.score != 0.0 && !r.score.is_nan())
                .collect();
            players.sort_by(|a, b| b.score.total_cmp(&a.score));
            RoleRanking {
                role: role.to_string(),
                players,
            }
        })
        .collect();

    PositionRollup { rankings }
}

#[cfg(test)]
mod tests {
    use super::*;
    use squadforge_test::club::{club_formation, club_pool};
    use squadforge_test::{formation, player, pool, three_player_pool};

    #[test]
    fn test_rollup_orders_descending_and_skips_zero() {
        let result = rollup(&three_player_pool(), &formation(&[("gkd", 1), ("cdd", 2)]));
        assert_eq!(result.len(), 2);

        let gk = result.get("gkd").unwrap();
        assert_eq!(gk.len(), 1);
        assert_eq!(gk[0].name, "A");

        let cd: Vec<_> = result.get("cdd").unwrap().iter().map(|r| r.name.as_str()).collect();
        assert_eq!(cd, ["B", "C"]);
    }

    #[test]
    fn test_ties_keep_pool_order() {
        let source = pool(vec![
            player("X", &[("cdd", 12.0)]),
            player("Y", &[("cdd", 13.0)]),
            player("Z", &[("cdd", 12.0)]),
        ]);
        let result = rollup(&source, &formation(&[("cdd", 1)]));
        let names: Vec<_> = result.get("cdd").unwrap().iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["Y", "X", "Z"]);
    }

    #[test]
    fn test_formation_order_and_missing_role() {
        let result = rollup(&club_pool(), &club_formation());
        let roles: Vec<_> = result.iter().map(|r| r.role.as_str()).collect();
        assert_eq!(roles, ["gkd", "cdd", "fbs", "dms", "cma", "wa", "afa"]);
        assert!(result.get("cfa").is_none());
        assert_eq!(result.get("gkd").unwrap()[0].name, "Keeper One");
    }
}
