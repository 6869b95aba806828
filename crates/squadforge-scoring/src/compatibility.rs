//! Role/position compatibility filtering.
//!
//! A role score survives only when the role's generic category is one the
//! player can actually play according to their position text. Unknown and
//! unmapped roles never survive.

use rayon::prelude::*;
use squadforge_core::{AllowedPositionSet, Formation, PlayerRecord, Pool, RoleCatalog};
use tracing::{info, warn};

/// Zeroes role scores incompatible with each player's real positions.
#[derive(Debug, Clone)]
pub struct RoleCompatibilityFilter {
    roles: Vec<String>,
}

impl RoleCompatibilityFilter {
    pub fn new<I, S>(roles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            roles: roles.into_iter().map(Into::into).collect(),
        }
    }

    /// Filters exactly the roles of a formation.
    pub fn for_formation(formation: &Formation) -> Self {
        Self::new(formation.roles())
    }

    pub fn roles(&self) -> &[String] {
        &self.roles
    }

    /// Returns a new pool with incompatible role scores zeroed.
    pub fn apply(&self, pool: &Pool) -> Pool {
        restrict(pool, &self.roles)
    }
}

/// Zeroes, for every player, each listed role whose category the player
/// cannot occupy.
///
/// Position text with no extractable token is logged and treated as allowing
/// nothing, so every listed role is zeroed for that player.
pub fn restrict<S: AsRef<str> + Sync>(pool: &Pool, roles: &[S]) -> Pool {
    let (players, zeroed): (Vec<PlayerRecord>, Vec<usize>) = pool
        .players()
        .par_iter()
        .map(|player| restrict_player(player, roles))
        .unzip();

    info!(
        event = "restrict",
        player_count = players.len(),
        role_count = roles.len(),
        zeroed = zeroed.iter().sum::<usize>(),
    );

    Pool::from_parts(players, pool.columns().clone())
}

fn restrict_player<S: AsRef<str>>(player: &PlayerRecord, roles: &[S]) -> (PlayerRecord, usize) {
    let allowed = AllowedPositionSet::parse(player.position()).unwrap_or_else(|err| {
        warn!(event = "malformed_position", player = player.name(), error = %err);
        AllowedPositionSet::default()
    });

    let mut out = player.clone();
    let mut zeroed = 0;
    for role in roles {
        let role = role.as_ref();
        let compatible = RoleCatalog::category(role).is_some_and(|c| allowed.allows(c));
        if compatible {
            continue;
        }
        if let Some(score) = player.metric(role) {
            out.set_metric(role, 0.0);
            if score != 0.0 {
                zeroed += 1;
            }
        }
    }
    (out, zeroed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use squadforge_test::{formation, pool, scored_player};

    #[test]
    fn test_striker_role_zeroed_for_defensive_midfielder() {
        let source = pool(vec![scored_player(
            "A",
            26.0,
            "DM (R)",
            &[("cfa", 18.0), ("dmd", 12.0)],
        )]);
        let result = restrict(&source, &["cfa", "dmd"]);
        let a = result.get("A").unwrap();
        assert_eq!(a.role_score("cfa"), 0.0);
        assert_eq!(a.role_score("dmd"), 12.0);
        assert_eq!(source.get("A").unwrap().role_score("cfa"), 18.0);
    }

    #[test]
    fn test_only_listed_roles_are_touched() {
        let source = pool(vec![scored_player("A", 26.0, "GK", &[("cfa", 11.0), ("gkd", 14.0)])]);
        let result = restrict(&source, &["gkd"]);
        assert_eq!(result.get("A").unwrap().role_score("cfa"), 11.0);
        assert_eq!(result.get("A").unwrap().role_score("gkd"), 14.0);
    }

    #[test]
    fn test_multi_position_player() {
        let source = pool(vec![scored_player(
            "A",
            26.0,
            "AM/DM (L/C)",
            &[("ams", 13.0), ("dms", 12.5), ("cma", 12.8), ("wba", 11.0)],
        )]);
        let result = RoleCompatibilityFilter::new(["ams", "dms", "cma", "wba"]).apply(&source);
        let a = result.get("A").unwrap();
        assert_eq!(a.role_score("ams"), 13.0);
        assert_eq!(a.role_score("dms"), 12.5);
        assert_eq!(a.role_score("cma"), 0.0);
        assert_eq!(a.role_score("wba"), 0.0);
    }

    #[test]
    fn test_unmapped_and_unknown_roles_zeroed() {
        let source = pool(vec![scored_player(
            "A",
            26.0,
            "M (C)",
            &[("wma", 14.0), ("mystery", 14.0)],
        )]);
        let result = restrict(&source, &["wma", "mystery"]);
        assert_eq!(result.get("A").unwrap().role_score("wma"), 0.0);
        assert_eq!(result.get("A").unwrap().role_score("mystery"), 0.0);
    }

    #[test]
    fn test_malformed_position_zeroes_every_role() {
        let source = pool(vec![scored_player("A", 26.0, "", &[("gkd", 14.0), ("cdd", 13.0)])]);
        let result = restrict(&source, &["gkd", "cdd"]);
        assert_eq!(result.get("A").unwrap().role_score("gkd"), 0.0);
        assert_eq!(result.get("A").unwrap().role_score("cdd"), 0.0);
    }

    #[test]
    fn test_for_formation_uses_formation_roles() {
        let filter = RoleCompatibilityFilter::for_formation(&formation(&[("gkd", 1), ("afa", 1)]));
        assert_eq!(filter.roles(), ["gkd".to_string(), "afa".to_string()]);
    }
}
