//! A 24-player club roster with a matching 4-3-3 style formation.
//!
//! Every player has one or two strong roles within 0.5 of their best score
//! and a weak off-role that threshold suppression removes.

use squadforge_core::{Formation, PlayerRecord, Pool};

use crate::builders::{formation, scored_player};

/// Club name carried by every roster entry.
pub const CLUB: &str = "Valencia";

type Row = (&'static str, f64, &'static str, &'static [(&'static str, f64)]);

const ROSTER: &[Row] = &[
    ("Keeper One", 29.0, "GK", &[("gkd", 15.2), ("cdd", 5.0)]),
    ("Keeper Two", 24.0, "GK", &[("gkd", 13.1)]),
    ("Keeper Three", 19.0, "GK", &[("gkd", 11.0)]),
    ("Stone", 31.0, "D (C)", &[("cdd", 14.8), ("fbs", 9.0)]),
    ("Wall", 26.0, "D (RC)", &[("cdd", 14.1), ("fbs", 13.9)]),
    ("Brick", 22.0, "D (C)", &[("cdd", 12.9), ("dms", 10.1)]),
    ("Post", 33.0, "D (C)", &[("cdd", 12.0)]),
    ("Rock", 18.0, "D (C)", &[("cdd", 11.2)]),
    ("Rush", 25.0, "D (R)", &[("fbs", 13.7), ("wa", 10.0)]),
    ("Dash", 28.0, "D (L)", &[("fbs", 13.0)]),
    ("Flank", 21.0, "D (L), AM (L)", &[("fbs", 12.4), ("wa", 12.2)]),
    ("Lane", 30.0, "D (R)", &[("fbs", 11.5)]),
    ("Anchor", 27.0, "DM, M (C)", &[("dms", 14.0), ("cma", 13.8)]),
    ("Shield", 23.0, "DM", &[("dms", 12.6), ("cdd", 9.5)]),
    ("Engine", 26.0, "M (C)", &[("cma", 14.5), ("dms", 11.0)]),
    ("Pivot", 32.0, "DM, M (C)", &[("cma", 13.4), ("dms", 13.2)]),
    ("Runner", 20.0, "M (C)", &[("cma", 12.8)]),
    ("Spare", 29.0, "M (C)", &[("cma", 11.9)]),
    ("Spark", 24.0, "AM (RL)", &[("wa", 14.9), ("afa", 11.0)]),
    ("Flash", 22.0, "AM (L)", &[("wa", 13.6)]),
    ("Swift", 19.0, "AM (R), ST (C)", &[("wa", 12.7), ("afa", 12.5)]),
    ("Ace", 28.0, "ST (C)", &[("afa", 15.5)]),
    ("Hunter", 30.0, "ST (C)", &[("afa", 13.3)]),
    ("Target", 34.0, "ST (C)", &[("afa", 12.1), ("cdd", 8.0)]),
];

/// Every roster entry as a record tagged with [`CLUB`].
pub fn club_players() -> Vec<PlayerRecord> {
    ROSTER
        .iter()
        .map(|(name, age, position, roles)| {
            scored_player(name, *age, position, roles).with_club(CLUB)
        })
        .collect()
}

/// The roster as a pool.
pub fn club_pool() -> Pool {
    Pool::new(club_players())
}

/// gkd=1 cdd=2 fbs=2 dms=1 cma=2 wa=2 afa=1 (11 players).
pub fn club_formation() -> Formation {
    formation(&[
        ("gkd", 1),
        ("cdd", 2),
        ("fbs", 2),
        ("dms", 1),
        ("cma", 2),
        ("wa", 2),
        ("afa", 1),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_roster_names_unique() {
        let names: HashSet<_> = ROSTER.iter().map(|r| r.0).collect();
        assert_eq!(names.len(), ROSTER.len());
    }

    #[test]
    fn test_formation_fills_eleven() {
        assert_eq!(club_formation().total_headcount(), 11);
        assert_eq!(club_pool().len(), 24);
    }
}
