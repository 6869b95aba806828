//! Role catalog: maps in-game role codes to generic position categories.
//!
//! The catalog is a static, read-only table. A code can be:
//! - known and mapped to one of the seven [`PositionCategory`] buckets,
//! - known but deliberately unmapped ([`RoleCategory::Unmapped`]),
//! - unknown (not in the table at all).
//!
//! Unmapped codes are a first-class value so that a compatibility check can
//! never silently pass a role it knows nothing about.

use std::fmt;

/// Coarse position bucket a role belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PositionCategory {
    Goalkeeper,
    Defender,
    DefensiveMidfielder,
    Midfielder,
    AttackingMidfielder,
    WingBack,
    Striker,
}

impl PositionCategory {
    /// All categories in catalog order.
    pub const ALL: [PositionCategory; 7] = [
        PositionCategory::Defender,
        PositionCategory::DefensiveMidfielder,
        PositionCategory::Midfielder,
        PositionCategory::AttackingMidfielder,
        PositionCategory::WingBack,
        PositionCategory::Goalkeeper,
        PositionCategory::Striker,
    ];

    /// The short code used in roster position text ("GK", "DM", ...).
    pub fn code(&self) -> &'static str {
        match self {
            PositionCategory::Goalkeeper => "GK",
            PositionCategory::Defender => "D",
            PositionCategory::DefensiveMidfielder => "DM",
            PositionCategory::Midfielder => "M",
            PositionCategory::AttackingMidfielder => "AM",
            PositionCategory::WingBack => "WB",
            PositionCategory::Striker => "ST",
        }
    }

    /// Parses a short code. Matching is exact and case-sensitive.
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.code() == code)
    }
}

impl fmt::Display for PositionCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Catalog entry for a known role code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoleCategory {
    Mapped(PositionCategory),
    Unmapped,
}

impl RoleCategory {
    /// Returns the mapped category, if any.
    pub fn category(&self) -> Option<PositionCategory> {
        match self {
            RoleCategory::Mapped(c) => Some(*c),
            RoleCategory::Unmapped => None,
        }
    }
}

use PositionCategory::{
    AttackingMidfielder as AM, Defender as D, DefensiveMidfielder as DM, Goalkeeper as GK,
    Midfielder as M, Striker as ST, WingBack as WB,
};
use RoleCategory::{Mapped, Unmapped};

/// Role table. Bump [`RoleCatalog::VERSION`] whenever an entry changes.
const ROLE_TABLE: &[(&str, RoleCategory)] = &[
    // Goalkeepers
    ("gkd", Mapped(GK)),
    ("ska", Mapped(GK)),
    ("skd", Mapped(GK)),
    ("sks", Mapped(GK)),
    // Defenders
    ("fba", Mapped(D)),
    ("fbd", Mapped(D)),
    ("fbs", Mapped(D)),
    ("bpdc", Mapped(D)),
    ("bpdd", Mapped(D)),
    ("bpds", Mapped(D)),
    ("cdc", Mapped(D)),
    ("cdd", Mapped(D)),
    ("cds", Mapped(D)),
    ("ifbd", Mapped(D)),
    ("iwba", Mapped(D)),
    ("iwbd", Mapped(D)),
    ("iwbs", Mapped(D)),
    ("ncbc", Mapped(D)),
    ("ncbd", Mapped(D)),
    ("ncbs", Mapped(D)),
    ("wcba", Mapped(D)),
    ("wcbd", Mapped(D)),
    ("wcbs", Mapped(D)),
    ("ld", Mapped(D)),
    ("ls", Mapped(D)),
    ("nfbd", Unmapped),
    // Wing-backs
    ("wba", Mapped(WB)),
    ("wbd", Mapped(WB)),
    ("wbs", Mapped(WB)),
    ("cwba", Mapped(WB)),
    ("cwbs", Mapped(WB)),
    // Defensive midfielders
    ("ad", Mapped(DM)),
    ("bwmd", Mapped(DM)),
    ("bwms", Mapped(DM)),
    ("dmd", Mapped(DM)),
    ("dms", Mapped(DM)),
    ("hbd", Mapped(DM)),
    ("regs", Mapped(DM)),
    ("dlpd", Mapped(DM)),
    ("dlps", Mapped(DM)),
    ("rps", Mapped(DM)),
    // Central midfielders
    ("apa", Mapped(M)),
    ("b2bs", Mapped(M)),
    ("cars", Mapped(M)),
    ("cma", Mapped(M)),
    ("cmd", Mapped(M)),
    ("cms", Mapped(M)),
    ("dwd", Mapped(M)),
    ("dws", Mapped(M)),
    ("meza", Mapped(M)),
    ("mezs", Mapped(M)),
    ("sva", Mapped(M)),
    ("svs", Mapped(M)),
    ("wma", Unmapped),
    ("wmd", Unmapped),
    ("wms", Unmapped),
    ("wpa", Unmapped),
    ("wps", Unmapped),
    // Attacking midfielders
    ("aps", Mapped(AM)),
    ("engs", Mapped(AM)),
    ("ama", Mapped(AM)),
    ("ams", Mapped(AM)),
    ("f9s", Mapped(AM)),
    ("ifa", Mapped(AM)),
    ("ifs", Mapped(AM)),
    ("iwa", Mapped(AM)),
    ("iws", Mapped(AM)),
    ("ssa", Mapped(AM)),
    ("wa", Mapped(AM)),
    ("ws", Mapped(AM)),
    // Forwards
    ("afa", Mapped(ST)),
    ("cfa", Mapped(ST)),
    ("cfs", Mapped(ST)),
    ("dlfa", Mapped(ST)),
    ("dlfs", Mapped(ST)),
    ("pa", Mapped(ST)),
    ("pfa", Mapped(ST)),
    ("pfd", Mapped(ST)),
    ("pfs", Mapped(ST)),
    ("raua", Mapped(ST)),
    ("tfa", Mapped(ST)),
    ("tfs", Mapped(ST)),
    ("trea", Mapped(ST)),
    ("wtfa", Mapped(ST)),
    ("wtfs", Mapped(ST)),
];

/// Read-only view over the static role table.
///
/// # Example
///
/// ```
/// use squadforge_core::{PositionCategory, RoleCatalog, RoleCategory};
///
/// assert_eq!(
///     RoleCatalog::lookup("cdd"),
///     Some(RoleCategory::Mapped(PositionCategory::Defender))
/// );
/// assert_eq!(RoleCatalog::lookup("wma"), Some(RoleCategory::Unmapped));
/// assert_eq!(RoleCatalog::lookup("xyz"), None);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct RoleCatalog;

impl RoleCatalog {
    /// Version tag of the role table.
    pub const VERSION: &'static str = "fm24-2";

    /// Looks up a role code. `None` means the code is unknown.
    pub fn lookup(code: &str) -> Option<RoleCategory> {
        ROLE_TABLE
            .iter()
            .find(|(c, _)| *c == code)
            .map(|(_, category)| *category)
    }

    /// Returns true if the code is in the table (mapped or not).
    pub fn is_known(code: &str) -> bool {
        Self::lookup(code).is_some()
    }

    /// Returns the generic category for a role, `None` if unknown or unmapped.
    pub fn category(code: &str) -> Option<PositionCategory> {
        Self::lookup(code).and_then(|entry| entry.category())
    }

    /// Iterates over every known role code in table order.
    pub fn codes() -> impl Iterator<Item = &'static str> {
        ROLE_TABLE.iter().map(|(c, _)| *c)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_category_codes_round_trip() {
        for category in PositionCategory::ALL {
            assert_eq!(PositionCategory::from_code(category.code()), Some(category));
        }
        assert_eq!(PositionCategory::from_code("dm"), None);
        assert_eq!(PositionCategory::from_code("X"), None);
    }

    #[test]
    fn test_lookup_known_roles() {
        assert_eq!(RoleCatalog::category("gkd"), Some(PositionCategory::Goalkeeper));
        assert_eq!(RoleCatalog::category("bpdd"), Some(PositionCategory::Defender));
        assert_eq!(RoleCatalog::category("cwba"), Some(PositionCategory::WingBack));
        assert_eq!(RoleCatalog::category("hbd"), Some(PositionCategory::DefensiveMidfielder));
        assert_eq!(RoleCatalog::category("cma"), Some(PositionCategory::Midfielder));
        assert_eq!(RoleCatalog::category("iws"), Some(PositionCategory::AttackingMidfielder));
        assert_eq!(RoleCatalog::category("cfa"), Some(PositionCategory::Striker));
    }

    #[test]
    fn test_unmapped_is_known_but_has_no_category() {
        assert!(RoleCatalog::is_known("wps"));
        assert_eq!(RoleCatalog::category("wps"), None);
        assert!(!RoleCatalog::is_known("Highest Role Score"));
    }

    #[test]
    fn test_table_has_no_duplicate_codes() {
        let codes: Vec<_> = RoleCatalog::codes().collect();
        let unique: HashSet<_> = codes.iter().collect();
        assert_eq!(codes.len(), unique.len(), "duplicate role code in table");
    }

    #[test]
    fn test_display_uses_short_code() {
        assert_eq!(PositionCategory::WingBack.to_string(), "WB");
    }
}
