//! Target formations: required headcount per role code.

use std::collections::HashSet;
use std::fmt;

use crate::error::{Result, SelectionError};
use crate::role::RoleCatalog;

/// One formation entry.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct FormationSlot {
    pub role: String,
    pub headcount: u32,
}

/// Largest total headcount a formation accepts. Doubling stays within `u32`.
pub const MAX_TOTAL_HEADCOUNT: u32 = u32::MAX / 2;

/// Ordered mapping role code → required headcount.
///
/// Construction validates every role against the [`RoleCatalog`], so a
/// `Formation` value never carries an unknown code, and its total headcount
/// never exceeds [`MAX_TOTAL_HEADCOUNT`].
///
/// # Example
///
/// ```
/// use squadforge_core::Formation;
///
/// let formation = Formation::new([("gkd", 1), ("cdd", 2), ("afa", 1)]).unwrap();
/// assert_eq!(formation.total_headcount(), 4);
/// assert_eq!(formation.roles().collect::<Vec<_>>(), ["gkd", "cdd", "afa"]);
/// assert!(Formation::new([("zzz", 1)]).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Formation {
    slots: Vec<FormationSlot>,
}

impl Formation {
    /// Builds a formation from `(role, headcount)` pairs, keeping their order.
    ///
    /// # Errors
    ///
    /// - [`SelectionError::UnknownRoleCode`] for a code missing from the catalog.
    /// - [`SelectionError::InvalidFormation`] for an empty formation, a zero
    ///   headcount, a repeated role or a total above [`MAX_TOTAL_HEADCOUNT`].
    pub fn new<I, K>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, u32)>,
        K: Into<String>,
    {
        let mut seen = HashSet::new();
        let mut slots = Vec::new();
        let mut total: u32 = 0;

        for (role, headcount) in entries {
            let role = role.into();
            if !RoleCatalog::is_known(&role) {
                return Err(SelectionError::UnknownRoleCode(role));
            }
            if headcount == 0 {
                return Err(SelectionError::InvalidFormation(format!(
                    "role '{}' has a headcount of 0",
                    role
                )));
            }
            if !seen.insert(role.clone()) {
                return Err(SelectionError::InvalidFormation(format!(
                    "role '{}' appears more than once",
                    role
                )));
            }
            total = total
                .checked_add(headcount)
                .filter(|t| *t <= MAX_TOTAL_HEADCOUNT)
                .ok_or_else(|| {
                    SelectionError::InvalidFormation(format!(
                        "headcounts add up to more than {}",
                        MAX_TOTAL_HEADCOUNT
                    ))
                })?;
            slots.push(FormationSlot { role, headcount });
        }

        if slots.is_empty() {
            return Err(SelectionError::InvalidFormation(
                "formation has no roles".to_string(),
            ));
        }
        Ok(Self { slots })
    }

    /// Role codes in formation order.
    pub fn roles(&self) -> impl Iterator<Item = &str> {
        self.slots.iter().map(|s| s.role.as_str())
    }

    pub fn slots(&self) -> &[FormationSlot] {
        &self.slots
    }

    /// Headcount for a role, `None` if the role is not part of the formation.
    pub fn headcount(&self, role: &str) -> Option<u32> {
        self.slots
            .iter()
            .find(|s| s.role == role)
            .map(|s| s.headcount)
    }

    /// Sum of all headcounts.
    pub fn total_headcount(&self) -> u32 {
        self.slots.iter().map(|s| s.headcount).sum()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Returns the same formation with every headcount doubled.
    ///
    /// Picks a starter and a backup for every slot in a single solve. The
    /// result may exceed [`MAX_TOTAL_HEADCOUNT`] but not `u32::MAX`.
    pub fn doubled(&self) -> Formation {
        Formation {
            slots: self
                .slots
                .iter()
                .map(|s| FormationSlot {
                    role: s.role.clone(),
                    headcount: s.headcount * 2,
                })
                .collect(),
        }
    }
}

impl fmt::Display for Formation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, slot) in self.slots.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}={}", slot.role, slot.headcount)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_role_rejected() {
        let err = Formation::new([("gkd", 1), ("Highest Role Score", 1)]).unwrap_err();
        assert_eq!(
            err,
            SelectionError::UnknownRoleCode("Highest Role Score".to_string())
        );
    }

    #[test]
    fn test_invalid_shapes_rejected() {
        assert!(matches!(
            Formation::new([("gkd", 0)]),
            Err(SelectionError::InvalidFormation(_))
        ));
        assert!(matches!(
            Formation::new([("gkd", 1), ("gkd", 1)]),
            Err(SelectionError::InvalidFormation(_))
        ));
        assert!(matches!(
            Formation::new(Vec::<(String, u32)>::new()),
            Err(SelectionError::InvalidFormation(_))
        ));
    }

    #[test]
    fn test_unmapped_role_is_accepted() {
        // Known-but-unmapped codes are valid formation keys.
        let formation = Formation::new([("wma", 1)]).unwrap();
        assert_eq!(formation.headcount("wma"), Some(1));
    }

    #[test]
    fn test_doubled() {
        let formation = Formation::new([("gkd", 1), ("bpdd", 3)]).unwrap();
        let doubled = formation.doubled();
        assert_eq!(doubled.headcount("gkd"), Some(2));
        assert_eq!(doubled.headcount("bpdd"), Some(6));
        assert_eq!(doubled.total_headcount(), 8);
        assert_eq!(formation.total_headcount(), 4);
    }

    #[test]
    fn test_oversized_headcounts_rejected() {
        assert!(matches!(
            Formation::new([("gkd", 3_000_000_000)]),
            Err(SelectionError::InvalidFormation(_))
        ));
        assert!(matches!(
            Formation::new([("gkd", 2_000_000_000), ("cdd", 2_000_000_000)]),
            Err(SelectionError::InvalidFormation(_))
        ));

        let largest = Formation::new([("gkd", MAX_TOTAL_HEADCOUNT - 1), ("cdd", 1)]).unwrap();
        assert_eq!(largest.total_headcount(), MAX_TOTAL_HEADCOUNT);
        assert_eq!(largest.doubled().total_headcount(), MAX_TOTAL_HEADCOUNT * 2);
    }

    #[test]
    fn test_display() {
        let formation = Formation::new([("skd", 1), ("bpdd", 2)]).unwrap();
        assert_eq!(formation.to_string(), "skd=1 bpdd=2");
    }
}
