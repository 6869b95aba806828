//! Ordered role → headcount maps.
//!
//! Formation order decides squad and rollup order, so the map keeps document
//! order instead of sorting its keys.

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use squadforge_core::Formation;

use crate::ConfigError;

/// A formation as written in a config file or on the command line.
///
/// Codes are not checked against the role catalog until
/// [`to_formation`](Self::to_formation).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormationConfig {
    entries: Vec<(String, u32)>,
}

impl FormationConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds from `(role, headcount)` pairs, keeping their order.
    pub fn from_pairs<I, K>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, u32)>,
        K: Into<String>,
    {
        Self {
            entries: pairs.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }

    /// Parses `role=headcount` arguments such as `["gkd=1", "cdd=2"]`.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Invalid`] for a pair without `=`, an empty role, a
    /// headcount that is not a non-negative integer, or a repeated role.
    pub fn parse_pairs<S: AsRef<str>>(pairs: &[S]) -> Result<Self, ConfigError> {
        let mut formation = Self::new();
        for pair in pairs {
            let pair = pair.as_ref();
            let (role, count) = pair.split_once('=').ok_or_else(|| {
                ConfigError::Invalid(format!("formation entry '{}' is not role=count", pair))
            })?;
            let role = role.trim();
            if role.is_empty() {
                return Err(ConfigError::Invalid(format!(
                    "formation entry '{}' has no role",
                    pair
                )));
            }
            let count: u32 = count.trim().parse().map_err(|_| {
                ConfigError::Invalid(format!(
                    "formation entry '{}' has an invalid headcount",
                    pair
                ))
            })?;
            formation.insert(role, count)?;
        }
        Ok(formation)
    }

    fn insert(&mut self, role: &str, count: u32) -> Result<(), ConfigError> {
        if self.entries.iter().any(|(r, _)| r == role) {
            return Err(ConfigError::Invalid(format!(
                "role '{}' appears more than once",
                role
            )));
        }
        self.entries.push((role.to_string(), count));
        Ok(())
    }

    pub fn entries(&self) -> &[(String, u32)] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Validates against the role catalog and builds a core formation.
    ///
    /// # Errors
    ///
    /// `UnknownRoleCode` or `InvalidFormation` from the core.
    pub fn to_formation(&self) -> squadforge_core::Result<Formation> {
        Formation::new(self.entries.iter().map(|(r, c)| (r.as_str(), *c)))
    }
}

impl From<&Formation> for FormationConfig {
    fn from(formation: &Formation) -> Self {
        Self::from_pairs(formation.slots().iter().map(|s| (s.role.as_str(), s.headcount)))
    }
}

impl Serialize for FormationConfig {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (role, count) in &self.entries {
            map.serialize_entry(role, count)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for FormationConfig {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(FormationVisitor)
    }
}

struct FormationVisitor;

impl<'de> Visitor<'de> for FormationVisitor {
    type Value = FormationConfig;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map of role codes to headcounts")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut formation = FormationConfig::new();
        while let Some((role, count)) = access.next_entry::<String, u32>()? {
            formation
                .insert(&role, count)
                .map_err(serde::de::Error::custom)?;
        }
        Ok(formation)
    }
}
