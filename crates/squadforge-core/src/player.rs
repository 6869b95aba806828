//! Player records and the pool they are selected from.

use std::collections::{BTreeMap, BTreeSet, HashSet};

use crate::value::{parse_wage, TransferValue};

/// One roster entry.
///
/// Numeric attributes other than age (role scores keyed by lowercase role
/// code, plus the best-score anchor) live in `metrics`. A role with no entry
/// scores 0.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerRecord {
    name: String,
    age: Option<f64>,
    position: String,
    club: Option<String>,
    nationality: Option<String>,
    transfer_value: Option<String>,
    wage: Option<String>,
    metrics: BTreeMap<String, f64>,
    attributes: BTreeMap<String, String>,
}

impl PlayerRecord {
    /// Creates a record with the given name and no other attributes.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            age: None,
            position: String::new(),
            club: None,
            nationality: None,
            transfer_value: None,
            wage: None,
            metrics: BTreeMap::new(),
            attributes: BTreeMap::new(),
        }
    }

    pub fn with_age(mut self, age: f64) -> Self {
        self.age = Some(age);
        self
    }

    pub fn with_position(mut self, position: impl Into<String>) -> Self {
        self.position = position.into();
        self
    }

    pub fn with_club(mut self, club: impl Into<String>) -> Self {
        self.club = Some(club.into());
        self
    }

    pub fn with_nationality(mut self, nationality: impl Into<String>) -> Self {
        self.nationality = Some(nationality.into());
        self
    }

    pub fn with_transfer_value(mut self, text: impl Into<String>) -> Self {
        self.transfer_value = Some(text.into());
        self
    }

    pub fn with_wage(mut self, text: impl Into<String>) -> Self {
        self.wage = Some(text.into());
        self
    }

    /// Adds a numeric attribute (role score or anchor).
    pub fn with_metric(mut self, key: impl Into<String>, value: f64) -> Self {
        self.metrics.insert(key.into(), value);
        self
    }

    /// Adds a free-text attribute carried through untouched.
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Age in years, 0 when the export has none.
    pub fn age(&self) -> f64 {
        self.age.unwrap_or(0.0)
    }

    /// Age in years, `None` when the export has none.
    pub fn known_age(&self) -> Option<f64> {
        self.age
    }

    /// Free-text position descriptor, e.g. `"AM/DM (L/C)"`.
    pub fn position(&self) -> &str {
        &self.position
    }

    pub fn club(&self) -> Option<&str> {
        self.club.as_deref()
    }

    pub fn nationality(&self) -> Option<&str> {
        self.nationality.as_deref()
    }

    /// Raw transfer value text as exported, e.g. `"£50M - 75M"`.
    pub fn transfer_value_text(&self) -> Option<&str> {
        self.transfer_value.as_deref()
    }

    /// Raw wage text as exported, e.g. `"£155,000 p/w"`.
    pub fn wage_text(&self) -> Option<&str> {
        self.wage.as_deref()
    }

    /// Parsed transfer value; `None` when absent or not for sale.
    pub fn transfer_value(&self) -> Option<TransferValue> {
        self.transfer_value.as_deref().and_then(TransferValue::parse)
    }

    /// Parsed weekly wage.
    pub fn wage(&self) -> Option<f64> {
        self.wage.as_deref().and_then(parse_wage)
    }

    /// Returns a numeric attribute if present.
    pub fn metric(&self, key: &str) -> Option<f64> {
        self.metrics.get(key).copied()
    }

    /// Score for a role code; absent roles score 0.
    pub fn role_score(&self, role: &str) -> f64 {
        self.metric(role).unwrap_or(0.0)
    }

    pub fn metrics(&self) -> &BTreeMap<String, f64> {
        &self.metrics
    }

    pub fn set_metric(&mut self, key: impl Into<String>, value: f64) {
        self.metrics.insert(key.into(), value);
    }

    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }
}

/// An immutable player pool with its numeric schema.
///
/// The schema is the union of numeric attribute names seen when the pool was
/// first built; filtering keeps it, so an empty filtered pool still knows its
/// columns.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Pool {
    players: Vec<PlayerRecord>,
    columns: BTreeSet<String>,
}

impl Pool {
    /// Builds a pool, deriving the schema from the records.
    pub fn new(players: Vec<PlayerRecord>) -> Self {
        let columns = players
            .iter()
            .flat_map(|p| p.metrics.keys().cloned())
            .collect();
        Self { players, columns }
    }

    /// Builds a pool with an explicit schema.
    ///
    /// Used by transforms that produce a new pool from an existing one.
    pub fn from_parts(players: Vec<PlayerRecord>, columns: BTreeSet<String>) -> Self {
        Self { players, columns }
    }

    pub fn players(&self) -> &[PlayerRecord] {
        &self.players
    }

    pub fn into_players(self) -> Vec<PlayerRecord> {
        self.players
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    pub fn columns(&self) -> &BTreeSet<String> {
        &self.columns
    }

    pub fn has_column(&self, key: &str) -> bool {
        self.columns.contains(key)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PlayerRecord> {
        self.players.iter()
    }

    pub fn get(&self, name: &str) -> Option<&PlayerRecord> {
        self.players.iter().find(|p| p.name == name)
    }

    /// Returns a new pool with only the players matching `keep`.
    pub fn filtered(&self, mut keep: impl FnMut(&PlayerRecord) -> bool) -> Pool {
        Pool {
            players: self.players.iter().filter(|p| keep(p)).cloned().collect(),
            columns: self.columns.clone(),
        }
    }

    /// Returns a new pool without the named players.
    pub fn without_names<'a>(&self, names: impl IntoIterator<Item = &'a str>) -> Pool {
        let excluded: HashSet<&str> = names.into_iter().collect();
        self.filtered(|p| !excluded.contains(p.name()))
    }
}

impl<'a> IntoIterator for &'a Pool {
    type Item = &'a PlayerRecord;
    type IntoIter = std::slice::Iter<'a, PlayerRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.players.iter()
    }
}

impl FromIterator<PlayerRecord> for Pool {
    fn from_iter<I: IntoIterator<Item = PlayerRecord>>(iter: I) -> Self {
        Pool::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Pool {
        Pool::new(vec![
            PlayerRecord::new("A")
                .with_age(24.0)
                .with_metric("gkd", 10.0)
                .with_metric("Highest Role Score", 10.0),
            PlayerRecord::new("B").with_metric("cdd", 12.0),
        ])
    }

    #[test]
    fn test_schema_is_union_of_metrics() {
        let pool = sample();
        assert!(pool.has_column("gkd"));
        assert!(pool.has_column("cdd"));
        assert!(pool.has_column("Highest Role Score"));
        assert!(!pool.has_column("Age"));
    }

    #[test]
    fn test_absent_role_scores_zero() {
        let pool = sample();
        let b = pool.get("B").unwrap();
        assert_eq!(b.role_score("gkd"), 0.0);
        assert_eq!(b.role_score("cdd"), 12.0);
        assert_eq!(b.metric("gkd"), None);
    }

    #[test]
    fn test_filtering_keeps_schema() {
        let pool = sample();
        let empty = pool.filtered(|_| false);
        assert!(empty.is_empty());
        assert!(empty.has_column("Highest Role Score"));

        let without_a = pool.without_names(["A"]);
        assert_eq!(without_a.len(), 1);
        assert_eq!(without_a.players()[0].name(), "B");
        assert_eq!(pool.len(), 2, "source pool is untouched");
    }

    #[test]
    fn test_age_may_be_unknown() {
        let pool = sample();
        assert_eq!(pool.get("A").unwrap().known_age(), Some(24.0));

        let b = pool.get("B").unwrap();
        assert_eq!(b.known_age(), None);
        assert_eq!(b.age(), 0.0);
    }

    #[test]
    fn test_money_accessors() {
        let player = PlayerRecord::new("A")
            .with_transfer_value("£50M - 75M")
            .with_wage("£155,000 p/w");
        assert_eq!(player.transfer_value().map(|v| v.mean()), Some(62.5e6));
        assert_eq!(player.wage(), Some(155_000.0));

        let unsold = PlayerRecord::new("B").with_transfer_value("Not for sale");
        assert_eq!(unsold.transfer_value(), None);
        assert_eq!(unsold.wage(), None);
    }
}
