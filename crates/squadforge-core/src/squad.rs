//! Selected squads and squad series.

use std::collections::HashSet;

use crate::error::SelectionError;

/// A player placed in a role.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SquadMember {
    pub name: String,
    pub role: String,
    pub score: f64,
}

/// One selected lineup together with its objective value.
///
/// Members are ordered by formation role, then by pool order.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Squad {
    members: Vec<SquadMember>,
    objective: f64,
}

impl Squad {
    pub fn new(members: Vec<SquadMember>, objective: f64) -> Self {
        Self { members, objective }
    }

    pub fn members(&self) -> &[SquadMember] {
        &self.members
    }

    /// Total score of the lineup.
    pub fn objective(&self) -> f64 {
        self.objective
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.members.iter().map(|m| m.name.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.members.iter().any(|m| m.name == name)
    }

    /// Members assigned to a role, in squad order.
    pub fn in_role<'a>(&'a self, role: &'a str) -> impl Iterator<Item = &'a SquadMember> {
        self.members.iter().filter(move |m| m.role == role)
    }

    /// Number of members assigned to a role.
    pub fn role_count(&self, role: &str) -> usize {
        self.in_role(role).count()
    }

    /// Role assigned to a player, if selected.
    pub fn role_of(&self, name: &str) -> Option<&str> {
        self.members
            .iter()
            .find(|m| m.name == name)
            .map(|m| m.role.as_str())
    }
}

/// The squad that could not be built and why.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SeriesFailure {
    /// Zero-based index of the failed squad.
    pub squad_index: usize,
    #[cfg_attr(feature = "serde", serde(serialize_with = "serialize_error"))]
    pub error: SelectionError,
}

/// Ordered, non-overlapping squads (first choice, second choice, ...).
///
/// A series stops at the first squad that cannot be built; the squads before
/// it remain valid and the failure is kept alongside them.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SquadSeries {
    squads: Vec<Squad>,
    failure: Option<SeriesFailure>,
}

impl SquadSeries {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, squad: Squad) {
        self.squads.push(squad);
    }

    /// Records the failure that ended the series.
    pub fn fail(&mut self, error: SelectionError) {
        self.failure = Some(SeriesFailure {
            squad_index: self.squads.len(),
            error,
        });
    }

    pub fn squads(&self) -> &[Squad] {
        &self.squads
    }

    pub fn failure(&self) -> Option<&SeriesFailure> {
        self.failure.as_ref()
    }

    /// True when every requested squad was built.
    pub fn is_complete(&self) -> bool {
        self.failure.is_none()
    }

    pub fn len(&self) -> usize {
        self.squads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.squads.is_empty()
    }

    /// Names selected anywhere in the series, in selection order.
    pub fn selected_names(&self) -> impl Iterator<Item = &str> {
        self.squads.iter().flat_map(Squad::names)
    }

    /// Returns true if no player appears twice across the series.
    pub fn is_disjoint(&self) -> bool {
        let mut seen = HashSet::new();
        self.selected_names().all(|name| seen.insert(name))
    }

    /// Splits the series into its squads and the trailing error, if any.
    pub fn into_parts(self) -> (Vec<Squad>, Option<SelectionError>) {
        (self.squads, self.failure.map(|f| f.error))
    }
}

#[cfg(feature = "serde")]
fn serialize_error<S: serde::Serializer>(
    error: &SelectionError,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.collect_str(error)
}
