//! Binary assignment model.
//!
//! Candidates are assigned to slots. A decision variable `x[c][s]` exists
//! only where the objective has a coefficient for `(c, s)`. The objective is
//! to maximize the sum of coefficients of the chosen variables subject to the
//! model's [`ModelConstraint`]s.

use std::fmt;

/// A linear constraint over the decision variables.
#[derive(Debug, Clone, PartialEq)]
pub enum ModelConstraint {
    /// `sum_s x[c][s] <= 1` for every candidate `c`.
    ExclusiveCandidates,

    /// `min <= sum_c x[c][slot] <= max`.
    SlotCount { slot: usize, min: usize, max: usize },

    /// `sum_c sum_s x[c][s] >= min`.
    TotalAtLeast { min: usize },

    /// `sum_c weights[c] * sum_s x[c][s] <= limit`.
    WeightBudget {
        name: String,
        weights: Vec<f64>,
        limit: f64,
    },
}

impl fmt::Display for ModelConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelConstraint::ExclusiveCandidates => write!(f, "exclusive candidates"),
            ModelConstraint::SlotCount { slot, min, max } => {
                write!(f, "slot {} count in {}..={}", slot, min, max)
            }
            ModelConstraint::TotalAtLeast { min } => write!(f, "total >= {}", min),
            ModelConstraint::WeightBudget { name, limit, .. } => {
                write!(f, "{} budget <= {}", name, limit)
            }
        }
    }
}

/// Objective coefficients plus constraints.
///
/// # Example
///
/// ```
/// use squadforge_solver::{AssignmentModel, ModelConstraint};
///
/// let mut model = AssignmentModel::new("example", 2);
/// model.add_candidate(vec![Some(10.0), None]);
/// model.add_candidate(vec![None, Some(12.0)]);
/// model.add_constraint(ModelConstraint::ExclusiveCandidates);
///
/// assert_eq!(model.objective_value(&[Some(0), Some(1)]), 22.0);
/// assert!(model.is_satisfied(&[Some(0), Some(1)]));
/// assert!(!model.is_satisfied(&[Some(1), None]), "no variable for (0, 1)");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct AssignmentModel {
    name: String,
    slot_count: usize,
    objective: Vec<Vec<Option<f64>>>,
    constraints: Vec<ModelConstraint>,
}

impl AssignmentModel {
    pub fn new(name: impl Into<String>, slot_count: usize) -> Self {
        Self {
            name: name.into(),
            slot_count,
            objective: Vec::new(),
            constraints: Vec::new(),
        }
    }

    /// Adds a candidate row and returns its index.
    ///
    /// The row is padded with `None` or truncated to the slot count.
    pub fn add_candidate(&mut self, mut coefficients: Vec<Option<f64>>) -> usize {
        coefficients.resize(self.slot_count, None);
        self.objective.push(coefficients);
        self.objective.len() - 1
    }

    pub fn add_constraint(&mut self, constraint: ModelConstraint) {
        self.constraints.push(constraint);
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn candidate_count(&self) -> usize {
        self.objective.len()
    }

    pub fn slot_count(&self) -> usize {
        self.slot_count
    }

    /// Number of decision variables.
    pub fn variable_count(&self) -> usize {
        self.objective
            .iter()
            .map(|row| row.iter().filter(|c| c.is_some()).count())
            .sum()
    }

    /// Objective coefficient, `None` when no variable exists for the pair.
    pub fn coefficient(&self, candidate: usize, slot: usize) -> Option<f64> {
        self.objective
            .get(candidate)
            .and_then(|row| row.get(slot).copied().flatten())
    }

    pub fn constraints(&self) -> &[ModelConstraint] {
        &self.constraints
    }

    /// Objective value of an assignment (one optional slot per candidate).
    pub fn objective_value(&self, assignment: &[Option<usize>]) -> f64 {
        assignment
            .iter()
            .enumerate()
            .filter_map(|(c, slot)| slot.and_then(|s| self.coefficient(c, s)))
            .sum()
    }

    /// Lists every constraint the assignment violates.
    pub fn violations(&self, assignment: &[Option<usize>]) -> Vec<String> {
        let mut violations = Vec::new();

        if assignment.len() != self.candidate_count() {
            violations.push(format!(
                "assignment covers {} candidates, model has {}",
                assignment.len(),
                self.candidate_count()
            ));
            return violations;
        }

        for (c, slot) in assignment.iter().enumerate() {
            if let Some(s) = slot {
                if self.coefficient(c, *s).is_none() {
                    violations.push(format!("candidate {} has no variable for slot {}", c, s));
                }
            }
        }

        let mut counts = vec![0usize; self.slot_count];
        for s in assignment.iter().flatten() {
            if let Some(count) = counts.get_mut(*s) {
                *count += 1;
            }
        }
        let total = assignment.iter().flatten().count();

        for constraint in &self.constraints {
            let satisfied = match constraint {
                // One optional slot per candidate encodes exclusivity.
                ModelConstraint::ExclusiveCandidates => true,
                ModelConstraint::SlotCount { slot, min, max } => counts
                    .get(*slot)
                    .is_some_and(|n| *n >= *min && *n <= *max),
                ModelConstraint::TotalAtLeast { min } => total >= *min,
                ModelConstraint::WeightBudget { weights, limit, .. } => {
                    let used: f64 = assignment
                        .iter()
                        .enumerate()
                        .filter(|(_, slot)| slot.is_some())
                        .map(|(c, _)| weights.get(c).copied().unwrap_or(0.0))
                        .sum();
                    used <= *limit + 1e-9
                }
            };
            if !satisfied {
                violations.push(constraint.to_string());
            }
        }
        violations
    }

    /// Returns true if the assignment satisfies every constraint.
    pub fn is_satisfied(&self, assignment: &[Option<usize>]) -> bool {
        self.violations(assignment).is_empty()
    }
}
