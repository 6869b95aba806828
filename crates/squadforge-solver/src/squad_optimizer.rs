//! Optimal selection of a single squad.
//!
//! One binary variable per (player, role) pair with a positive score. The
//! objective is the total score of the selection, subject to:
//!
//! 1. each player fills at most one role
//! 2. each role gets at least one player
//! 3. each role gets at most its headcount
//! 4. at least the total headcount is selected
//! 5. optionally, the selected players' mean age stays within a bound
//!
//! Constraints 1-4 force exactly the total headcount, so the age constraint is
//! the linear budget `sum(age) <= bound * total headcount`. A player without a
//! recorded age is charged the bound itself and leaves the mean unchanged.

use squadforge_core::{Formation, PlayerRecord, Pool, Result, SelectionError, Squad, SquadMember};
use tracing::info;

use crate::branch_and_bound::BranchAndBound;
use crate::model::{AssignmentModel, ModelConstraint};
use crate::optimizer::{Assignment, Optimizer, SolveError};
use crate::silence::SilenceGuard;

/// Upper bound on the mean age of a selected squad.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeanAgeLimit(pub f64);

impl MeanAgeLimit {
    pub fn new(bound: f64) -> Self {
        Self(bound)
    }

    pub fn bound(self) -> f64 {
        self.0
    }
}

/// Builds and solves the selection model for one squad.
///
/// # Example
///
/// ```
/// use squadforge_core::{Formation, PlayerRecord, Pool};
/// use squadforge_solver::SquadOptimizer;
///
/// let pool = Pool::new(vec![
///     PlayerRecord::new("A").with_metric("gkd", 10.0),
///     PlayerRecord::new("B").with_metric("cdd", 12.0),
///     PlayerRecord::new("C").with_metric("cdd", 8.0),
/// ]);
/// let formation = Formation::new([("gkd", 1), ("cdd", 1)]).unwrap();
///
/// let squad = SquadOptimizer::default().select(&pool, &formation, None).unwrap();
/// assert_eq!(squad.objective(), 22.0);
/// assert_eq!(squad.role_of("B"), Some("cdd"));
/// assert!(!squad.contains("C"));
/// ```
#[derive(Debug, Clone)]
pub struct SquadOptimizer<O = BranchAndBound> {
    backend: O,
    quiet: bool,
}

impl Default for SquadOptimizer {
    fn default() -> Self {
        Self::new(BranchAndBound::default())
    }
}

impl<O: Optimizer> SquadOptimizer<O> {
    /// Creates an optimizer around `backend`. Backend logging is silenced by default.
    pub fn new(backend: O) -> Self {
        Self {
            backend,
            quiet: true,
        }
    }

    pub fn with_quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    pub fn is_quiet(&self) -> bool {
        self.quiet
    }

    pub fn backend(&self) -> &O {
        &self.backend
    }

    /// Builds the assignment model: candidates in pool order, slots in
    /// formation order.
    pub fn build_model(
        &self,
        pool: &Pool,
        formation: &Formation,
        age_limit: Option<MeanAgeLimit>,
    ) -> AssignmentModel {
        let roles: Vec<&str> = formation.roles().collect();
        let mut model = AssignmentModel::new(formation.to_string(), roles.len());

        for player in pool {
            model.add_candidate(roles.iter().map(|role| eligible_score(player, role)).collect());
        }

        model.add_constraint(ModelConstraint::ExclusiveCandidates);
        for (slot, entry) in formation.slots().iter().enumerate() {
            model.add_constraint(ModelConstraint::SlotCount {
                slot,
                min: 1,
                max: entry.headcount as usize,
            });
        }
        let total = formation.total_headcount() as usize;
        model.add_constraint(ModelConstraint::TotalAtLeast { min: total });

        if let Some(limit) = age_limit {
            model.add_constraint(ModelConstraint::WeightBudget {
                name: "age".to_string(),
                weights: pool
                    .iter()
                    .map(|p| p.known_age().unwrap_or(limit.bound()))
                    .collect(),
                limit: limit.bound() * total as f64,
            });
        }
        model
    }

    /// Selects the highest-scoring squad for `formation` from `pool`.
    ///
    /// # Errors
    ///
    /// - [`SelectionError::Infeasible`] when no selection satisfies every constraint
    /// - [`SelectionError::Aborted`] when the backend ran out of budget
    /// - [`SelectionError::Solver`] when the backend failed or returned an
    ///   assignment that violates the model
    pub fn select(
        &self,
        pool: &Pool,
        formation: &Formation,
        age_limit: Option<MeanAgeLimit>,
    ) -> Result<Squad> {
        info!(
            event = "select_start",
            backend = self.backend.name(),
            player_count = pool.len(),
            role_count = formation.len(),
            headcount = formation.total_headcount(),
            mean_age_limit = age_limit.map(MeanAgeLimit::bound),
        );

        check_coverage(pool, formation)?;

        let model = self.build_model(pool, formation, age_limit);
        let solved = {
            let _quiet = SilenceGuard::acquire_if(self.quiet);
            self.backend.solve(&model)
        };
        let assignment = solved.map_err(|err| match err {
            SolveError::Infeasible => SelectionError::Infeasible(describe_infeasible(formation, age_limit)),
            other => other.into(),
        })?;

        let violations = model.violations(&assignment.slots);
        if !violations.is_empty() {
            return Err(SelectionError::Solver(format!(
                "{} returned an assignment violating: {}",
                self.backend.name(),
                violations.join(", ")
            )));
        }

        let squad = build_squad(pool, formation, &model, &assignment);
        info!(
            event = "select_end",
            objective = squad.objective(),
            selected = squad.len(),
            nodes = assignment.nodes_explored,
        );
        Ok(squad)
    }
}

/// Score that makes a decision variable exist: positive and finite.
fn eligible_score(player: &PlayerRecord, role: &str) -> Option<f64> {
    let score = player.role_score(role);
    (score > 0.0 && score.is_finite()).then_some(score)
}

/// Fails fast when some role cannot reach its headcount.
fn check_coverage(pool: &Pool, formation: &Formation) -> Result<()> {
    for entry in formation.slots() {
        let eligible = pool
            .iter()
            .filter(|p| eligible_score(p, &entry.role).is_some())
            .count();
        if eligible == 0 {
            return Err(SelectionError::Infeasible(format!(
                "no eligible player for role '{}'",
                entry.role
            )));
        }
        if eligible < entry.headcount as usize {
            return Err(SelectionError::Infeasible(format!(
                "role '{}' needs {} players but only {} are eligible",
                entry.role, entry.headcount, eligible
            )));
        }
    }
    Ok(())
}

fn describe_infeasible(formation: &Formation, age_limit: Option<MeanAgeLimit>) -> String {
    match age_limit {
        Some(limit) => format!(
            "no selection fills {} with mean age <= {}",
            formation,
            limit.bound()
        ),
        None => format!("no selection fills {}", formation),
    }
}

/// Members in formation order, then pool order.
fn build_squad(pool: &Pool, formation: &Formation, model: &AssignmentModel, assignment: &Assignment) -> Squad {
    let mut members = Vec::with_capacity(assignment.assigned_count());
    for (slot, entry) in formation.slots().iter().enumerate() {
        for candidate in assignment.candidates_in(slot) {
            members.push(SquadMember {
                name: pool.players()[candidate].name().to_string(),
                role: entry.role.clone(),
                score: model.coefficient(candidate, slot).unwrap_or(0.0),
            });
        }
    }
    Squad::new(members, model.objective_value(&assignment.slots))
}
