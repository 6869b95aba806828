//! Exact branch-and-bound backend.
//!
//! Explores candidates depth first. At each level one candidate is either
//! placed in one of its slots (best coefficient first) or benched (last).
//! A branch is pruned when the bounder proves it cannot be completed
//! feasibly, or cannot beat the incumbent. Weight budgets are priced into
//! the bound, so a binding budget still prunes on objective.
//!
//! The search order is fixed by the model, so the result is deterministic:
//! the first optimal assignment found wins, and an incumbent is only
//! replaced by a strictly better one.

mod bounder;


use std::time::{Duration, Instant};

use tracing::{debug, trace};

use crate::model::AssignmentModel;
use crate::optimizer::{Assignment, Optimizer, SolveError};

use bounder::{optimistic_bound, Layout, EPS};

/// How often (in nodes) the wall clock is consulted.
const TIME_CHECK_INTERVAL: u64 = 256;

/// Node and wall-clock budgets for a search.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchLimits {
    /// Maximum number of nodes to explore (None = unlimited).
    pub node_limit: Option<u64>,
    /// Maximum wall-clock time (None = unlimited).
    pub time_limit: Option<Duration>,
}

impl SearchLimits {
    pub fn unlimited() -> Self {
        Self::default()
    }

    pub fn with_node_limit(mut self, limit: u64) -> Self {
        self.node_limit = Some(limit);
        self
    }

    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }
}

/// Depth-first branch-and-bound optimizer.
///
/// # Example
///
/// ```
/// use squadforge_solver::{AssignmentModel, BranchAndBound, ModelConstraint, Optimizer};
///
/// let mut model = AssignmentModel::new("pair", 1);
/// model.add_candidate(vec![Some(8.0)]);
/// model.add_candidate(vec![Some(12.0)]);
/// model.add_constraint(ModelConstraint::ExclusiveCandidates);
/// model.add_constraint(ModelConstraint::SlotCount { slot: 0, min: 1, max: 1 });
///
/// let assignment = BranchAndBound::default().solve(&model).unwrap();
/// assert_eq!(assignment.slots, vec![None, Some(0)]);
/// assert_eq!(assignment.objective, 12.0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct BranchAndBound {
    limits: SearchLimits,
}

impl BranchAndBound {
    pub fn new(limits: SearchLimits) -> Self {
        Self { limits }
    }

    pub fn limits(&self) -> &SearchLimits {
        &self.limits
    }
}

impl Optimizer for BranchAndBound {
    fn solve(&self, model: &AssignmentModel) -> Result<Assignment, SolveError> {
        let layout = Layout::from_model(model)?;

        if let Some(slot) = layout.contradictory_slot() {
            debug!(event = "search_skipped", model = model.name(), slot = slot);
            return Err(SolveError::Infeasible);
        }

        let mut search = Search::new(&layout, &self.limits);
        search.descend(0);

        debug!(
            event = "search_end",
            model = model.name(),
            candidates = layout.order.len(),
            nodes = search.nodes,
            improvements = search.improvements,
            aborted = search.aborted,
        );

        if search.aborted {
            return Err(SolveError::Aborted {
                nodes_explored: search.nodes,
            });
        }

        match search.best {
            Some(best) => Ok(Assignment {
                objective: model.objective_value(&best.slots),
                slots: best.slots,
                nodes_explored: search.nodes,
            }),
            None => Err(SolveError::Infeasible),
        }
    }

    fn name(&self) -> &'static str {
        "branch-and-bound"
    }
}

/// Running totals for the partial assignment on the current path.
#[derive(Debug, Clone)]
pub(crate) struct Partial {
    pub counts: Vec<usize>,
    pub assigned: usize,
    pub objective: f64,
    /// Weight used per budget, in layout order.
    pub used: Vec<f64>,
}

#[derive(Debug)]
struct Incumbent {
    objective: f64,
    slots: Vec<Option<usize>>,
}

struct Search<'a> {
    layout: &'a Layout,
    limits: &'a SearchLimits,
    started: Instant,
    partial: Partial,
    slots: Vec<Option<usize>>,
    best: Option<Incumbent>,
    nodes: u64,
    improvements: u64,
    aborted: bool,
}

impl<'a> Search<'a> {
    fn new(layout: &'a Layout, limits: &'a SearchLimits) -> Self {
        Self {
            layout,
            limits,
            started: Instant::now(),
            partial: Partial {
                counts: vec![0; layout.slot_count()],
                assigned: 0,
                objective: 0.0,
                used: vec![0.0; layout.budgets.len()],
            },
            slots: vec![None; layout.candidate_count()],
            best: None,
            nodes: 0,
            improvements: 0,
            aborted: false,
        }
    }

    fn over_budget(&self) -> bool {
        if let Some(limit) = self.limits.node_limit {
            if self.nodes >= limit {
                return true;
            }
        }
        if let Some(limit) = self.limits.time_limit {
            if self.nodes % TIME_CHECK_INTERVAL == 0 && self.started.elapsed() >= limit {
                return true;
            }
        }
        false
    }

    fn descend(&mut self, depth: usize) {
        if self.over_budget() {
            self.aborted = true;
            return;
        }
        self.nodes += 1;

        let layout = self.layout;
        let remaining = &layout.order[depth..];
        let cutoff = self.best.as_ref().map(|best| best.objective);
        let Some(bound) = optimistic_bound(layout, &self.partial, remaining, cutoff) else {
            return;
        };
        if let Some(best) = &self.best {
            if bound <= best.objective + EPS {
                return;
            }
        }

        // Leaf: the bounder only returns Some for a feasible assignment here.
        let Some(&candidate) = remaining.first() else {
            self.accept();
            return;
        };

        for &slot in &layout.options[candidate] {
            if self.partial.counts[slot] >= layout.slot_max[slot] {
                continue;
            }
            self.assign(candidate, slot);
            self.descend(depth + 1);
            self.unassign(candidate, slot);
            if self.aborted {
                return;
            }
        }

        self.descend(depth + 1);
    }

    fn assign(&mut self, candidate: usize, slot: usize) {
        self.slots[candidate] = Some(slot);
        self.partial.counts[slot] += 1;
        self.partial.assigned += 1;
        self.partial.objective += self.layout.coefficient(candidate, slot);
        for (used, budget) in self.partial.used.iter_mut().zip(&self.layout.budgets) {
            *used += budget.weights[candidate];
        }
    }

    fn unassign(&mut self, candidate: usize, slot: usize) {
        self.slots[candidate] = None;
        self.partial.counts[slot] -= 1;
        self.partial.assigned -= 1;
        self.partial.objective -= self.layout.coefficient(candidate, slot);
        for (used, budget) in self.partial.used.iter_mut().zip(&self.layout.budgets) {
            *used -= budget.weights[candidate];
        }
    }

    fn accept(&mut self) {
        self.improvements += 1;
        trace!(
            event = "incumbent",
            objective = self.partial.objective,
            nodes = self.nodes,
        );
        self.best = Some(Incumbent {
            objective: self.partial.objective,
            slots: self.slots.clone(),
        });
    }
}
