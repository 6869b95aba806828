//! Optimizer interface.
//!
//! Model building never depends on a concrete backend: anything that can
//! maximize an [`AssignmentModel`] implements [`Optimizer`].

use std::fmt::Debug;

use squadforge_core::SelectionError;
use thiserror::Error;

use crate::model::AssignmentModel;

/// Solves binary assignment models.
pub trait Optimizer: Send + Sync + Debug {
    /// Maximizes the model objective subject to its constraints.
    fn solve(&self, model: &AssignmentModel) -> Result<Assignment, SolveError>;

    /// Short backend name for logs.
    fn name(&self) -> &'static str;
}

impl<O: Optimizer + ?Sized> Optimizer for Box<O> {
    fn solve(&self, model: &AssignmentModel) -> Result<Assignment, SolveError> {
        (**self).solve(model)
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}

/// An optimal assignment returned by a backend.
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    /// Slot chosen for each candidate, `None` when benched.
    pub slots: Vec<Option<usize>>,
    /// Objective value as computed by the backend.
    pub objective: f64,
    /// Search nodes visited (0 for backends that do not report it).
    pub nodes_explored: u64,
}

impl Assignment {
    /// Candidates assigned to `slot`, in candidate order.
    pub fn candidates_in(&self, slot: usize) -> impl Iterator<Item = usize> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter(move |(_, s)| **s == Some(slot))
            .map(|(c, _)| c)
    }

    /// Number of assigned candidates.
    pub fn assigned_count(&self) -> usize {
        self.slots.iter().flatten().count()
    }
}

/// Backend failure.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SolveError {
    #[error("no assignment satisfies every constraint")]
    Infeasible,

    #[error("search aborted after {nodes_explored} nodes without a proven optimum")]
    Aborted { nodes_explored: u64 },

    #[error("unsupported model: {0}")]
    Unsupported(String),
}

impl From<SolveError> for SelectionError {
    fn from(err: SolveError) -> Self {
        match err {
            SolveError::Infeasible => SelectionError::Infeasible(err.to_string()),
            SolveError::Aborted { nodes_explored } => SelectionError::Aborted { nodes_explored },
            SolveError::Unsupported(msg) => SelectionError::Solver(msg),
        }
    }
}
