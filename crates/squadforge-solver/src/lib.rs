//! SquadForge Solver
//!
//! This crate turns prepared player pools into squads:
//! - Assignment model (binary player × role decisions with linear constraints)
//! - `Optimizer` interface and the built-in branch-and-bound backend
//! - Squad optimizer (model building for one squad)
//! - Squad selector (greedy extraction of first/second/third choice squads)
//! - Scoped log silencing around backend calls
//!
//! Logging levels:
//! - **INFO**: squad selection start/end, series summary
//! - **DEBUG**: search summaries (nodes explored, incumbent count)
//! - **TRACE**: individual incumbent improvements

pub mod branch_and_bound;
pub mod model;
pub mod optimizer;
pub mod selector;
pub mod silence;
pub mod squad_optimizer;

pub use branch_and_bound::{BranchAndBound, SearchLimits};
pub use model::{AssignmentModel, ModelConstraint};
pub use optimizer::{Assignment, Optimizer, SolveError};
pub use selector::SquadSelector;
pub use silence::SilenceGuard;
pub use squad_optimizer::{MeanAgeLimit, SquadOptimizer};
