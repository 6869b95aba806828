//! Error types for SquadForge

use thiserror::Error;

/// Main error type for squad selection operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SelectionError {
    /// The suppression anchor is not a column of the pool.
    #[error("Missing column: '{0}' not found in the player pool")]
    MissingColumn(String),

    /// A formation references a role code the catalog does not know.
    #[error("Unknown role code: '{0}'")]
    UnknownRoleCode(String),

    /// A formation is structurally unusable (empty, zero headcount, duplicate role, oversized).
    #[error("Invalid formation: {0}")]
    InvalidFormation(String),

    /// Position text yielded no position tokens.
    ///
    /// Non-fatal: the compatibility filter degrades to "no allowed categories".
    #[error("Malformed position text: '{0}'")]
    MalformedPositionText(String),

    /// No assignment satisfies every active constraint.
    #[error("Infeasible: {0}")]
    Infeasible(String),

    /// The optimizer exhausted its node or time budget before proving optimality.
    #[error("Aborted after exploring {nodes_explored} nodes")]
    Aborted { nodes_explored: u64 },

    /// The optimizer backend failed in a way not covered above.
    #[error("Solver error: {0}")]
    Solver(String),
}

impl SelectionError {
    /// Returns true for failures a caller may retry after relaxing constraints.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            SelectionError::Infeasible(_) | SelectionError::Aborted { .. }
        )
    }
}

/// Result type alias for squad selection operations.
pub type Result<T> = std::result::Result<T, SelectionError>;
