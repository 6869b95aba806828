//! Score preparation for SquadForge.
//!
//! Every transform takes a pool by reference and returns a new pool; the
//! caller's data is never mutated.
//!
//! - [`ThresholdSuppressor`] zeroes role scores far below a player's best
//! - [`RoleCompatibilityFilter`] zeroes roles a player cannot physically play
//! - [`PositionRollup`] ranks eligible players per formation role
//!
//! Both transforms are per-row and run over the pool in parallel with rayon;
//! output order always matches input order.

pub mod compatibility;
pub mod rollup;
pub mod threshold;

pub use compatibility::{restrict, RoleCompatibilityFilter};
pub use rollup::{rollup, PositionRollup, RankedPlayer, RoleRanking};
pub use threshold::{suppress, ThresholdSuppressor};
