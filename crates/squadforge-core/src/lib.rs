//! SquadForge Core - data model for squad selection
//!
//! This crate provides the fundamental types shared by every SquadForge crate:
//! - Player records and pools with their numeric schema
//! - The static role catalog and position-text parsing
//! - Formations, squads and squad series
//! - The error type surfaced by every selection operation

pub mod error;
pub mod formation;
pub mod player;
pub mod position;
pub mod role;
pub mod squad;
pub mod value;

pub use error::{Result, SelectionError};
pub use formation::{Formation, FormationSlot};
pub use player::{PlayerRecord, Pool};
pub use position::{AllowedPositionSet, Sides};
pub use role::{PositionCategory, RoleCatalog, RoleCategory};
pub use squad::{SeriesFailure, Squad, SquadMember, SquadSeries};
pub use value::{parse_wage, TransferValue};
