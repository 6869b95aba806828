//! SquadForge - optimal squads from a player roster
//!
//! Load a roster export, pick a team and a formation, and get the best
//! first, second and third choice squads plus a per-role ranking.
//!
//! # Example
//!
//! ```rust
//! use squadforge::prelude::*;
//!
//! let roster = Roster::from_json_str(r#"{"data": [
//!     {"Name": "Keeper", "Club": "Valencia", "Highest Role Score": 13.0, "gkd": 13.0},
//!     {"Name": "Stone", "Club": "Valencia", "Highest Role Score": 14.0, "cdd": 14.0}
//! ]}"#).unwrap();
//!
//! let formation = Formation::new([("gkd", 1), ("cdd", 1)]).unwrap();
//! let request = SelectionRequest::new(RosterFilter::club("Valencia"), formation);
//! let config = SelectorConfig::new().with_squad_count(1);
//!
//! let report = SelectionPipeline::new(config).run(&roster, &request).unwrap();
//! assert!(report.series.is_complete());
//! assert_eq!(report.series.squads()[0].objective(), 27.0);
//! ```

pub mod pipeline;
pub mod roster;

pub use pipeline::{SelectionPipeline, SelectionReport, SelectionRequest};
pub use roster::{Roster, RosterError, RosterFilter};

pub use squadforge_config::{ConfigError, FormationConfig, SelectorConfig};
pub use squadforge_core::{
    Formation, PlayerRecord, Pool, RoleCatalog, SelectionError, Squad, SquadMember, SquadSeries,
    TransferValue,
};
pub use squadforge_scoring::{PositionRollup, RoleCompatibilityFilter, ThresholdSuppressor};
pub use squadforge_solver::{
    BranchAndBound, MeanAgeLimit, Optimizer, SearchLimits, SquadOptimizer, SquadSelector,
};

#[cfg(feature = "console")]
pub use squadforge_console as console;

pub mod prelude {
    pub use super::{
        Formation, Roster, RosterFilter, SelectionError, SelectionPipeline, SelectionReport,
        SelectionRequest, SelectorConfig, Squad, SquadSeries,
    };
}
