//! Shared test fixtures for SquadForge crates.
//!
//! This crate provides data builders only; it does NOT depend on the solver
//! or scoring crates so that both can use it as a dev-dependency.
//!
//! - [`builders`] - terse constructors for players, pools and formations
//! - [`club`] - a realistic club roster with a matching formation
//!
//! # Usage
//!
//! ```toml
//! [dev-dependencies]
//! squadforge-test = { workspace = true }
//! ```
//!
//! ```ignore
//! use squadforge_test::{player, pool, formation};
//! use squadforge_test::club::{club_pool, club_formation};
//! ```

pub mod builders;
pub mod club;

pub use builders::{formation, player, pool, scored_player, three_player_pool, SCORE_ATTRIBUTE};
