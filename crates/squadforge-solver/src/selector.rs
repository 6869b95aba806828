//! Greedy extraction of a squad series.
//!
//! Each squad is optimal for the players left over by the squads before it.
//! The series as a whole is not jointly optimal: a player taken by an earlier
//! squad is never reconsidered, even if a later squad needed them more. Later
//! squads are strictly dependent on earlier ones, so squads are built one
//! after another.

use squadforge_core::{Formation, Pool, SquadSeries};
use tracing::{info, warn};

use crate::branch_and_bound::BranchAndBound;
use crate::optimizer::Optimizer;
use crate::squad_optimizer::{MeanAgeLimit, SquadOptimizer};

/// Builds first-choice, second-choice, ... squads from one pool.
///
/// # Example
///
/// ```
/// use squadforge_core::{Formation, PlayerRecord, Pool};
/// use squadforge_solver::SquadSelector;
///
/// let pool = Pool::new(vec![
///     PlayerRecord::new("A").with_metric("gkd", 14.0),
///     PlayerRecord::new("B").with_metric("gkd", 12.0),
/// ]);
/// let formation = Formation::new([("gkd", 1)]).unwrap();
///
/// let series = SquadSelector::default().select_series(&pool, &formation, 3, None);
/// assert_eq!(series.len(), 2);
/// assert_eq!(series.failure().map(|f| f.squad_index), Some(2));
/// ```
#[derive(Debug, Clone)]
pub struct SquadSelector<O = BranchAndBound> {
    optimizer: SquadOptimizer<O>,
}

impl Default for SquadSelector {
    fn default() -> Self {
        Self::new(SquadOptimizer::default())
    }
}

impl<O: Optimizer> SquadSelector<O> {
    pub fn new(optimizer: SquadOptimizer<O>) -> Self {
        Self { optimizer }
    }

    pub fn optimizer(&self) -> &SquadOptimizer<O> {
        &self.optimizer
    }

    /// Selects up to `count` disjoint squads.
    ///
    /// Stops at the first squad that cannot be built; the squads selected so
    /// far are kept and the error is recorded as the series failure.
    pub fn select_series(
        &self,
        pool: &Pool,
        formation: &Formation,
        count: usize,
        age_limit: Option<MeanAgeLimit>,
    ) -> SquadSeries {
        let mut series = SquadSeries::new();
        let mut remaining = pool.clone();

        for index in 0..count {
            match self.optimizer.select(&remaining, formation, age_limit) {
                Ok(squad) => {
                    remaining = remaining.without_names(squad.names());
                    series.push(squad);
                }
                Err(err) => {
                    warn!(
                        event = "series_stopped",
                        squad_index = index,
                        remaining = remaining.len(),
                        error = %err,
                    );
                    series.fail(err);
                    break;
                }
            }
        }

        info!(
            event = "series_end",
            requested = count,
            selected = series.len(),
            complete = series.is_complete(),
        );
        series
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use squadforge_core::SelectionError;
    use squadforge_test::club::{club_formation, club_pool};
    use squadforge_test::{formation, player, pool, three_player_pool};

    fn two_squad_pool() -> Pool {
        pool(vec![
            player("G1", &[("gkd", 10.0)]),
            player("C7", &[("cdd", 7.0)]),
            player("C12", &[("cdd", 12.0)]),
            player("G2", &[("gkd", 9.0)]),
            player("C8", &[("cdd", 8.0)]),
            player("C11", &[("cdd", 11.0)]),
        ])
    }

    #[test]
    fn test_two_complete_squads() {
        let series = SquadSelector::default().select_series(
            &two_squad_pool(),
            &formation(&[("gkd", 1), ("cdd", 2)]),
            2,
            None,
        );

        assert!(series.is_complete());
        assert!(series.is_disjoint());
        let first: Vec<_> = series.squads()[0].names().collect();
        let second: Vec<_> = series.squads()[1].names().collect();
        assert_eq!(first, ["G1", "C12", "C11"]);
        assert_eq!(second, ["G2", "C7", "C8"]);
        assert_eq!(series.squads()[0].objective(), 33.0);
        assert_eq!(series.squads()[1].objective(), 24.0);
    }

    #[test]
    fn test_partial_series_keeps_earlier_squads() {
        let series = SquadSelector::default().select_series(
            &three_player_pool(),
            &formation(&[("gkd", 1), ("cdd", 1)]),
            3,
            None,
        );

        assert_eq!(series.len(), 1);
        assert_eq!(series.squads()[0].objective(), 22.0);
        let failure = series.failure().unwrap();
        assert_eq!(failure.squad_index, 1);
        assert!(matches!(failure.error, SelectionError::Infeasible(_)));
    }

    #[test]
    fn test_club_second_eleven_runs_out_of_wide_players() {
        // After the first XI, Flank is the only player able to fill both the
        // last full-back and the last winger slot.
        let series = SquadSelector::default().select_series(&club_pool(), &club_formation(), 3, None);

        assert_eq!(series.len(), 1);
        assert_eq!(series.squads()[0].len(), 11);
        let failure = series.failure().unwrap();
        assert_eq!(failure.squad_index, 1);
        assert!(failure.error.is_recoverable());
    }

    #[test]
    fn test_zero_count_is_empty_and_complete() {
        let series = SquadSelector::default().select_series(
            &three_player_pool(),
            &formation(&[("gkd", 1)]),
            0,
            None,
        );
        assert!(series.is_empty());
        assert!(series.is_complete());
    }

    #[test]
    fn test_age_limit_applies_to_every_squad() {
        let source = pool(vec![
            player("Old", &[("gkd", 15.0)]).with_age(36.0),
            player("Young", &[("gkd", 11.0)]).with_age(19.0),
            player("Mid", &[("gkd", 12.0)]).with_age(27.0),
        ]);
        let series = SquadSelector::default().select_series(
            &source,
            &formation(&[("gkd", 1)]),
            3,
            Some(MeanAgeLimit::new(30.0)),
        );

        let picks: Vec<_> = series.selected_names().collect();
        assert_eq!(picks, ["Mid", "Young"]);
        assert_eq!(series.failure().map(|f| f.squad_index), Some(2));
    }
}
