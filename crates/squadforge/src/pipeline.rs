//! End-to-end selection: roster filter, score preparation, squad series and
//! per-role rankings.

use squadforge_config::SelectorConfig;
use squadforge_core::{Formation, Pool, Result, SquadSeries};
use squadforge_scoring::{restrict, rollup, suppress, PositionRollup};
use squadforge_solver::{BranchAndBound, MeanAgeLimit, SearchLimits, SquadOptimizer, SquadSelector};
use tracing::info;

use crate::roster::{Roster, RosterFilter};

/// What to select.
#[derive(Debug, Clone)]
pub struct SelectionRequest {
    pub filter: RosterFilter,
    pub formation: Formation,
    /// Overrides `mean_age_limit` from the config when set.
    pub mean_age_limit: Option<f64>,
}

impl SelectionRequest {
    pub fn new(filter: RosterFilter, formation: Formation) -> Self {
        Self {
            filter,
            formation,
            mean_age_limit: None,
        }
    }

    pub fn with_mean_age_limit(mut self, limit: f64) -> Self {
        self.mean_age_limit = Some(limit);
        self
    }
}

/// Outcome of a selection run.
///
/// The series may be partial; its failure says which squad could not be built.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SelectionReport {
    pub formation: Formation,
    pub series: SquadSeries,
    pub rollup: PositionRollup,
}

/// Runs selections with one configuration.
#[derive(Debug, Clone)]
pub struct SelectionPipeline {
    config: SelectorConfig,
    selector: SquadSelector,
}

impl Default for SelectionPipeline {
    fn default() -> Self {
        Self::new(SelectorConfig::default())
    }
}

impl SelectionPipeline {
    pub fn new(config: SelectorConfig) -> Self {
        let mut limits = SearchLimits::unlimited();
        if let Some(nodes) = config.solver.node_limit {
            limits = limits.with_node_limit(nodes);
        }
        if let Some(time) = config.solver.time_limit() {
            limits = limits.with_time_limit(time);
        }
        let optimizer =
            SquadOptimizer::new(BranchAndBound::new(limits)).with_quiet(config.solver.quiet);

        Self {
            config,
            selector: SquadSelector::new(optimizer),
        }
    }

    pub fn config(&self) -> &SelectorConfig {
        &self.config
    }

    /// Suppresses weak scores and, with `use_positions`, zeroes roles the
    /// players cannot play.
    ///
    /// # Errors
    ///
    /// `MissingColumn` if the pool lacks the configured score attribute.
    pub fn prepare(&self, pool: &Pool, formation: &Formation) -> Result<Pool> {
        let suppressed = suppress(
            pool,
            &self.config.score_attribute,
            self.config.threshold_offset,
        )?;
        if !self.config.use_positions {
            return Ok(suppressed);
        }
        let roles: Vec<&str> = formation.roles().collect();
        Ok(restrict(&suppressed, &roles))
    }

    /// Selects `squad_count` disjoint squads and ranks players per role.
    ///
    /// # Errors
    ///
    /// Only preparation errors. A squad that cannot be built ends the series
    /// and is reported through [`SelectionReport::series`].
    pub fn run(&self, roster: &Roster, request: &SelectionRequest) -> Result<SelectionReport> {
        let pool = roster.select(&request.filter);
        info!(
            event = "pipeline_start",
            team = request.filter.team.as_str(),
            player_count = pool.len(),
            squad_count = self.config.squad_count,
        );

        let prepared = self.prepare(&pool, &request.formation)?;
        let age_limit = request
            .mean_age_limit
            .or(self.config.mean_age_limit)
            .map(MeanAgeLimit::new);

        let series = self.selector.select_series(
            &prepared,
            &request.formation,
            self.config.squad_count,
            age_limit,
        );
        let rollup = rollup(&prepared, &request.formation);

        Ok(SelectionReport {
            formation: request.formation.clone(),
            series,
            rollup,
        })
    }
}
