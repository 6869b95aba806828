//! Configuration system for SquadForge.
//!
//! Load selection settings and named formations from TOML (or YAML) files so
//! a team's usual shape and thresholds live outside the command line.
//!
//! # Examples
//!
//! Load configuration from a TOML string:
//!
//! ```
//! use squadforge_config::SelectorConfig;
//! use std::time::Duration;
//!
//! let config = SelectorConfig::from_toml_str(r#"
//!     threshold_offset = 0.75
//!     mean_age_limit = 27.5
//!
//!     [solver]
//!     seconds_spent_limit = 30
//!
//!     [formations.Valencia]
//!     gkd = 1
//!     cdd = 2
//!     afa = 1
//! "#).unwrap();
//!
//! assert_eq!(config.threshold_offset, 0.75);
//! assert_eq!(config.solver.time_limit(), Some(Duration::from_secs(30)));
//!
//! let formation = config.formation("Valencia").unwrap().to_formation().unwrap();
//! assert_eq!(formation.to_string(), "gkd=1 cdd=2 afa=1");
//! ```
//!
//! Use the default config when the file is missing:
//!
//! ```
//! use squadforge_config::SelectorConfig;
//!
//! let config = SelectorConfig::load("squadforge.toml").unwrap_or_default();
//! assert_eq!(config.squad_count, 3);
//! ```

mod formation;

#[cfg(test)]
mod tests;

use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use formation::FormationConfig;

/// Column holding each player's best role score in roster exports.
pub const DEFAULT_SCORE_ATTRIBUTE: &str = "Highest Role Score";

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Main selection configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct SelectorConfig {
    /// Anchor column for threshold suppression.
    #[serde(default = "default_score_attribute")]
    pub score_attribute: String,

    /// Scores strictly below `anchor - threshold_offset` are zeroed.
    #[serde(default = "default_threshold_offset")]
    pub threshold_offset: f64,

    /// Number of squads in a series.
    #[serde(default = "default_squad_count")]
    pub squad_count: usize,

    /// Zero role scores the player's listed positions cannot cover.
    #[serde(default)]
    pub use_positions: bool,

    /// Select from a nationality instead of a club.
    #[serde(default)]
    pub national_squad: bool,

    /// Upper bound on each squad's mean age.
    #[serde(default)]
    pub mean_age_limit: Option<f64>,

    /// Optimizer budgets.
    #[serde(default)]
    pub solver: SolverLimitsConfig,

    /// Named formations, keyed by team.
    #[serde(default)]
    pub formations: BTreeMap<String, FormationConfig>,
}

fn default_score_attribute() -> String {
    DEFAULT_SCORE_ATTRIBUTE.to_string()
}

fn default_threshold_offset() -> f64 {
    0.5
}

fn default_squad_count() -> usize {
    3
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            score_attribute: default_score_attribute(),
            threshold_offset: default_threshold_offset(),
            squad_count: default_squad_count(),
            use_positions: false,
            national_squad: false,
            mean_age_limit: None,
            solver: SolverLimitsConfig::default(),
            formations: BTreeMap::new(),
        }
    }
}

impl SelectorConfig {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if file doesn't exist, contains invalid TOML or fails validation.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_toml_file(path)
    }

    /// Loads configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Parses configuration from a YAML string.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks values serde cannot: finiteness and positive counts.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.threshold_offset.is_finite() {
            return Err(ConfigError::Invalid(format!(
                "threshold_offset must be finite, got {}",
                self.threshold_offset
            )));
        }
        if self.squad_count == 0 {
            return Err(ConfigError::Invalid(
                "squad_count must be at least 1".to_string(),
            ));
        }
        if let Some(limit) = self.mean_age_limit {
            if !limit.is_finite() || limit <= 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "mean_age_limit must be a positive number, got {}",
                    limit
                )));
            }
        }
        if self.score_attribute.is_empty() {
            return Err(ConfigError::Invalid(
                "score_attribute must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Sets the threshold offset.
    pub fn with_threshold_offset(mut self, offset: f64) -> Self {
        self.threshold_offset = offset;
        self
    }

    /// Sets the number of squads in a series.
    pub fn with_squad_count(mut self, count: usize) -> Self {
        self.squad_count = count;
        self
    }

    /// Sets the mean age limit.
    pub fn with_mean_age_limit(mut self, limit: f64) -> Self {
        self.mean_age_limit = Some(limit);
        self
    }

    /// Enables or disables position filtering.
    pub fn with_use_positions(mut self, enabled: bool) -> Self {
        self.use_positions = enabled;
        self
    }

    /// Selects by nationality instead of club.
    pub fn with_national_squad(mut self, enabled: bool) -> Self {
        self.national_squad = enabled;
        self
    }

    /// Registers a named formation.
    pub fn with_formation(mut self, team: impl Into<String>, formation: FormationConfig) -> Self {
        self.formations.insert(team.into(), formation);
        self
    }

    /// Formation registered for `team`, matched exactly.
    pub fn formation(&self, team: &str) -> Option<&FormationConfig> {
        self.formations.get(team)
    }
}

/// Optimizer budgets.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct SolverLimitsConfig {
    /// Maximum branch-and-bound nodes per squad.
    #[serde(default)]
    pub node_limit: Option<u64>,

    /// Wall-clock budget per squad, in seconds.
    #[serde(default)]
    pub seconds_spent_limit: Option<u64>,

    /// Silence backend logging while it runs.
    #[serde(default = "default_quiet")]
    pub quiet: bool,
}

fn default_quiet() -> bool {
    true
}

impl Default for SolverLimitsConfig {
    fn default() -> Self {
        Self {
            node_limit: None,
            seconds_spent_limit: None,
            quiet: default_quiet(),
        }
    }
}

impl SolverLimitsConfig {
    /// Returns the time limit as a Duration, if configured.
    pub fn time_limit(&self) -> Option<Duration> {
        self.seconds_spent_limit.map(Duration::from_secs)
    }
}
