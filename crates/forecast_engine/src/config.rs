//! Engine configuration management.
//!
//! Handles loading the engine configuration from TOML files with
//! environment variable override support. Every field has a default, so
//! an empty file is a valid configuration.

use crate::geometry::MARGIN_VISUAL_SCALE;
use crate::indicators::IrrMethod;
use forecast_core::math::solvers::SolverConfig;
use forecast_core::types::{MarginSemantics, PolicyError, PolicyTable};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Longest supported projection horizon.
pub const MAX_HORIZON_YEARS: usize = 30;

/// Default configuration file location.
pub const DEFAULT_CONFIG_PATH: &str = "forecast.toml";

/// Configuration error types
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Configuration file could not be read
    #[error("Configuration file error: {0}")]
    Io(String),

    /// TOML content could not be parsed
    #[error("Configuration parse error: {0}")]
    Parse(String),

    /// Environment variable held an unusable value
    #[error("Environment variable {name} error: {message}")]
    Env {
        /// Variable name
        name: &'static str,
        /// What was wrong
        message: String,
    },

    /// Policy table entry is invalid
    #[error("Invalid policy: {0}")]
    Policy(#[from] PolicyError),

    /// Other validation failures, one message per problem
    #[error("Invalid configuration: {}", .0.join("; "))]
    Validation(Vec<String>),
}

/// Engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Number of projected years beyond the baseline
    pub horizon_years: usize,

    /// Growth and margin policy per scenario kind
    pub policies: PolicyTable,

    /// How the margin delta feeds year 1
    pub margin_semantics: MarginSemantics,

    /// How the IRR figure is produced
    pub irr_method: IrrMethod,

    /// Root-finder settings for `IrrMethod::Solved`
    pub solver: SolverConfig<f64>,

    /// Factor applied to margin percentages in charts
    pub margin_visual_scale: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            horizon_years: 3,
            policies: PolicyTable::default(),
            margin_semantics: MarginSemantics::default(),
            irr_method: IrrMethod::default(),
            solver: SolverConfig::default(),
            margin_visual_scale: MARGIN_VISUAL_SCALE,
        }
    }
}

impl EngineConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io(e.to_string()))?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Load configuration from the default path or return the default config
    pub fn load_or_default() -> Self {
        let path = PathBuf::from(DEFAULT_CONFIG_PATH);
        match Self::load(&path) {
            Ok(config) => config,
            Err(err) => {
                tracing::debug!(path = %path.display(), error = %err, "using default engine config");
                Self::default()
            }
        }
    }

    /// Apply environment variable overrides
    pub fn with_env_override(self) -> Result<Self, ConfigError> {
        self.with_overrides(|name| std::env::var(name).ok())
    }

    /// Apply overrides from any key/value lookup.
    ///
    /// Recognised keys: `FORECAST_HORIZON_YEARS`, `FORECAST_IRR_METHOD`,
    /// `FORECAST_MARGIN_SEMANTICS`.
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup("FORECAST_HORIZON_YEARS") {
            self.horizon_years = value.trim().parse().map_err(|_| ConfigError::Env {
                name: "FORECAST_HORIZON_YEARS",
                message: format!("'{}' is not a non-negative integer", value),
            })?;
        }

        if let Some(value) = lookup("FORECAST_IRR_METHOD") {
            self.irr_method = value.parse().map_err(|message| ConfigError::Env {
                name: "FORECAST_IRR_METHOD",
                message,
            })?;
        }

        if let Some(value) = lookup("FORECAST_MARGIN_SEMANTICS") {
            self.margin_semantics = value.parse().map_err(|message| ConfigError::Env {
                name: "FORECAST_MARGIN_SEMANTICS",
                message,
            })?;
        }

        Ok(self)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.policies.validate()?;

        let mut errors = Vec::new();

        if self.horizon_years == 0 || self.horizon_years > MAX_HORIZON_YEARS {
            errors.push(format!(
                "horizon_years {} must be between 1 and {}",
                self.horizon_years, MAX_HORIZON_YEARS
            ));
        }

        if !self.solver.is_valid() {
            errors.push(format!(
                "solver needs a positive tolerance and max_iterations, got {:?}",
                self.solver
            ));
        }

        if !self.margin_visual_scale.is_finite() || self.margin_visual_scale <= 0.0 {
            errors.push(format!(
                "margin_visual_scale must be positive, got {}",
                self.margin_visual_scale
            ));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }
}
