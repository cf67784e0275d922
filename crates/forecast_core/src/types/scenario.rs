//! Scenario kinds and the policy table that drives multi-year growth.
//!
//! Provides ready-to-use policies for the three qualitative scenarios:
//! - Optimistic: 12% growth, margin +0.5pt/yr capped at 22%
//! - Neutral: 8% growth, flat margin
//! - Pessimistic: 3% growth, margin -0.3pt/yr floored at 5%
//!
//! The table is plain data, so callers can override any entry without
//! touching the projection algorithm.

use super::error::PolicyError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Qualitative scenario label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScenarioKind {
    /// Strong growth, improving margin
    Optimistic,
    /// Steady growth, stable margin
    Neutral,
    /// Weak growth, eroding margin
    Pessimistic,
}

impl ScenarioKind {
    /// All kinds in display order.
    pub fn all() -> [Self; 3] {
        [Self::Optimistic, Self::Neutral, Self::Pessimistic]
    }

    /// Lowercase identifier.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Optimistic => "optimistic",
            Self::Neutral => "neutral",
            Self::Pessimistic => "pessimistic",
        }
    }
}

impl fmt::Display for ScenarioKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ScenarioKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "optimistic" | "optimiste" => Ok(Self::Optimistic),
            "neutral" | "neutre" => Ok(Self::Neutral),
            "pessimistic" | "pessimiste" => Ok(Self::Pessimistic),
            other => Err(format!(
                "Unknown scenario kind: {}. Supported: optimistic, neutral, pessimistic",
                other
            )),
        }
    }
}

/// Growth and margin policy for one scenario kind.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScenarioPolicy {
    /// Year-over-year revenue multiplier from year 2 onwards
    pub growth_factor: f64,
    /// Margin change in percentage points per year
    pub margin_drift: f64,
    /// Lowest allowed margin (percent)
    pub margin_floor: f64,
    /// Highest allowed margin (percent)
    pub margin_ceiling: f64,
}

impl ScenarioPolicy {
    /// Create a policy tuple.
    pub fn new(growth_factor: f64, margin_drift: f64, margin_floor: f64, margin_ceiling: f64) -> Self {
        Self {
            growth_factor,
            margin_drift,
            margin_floor,
            margin_ceiling,
        }
    }

    /// Built-in policy for a scenario kind.
    pub fn preset(kind: ScenarioKind) -> Self {
        match kind {
            ScenarioKind::Optimistic => Self::new(1.12, 0.5, -100.0, 22.0),
            ScenarioKind::Neutral => Self::new(1.08, 0.0, -100.0, 100.0),
            ScenarioKind::Pessimistic => Self::new(1.03, -0.3, 5.0, 100.0),
        }
    }

    /// Clamp a margin into `[margin_floor, margin_ceiling]`.
    ///
    /// Unlike `f64::clamp` this never panics; with inverted bounds the
    /// ceiling wins.
    pub fn clamp_margin(&self, margin_percent: f64) -> f64 {
        margin_percent.max(self.margin_floor).min(self.margin_ceiling)
    }

    /// Next year's margin: previous margin plus drift, clamped.
    pub fn next_margin(&self, previous: f64) -> f64 {
        self.clamp_margin(previous + self.margin_drift)
    }

    /// Check the tuple is usable by the projector.
    pub fn validate(&self) -> Result<(), PolicyError> {
        if !self.growth_factor.is_finite() || self.growth_factor <= 0.0 {
            return Err(PolicyError::InvalidGrowthFactor(self.growth_factor));
        }
        if !self.margin_drift.is_finite() {
            return Err(PolicyError::InvalidMarginDrift(self.margin_drift));
        }
        if self.margin_floor.is_nan()
            || self.margin_ceiling.is_nan()
            || self.margin_floor > self.margin_ceiling
        {
            return Err(PolicyError::InvertedBounds {
                floor: self.margin_floor,
                ceiling: self.margin_ceiling,
            });
        }
        Ok(())
    }
}

/// Injectable `ScenarioKind -> ScenarioPolicy` table.
///
/// # Examples
/// ```
/// use forecast_core::types::{PolicyTable, ScenarioKind, ScenarioPolicy};
///
/// let table = PolicyTable::default()
///     .with_policy(ScenarioKind::Neutral, ScenarioPolicy::new(1.05, 0.0, 0.0, 100.0));
/// assert_eq!(table.policy(ScenarioKind::Neutral).growth_factor, 1.05);
/// assert!(table.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolicyTable {
    /// Optimistic policy
    pub optimistic: ScenarioPolicy,
    /// Neutral policy
    pub neutral: ScenarioPolicy,
    /// Pessimistic policy
    pub pessimistic: ScenarioPolicy,
}

impl Default for PolicyTable {
    fn default() -> Self {
        Self {
            optimistic: ScenarioPolicy::preset(ScenarioKind::Optimistic),
            neutral: ScenarioPolicy::preset(ScenarioKind::Neutral),
            pessimistic: ScenarioPolicy::preset(ScenarioKind::Pessimistic),
        }
    }
}

impl PolicyTable {
    /// Policy for `kind`.
    pub fn policy(&self, kind: ScenarioKind) -> &ScenarioPolicy {
        match kind {
            ScenarioKind::Optimistic => &self.optimistic,
            ScenarioKind::Neutral => &self.neutral,
            ScenarioKind::Pessimistic => &self.pessimistic,
        }
    }

    /// Replace the policy for `kind`.
    pub fn with_policy(mut self, kind: ScenarioKind, policy: ScenarioPolicy) -> Self {
        match kind {
            ScenarioKind::Optimistic => self.optimistic = policy,
            ScenarioKind::Neutral => self.neutral = policy,
            ScenarioKind::Pessimistic => self.pessimistic = policy,
        }
        self
    }

    /// Validate every entry.
    pub fn validate(&self) -> Result<(), PolicyError> {
        ScenarioKind::all()
            .iter()
            .try_for_each(|kind| self.policy(*kind).validate())
    }
}

/// How the parsed "margin" delta feeds year 1.
///
/// Upstream data is inconsistent about whether the margin field is an
/// absolute target or a change from the baseline; the caller picks one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarginSemantics {
    /// Year-1 margin equals the parsed value
    #[default]
    Target,
    /// Year-1 margin equals baseline margin plus the parsed value
    Delta,
}

impl FromStr for MarginSemantics {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "target" => Ok(Self::Target),
            "delta" => Ok(Self::Delta),
            other => Err(format!(
                "Unknown margin semantics: {}. Supported: target, delta",
                other
            )),
        }
    }
}
