//! Error types for structured error handling.
//!
//! This module provides:
//! - `SolverError`: Errors from root-finding solvers
//! - `PolicyError`: Invalid scenario policy tuples
//! - `Degradation`: Non-fatal data problems that degrade to sentinel values
//!
//! Malformed *data* never produces an error in this workspace. The
//! [`Degradation`] taxonomy records what was substituted so callers can
//! surface it, while computation carries on with well-defined values.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Root-finding solver errors.
///
/// # Examples
/// ```
/// use forecast_core::types::SolverError;
///
/// let err = SolverError::MaxIterationsExceeded { iterations: 100 };
/// assert!(format!("{}", err).contains("100 iterations"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SolverError {
    /// Solver failed to converge within maximum iterations.
    #[error("Failed to converge after {iterations} iterations")]
    MaxIterationsExceeded {
        /// Number of iterations attempted
        iterations: usize,
    },

    /// `f(a)` and `f(b)` share a sign, so no root is bracketed.
    #[error("No sign change in bracket [{a}, {b}]")]
    NoBracket {
        /// Left endpoint
        a: f64,
        /// Right endpoint
        b: f64,
    },

    /// Objective returned NaN or infinity.
    #[error("Objective is not finite at x = {x}")]
    NonFinite {
        /// Evaluation point
        x: f64,
    },
}

/// Invalid scenario policy tuple.
///
/// # Examples
/// ```
/// use forecast_core::types::PolicyError;
///
/// let err = PolicyError::InvertedBounds { floor: 10.0, ceiling: 5.0 };
/// assert!(err.to_string().contains("floor 10"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PolicyError {
    /// Growth factor is not a positive finite number.
    #[error("Growth factor must be positive and finite, got {0}")]
    InvalidGrowthFactor(f64),

    /// Margin drift is not finite.
    #[error("Margin drift must be finite, got {0}")]
    InvalidMarginDrift(f64),

    /// Margin floor is above the margin ceiling.
    #[error("Margin floor {floor} exceeds ceiling {ceiling}")]
    InvertedBounds {
        /// Lower margin bound (percent)
        floor: f64,
        /// Upper margin bound (percent)
        ceiling: f64,
    },
}

/// A non-fatal data problem that was replaced by a sentinel value.
///
/// Recorded by the pipeline alongside its outputs; never raised.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Degradation {
    /// A delta string had no recognisable number; treated as "no change".
    MalformedMagnitude {
        /// Metric the delta belonged to
        metric: String,
        /// Raw delta text
        text: String,
    },

    /// Base revenue was not a positive finite number; the projection was zeroed.
    DegenerateBaseline {
        /// Offending base revenue
        base_revenue: f64,
    },

    /// Base margin was NaN or infinite; the projection was zeroed.
    NonFiniteMargin {
        /// Offending base margin in percent
        base_margin_percent: f64,
    },

    /// Average annual profit was not positive, so the payback period has no meaning.
    NonPositiveAverageProfit {
        /// Average annual profit over the horizon
        average: f64,
    },

    /// No investment was supplied; ROI and payback are reported as zero.
    ZeroInvestment,

    /// A delta carried several phases but only the first one was applied.
    MultiPhaseCollapsed {
        /// Metric the delta belonged to
        metric: String,
        /// Number of numeric phases found
        phases: usize,
    },
}

impl fmt::Display for Degradation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Degradation::MalformedMagnitude { metric, text } => {
                write!(f, "Unparseable {} delta '{}', treated as no change", metric, text)
            }
            Degradation::DegenerateBaseline { base_revenue } => {
                write!(f, "Base revenue {} is not a positive number, projection zeroed", base_revenue)
            }
            Degradation::NonFiniteMargin { base_margin_percent } => {
                write!(f, "Non-finite base margin {}, projection zeroed", base_margin_percent)
            }
            Degradation::NonPositiveAverageProfit { average } => {
                write!(f, "Average annual profit {} is not positive, payback n/a", average)
            }
            Degradation::ZeroInvestment => write!(f, "No investment, ROI and payback are zero"),
            Degradation::MultiPhaseCollapsed { metric, phases } => {
                write!(f, "{} delta has {} phases, only the first was applied", metric, phases)
            }
        }
    }
}
