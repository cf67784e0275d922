//! Data model types for scenario forecasting.
//!
//! This module provides:
//! - `magnitude`: Parsed delta magnitudes and their units
//! - `baseline`: Company baseline figures
//! - `projection`: Per-year projections and projection series
//! - `scenario`: Scenario kinds, policy tuples and the policy table
//! - `error`: Solver and policy errors, plus the non-fatal degradation taxonomy
//!
//! # Re-exports
//!
//! Commonly used types are re-exported at this module level.

pub mod baseline;
pub mod error;
pub mod magnitude;
pub mod projection;
pub mod scenario;

pub use baseline::CompanyBaseline;
pub use error::{Degradation, PolicyError, SolverError};
pub use magnitude::{MagnitudeUnit, ParsedMagnitude, PhasedMagnitude};
pub use projection::{ProjectionSeries, YearProjection};
pub use scenario::{MarginSemantics, PolicyTable, ScenarioKind, ScenarioPolicy};
