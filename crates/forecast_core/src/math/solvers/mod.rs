//! Root-finding solvers.
//!
//! The forecaster only needs one-dimensional roots: the discount rate at
//! which a cash-flow series has zero net present value.
//!
//! ## Available Solvers
//!
//! - [`BrentSolver`]: Robust bracketing method without derivative requirement
//!
//! ## Configuration
//!
//! [`SolverConfig`] carries the convergence tolerance (default 1e-10) and
//! the iteration limit (default 100).
//!
//! ## Example
//!
//! ```
//! use forecast_core::math::solvers::{BrentSolver, SolverConfig};
//!
//! // Rate r such that -100 + 110 / (1 + r) = 0
//! let npv = |r: f64| -100.0 + 110.0 / (1.0 + r);
//! let solver = BrentSolver::new(SolverConfig::default());
//! let rate = solver.find_root(npv, 0.0, 1.0).unwrap();
//! assert!((rate - 0.10).abs() < 1e-9);
//! ```

mod brent;
mod config;

pub use brent::{scan_bracket, BrentSolver};
pub use config::SolverConfig;
