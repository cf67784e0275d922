//! Numerical building blocks.
//!
//! - `solvers`: bracketing root finder used for the internal rate of return

pub mod solvers;
