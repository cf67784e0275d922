//! Free-form delta string parsing.
//!
//! Scenario deltas arrive as loosely formatted strings (`"+18%"`,
//! `"+1,5M€"`, `"-50k€ la première année, puis +110k€/an"`). This module
//! turns them into [`ParsedMagnitude`](crate::types::ParsedMagnitude) values.

mod delta;

pub use delta::{parse_magnitude, parse_phases};
