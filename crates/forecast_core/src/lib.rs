//! # forecast_core: Foundation for the Scenario Forecaster
//!
//! ## Layer 1 (Foundation) Role
//!
//! forecast_core is the bottom layer of the forecaster workspace, providing:
//! - Data model types: baseline, parsed magnitudes, year projections (`types`)
//! - Scenario kinds and the injectable policy table (`types::scenario`)
//! - Free-form delta string parsing (`parsing`)
//! - Bracketing root solver used by the IRR computation (`math::solvers`)
//! - Error and degradation types (`types::error`)
//!
//! ## Purity
//!
//! Every function in this crate is a pure transform over its inputs. Nothing
//! holds mutable state between calls, so values can be shared across threads
//! freely.
//!
//! ## Usage Examples
//!
//! ```rust
//! use forecast_core::parsing::parse_magnitude;
//! use forecast_core::types::{CompanyBaseline, MagnitudeUnit, ScenarioKind, PolicyTable};
//!
//! let parsed = parse_magnitude("+18%");
//! assert_eq!(parsed.value, 18.0);
//! assert_eq!(parsed.unit, MagnitudeUnit::Percent);
//!
//! let baseline = CompanyBaseline::new(920_000.0, 10.0, 2024);
//! assert!(baseline.is_valid());
//!
//! let table = PolicyTable::default();
//! assert_eq!(table.policy(ScenarioKind::Neutral).growth_factor, 1.08);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod math;
pub mod parsing;
pub mod types;
