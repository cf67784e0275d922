//! # forecast_engine: Scenario Projection Engine
//!
//! ## Layer 2 (Engine) Role
//!
//! forecast_engine turns a company baseline and a set of free-form
//! first-year deltas into everything a scenario view needs:
//! - **Deltas**: the per-scenario delta record and its diagnostics (`deltas`)
//! - **Projection**: year-by-year revenue, margin and profit (`projector`)
//! - **Indicators**: ROI, payback, IRR and the profit/cost split (`indicators`)
//! - **Geometry**: bars, trend points and pie arcs in canvas space (`geometry`)
//! - **Pipeline**: single and parallel all-scenario evaluation (`pipeline`)
//! - **Configuration**: TOML-backed engine settings (`config`)
//!
//! ## Data Flow
//!
//! ```text
//! ScenarioDeltas ──► project ──► ProjectionSeries ──┬──► compute_indicators
//!                                                   └──► map_to_geometry
//! ```
//!
//! All stages are pure. Malformed input degrades to sentinel values and is
//! reported as [`forecast_core::types::Degradation`] diagnostics by the
//! pipeline rather than raised as an error.
//!
//! ## Usage Examples
//!
//! ```rust
//! use forecast_engine::prelude::*;
//!
//! let baseline = CompanyBaseline::new(920_000.0, 10.0, 2024);
//! let deltas = ScenarioDeltas::new().with_revenue("+8%").with_margin("5");
//! let series = project(&baseline, &deltas, ScenarioKind::Neutral, 3);
//! let indicators = compute_indicators(&series, 50_000.0);
//!
//! assert_eq!(series.len(), 4);
//! assert!(indicators.roi_percent > 200.0);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod config;
pub mod deltas;
pub mod geometry;
pub mod indicators;
pub mod pipeline;
pub mod projector;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::config::{ConfigError, EngineConfig};
    pub use crate::deltas::{ScenarioDeltaSet, ScenarioDeltas};
    pub use crate::geometry::{
        map_to_geometry, pie_arcs, Arc, ArcSlice, Bar, Canvas, ChartGeometry, MetricSelector,
        Point, MARGIN_VISUAL_SCALE,
    };
    pub use crate::indicators::{compute_indicators, FinancialIndicators, IrrMethod};
    pub use crate::pipeline::{run_all_scenarios, run_scenario, ScenarioOutcome, ScenarioRequest};
    pub use crate::projector::{project, project_with};
    pub use forecast_core::types::{
        CompanyBaseline, Degradation, MarginSemantics, PolicyTable, ProjectionSeries, ScenarioKind,
        ScenarioPolicy, YearProjection,
    };
}
