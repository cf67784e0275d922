//! Scenario input files.
//!
//! A scenario file holds the company baseline, the first-year deltas of
//! each scenario kind and optional chart settings, as TOML or JSON:
//!
//! ```toml
//! [baseline]
//! base_revenue = 920000
//! base_margin_percent = 10
//! reference_year = 2024
//!
//! [deltas.neutral]
//! revenue = "+8%"
//! margin = "5"
//! investment = "50k€"
//!
//! [chart]
//! metric = "profit"
//! width = 800
//! height = 400
//! ```

use std::path::Path;

use chrono::Datelike;
use forecast_core::types::CompanyBaseline;
use forecast_engine::deltas::ScenarioDeltaSet;
use forecast_engine::geometry::{Canvas, MetricSelector};
use serde::Deserialize;

use crate::{CliError, Result};

/// Baseline as written in the input file.
#[derive(Debug, Clone, Deserialize)]
pub struct BaselineInput {
    /// Reference-year revenue in euros
    pub base_revenue: f64,
    /// Reference-year margin in percent
    pub base_margin_percent: f64,
    /// Reference year, the current year when absent
    #[serde(default)]
    pub reference_year: Option<i32>,
}

impl BaselineInput {
    /// Resolve into a baseline, filling in the current year if needed.
    pub fn resolve(&self) -> CompanyBaseline {
        let year = self
            .reference_year
            .unwrap_or_else(|| chrono::Local::now().year());
        CompanyBaseline::new(self.base_revenue, self.base_margin_percent, year)
    }
}

/// Chart settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ChartInput {
    /// Metric plotted by the bars
    pub metric: MetricSelector,
    /// Canvas width
    pub width: f64,
    /// Canvas height
    pub height: f64,
}

impl Default for ChartInput {
    fn default() -> Self {
        Self {
            metric: MetricSelector::Revenue,
            width: 800.0,
            height: 400.0,
        }
    }
}

impl ChartInput {
    /// Canvas laid out for `bar_count` bars.
    pub fn canvas(&self, bar_count: usize) -> Canvas {
        Canvas::fit(self.width, self.height, bar_count)
    }
}

/// A complete scenario input file.
#[derive(Debug, Clone, Deserialize)]
pub struct ScenarioFile {
    /// Company baseline
    pub baseline: BaselineInput,
    /// Deltas per scenario kind; missing kinds have no deltas
    #[serde(default)]
    pub deltas: ScenarioDeltaSet,
    /// Chart settings
    #[serde(default)]
    pub chart: ChartInput,
}

impl ScenarioFile {
    /// Read a scenario file, choosing the format from the extension.
    pub fn load(path: &str) -> Result<Self> {
        let file = Path::new(path);
        if !file.exists() {
            return Err(CliError::FileNotFound(path.to_string()));
        }
        let content = std::fs::read_to_string(file)?;

        match file.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::from_json_str(&content),
            _ => Self::from_toml_str(&content),
        }
    }

    /// Parse TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| CliError::input(e.to_string()))
    }

    /// Parse JSON text.
    pub fn from_json_str(content: &str) -> Result<Self> {
        serde_json::from_str(content).map_err(|e| CliError::input(e.to_string()))
    }
}
