//! Company baseline figures.

use serde::{Deserialize, Serialize};

/// The reference-year figures a projection starts from.
///
/// `base_revenue` is expected to be non-negative; anything non-positive is
/// treated downstream as a degenerate baseline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CompanyBaseline {
    /// Reference-year revenue in euros
    pub base_revenue: f64,
    /// Reference-year net margin in percent
    pub base_margin_percent: f64,
    /// Calendar year of the baseline figures
    pub reference_year: i32,
}

impl CompanyBaseline {
    /// Create a baseline.
    pub fn new(base_revenue: f64, base_margin_percent: f64, reference_year: i32) -> Self {
        Self {
            base_revenue,
            base_margin_percent,
            reference_year,
        }
    }

    /// Baseline profit, `revenue * margin / 100`.
    pub fn base_profit(&self) -> f64 {
        self.base_revenue * self.base_margin_percent / 100.0
    }

    /// True when revenue is positive and both figures are finite.
    pub fn is_valid(&self) -> bool {
        self.base_revenue.is_finite()
            && self.base_margin_percent.is_finite()
            && self.base_revenue > 0.0
    }
}
