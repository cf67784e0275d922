//! Investment indicators derived from a projection series.
//!
//! - ROI over the horizon and payback period from cumulative profit
//! - An internal-rate-of-return figure, either the tiered proxy or a
//!   root-find of the cash-flow NPV
//! - Cost/profit split of the final projected year
//!
//! Every division is guarded: a zero denominator yields `0`.

use forecast_core::math::solvers::{scan_bracket, BrentSolver, SolverConfig};
use forecast_core::types::{ProjectionSeries, SolverError};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Lowest discount rate tried by the IRR root-find (-99%).
const IRR_RATE_MIN: f64 = -0.99;
/// Highest discount rate tried by the IRR root-find (1000%).
const IRR_RATE_MAX: f64 = 10.0;
/// Grid resolution for locating the IRR bracket.
const IRR_SCAN_STEPS: usize = 400;

/// How the IRR figure is produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IrrMethod {
    /// Three-tier lookup on ROI: `>30 -> 22.5`, `>15 -> 15.8`, else `9.4`
    #[default]
    Proxy,
    /// Rate at which the NPV of `[-investment, profit_1..profit_H]` is zero
    Solved,
}

impl FromStr for IrrMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "proxy" => Ok(Self::Proxy),
            "solved" | "solve" => Ok(Self::Solved),
            other => Err(format!(
                "Unknown IRR method: {}. Supported: proxy, solved",
                other
            )),
        }
    }
}

/// Indicators for one scenario.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FinancialIndicators {
    /// `(cumulative_profit - investment) / investment * 100`, 0 without investment
    pub roi_percent: f64,
    /// `investment / average_annual_profit`; see [`FinancialIndicators::payback_period`]
    pub payback_period_years: f64,
    /// IRR in percent, produced by `irr_method`
    pub irr_proxy_percent: f64,
    /// `100 - profit_share_percent`
    pub cost_share_percent: f64,
    /// Final-year profit over final-year revenue, in percent
    pub profit_share_percent: f64,
    /// Profit summed over years 1..=horizon
    pub cumulative_profit: f64,
    /// `cumulative_profit / horizon_years`
    pub average_annual_profit: f64,
    /// Method that produced `irr_proxy_percent`
    pub irr_method: IrrMethod,
}

impl FinancialIndicators {
    /// Payback period, or `None` when the raw figure is not a meaningful
    /// duration (non-positive or non-finite).
    pub fn payback_period(&self) -> Option<f64> {
        let years = self.payback_period_years;
        (years.is_finite() && years > 0.0).then_some(years)
    }
}

/// Compute indicators with the proxy IRR.
///
/// # Examples
///
/// ```
/// use forecast_core::types::{ProjectionSeries, YearProjection};
/// use forecast_engine::indicators::compute_indicators;
///
/// let series = ProjectionSeries::new(vec![
///     YearProjection::new(2024, 100_000.0, 10.0),
///     YearProjection::new(2025, 100_000.0, 10.0),
/// ]);
/// let ind = compute_indicators(&series, 5_000.0);
/// assert_eq!(ind.roi_percent, 100.0);
/// assert_eq!(ind.payback_period(), Some(0.5));
/// ```
pub fn compute_indicators(series: &ProjectionSeries, investment: f64) -> FinancialIndicators {
    compute_indicators_with(series, investment, IrrMethod::Proxy, &SolverConfig::default())
}

/// Compute indicators with an explicit IRR method.
///
/// A failed IRR solve falls back to the proxy tier and reports
/// `IrrMethod::Proxy` in the result.
pub fn compute_indicators_with(
    series: &ProjectionSeries,
    investment: f64,
    method: IrrMethod,
    solver: &SolverConfig<f64>,
) -> FinancialIndicators {
    let horizon = series.horizon_years();
    let cumulative_profit = series.cumulative_profit();
    let average_annual_profit = safe_div(cumulative_profit, horizon as f64);

    let has_investment = investment > 0.0;
    let roi_percent = if has_investment {
        (cumulative_profit - investment) / investment * 100.0
    } else {
        0.0
    };
    let payback_period_years = if has_investment {
        safe_div(investment, average_annual_profit)
    } else {
        0.0
    };

    let (irr_proxy_percent, irr_method) = match method {
        IrrMethod::Proxy => (irr_proxy(roi_percent), IrrMethod::Proxy),
        IrrMethod::Solved => match solve_irr(series, investment, solver) {
            Ok(rate) => (rate * 100.0, IrrMethod::Solved),
            Err(err) => {
                tracing::warn!(error = %err, "IRR solve failed, using proxy tier");
                (irr_proxy(roi_percent), IrrMethod::Proxy)
            }
        },
    };

    let (profit_share_percent, cost_share_percent) = profit_split(series);

    FinancialIndicators {
        roi_percent,
        payback_period_years,
        irr_proxy_percent,
        cost_share_percent,
        profit_share_percent,
        cumulative_profit,
        average_annual_profit,
        irr_method,
    }
}

/// Tiered IRR stand-in. Not a rate of return computation.
pub fn irr_proxy(roi_percent: f64) -> f64 {
    if roi_percent > 30.0 {
        22.5
    } else if roi_percent > 15.0 {
        15.8
    } else {
        9.4
    }
}

/// `(profit_share_percent, cost_share_percent)` of the final entry.
pub fn profit_split(series: &ProjectionSeries) -> (f64, f64) {
    let last = series.last();
    let profit_share = safe_div(last.profit, last.revenue) * 100.0;
    (profit_share, 100.0 - profit_share)
}

/// Net present value of `flows` at `rate`, `flows[t]` discounted `t` periods.
///
/// # Examples
///
/// ```
/// use forecast_engine::indicators::npv;
///
/// assert!((npv(0.1, &[-100.0, 110.0])).abs() < 1e-12);
/// ```
pub fn npv(rate: f64, flows: &[f64]) -> f64 {
    let factor = 1.0 + rate;
    flows
        .iter()
        .enumerate()
        .map(|(t, flow)| flow / factor.powi(t as i32))
        .sum()
}

/// Annual cash flows: the investment as an outflow, then each year's profit.
pub fn cash_flows(series: &ProjectionSeries, investment: f64) -> Vec<f64> {
    std::iter::once(-investment)
        .chain(series.projected().iter().map(|y| y.profit))
        .collect()
}

/// Discount rate (as a fraction) at which the cash-flow NPV is zero.
///
/// Scans `[-99%, 1000%]` for the first sign change, then refines it with
/// Brent's method.
pub fn solve_irr(
    series: &ProjectionSeries,
    investment: f64,
    config: &SolverConfig<f64>,
) -> Result<f64, SolverError> {
    let flows = cash_flows(series, investment);
    let objective = |rate: f64| npv(rate, &flows);

    let (a, b) = scan_bracket(objective, IRR_RATE_MIN, IRR_RATE_MAX, IRR_SCAN_STEPS).ok_or(
        SolverError::NoBracket {
            a: IRR_RATE_MIN,
            b: IRR_RATE_MAX,
        },
    )?;
    if a == b {
        return Ok(a);
    }
    BrentSolver::new(*config).find_root(objective, a, b)
}

fn safe_div(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 || !denominator.is_finite() {
        0.0
    } else {
        numerator / denominator
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use forecast_core::types::YearProjection;

    fn flat_series(profit_years: usize) -> ProjectionSeries {
        // 100k revenue at 10% margin: 10k profit per year
        ProjectionSeries::new(
            (0..=profit_years)
                .map(|i| YearProjection::new(2024 + i as i32, 100_000.0, 10.0))
                .collect(),
        )
    }

    #[test]
    fn test_roi_and_payback() {
        let ind = compute_indicators(&flat_series(3), 20_000.0);
        assert_relative_eq!(ind.cumulative_profit, 30_000.0);
        assert_relative_eq!(ind.average_annual_profit, 10_000.0);
        assert_relative_eq!(ind.roi_percent, 50.0);
        assert_relative_eq!(ind.payback_period_years, 2.0);
        assert_eq!(ind.irr_proxy_percent, 22.5);
        assert_eq!(ind.irr_method, IrrMethod::Proxy);
    }

    #[test]
    fn test_zero_investment_law() {
        let ind = compute_indicators(&flat_series(5), 0.0);
        assert_eq!(ind.roi_percent, 0.0);
        assert_eq!(ind.payback_period_years, 0.0);
        assert_eq!(ind.payback_period(), None);
    }

    #[test]
    fn test_proxy_tiers() {
        assert_eq!(irr_proxy(30.1), 22.5);
        assert_eq!(irr_proxy(30.0), 15.8);
        assert_eq!(irr_proxy(15.1), 15.8);
        assert_eq!(irr_proxy(15.0), 9.4);
        assert_eq!(irr_proxy(-40.0), 9.4);
    }

    #[test]
    fn test_profit_split() {
        let ind = compute_indicators(&flat_series(2), 0.0);
        assert_relative_eq!(ind.profit_share_percent, 10.0);
        assert_relative_eq!(ind.cost_share_percent, 90.0);
    }

    #[test]
    fn test_zero_revenue_split_is_guarded() {
        let series = ProjectionSeries::new(vec![YearProjection::zero(2024), YearProjection::zero(2025)]);
        let ind = compute_indicators(&series, 10_000.0);
        assert_eq!(ind.profit_share_percent, 0.0);
        assert_eq!(ind.cost_share_percent, 100.0);
        assert_eq!(ind.payback_period_years, 0.0);
        assert_relative_eq!(ind.roi_percent, -100.0);
    }

    #[test]
    fn test_zero_horizon_is_guarded() {
        let ind = compute_indicators(&flat_series(0), 10_000.0);
        assert_eq!(ind.average_annual_profit, 0.0);
        assert_eq!(ind.payback_period_years, 0.0);
    }

    #[test]
    fn test_negative_profit_payback_not_applicable() {
        let series = ProjectionSeries::new(vec![
            YearProjection::new(2024, 100_000.0, 5.0),
            YearProjection::new(2025, 100_000.0, -5.0),
        ]);
        let ind = compute_indicators(&series, 10_000.0);
        assert!(ind.payback_period_years < 0.0);
        assert_eq!(ind.payback_period(), None);
    }

    #[test]
    fn test_npv_and_cash_flows() {
        let flows = cash_flows(&flat_series(2), 15_000.0);
        assert_eq!(flows, vec![-15_000.0, 10_000.0, 10_000.0]);
        assert_relative_eq!(npv(0.0, &flows), 5_000.0);
    }

    #[test]
    fn test_solved_irr() {
        // -20k then 10k for 3 years: IRR ~ 23.375%
        let ind = compute_indicators_with(
            &flat_series(3),
            20_000.0,
            IrrMethod::Solved,
            &SolverConfig::default(),
        );
        assert_eq!(ind.irr_method, IrrMethod::Solved);
        assert_relative_eq!(ind.irr_proxy_percent, 23.375, epsilon = 1e-2);
        let flows = cash_flows(&flat_series(3), 20_000.0);
        assert!(npv(ind.irr_proxy_percent / 100.0, &flows).abs() < 1e-3);
    }

    #[test]
    fn test_solved_irr_falls_back_without_investment() {
        let ind = compute_indicators_with(
            &flat_series(3),
            0.0,
            IrrMethod::Solved,
            &SolverConfig::default(),
        );
        assert_eq!(ind.irr_method, IrrMethod::Proxy);
        assert_eq!(ind.irr_proxy_percent, 9.4);
    }

    #[test]
    fn test_irr_method_parsing() {
        assert_eq!("Solved".parse::<IrrMethod>(), Ok(IrrMethod::Solved));
        assert_eq!("proxy".parse::<IrrMethod>(), Ok(IrrMethod::Proxy));
        assert!("newton".parse::<IrrMethod>().is_err());
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn test_zero_investment_for_any_series(
                revenue in 0.0f64..1e9,
                margin in -50.0f64..50.0,
                horizon in 0usize..15,
            ) {
                let series = ProjectionSeries::new(
                    (0..=horizon)
                        .map(|i| YearProjection::new(2024 + i as i32, revenue, margin))
                        .collect(),
                );
                let ind = compute_indicators(&series, 0.0);
                prop_assert_eq!(ind.roi_percent, 0.0);
                prop_assert_eq!(ind.payback_period_years, 0.0);
            }

            #[test]
            fn test_shares_sum_to_hundred(revenue in 1.0f64..1e9, margin in -50.0f64..50.0) {
                let series = ProjectionSeries::new(vec![
                    YearProjection::new(2024, revenue, margin),
                    YearProjection::new(2025, revenue, margin),
                ]);
                let ind = compute_indicators(&series, 1_000.0);
                prop_assert!((ind.profit_share_percent + ind.cost_share_percent - 100.0).abs() < 1e-9);
            }
        }
    }
}
