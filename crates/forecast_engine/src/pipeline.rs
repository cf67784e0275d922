//! Orchestration: deltas -> projection -> {indicators, geometry}.
//!
//! A thin composition of the pure stages. Each call is independent, so
//! the three scenario kinds can be recomputed in parallel.

use crate::config::EngineConfig;
use crate::deltas::{ScenarioDeltaSet, ScenarioDeltas};
use crate::geometry::{map_to_geometry_scaled, Canvas, ChartGeometry, MetricSelector};
use crate::indicators::{compute_indicators_with, FinancialIndicators};
use crate::projector::project_with;
use forecast_core::types::{CompanyBaseline, Degradation, ProjectionSeries, ScenarioKind};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Everything needed to evaluate one scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioRequest {
    /// Reference-year figures
    pub baseline: CompanyBaseline,
    /// First-year deltas
    pub deltas: ScenarioDeltas,
    /// Scenario kind selecting the policy
    pub kind: ScenarioKind,
    /// Projected years beyond the baseline
    pub horizon_years: usize,
    /// Metric plotted by the bars
    pub metric: MetricSelector,
    /// Drawing area
    pub canvas: Canvas,
}

/// Derived outputs for one scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioOutcome {
    /// Scenario kind
    pub kind: ScenarioKind,
    /// Year-by-year projection
    pub series: ProjectionSeries,
    /// Investment indicators
    pub indicators: FinancialIndicators,
    /// Chart primitives
    pub geometry: ChartGeometry,
    /// Data problems that were replaced by sentinel values
    pub diagnostics: Vec<Degradation>,
}

/// Evaluate one scenario.
///
/// # Examples
///
/// ```
/// use forecast_core::types::{CompanyBaseline, ScenarioKind};
/// use forecast_engine::config::EngineConfig;
/// use forecast_engine::deltas::ScenarioDeltas;
/// use forecast_engine::geometry::{Canvas, MetricSelector};
/// use forecast_engine::pipeline::{run_scenario, ScenarioRequest};
///
/// let request = ScenarioRequest {
///     baseline: CompanyBaseline::new(920_000.0, 10.0, 2024),
///     deltas: ScenarioDeltas::new().with_revenue("+8%").with_margin("5").with_investment("50k€"),
///     kind: ScenarioKind::Neutral,
///     horizon_years: 3,
///     metric: MetricSelector::Revenue,
///     canvas: Canvas::fit(600.0, 300.0, 4),
/// };
/// let outcome = run_scenario(&request, &EngineConfig::default());
///
/// assert_eq!(outcome.series.len(), 4);
/// assert!((outcome.indicators.roi_percent - 222.56).abs() < 0.01);
/// assert!(outcome.diagnostics.is_empty());
/// ```
pub fn run_scenario(request: &ScenarioRequest, config: &EngineConfig) -> ScenarioOutcome {
    let series = project_with(
        &request.baseline,
        &request.deltas,
        request.kind,
        request.horizon_years,
        &config.policies,
        config.margin_semantics,
    );

    let investment = request.deltas.investment_amount();
    let indicators =
        compute_indicators_with(&series, investment, config.irr_method, &config.solver);

    let geometry = map_to_geometry_scaled(
        &series,
        request.metric,
        &request.canvas,
        config.margin_visual_scale,
    );

    let diagnostics = collect_diagnostics(request, &indicators, investment);
    for diagnostic in &diagnostics {
        tracing::warn!(scenario = %request.kind, "{}", diagnostic);
    }

    ScenarioOutcome {
        kind: request.kind,
        series,
        indicators,
        geometry,
        diagnostics,
    }
}

/// Evaluate all three scenario kinds in parallel, returned in
/// [`ScenarioKind::all`] order.
pub fn run_all_scenarios(
    baseline: &CompanyBaseline,
    deltas: &ScenarioDeltaSet,
    horizon_years: usize,
    metric: MetricSelector,
    canvas: &Canvas,
    config: &EngineConfig,
) -> Vec<ScenarioOutcome> {
    ScenarioKind::all()
        .par_iter()
        .map(|&kind| {
            let request = ScenarioRequest {
                baseline: *baseline,
                deltas: deltas.for_kind(kind).clone(),
                kind,
                horizon_years,
                metric,
                canvas: *canvas,
            };
            run_scenario(&request, config)
        })
        .collect()
}

fn collect_diagnostics(
    request: &ScenarioRequest,
    indicators: &FinancialIndicators,
    investment: f64,
) -> Vec<Degradation> {
    let mut diagnostics = request.deltas.inspect();

    let baseline = &request.baseline;
    if !(baseline.base_revenue.is_finite() && baseline.base_revenue > 0.0) {
        diagnostics.push(Degradation::DegenerateBaseline {
            base_revenue: baseline.base_revenue,
        });
    }
    if !baseline.base_margin_percent.is_finite() {
        diagnostics.push(Degradation::NonFiniteMargin {
            base_margin_percent: baseline.base_margin_percent,
        });
    }

    if investment > 0.0 {
        if indicators.payback_period().is_none() {
            diagnostics.push(Degradation::NonPositiveAverageProfit {
                average: indicators.average_annual_profit,
            });
        }
    } else {
        diagnostics.push(Degradation::ZeroInvestment);
    }

    diagnostics
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::IrrMethod;
    use approx::assert_relative_eq;

    fn request(kind: ScenarioKind, deltas: ScenarioDeltas) -> ScenarioRequest {
        ScenarioRequest {
            baseline: CompanyBaseline::new(920_000.0, 10.0, 2024),
            deltas,
            kind,
            horizon_years: 3,
            metric: MetricSelector::Profit,
            canvas: Canvas::fit(800.0, 400.0, 4),
        }
    }

    #[test]
    fn test_outputs_are_consistent() {
        let outcome = run_scenario(
            &request(
                ScenarioKind::Optimistic,
                ScenarioDeltas::new()
                    .with_revenue("+12%")
                    .with_margin("12")
                    .with_investment("100k€"),
            ),
            &EngineConfig::default(),
        );

        assert_eq!(outcome.kind, ScenarioKind::Optimistic);
        assert_eq!(outcome.geometry.bars.len(), outcome.series.len());
        assert_relative_eq!(
            outcome.indicators.profit_share_percent,
            outcome.series.last().margin_percent,
            epsilon = 1e-9
        );
        assert!(outcome.diagnostics.is_empty());
    }

    #[test]
    fn test_zero_investment_is_reported() {
        let outcome = run_scenario(
            &request(ScenarioKind::Neutral, ScenarioDeltas::new().with_revenue("+8%")),
            &EngineConfig::default(),
        );
        assert_eq!(outcome.indicators.roi_percent, 0.0);
        assert_eq!(outcome.diagnostics, vec![Degradation::ZeroInvestment]);
    }

    #[test]
    fn test_degenerate_baseline_is_reported() {
        let mut req = request(
            ScenarioKind::Neutral,
            ScenarioDeltas::new().with_investment("10k€"),
        );
        req.baseline.base_revenue = -1.0;

        let outcome = run_scenario(&req, &EngineConfig::default());
        assert!(outcome.series.iter().all(|y| y.profit == 0.0));
        assert!(outcome
            .diagnostics
            .contains(&Degradation::DegenerateBaseline { base_revenue: -1.0 }));
        assert!(outcome
            .diagnostics
            .contains(&Degradation::NonPositiveAverageProfit { average: 0.0 }));
    }

    #[test]
    fn test_non_finite_margin_is_reported_as_margin() {
        let mut req = request(
            ScenarioKind::Neutral,
            ScenarioDeltas::new().with_investment("10k€"),
        );
        req.baseline.base_revenue = 920_000.0;
        req.baseline.base_margin_percent = f64::NAN;

        let outcome = run_scenario(&req, &EngineConfig::default());
        assert!(outcome.series.iter().all(|y| y.revenue == 0.0 && y.profit == 0.0));
        assert!(outcome.diagnostics.iter().any(|d| matches!(
            d,
            Degradation::NonFiniteMargin { base_margin_percent } if base_margin_percent.is_nan()
        )));
        assert!(!outcome
            .diagnostics
            .iter()
            .any(|d| matches!(d, Degradation::DegenerateBaseline { .. })));
    }

    #[test]
    fn test_loss_making_payback_is_reported() {
        let outcome = run_scenario(
            &request(
                ScenarioKind::Neutral,
                ScenarioDeltas::new().with_margin("-4").with_investment("20k€"),
            ),
            &EngineConfig::default(),
        );
        assert_eq!(outcome.indicators.payback_period(), None);
        assert!(matches!(
            outcome.diagnostics.as_slice(),
            [Degradation::NonPositiveAverageProfit { average }] if *average < 0.0
        ));
    }

    #[test]
    fn test_config_irr_method_is_applied() {
        let config = EngineConfig {
            irr_method: IrrMethod::Solved,
            ..Default::default()
        };
        let outcome = run_scenario(
            &request(
                ScenarioKind::Neutral,
                ScenarioDeltas::new().with_margin("5").with_investment("50k€"),
            ),
            &config,
        );
        assert_eq!(outcome.indicators.irr_method, IrrMethod::Solved);
        assert!(outcome.indicators.irr_proxy_percent > 0.0);
    }

    #[test]
    fn test_run_all_scenarios_order_and_ranking() {
        let deltas = ScenarioDeltaSet {
            optimistic: ScenarioDeltas::new().with_revenue("+12%"),
            neutral: ScenarioDeltas::new().with_revenue("+8%"),
            pessimistic: ScenarioDeltas::new().with_revenue("+3%"),
        };
        let outcomes = run_all_scenarios(
            &CompanyBaseline::new(1_000_000.0, 10.0, 2024),
            &deltas,
            5,
            MetricSelector::Revenue,
            &Canvas::fit(600.0, 300.0, 6),
            &EngineConfig::default(),
        );

        let kinds: Vec<ScenarioKind> = outcomes.iter().map(|o| o.kind).collect();
        assert_eq!(kinds, ScenarioKind::all().to_vec());

        let last_revenue: Vec<f64> = outcomes.iter().map(|o| o.series.last().revenue).collect();
        assert!(last_revenue[0] > last_revenue[1]);
        assert!(last_revenue[1] > last_revenue[2]);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let deltas = ScenarioDeltaSet {
            optimistic: ScenarioDeltas::new().with_revenue("+18%").with_margin("14"),
            neutral: ScenarioDeltas::new().with_revenue("+8%"),
            pessimistic: ScenarioDeltas::new().with_revenue("-5%").with_margin("6"),
        };
        let baseline = CompanyBaseline::new(2_400_000.0, 11.0, 2024);
        let canvas = Canvas::fit(600.0, 300.0, 4);
        let config = EngineConfig::default();

        let parallel = run_all_scenarios(&baseline, &deltas, 3, MetricSelector::Margin, &canvas, &config);
        for outcome in &parallel {
            let sequential = run_scenario(
                &ScenarioRequest {
                    baseline,
                    deltas: deltas.for_kind(outcome.kind).clone(),
                    kind: outcome.kind,
                    horizon_years: 3,
                    metric: MetricSelector::Margin,
                    canvas,
                },
                &config,
            );
            assert_eq!(outcome, &sequential);
        }
    }
}
