//! Check command implementation
//!
//! Validates the engine configuration and runs a reference scenario to
//! confirm the engine produces the expected figures.

use forecast_core::types::{CompanyBaseline, ScenarioKind};
use forecast_engine::config::EngineConfig;
use forecast_engine::deltas::ScenarioDeltas;
use forecast_engine::geometry::{Canvas, MetricSelector};
use forecast_engine::pipeline::{run_scenario, ScenarioRequest};
use tracing::info;

use crate::{CliError, Result};

/// Cumulative profit of the reference scenario under the default neutral policy.
const REFERENCE_CUMULATIVE_PROFIT: f64 = 161_281.152;

/// Run the check command
pub fn run(config: &EngineConfig) -> Result<()> {
    info!("Checking configuration...");
    config.validate()?;

    println!("Horizon:          {} years", config.horizon_years);
    println!("Margin semantics: {:?}", config.margin_semantics);
    println!("IRR method:       {:?}", config.irr_method);
    println!(
        "Solver:           tolerance {:e}, max {} iterations",
        config.solver.tolerance, config.solver.max_iterations
    );
    println!("Margin scale:     {}", config.margin_visual_scale);
    println!();
    println!("┌─────────────┬────────┬────────┬─────────┬─────────┐");
    println!("│ Scenario    │ Growth │ Drift  │ Floor % │ Ceil. % │");
    println!("├─────────────┼────────┼────────┼─────────┼─────────┤");
    for kind in ScenarioKind::all() {
        let policy = config.policies.policy(kind);
        println!(
            "│ {:<11} │ {:>6.3} │ {:>+6.2} │ {:>7.1} │ {:>7.1} │",
            kind.name(),
            policy.growth_factor,
            policy.margin_drift,
            policy.margin_floor,
            policy.margin_ceiling
        );
    }
    println!("└─────────────┴────────┴────────┴─────────┴─────────┘");

    if let Some(cumulative) = reference_cumulative_profit(config) {
        let ok = (cumulative - REFERENCE_CUMULATIVE_PROFIT).abs() < 1e-6;
        if !ok {
            return Err(CliError::SelfCheck(format!(
                "Reference scenario produced cumulative profit {:.3}, expected {:.3}",
                cumulative, REFERENCE_CUMULATIVE_PROFIT
            )));
        }
        info!("Reference scenario OK");
    } else {
        info!("Neutral policy customised, skipping reference scenario");
    }

    info!("Configuration OK");
    Ok(())
}

/// Cumulative profit of the reference scenario, or `None` when the
/// configuration changes the neutral policy or the margin semantics.
fn reference_cumulative_profit(config: &EngineConfig) -> Option<f64> {
    let defaults = EngineConfig::default();
    let same_neutral = config.policies.policy(ScenarioKind::Neutral)
        == defaults.policies.policy(ScenarioKind::Neutral);
    if !same_neutral || config.margin_semantics != defaults.margin_semantics {
        return None;
    }

    let request = ScenarioRequest {
        baseline: CompanyBaseline::new(920_000.0, 10.0, 2024),
        deltas: ScenarioDeltas::new()
            .with_revenue("+8%")
            .with_margin("5")
            .with_investment("50k€"),
        kind: ScenarioKind::Neutral,
        horizon_years: 3,
        metric: MetricSelector::Revenue,
        canvas: Canvas::fit(800.0, 400.0, 4),
    };
    Some(run_scenario(&request, config).indicators.cumulative_profit)
}
