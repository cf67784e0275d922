//! Run command implementation
//!
//! Projects one or all scenarios of an input file and writes the outcomes.

use std::fs::File;
use std::io::{self, BufWriter, Write};

use forecast_core::types::ScenarioKind;
use forecast_engine::config::{EngineConfig, MAX_HORIZON_YEARS};
use forecast_engine::geometry::MetricSelector;
use forecast_engine::pipeline::{run_all_scenarios, run_scenario, ScenarioOutcome, ScenarioRequest};
use tracing::{info, warn};

use crate::input::ScenarioFile;
use crate::output::{render, OutputFormat};
use crate::{CliError, Result};

/// Options of the run command
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Scenario input file (TOML or JSON)
    pub input: String,
    /// Single scenario kind; all kinds when `None`
    pub kind: Option<String>,
    /// Run every scenario kind, ignoring `kind`
    pub all: bool,
    /// Horizon override
    pub horizon: Option<usize>,
    /// Metric override
    pub metric: Option<String>,
    /// Output format name
    pub format: String,
    /// Output file; stdout when `None`
    pub output: Option<String>,
}

/// Run the run command
pub fn run(options: &RunOptions, config: &EngineConfig) -> Result<()> {
    info!("Running scenarios...");
    info!("  Input: {}", options.input);
    info!("  Output format: {}", options.format);

    let format: OutputFormat = options.format.parse()?;
    let outcomes = evaluate(options, config)?;

    let degraded = outcomes.iter().filter(|o| !o.diagnostics.is_empty()).count();
    if degraded > 0 {
        warn!("{} scenario(s) computed from degraded input", degraded);
    }

    match &options.output {
        Some(path) => {
            let mut file = BufWriter::new(File::create(path)?);
            render(format, &outcomes, &mut file)?;
            file.flush()?;
            info!("Results written to {}", path);
        }
        None => {
            let stdout = io::stdout();
            let mut lock = stdout.lock();
            render(format, &outcomes, &mut lock)?;
            lock.flush()?;
        }
    }

    info!("Run complete");
    Ok(())
}

/// Load the input and compute the requested outcomes.
pub fn evaluate(options: &RunOptions, config: &EngineConfig) -> Result<Vec<ScenarioOutcome>> {
    let file = ScenarioFile::load(&options.input)?;

    let horizon_years = options.horizon.unwrap_or(config.horizon_years);
    if horizon_years == 0 || horizon_years > MAX_HORIZON_YEARS {
        return Err(CliError::invalid_argument(format!(
            "Horizon must be between 1 and {}, got {}",
            MAX_HORIZON_YEARS, horizon_years
        )));
    }

    let metric = match &options.metric {
        Some(name) => name
            .parse::<MetricSelector>()
            .map_err(CliError::InvalidArgument)?,
        None => file.chart.metric,
    };

    let baseline = file.baseline.resolve();
    let canvas = file.chart.canvas(horizon_years + 1);

    let single = if options.all { None } else { options.kind.as_ref() };
    match single {
        Some(name) => {
            let kind = name
                .parse::<ScenarioKind>()
                .map_err(CliError::InvalidArgument)?;
            let request = ScenarioRequest {
                baseline,
                deltas: file.deltas.for_kind(kind).clone(),
                kind,
                horizon_years,
                metric,
                canvas,
            };
            Ok(vec![run_scenario(&request, config)])
        }
        None => Ok(run_all_scenarios(
            &baseline,
            &file.deltas,
            horizon_years,
            metric,
            &canvas,
            config,
        )),
    }
}
