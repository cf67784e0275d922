//! Rendering of scenario outcomes as JSON, CSV or a text table.

use std::io::Write;
use std::str::FromStr;

use forecast_engine::pipeline::ScenarioOutcome;
use serde::Serialize;

use crate::{CliError, Result};

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Full outcomes as pretty-printed JSON
    Json,
    /// One row per scenario year
    Csv,
    /// Human-readable tables with indicators
    Table,
}

impl FromStr for OutputFormat {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            "table" => Ok(Self::Table),
            other => Err(CliError::invalid_argument(format!(
                "Unknown format: {}. Supported: json, csv, table",
                other
            ))),
        }
    }
}

/// Write `outcomes` to `writer` in `format`.
pub fn render<W: Write>(format: OutputFormat, outcomes: &[ScenarioOutcome], writer: W) -> Result<()> {
    match format {
        OutputFormat::Json => write_json(outcomes, writer),
        OutputFormat::Csv => write_csv(outcomes, writer),
        OutputFormat::Table => write_table(outcomes, writer),
    }
}

fn write_json<W: Write>(outcomes: &[ScenarioOutcome], mut writer: W) -> Result<()> {
    serde_json::to_writer_pretty(&mut writer, outcomes)?;
    writeln!(writer)?;
    Ok(())
}

#[derive(Serialize)]
struct SeriesRow<'a> {
    scenario: &'a str,
    year: i32,
    revenue: f64,
    margin_percent: f64,
    profit: f64,
}

fn write_csv<W: Write>(outcomes: &[ScenarioOutcome], writer: W) -> Result<()> {
    let mut csv = csv::Writer::from_writer(writer);
    for outcome in outcomes {
        for year in outcome.series.iter() {
            csv.serialize(SeriesRow {
                scenario: outcome.kind.name(),
                year: year.year,
                revenue: year.revenue,
                margin_percent: year.margin_percent,
                profit: year.profit,
            })?;
        }
    }
    csv.flush()?;
    Ok(())
}

fn write_table<W: Write>(outcomes: &[ScenarioOutcome], mut writer: W) -> Result<()> {
    for outcome in outcomes {
        let series = &outcome.series;
        writeln!(
            writer,
            "\nScenario: {} ({} to {})",
            outcome.kind,
            series.base().year,
            series.last().year
        )?;
        writeln!(writer, "┌──────┬─────────────────┬──────────┬─────────────────┐")?;
        writeln!(writer, "│ Year │ Revenue (€)     │ Margin % │ Profit (€)      │")?;
        writeln!(writer, "├──────┼─────────────────┼──────────┼─────────────────┤")?;
        for year in series.iter() {
            writeln!(
                writer,
                "│ {:>4} │ {:>15.2} │ {:>8.2} │ {:>15.2} │",
                year.year, year.revenue, year.margin_percent, year.profit
            )?;
        }
        writeln!(writer, "└──────┴─────────────────┴──────────┴─────────────────┘")?;

        let ind = &outcome.indicators;
        let payback = match ind.payback_period() {
            Some(years) => format!("{:.2} years", years),
            None => "n/a".to_string(),
        };
        writeln!(writer, "  ROI:          {:.2}%", ind.roi_percent)?;
        writeln!(writer, "  Payback:      {}", payback)?;
        writeln!(
            writer,
            "  IRR ({:?}):  {:.2}%",
            ind.irr_method, ind.irr_proxy_percent
        )?;
        writeln!(
            writer,
            "  Profit/Cost:  {:.2}% / {:.2}%",
            ind.profit_share_percent, ind.cost_share_percent
        )?;

        for diagnostic in &outcome.diagnostics {
            writeln!(writer, "  ! {}", diagnostic)?;
        }
    }
    Ok(())
}
