//! Multi-year projection of revenue, margin and profit.
//!
//! # Algorithm
//!
//! - Year 0 is the baseline, unmodified.
//! - Year 1 applies the first-year deltas: an absolute revenue override
//!   when present, otherwise the parsed revenue delta; the margin follows
//!   [`MarginSemantics`] and is clamped to the scenario bounds.
//! - Years 2..=horizon follow the scenario policy:
//!   `revenue_t = revenue_(t-1) * growth_factor` and
//!   `margin_t = clamp(margin_(t-1) + drift, floor, ceiling)`.
//!
//! A non-positive or non-finite base revenue yields an all-zero series of
//! the requested length.

use crate::deltas::ScenarioDeltas;
use forecast_core::types::{
    CompanyBaseline, MagnitudeUnit, MarginSemantics, ParsedMagnitude, PolicyTable,
    ProjectionSeries, ScenarioKind, ScenarioPolicy, YearProjection,
};

/// Project with the built-in policy table and target margin semantics.
///
/// # Examples
///
/// ```
/// use forecast_core::types::{CompanyBaseline, ScenarioKind};
/// use forecast_engine::deltas::ScenarioDeltas;
/// use forecast_engine::projector::project;
///
/// let baseline = CompanyBaseline::new(920_000.0, 10.0, 2024);
/// let deltas = ScenarioDeltas::new().with_revenue("+8%").with_margin("5");
/// let series = project(&baseline, &deltas, ScenarioKind::Neutral, 3);
///
/// assert_eq!(series.len(), 4);
/// assert!((series.as_slice()[1].revenue - 993_600.0).abs() < 1e-6);
/// ```
pub fn project(
    baseline: &CompanyBaseline,
    deltas: &ScenarioDeltas,
    kind: ScenarioKind,
    horizon_years: usize,
) -> ProjectionSeries {
    project_with(
        baseline,
        deltas,
        kind,
        horizon_years,
        &PolicyTable::default(),
        MarginSemantics::default(),
    )
}

/// Project with an explicit policy table and margin semantics.
pub fn project_with(
    baseline: &CompanyBaseline,
    deltas: &ScenarioDeltas,
    kind: ScenarioKind,
    horizon_years: usize,
    policies: &PolicyTable,
    semantics: MarginSemantics,
) -> ProjectionSeries {
    let policy = policies.policy(kind);

    if !baseline.is_valid() {
        tracing::warn!(
            base_revenue = baseline.base_revenue,
            base_margin_percent = baseline.base_margin_percent,
            scenario = %kind,
            "degenerate baseline, returning zero projection"
        );
        return zero_series(baseline.reference_year, horizon_years);
    }

    let mut years = Vec::with_capacity(horizon_years + 1);
    years.push(YearProjection::new(
        baseline.reference_year,
        baseline.base_revenue,
        baseline.base_margin_percent,
    ));

    if horizon_years == 0 {
        return ProjectionSeries::new(years);
    }

    let revenue_1 = first_year_revenue(baseline, deltas);
    let margin_1 = first_year_margin(baseline, &deltas.magnitude("margin"), policy, semantics);
    tracing::debug!(
        scenario = %kind,
        revenue = revenue_1,
        margin = margin_1,
        "first projected year"
    );

    let mut current = YearProjection::new(baseline.reference_year + 1, revenue_1, margin_1);
    years.push(current);

    for offset in 2..=horizon_years {
        current = YearProjection::new(
            baseline.reference_year + offset as i32,
            (current.revenue * policy.growth_factor).max(0.0),
            policy.next_margin(current.margin_percent),
        );
        years.push(current);
    }

    ProjectionSeries::new(years)
}

/// Series of `horizon_years + 1` zero entries starting at `reference_year`.
pub fn zero_series(reference_year: i32, horizon_years: usize) -> ProjectionSeries {
    ProjectionSeries::new(
        (0..=horizon_years)
            .map(|offset| YearProjection::zero(reference_year + offset as i32))
            .collect(),
    )
}

/// Year-1 revenue, never negative.
///
/// Percentages and bare numbers are relative changes; euro amounts are
/// absolute increments on the base revenue.
fn first_year_revenue(baseline: &CompanyBaseline, deltas: &ScenarioDeltas) -> f64 {
    if let Some(revenue) = deltas.revenue_override.filter(|r| r.is_finite()) {
        return revenue.max(0.0);
    }

    let delta = deltas.magnitude("revenue");
    let revenue = match delta.unit {
        MagnitudeUnit::Percent | MagnitudeUnit::Raw => {
            baseline.base_revenue * (1.0 + delta.value / 100.0)
        }
        MagnitudeUnit::ThousandEuro | MagnitudeUnit::MillionEuro => {
            baseline.base_revenue + delta.value
        }
    };
    revenue.max(0.0)
}

/// Year-1 margin under the chosen semantics, clamped to the policy bounds.
///
/// A missing or unparseable margin delta keeps the baseline margin, as
/// does a euro amount, which has no meaning as a margin.
fn first_year_margin(
    baseline: &CompanyBaseline,
    delta: &ParsedMagnitude,
    policy: &ScenarioPolicy,
    semantics: MarginSemantics,
) -> f64 {
    let margin = if delta.is_sentinel() || delta.unit.is_currency() {
        baseline.base_margin_percent
    } else {
        match semantics {
            MarginSemantics::Target => delta.value,
            MarginSemantics::Delta => baseline.base_margin_percent + delta.value,
        }
    };
    policy.clamp_margin(margin)
}
