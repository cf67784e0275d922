//! Chart geometry: bars, trend polyline and pie split.
//!
//! Output is plain numbers in canvas units, with `y` growing downwards as
//! in most 2D drawing APIs. Nothing here knows about a rendering backend.

use crate::indicators::profit_split;
use forecast_core::types::{ProjectionSeries, YearProjection};
use serde::{Deserialize, Serialize};
use std::f64::consts::{FRAC_PI_2, TAU};

/// Default factor applied to margin percentages so they remain visible
/// next to revenue-scale bars.
pub const MARGIN_VISUAL_SCALE: f64 = 10_000.0;

/// Share of each bar slot occupied by the bar in [`Canvas::fit`].
const BAR_FILL_RATIO: f64 = 0.7;
/// Vertical padding as a fraction of canvas height in [`Canvas::fit`].
const VERTICAL_PADDING_RATIO: f64 = 0.1;

/// Which scalar each bar plots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetricSelector {
    /// Revenue in euros
    #[default]
    Revenue,
    /// Margin percent times the visual scale
    Margin,
    /// Profit in euros
    Profit,
}

impl std::str::FromStr for MetricSelector {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "revenue" => Ok(Self::Revenue),
            "margin" => Ok(Self::Margin),
            "profit" => Ok(Self::Profit),
            other => Err(format!(
                "Unknown metric: {}. Supported: revenue, margin, profit",
                other
            )),
        }
    }
}

impl MetricSelector {
    fn value(&self, year: &YearProjection, margin_scale: f64) -> f64 {
        match self {
            Self::Revenue => year.revenue,
            Self::Margin => year.margin_percent * margin_scale,
            Self::Profit => year.profit,
        }
    }
}

/// Drawing area and bar layout.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Canvas {
    /// Total width
    pub width: f64,
    /// Total height
    pub height: f64,
    /// Width of one bar
    pub bar_width: f64,
    /// Space between consecutive bars
    pub bar_gap: f64,
    /// `y` of the bar baseline
    pub baseline_y: f64,
    /// Height of a bar holding the maximum value
    pub plot_height: f64,
}

impl Canvas {
    /// Lay out `bar_count` bars across `width`, with 10% vertical padding.
    ///
    /// # Examples
    ///
    /// ```
    /// use forecast_engine::geometry::Canvas;
    ///
    /// let canvas = Canvas::fit(400.0, 200.0, 4);
    /// assert!((canvas.bar_width + canvas.bar_gap - 100.0).abs() < 1e-9);
    /// assert!((canvas.baseline_y - 180.0).abs() < 1e-9);
    /// ```
    pub fn fit(width: f64, height: f64, bar_count: usize) -> Self {
        let slot = if bar_count == 0 {
            width
        } else {
            width / bar_count as f64
        };
        let padding = height * VERTICAL_PADDING_RATIO;
        Self {
            width,
            height,
            bar_width: slot * BAR_FILL_RATIO,
            bar_gap: slot * (1.0 - BAR_FILL_RATIO),
            baseline_y: height - padding,
            plot_height: height - 2.0 * padding,
        }
    }

    /// Copy with every horizontal dimension multiplied by `k`.
    pub fn scale_width(&self, k: f64) -> Self {
        Self {
            width: self.width * k,
            bar_width: self.bar_width * k,
            bar_gap: self.bar_gap * k,
            ..*self
        }
    }

    fn slot(&self) -> f64 {
        self.bar_width + self.bar_gap
    }
}

/// 2D point in canvas units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal coordinate
    pub x: f64,
    /// Vertical coordinate, growing downwards
    pub y: f64,
}

impl Point {
    /// Create a point.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// One bar; `(x, y)` is its top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    /// Left edge
    pub x: f64,
    /// Top edge, `baseline_y - height`
    pub y: f64,
    /// Bar width
    pub width: f64,
    /// Bar height
    pub height: f64,
    /// Plotted value
    pub value: f64,
    /// Year the bar represents
    pub year: i32,
}

/// Which side of the profitability split an arc draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArcSlice {
    /// Profit share
    Profit,
    /// Cost share
    Cost,
}

/// One pie slice, drawn clockwise from `start` to `end`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Arc {
    /// Slice identity
    pub slice: ArcSlice,
    /// Share of the circle in percent
    pub share_percent: f64,
    /// Pie centre
    pub center: Point,
    /// Pie radius
    pub radius: f64,
    /// Start angle in radians
    pub start_angle: f64,
    /// End angle in radians
    pub end_angle: f64,
    /// Point on the circle at `start_angle`
    pub start: Point,
    /// Point on the circle at `end_angle`
    pub end: Point,
    /// 1 when the slice spans more than half the circle
    pub large_arc_flag: u8,
}

/// Drawable primitives for one series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartGeometry {
    /// One bar per year
    pub bars: Vec<Bar>,
    /// One point per year at the top centre of its bar
    pub trend_points: Vec<Point>,
    /// Profit slice then cost slice
    pub pie_arcs: Vec<Arc>,
}

/// Map a series to geometry with the default margin scale.
///
/// # Examples
///
/// ```
/// use forecast_core::types::{ProjectionSeries, YearProjection};
/// use forecast_engine::geometry::{map_to_geometry, Canvas, MetricSelector};
///
/// let series = ProjectionSeries::new(vec![
///     YearProjection::new(2024, 50.0, 10.0),
///     YearProjection::new(2025, 100.0, 10.0),
/// ]);
/// let canvas = Canvas::fit(200.0, 100.0, series.len());
/// let geometry = map_to_geometry(&series, MetricSelector::Revenue, &canvas);
///
/// assert_eq!(geometry.bars[1].height, canvas.plot_height);
/// assert_eq!(geometry.bars[0].height, canvas.plot_height / 2.0);
/// ```
pub fn map_to_geometry(
    series: &ProjectionSeries,
    metric: MetricSelector,
    canvas: &Canvas,
) -> ChartGeometry {
    map_to_geometry_scaled(series, metric, canvas, MARGIN_VISUAL_SCALE)
}

/// Map a series to geometry with an explicit margin scale.
///
/// Bar heights are `value / max * plot_height`, with `max` the largest
/// plotted value. Values at or below zero, and every value when `max` is
/// not positive, give zero-height bars.
pub fn map_to_geometry_scaled(
    series: &ProjectionSeries,
    metric: MetricSelector,
    canvas: &Canvas,
    margin_scale: f64,
) -> ChartGeometry {
    let values: Vec<f64> = series
        .iter()
        .map(|year| metric.value(year, margin_scale))
        .collect();
    let max_value = values.iter().copied().fold(0.0_f64, f64::max);

    let bars: Vec<Bar> = series
        .iter()
        .zip(&values)
        .enumerate()
        .map(|(i, (year, &value))| {
            let height = if max_value > 0.0 {
                (value / max_value * canvas.plot_height).max(0.0)
            } else {
                0.0
            };
            Bar {
                x: i as f64 * canvas.slot(),
                y: canvas.baseline_y - height,
                width: canvas.bar_width,
                height,
                value,
                year: year.year,
            }
        })
        .collect();

    let trend_points = bars
        .iter()
        .map(|bar| Point::new(bar.x + bar.width / 2.0, bar.y))
        .collect();

    let (profit_share, _) = profit_split(series);

    ChartGeometry {
        bars,
        trend_points,
        pie_arcs: pie_arcs(profit_share, canvas).to_vec(),
    }
}

/// Split a circle at 12 o'clock and at the profit share, clockwise.
///
/// The circle sits centred in the plot area. `profit_share_percent` is
/// clamped to `[0, 100]`; a loss draws as an empty profit slice.
pub fn pie_arcs(profit_share_percent: f64, canvas: &Canvas) -> [Arc; 2] {
    let profit_share = if profit_share_percent.is_finite() {
        profit_share_percent.clamp(0.0, 100.0)
    } else {
        0.0
    };
    let cost_share = 100.0 - profit_share;

    let center = Point::new(
        canvas.width / 2.0,
        canvas.baseline_y - canvas.plot_height / 2.0,
    );
    let radius = canvas.width.min(canvas.plot_height).max(0.0) / 2.0;

    let start = -FRAC_PI_2;
    let cut = start + profit_share / 100.0 * TAU;
    let end = start + TAU;

    let arc = |slice, share: f64, from: f64, to: f64| Arc {
        slice,
        share_percent: share,
        center,
        radius,
        start_angle: from,
        end_angle: to,
        start: on_circle(center, radius, from),
        end: on_circle(center, radius, to),
        large_arc_flag: u8::from(share > 50.0),
    };

    [
        arc(ArcSlice::Profit, profit_share, start, cut),
        arc(ArcSlice::Cost, cost_share, cut, end),
    ]
}

fn on_circle(center: Point, radius: f64, angle: f64) -> Point {
    Point::new(
        center.x + radius * angle.cos(),
        center.y + radius * angle.sin(),
    )
}
