//! Year projections and projection series.

use serde::{de, Deserialize, Deserializer, Serialize};

/// Projected figures for one year.
///
/// Construct through [`YearProjection::new`] so that
/// `profit == revenue * margin_percent / 100` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct YearProjection {
    /// Calendar year
    pub year: i32,
    /// Revenue in euros
    pub revenue: f64,
    /// Net margin in percent
    pub margin_percent: f64,
    /// Profit in euros
    pub profit: f64,
}

impl YearProjection {
    /// Create a projection; profit is derived from revenue and margin.
    pub fn new(year: i32, revenue: f64, margin_percent: f64) -> Self {
        Self {
            year,
            revenue,
            margin_percent,
            profit: revenue * margin_percent / 100.0,
        }
    }

    /// All-zero projection for `year`.
    pub fn zero(year: i32) -> Self {
        Self::new(year, 0.0, 0.0)
    }
}

/// Ordered projection, base year first, `horizon_years + 1` entries.
///
/// The series is an immutable value. Iterating it is restartable: every
/// call to [`ProjectionSeries::iter`] starts again from the base year.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectionSeries {
    years: Vec<YearProjection>,
}

impl<'de> Deserialize<'de> for ProjectionSeries {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        struct Raw {
            years: Vec<YearProjection>,
        }

        let raw = Raw::deserialize(deserializer)?;
        if raw.years.is_empty() {
            return Err(de::Error::custom("series must contain the base year"));
        }
        Ok(Self { years: raw.years })
    }
}

impl ProjectionSeries {
    /// Wrap a list of projections. The list must not be empty.
    ///
    /// # Panics
    ///
    /// Panics if `years` is empty.
    pub fn new(years: Vec<YearProjection>) -> Self {
        assert!(!years.is_empty(), "series must contain the base year");
        Self { years }
    }

    /// Number of entries, including the base year.
    pub fn len(&self) -> usize {
        self.years.len()
    }

    /// Always false; a series holds at least the base year.
    pub fn is_empty(&self) -> bool {
        self.years.is_empty()
    }

    /// Number of projected years beyond the base year.
    pub fn horizon_years(&self) -> usize {
        self.years.len() - 1
    }

    /// Base-year entry.
    pub fn base(&self) -> &YearProjection {
        &self.years[0]
    }

    /// Final projected entry (the base year when the horizon is zero).
    pub fn last(&self) -> &YearProjection {
        &self.years[self.years.len() - 1]
    }

    /// Entries for years 1..=horizon.
    pub fn projected(&self) -> &[YearProjection] {
        &self.years[1..]
    }

    /// All entries as a slice.
    pub fn as_slice(&self) -> &[YearProjection] {
        &self.years
    }

    /// Iterate from the base year.
    pub fn iter(&self) -> std::slice::Iter<'_, YearProjection> {
        self.years.iter()
    }

    /// Sum of profit over the projected years, base year excluded.
    pub fn cumulative_profit(&self) -> f64 {
        self.projected().iter().map(|y| y.profit).sum()
    }
}

impl<'a> IntoIterator for &'a ProjectionSeries {
    type Item = &'a YearProjection;
    type IntoIter = std::slice::Iter<'a, YearProjection>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
