//! Parsed delta magnitudes.

use serde::{Deserialize, Serialize};

/// Unit attached to a parsed magnitude.
///
/// Currency units record which suffix matched; the associated value is
/// always expressed in plain euros.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MagnitudeUnit {
    /// Percentage (`+18%`)
    Percent,
    /// Thousands of euros (`+200k€`), value scaled to euros
    ThousandEuro,
    /// Millions of euros (`+1.5M€`), value scaled to euros
    MillionEuro,
    /// Bare number without a recognised suffix
    Raw,
}

impl MagnitudeUnit {
    /// True for the euro-denominated units.
    pub fn is_currency(&self) -> bool {
        matches!(self, Self::ThousandEuro | Self::MillionEuro)
    }

    /// Multiplier that converts the written number into the stored value.
    pub fn scale(&self) -> f64 {
        match self {
            Self::ThousandEuro => 1_000.0,
            Self::MillionEuro => 1_000_000.0,
            Self::Percent | Self::Raw => 1.0,
        }
    }
}

/// A signed numeric magnitude extracted from a delta string.
///
/// # Examples
/// ```
/// use forecast_core::types::{MagnitudeUnit, ParsedMagnitude};
///
/// let m = ParsedMagnitude::new(200_000.0, MagnitudeUnit::ThousandEuro);
/// assert!(m.unit.is_currency());
/// assert!(!m.is_sentinel());
/// assert!(ParsedMagnitude::zero().is_sentinel());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParsedMagnitude {
    /// Signed value; currency units are already scaled to euros
    pub value: f64,
    /// Matched unit
    pub unit: MagnitudeUnit,
}

impl ParsedMagnitude {
    /// Create a magnitude.
    pub fn new(value: f64, unit: MagnitudeUnit) -> Self {
        Self { value, unit }
    }

    /// The "no change" sentinel returned for unparseable text.
    pub fn zero() -> Self {
        Self {
            value: 0.0,
            unit: MagnitudeUnit::Raw,
        }
    }

    /// True when this is the zero sentinel.
    pub fn is_sentinel(&self) -> bool {
        self.value == 0.0 && self.unit == MagnitudeUnit::Raw
    }
}

impl Default for ParsedMagnitude {
    fn default() -> Self {
        Self::zero()
    }
}

/// One numeric token of a multi-phase delta such as
/// `"-50k€ la première année, puis +110k€/an"`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhasedMagnitude {
    /// Zero-based phase index in order of appearance
    pub phase: usize,
    /// Magnitude of this phase
    pub magnitude: ParsedMagnitude,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_scale() {
        assert_eq!(MagnitudeUnit::Percent.scale(), 1.0);
        assert_eq!(MagnitudeUnit::ThousandEuro.scale(), 1_000.0);
        assert_eq!(MagnitudeUnit::MillionEuro.scale(), 1_000_000.0);
        assert_eq!(MagnitudeUnit::Raw.scale(), 1.0);
    }

    #[test]
    fn test_is_currency() {
        assert!(MagnitudeUnit::ThousandEuro.is_currency());
        assert!(MagnitudeUnit::MillionEuro.is_currency());
        assert!(!MagnitudeUnit::Percent.is_currency());
        assert!(!MagnitudeUnit::Raw.is_currency());
    }

    #[test]
    fn test_sentinel() {
        assert!(ParsedMagnitude::default().is_sentinel());
        // An explicit zero percent is a real value, not the sentinel
        assert!(!ParsedMagnitude::new(0.0, MagnitudeUnit::Percent).is_sentinel());
        assert!(!ParsedMagnitude::new(5.0, MagnitudeUnit::Raw).is_sentinel());
    }
}
