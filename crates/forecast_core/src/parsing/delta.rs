//! Delta string parser.

use crate::types::{MagnitudeUnit, ParsedMagnitude, PhasedMagnitude};
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Signed percentage, e.g. `+18%`, `-2,5 %`
    static ref PERCENT_REGEX: Regex =
        Regex::new(r"([+-]?\d+(?:[.,]\d+)?)\s?%").expect("Invalid regex pattern");

    /// Signed million-euro amount, e.g. `+1.5M€`
    static ref MILLION_EURO_REGEX: Regex =
        Regex::new(r"([+-]?\d+(?:[.,]\d+)?)\s?M€").expect("Invalid regex pattern");

    /// Signed thousand-euro amount, e.g. `-50k€`
    static ref THOUSAND_EURO_REGEX: Regex =
        Regex::new(r"([+-]?\d+(?:[.,]\d+)?)\s?[kK]€").expect("Invalid regex pattern");

    /// Bare signed number
    static ref NUMBER_REGEX: Regex =
        Regex::new(r"([+-]?\d+(?:[.,]\d+)?)").expect("Invalid regex pattern");

    /// Any numeric token with an optional unit suffix, scanned left to right
    static ref TOKEN_REGEX: Regex =
        Regex::new(r"([+-]?\d+(?:[.,]\d+)?)\s?(%|M€|[kK]€)?").expect("Invalid regex pattern");
}

/// Patterns in priority order.
fn prioritised_patterns() -> [(&'static Regex, MagnitudeUnit); 4] {
    [
        (&PERCENT_REGEX, MagnitudeUnit::Percent),
        (&MILLION_EURO_REGEX, MagnitudeUnit::MillionEuro),
        (&THOUSAND_EURO_REGEX, MagnitudeUnit::ThousandEuro),
        (&NUMBER_REGEX, MagnitudeUnit::Raw),
    ]
}

/// Typographic minus signs become ASCII so the patterns see them.
fn normalise(text: &str) -> String {
    text.replace(['\u{2212}', '\u{2013}'], "-")
}

/// Parse a number that may use a decimal comma.
fn parse_number(token: &str) -> Option<f64> {
    token.replace(',', ".").parse::<f64>().ok()
}

/// Extract the first magnitude from a free-form delta string.
///
/// Patterns are tried in priority order: percentage, million euros,
/// thousand euros, then a bare number. The first match of the first
/// pattern that matches anywhere in the text wins, so a multi-phase string
/// yields only its first token of that kind. Text without any number
/// yields [`ParsedMagnitude::zero`].
///
/// # Examples
///
/// ```
/// use forecast_core::parsing::parse_magnitude;
/// use forecast_core::types::MagnitudeUnit;
///
/// assert_eq!(parse_magnitude("+18%").value, 18.0);
/// assert_eq!(parse_magnitude("+200k€").value, 200_000.0);
/// assert_eq!(parse_magnitude("+1,5M€").unit, MagnitudeUnit::MillionEuro);
/// assert!(parse_magnitude("n/a").is_sentinel());
/// ```
pub fn parse_magnitude(text: &str) -> ParsedMagnitude {
    let text = normalise(text);

    for (pattern, unit) in prioritised_patterns() {
        let Some(caps) = pattern.captures(&text) else {
            continue;
        };
        if let Some(number) = caps.get(1).and_then(|m| parse_number(m.as_str())) {
            let parsed = ParsedMagnitude::new(number * unit.scale(), unit);
            tracing::trace!(text = %text, value = parsed.value, unit = ?parsed.unit, "parsed delta");
            return parsed;
        }
    }

    ParsedMagnitude::zero()
}

/// Extract every numeric token in order of appearance.
///
/// Each token is classified by its own suffix, so
/// `"-50k€ la première année, puis +110k€/an"` yields two thousand-euro
/// phases. Returns an empty list when the text has no number.
///
/// # Examples
///
/// ```
/// use forecast_core::parsing::parse_phases;
///
/// let phases = parse_phases("-50k€ la première année, puis +110k€/an");
/// assert_eq!(phases.len(), 2);
/// assert_eq!(phases[0].magnitude.value, -50_000.0);
/// assert_eq!(phases[1].magnitude.value, 110_000.0);
/// ```
pub fn parse_phases(text: &str) -> Vec<PhasedMagnitude> {
    let text = normalise(text);

    TOKEN_REGEX
        .captures_iter(&text)
        .filter_map(|caps| {
            let number = parse_number(caps.get(1)?.as_str())?;
            let unit = match caps.get(2).map(|m| m.as_str()) {
                Some("%") => MagnitudeUnit::Percent,
                Some("M€") => MagnitudeUnit::MillionEuro,
                Some("k€") | Some("K€") => MagnitudeUnit::ThousandEuro,
                _ => MagnitudeUnit::Raw,
            };
            Some(ParsedMagnitude::new(number * unit.scale(), unit))
        })
        .enumerate()
        .map(|(phase, magnitude)| PhasedMagnitude { phase, magnitude })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_percent() {
        assert_eq!(
            parse_magnitude("+18%"),
            ParsedMagnitude::new(18.0, MagnitudeUnit::Percent)
        );
        assert_eq!(
            parse_magnitude("-3%"),
            ParsedMagnitude::new(-3.0, MagnitudeUnit::Percent)
        );
        assert_eq!(parse_magnitude("+8 % en volume").value, 8.0);
    }

    #[test]
    fn test_thousand_euro() {
        let m = parse_magnitude("+200k€");
        assert_relative_eq!(m.value, 200_000.0);
        assert_eq!(m.unit, MagnitudeUnit::ThousandEuro);
        assert!(m.unit.is_currency());
    }

    #[test]
    fn test_million_euro() {
        let m = parse_magnitude("+1.5M€");
        assert_relative_eq!(m.value, 1_500_000.0);
        assert_eq!(m.unit, MagnitudeUnit::MillionEuro);
    }

    #[test]
    fn test_decimal_comma() {
        assert_relative_eq!(parse_magnitude("+1,5M€").value, 1_500_000.0);
        assert_relative_eq!(parse_magnitude("-2,5%").value, -2.5);
    }

    #[test]
    fn test_unparseable_is_sentinel() {
        let m = parse_magnitude("n/a");
        assert_eq!(m, ParsedMagnitude::new(0.0, MagnitudeUnit::Raw));
        assert!(parse_magnitude("").is_sentinel());
        assert!(parse_magnitude("stable").is_sentinel());
    }

    #[test]
    fn test_bare_number() {
        assert_eq!(
            parse_magnitude("5"),
            ParsedMagnitude::new(5.0, MagnitudeUnit::Raw)
        );
        assert_eq!(parse_magnitude("+3 ETP").value, 3.0);
    }

    #[test]
    fn test_percent_has_priority_over_currency() {
        let m = parse_magnitude("+1.2M€ soit +12%");
        assert_eq!(m, ParsedMagnitude::new(12.0, MagnitudeUnit::Percent));
    }

    #[test]
    fn test_multi_phase_keeps_first_token() {
        let m = parse_magnitude("-50k€ la première année, puis +110k€/an");
        assert_relative_eq!(m.value, -50_000.0);
        assert_eq!(m.unit, MagnitudeUnit::ThousandEuro);
    }

    #[test]
    fn test_typographic_minus() {
        assert_eq!(parse_magnitude("\u{2212}4%").value, -4.0);
    }

    #[test]
    fn test_phases_mixed_units() {
        let phases = parse_phases("+5% puis +1M€ et 3");
        assert_eq!(phases.len(), 3);
        assert_eq!(phases[0].phase, 0);
        assert_eq!(phases[0].magnitude.unit, MagnitudeUnit::Percent);
        assert_eq!(phases[1].magnitude.unit, MagnitudeUnit::MillionEuro);
        assert_relative_eq!(phases[1].magnitude.value, 1_000_000.0);
        assert_eq!(phases[2].phase, 2);
        assert_eq!(phases[2].magnitude.unit, MagnitudeUnit::Raw);
    }

    #[test]
    fn test_phases_empty_for_text() {
        assert!(parse_phases("aucun changement").is_empty());
    }

    #[test]
    fn test_first_phase_matches_parse_magnitude_for_single_token() {
        for text in ["+18%", "+200k€", "-1,5M€", "7"] {
            let phases = parse_phases(text);
            assert_eq!(phases.len(), 1, "{}", text);
            assert_eq!(phases[0].magnitude, parse_magnitude(text));
        }
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig::with_cases(500))]

            #[test]
            fn test_percent_round_trip(whole in -500i32..500, frac in 0u32..100) {
                let text = format!("{:+}.{:02}%", whole, frac);
                let parsed = parse_magnitude(&text);
                let sign = if text.starts_with('-') { -1.0 } else { 1.0 };
                let expected = sign * (whole.unsigned_abs() as f64 + frac as f64 / 100.0);
                prop_assert_eq!(parsed.unit, MagnitudeUnit::Percent);
                prop_assert!((parsed.value - expected).abs() < 1e-9);
            }

            #[test]
            fn test_never_panics(text in ".*") {
                let _ = parse_magnitude(&text);
                let _ = parse_phases(&text);
            }
        }
    }
}
