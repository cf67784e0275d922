//! Scenario delta records as supplied by the scenario data provider.
//!
//! One record per scenario kind, string-valued and keyed by metric name.
//! Values are kept raw; parsing happens in the projector.

use forecast_core::parsing::{parse_magnitude, parse_phases};
use forecast_core::types::{Degradation, MagnitudeUnit, ParsedMagnitude, ScenarioKind};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// First-year deltas for one scenario kind.
///
/// # Examples
/// ```
/// use forecast_engine::deltas::ScenarioDeltas;
///
/// let deltas = ScenarioDeltas::new()
///     .with_revenue("+8%")
///     .with_margin("5")
///     .with_investment("50k€");
/// assert_eq!(deltas.investment_amount(), 50_000.0);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenarioDeltas {
    /// Revenue change (`"+8%"`, `"+200k€"`)
    pub revenue: Option<String>,
    /// Margin, a target percent or a change depending on `MarginSemantics`
    pub margin: Option<String>,
    /// Cash position change
    pub cash: Option<String>,
    /// Headcount change
    pub headcount: Option<String>,
    /// Investment outlay
    pub investment: Option<String>,
    /// Year-1 revenue in euros, bypassing the revenue delta
    pub revenue_override: Option<f64>,
    /// Extension metrics not interpreted by the engine
    #[serde(flatten)]
    pub extra: BTreeMap<String, String>,
}

impl ScenarioDeltas {
    /// Empty record: no change on every metric.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the revenue delta.
    pub fn with_revenue(mut self, text: impl Into<String>) -> Self {
        self.revenue = Some(text.into());
        self
    }

    /// Set the margin delta.
    pub fn with_margin(mut self, text: impl Into<String>) -> Self {
        self.margin = Some(text.into());
        self
    }

    /// Set the cash delta.
    pub fn with_cash(mut self, text: impl Into<String>) -> Self {
        self.cash = Some(text.into());
        self
    }

    /// Set the investment delta.
    pub fn with_investment(mut self, text: impl Into<String>) -> Self {
        self.investment = Some(text.into());
        self
    }

    /// Set an absolute year-1 revenue in euros.
    pub fn with_revenue_override(mut self, revenue: f64) -> Self {
        self.revenue_override = Some(revenue);
        self
    }

    /// Raw delta text for a metric name, including extension metrics.
    pub fn get(&self, metric: &str) -> Option<&str> {
        match metric {
            "revenue" => self.revenue.as_deref(),
            "margin" => self.margin.as_deref(),
            "cash" => self.cash.as_deref(),
            "headcount" => self.headcount.as_deref(),
            "investment" => self.investment.as_deref(),
            other => self.extra.get(other).map(String::as_str),
        }
    }

    /// All present metrics with their raw text, named metrics first.
    pub fn entries(&self) -> Vec<(&str, &str)> {
        let named = [
            ("revenue", &self.revenue),
            ("margin", &self.margin),
            ("cash", &self.cash),
            ("headcount", &self.headcount),
            ("investment", &self.investment),
        ];
        named
            .into_iter()
            .filter_map(|(name, value)| value.as_deref().map(|v| (name, v)))
            .chain(self.extra.iter().map(|(k, v)| (k.as_str(), v.as_str())))
            .collect()
    }

    /// Parsed magnitude for a metric; absent metrics give the zero sentinel.
    pub fn magnitude(&self, metric: &str) -> ParsedMagnitude {
        self.get(metric).map(parse_magnitude).unwrap_or_default()
    }

    /// Investment outlay in euros.
    ///
    /// Euro and bare amounts are taken by absolute value, since upstream
    /// data writes outlays both as `"50k€"` and `"-50k€"`. A percentage has
    /// no base to apply to and counts as no investment.
    pub fn investment_amount(&self) -> f64 {
        let parsed = self.magnitude("investment");
        match parsed.unit {
            MagnitudeUnit::Percent => 0.0,
            _ => parsed.value.abs(),
        }
    }

    /// Data problems found while reading this record.
    ///
    /// Reports unparseable text and multi-phase deltas that collapse to
    /// their first token. Blank strings count as "not supplied".
    pub fn inspect(&self) -> Vec<Degradation> {
        let mut found = Vec::new();
        for (metric, text) in self.entries() {
            if text.trim().is_empty() {
                continue;
            }
            let phases = parse_phases(text);
            if phases.is_empty() {
                found.push(Degradation::MalformedMagnitude {
                    metric: metric.to_string(),
                    text: text.to_string(),
                });
            } else if phases.len() > 1 {
                found.push(Degradation::MultiPhaseCollapsed {
                    metric: metric.to_string(),
                    phases: phases.len(),
                });
            }
        }
        found
    }
}

/// Delta records for every scenario kind.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenarioDeltaSet {
    /// Optimistic deltas
    pub optimistic: ScenarioDeltas,
    /// Neutral deltas
    pub neutral: ScenarioDeltas,
    /// Pessimistic deltas
    pub pessimistic: ScenarioDeltas,
}

impl ScenarioDeltaSet {
    /// Deltas for `kind`.
    pub fn for_kind(&self, kind: ScenarioKind) -> &ScenarioDeltas {
        match kind {
            ScenarioKind::Optimistic => &self.optimistic,
            ScenarioKind::Neutral => &self.neutral,
            ScenarioKind::Pessimistic => &self.pessimistic,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_get_named_and_extra() {
        let mut deltas = ScenarioDeltas::new().with_revenue("+8%");
        deltas
            .extra
            .insert("inventory".to_string(), "-15%".to_string());

        assert_eq!(deltas.get("revenue"), Some("+8%"));
        assert_eq!(deltas.get("inventory"), Some("-15%"));
        assert_eq!(deltas.get("cash"), None);
        assert_eq!(deltas.entries().len(), 2);
    }

    #[test]
    fn test_absent_metric_is_sentinel() {
        assert!(ScenarioDeltas::new().magnitude("margin").is_sentinel());
    }

    #[test]
    fn test_investment_amount() {
        assert_relative_eq!(
            ScenarioDeltas::new().with_investment("-50k€").investment_amount(),
            50_000.0
        );
        assert_relative_eq!(
            ScenarioDeltas::new().with_investment("1,2M€").investment_amount(),
            1_200_000.0
        );
        assert_eq!(
            ScenarioDeltas::new().with_investment("+10%").investment_amount(),
            0.0
        );
        assert_eq!(ScenarioDeltas::new().investment_amount(), 0.0);
    }

    #[test]
    fn test_inspect_reports_problems() {
        let deltas = ScenarioDeltas::new()
            .with_revenue("n/a")
            .with_cash("-50k€ la première année, puis +110k€/an")
            .with_margin("5")
            .with_investment("   ");

        let found = deltas.inspect();
        assert_eq!(found.len(), 2);
        assert!(found.contains(&Degradation::MalformedMagnitude {
            metric: "revenue".to_string(),
            text: "n/a".to_string(),
        }));
        assert!(found.contains(&Degradation::MultiPhaseCollapsed {
            metric: "cash".to_string(),
            phases: 2,
        }));
    }

    #[test]
    fn test_deserialise_with_extension_metrics() {
        let json = r#"{"revenue": "+12%", "margin": "14", "dso": "-5 jours"}"#;
        let deltas: ScenarioDeltas = serde_json::from_str(json).unwrap();
        assert_eq!(deltas.revenue.as_deref(), Some("+12%"));
        assert_eq!(deltas.get("dso"), Some("-5 jours"));
        assert_eq!(deltas.revenue_override, None);
    }

    #[test]
    fn test_set_for_kind() {
        let set = ScenarioDeltaSet {
            optimistic: ScenarioDeltas::new().with_revenue("+18%"),
            ..Default::default()
        };
        assert_eq!(set.for_kind(ScenarioKind::Optimistic).get("revenue"), Some("+18%"));
        assert_eq!(set.for_kind(ScenarioKind::Neutral).get("revenue"), None);
    }
}
