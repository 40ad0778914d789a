//! Slice data for per-field pie charts. Rendering happens elsewhere.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use spongeworld_core::{QueryResult, SpongeError, SpongeResult};

/// Label of the slice collecting small values
pub const OTHER_LABEL: &str = "~Other";

/// Slices below this share are drawn without a label
pub const LABEL_MIN_FRACTION: f64 = 0.01;

/// What a slice measures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShareMode {
    /// Samples where the query is present
    Observed,
    /// Percentage of the value's samples where the query is present
    Relative,
    /// Samples carrying the value, with the rest of the dataset as `~Other`
    Population,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Slice {
    pub label: String,
    pub amount: f64,
    /// Share of the whole chart
    pub fraction: f64,
}

impl Slice {
    pub fn is_labelled(&self) -> bool {
        self.fraction >= LABEL_MIN_FRACTION
    }
}

/// Pie slices of `field`, ordered by label descending.
///
/// Values whose amount is below `min_size` are folded into `~Other`. Empty
/// slices are left out.
pub fn value_shares(
    result: &QueryResult,
    field: &str,
    mode: ShareMode,
    min_size: f64,
) -> SpongeResult<Vec<Slice>> {
    let values = result
        .info
        .get(field)
        .ok_or_else(|| SpongeError::UnknownField(field.to_string()))?;

    let mut amounts: BTreeMap<String, f64> = BTreeMap::new();
    amounts.insert(OTHER_LABEL.to_string(), 0.0);
    for (value, dist) in values {
        let amount = match mode {
            ShareMode::Population => dist.total_samples as f64,
            ShareMode::Relative if dist.total_samples > 0 => {
                100.0 * dist.observed_samples as f64 / dist.total_samples as f64
            }
            ShareMode::Relative => 0.0,
            ShareMode::Observed => dist.observed_samples as f64,
        };
        let label = if amount < min_size { OTHER_LABEL } else { value.as_str() };
        *amounts.entry(label.to_string()).or_insert(0.0) += amount;
    }
    if mode == ShareMode::Population {
        let shown: f64 = amounts.values().sum();
        if let Some(other) = amounts.get_mut(OTHER_LABEL) {
            *other += (result.total_samples as f64 - shown).max(0.0);
        }
    }

    let total: f64 = amounts.values().sum();
    Ok(amounts
        .into_iter()
        .rev()
        .filter(|(_, amount)| *amount > 0.0)
        .map(|(label, amount)| Slice {
            label,
            amount,
            fraction: if total > 0.0 { amount / total } else { 0.0 },
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use indexmap::IndexMap;
    use spongeworld_core::{FieldValueDistribution, ValueDistributions};

    fn result() -> QueryResult {
        let mut values = ValueDistributions::new();
        for (name, observed, total) in [("reef", 6, 8), ("sea", 3, 10), ("lake", 1, 2)] {
            values.insert(
                name.to_string(),
                FieldValueDistribution { total_samples: total, observed_samples: observed },
            );
        }
        let mut info = IndexMap::new();
        info.insert("site".to_string(), values);
        QueryResult { total_samples: 40, total_observed: 10, info }
    }

    fn labels(slices: &[Slice]) -> Vec<&str> {
        slices.iter().map(|s| s.label.as_str()).collect()
    }

    #[test]
    fn test_observed_shares() {
        let slices = value_shares(&result(), "site", ShareMode::Observed, 0.0).unwrap();
        assert_eq!(labels(&slices), ["sea", "reef", "lake"]);
        assert!((slices[1].fraction - 0.6).abs() < 1e-12);
    }

    #[test]
    fn test_min_size_folds_into_other() {
        let slices = value_shares(&result(), "site", ShareMode::Observed, 2.0).unwrap();
        assert_eq!(labels(&slices), ["~Other", "sea", "reef"]);
        assert_eq!(slices[0].amount, 1.0);
    }

    #[test]
    fn test_relative_shares() {
        let slices = value_shares(&result(), "site", ShareMode::Relative, 0.0).unwrap();
        let amounts: Vec<f64> = slices.iter().map(|s| s.amount).collect();
        assert_eq!(amounts, vec![30.0, 75.0, 50.0]);
    }

    #[test]
    fn test_population_includes_rest() {
        let slices = value_shares(&result(), "site", ShareMode::Population, 0.0).unwrap();
        assert_eq!(labels(&slices), ["~Other", "sea", "reef", "lake"]);
        assert_eq!(slices[0].amount, 20.0);
        let sum: f64 = slices.iter().map(|s| s.fraction).sum();
        assert!((sum - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_unknown_field() {
        assert!(value_shares(&result(), "depth", ShareMode::Observed, 0.0).is_err());
    }
}
