//! Significance ranking of field values.
//!
//! A value is enriched for the query when the share of its samples carrying
//! the query is unlikely under the background presence rate. The test is a
//! one-sided binomial test on the number of samples *without* the query.

use serde::Serialize;
use std::fmt;
use tracing::debug;

use spongeworld_core::QueryResult;

/// Default significance cutoff
pub const DEFAULT_P_VALUE_CUTOFF: f64 = 0.1;

/// `P(X <= k)` for `X ~ Binomial(n, p)`.
///
/// Terms are summed in log space so large `n` does not overflow.
pub fn binomial_cdf(k: usize, n: usize, p: f64) -> f64 {
    if k >= n || p <= 0.0 {
        return 1.0;
    }
    if p >= 1.0 {
        return 0.0;
    }

    let ln_p = p.ln();
    let ln_q = (1.0 - p).ln();
    let mut ln_choose = 0.0;
    let mut sum = 0.0;
    for i in 0..=k {
        if i > 0 {
            ln_choose += ((n - i + 1) as f64).ln() - (i as f64).ln();
        }
        sum += (ln_choose + i as f64 * ln_p + (n - i) as f64 * ln_q).exp();
    }
    sum.min(1.0)
}

/// One significantly enriched field value
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Annotation {
    pub field: String,
    pub value: String,
    pub observed: usize,
    pub total: usize,
    pub fraction: f64,
    pub p_value: f64,
}

impl fmt::Display for Annotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{} ({}/{})",
            self.field, self.value, self.observed, self.total
        )
    }
}

/// Enriched values with `p <= p_value_cutoff`, most prevalent first.
///
/// Equal fractions are ordered by p-value. Restricting to `field` only
/// considers that field; a field missing from the result yields nothing.
pub fn significant_values(
    result: &QueryResult,
    p_value_cutoff: f64,
    field: Option<&str>,
) -> Vec<Annotation> {
    if result.total_observed == 0 || result.total_samples == 0 {
        return Vec::new();
    }
    let null_rate = 1.0 - result.total_observed as f64 / result.total_samples as f64;

    let mut keep = Vec::new();
    for (name, values) in &result.info {
        if field.is_some_and(|f| f != name.as_str()) {
            continue;
        }
        for (value, dist) in values {
            if dist.total_samples == 0 {
                continue;
            }
            let misses = dist.total_samples - dist.observed_samples.min(dist.total_samples);
            let p_value = binomial_cdf(misses, dist.total_samples, null_rate);
            if p_value <= p_value_cutoff {
                keep.push(Annotation {
                    field: name.clone(),
                    value: value.clone(),
                    observed: dist.observed_samples,
                    total: dist.total_samples,
                    fraction: dist.fraction(),
                    p_value,
                });
            }
        }
    }
    debug!("Found {} significant annotations", keep.len());

    keep.sort_by(|a, b| {
        b.fraction
            .total_cmp(&a.fraction)
            .then_with(|| a.p_value.total_cmp(&b.p_value))
    });
    keep
}

/// Ranked `field:value (observed/total)` descriptions.
pub fn rank_annotations(
    result: &QueryResult,
    p_value_cutoff: f64,
    field: Option<&str>,
) -> Vec<String> {
    significant_values(result, p_value_cutoff, field)
        .iter()
        .map(Annotation::to_string)
        .collect()
}
