//! Silhouette coefficient over scalar samples with the L1 metric.
//!
//! For a sample `x` in cluster `C`:
//! - `a(x)`: mean |x - y| over the other members of `C`;
//! - `b(x)`: the smallest mean |x - y| over the members of any other cluster;
//! - `s(x) = (b - a) / max(a, b)`, and `0` when `C` is a singleton or both
//!   means are zero.
//!
//! The score is the mean of `s(x)` over all samples. Distances in one
//! dimension reduce to sums of absolute differences against a sorted cluster,
//! which are evaluated from prefix sums in `O(log n)` per query.

use crate::types::Side;
use std::collections::BTreeMap;

/// Sorted members of one cluster with running sums for L1 queries.
struct Cluster {
    sorted: Vec<f64>,
    prefix: Vec<f64>,
}

impl Cluster {
    fn new(mut values: Vec<f64>) -> Self {
        values.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
        let mut prefix = Vec::with_capacity(values.len() + 1);
        prefix.push(0.0);
        let mut acc = 0.0;
        for &v in &values {
            acc += v;
            prefix.push(acc);
        }
        Self {
            sorted: values,
            prefix,
        }
    }

    #[inline]
    fn len(&self) -> usize {
        self.sorted.len()
    }

    /// Sum of |x - y| over every member `y`.
    ///
    /// Results within rounding noise of the prefix sums snap to zero so that
    /// identical values stay exactly indistinguishable.
    fn abs_diff_sum(&self, x: f64) -> f64 {
        let n = self.sorted.len();
        let k = self.sorted.partition_point(|&v| v < x);
        let below = x * k as f64 - self.prefix[k];
        let above = (self.prefix[n] - self.prefix[k]) - x * (n - k) as f64;
        let sum = below + above;
        let noise = 8.0 * f64::EPSILON * (x.abs() * n as f64 + self.prefix[n].abs());
        if sum <= noise {
            0.0
        } else {
            sum
        }
    }
}

/// Mean silhouette coefficient of `values` grouped by `labels`, L1 metric.
///
/// Returns `None` when the inputs differ in length, are empty, or carry
/// fewer than two distinct labels.
pub fn silhouette_score_l1(values: &[f64], labels: &[usize]) -> Option<f64> {
    if values.len() != labels.len() || values.is_empty() {
        return None;
    }
    let mut grouped: BTreeMap<usize, Vec<f64>> = BTreeMap::new();
    for (&v, &l) in values.iter().zip(labels) {
        grouped.entry(l).or_default().push(v);
    }
    if grouped.len() < 2 {
        return None;
    }
    let clusters: BTreeMap<usize, Cluster> = grouped
        .into_iter()
        .map(|(label, members)| (label, Cluster::new(members)))
        .collect();

    let mut total = 0.0;
    for (&x, label) in values.iter().zip(labels) {
        let own = &clusters[label];
        if own.len() <= 1 {
            continue;
        }
        let a = own.abs_diff_sum(x) / (own.len() - 1) as f64;
        let b = clusters
            .iter()
            .filter(|(other, _)| *other != label)
            .map(|(_, c)| c.abs_diff_sum(x) / c.len() as f64)
            .fold(f64::INFINITY, f64::min);
        let denom = a.max(b);
        if denom > 0.0 {
            total += (b - a) / denom;
        }
    }
    Some(total / values.len() as f64)
}

/// Separation between good and bad descriptor distances of one bucket.
///
/// Good values are labelled 0 and bad values 1. Both sides must be
/// non-empty; callers only score buckets populated on both sides.
pub fn separation_score(good: &[f64], bad: &[f64]) -> f64 {
    debug_assert!(!good.is_empty() && !bad.is_empty());
    let mut values = Vec::with_capacity(good.len() + bad.len());
    values.extend_from_slice(good);
    values.extend_from_slice(bad);
    let mut labels = vec![Side::Good.label(); good.len()];
    labels.resize(good.len() + bad.len(), Side::Bad.label());
    silhouette_score_l1(&values, &labels).unwrap_or(0.0)
}
