//! Fixed-range linear binning with saturation at the upper bound.
//!
//! Values at or above `value_max` are pulled just below it before division so
//! they land in the last bucket instead of one past it. Negative values clamp
//! into bucket 0.

use serde::{Deserialize, Serialize};

/// Radial distance is normalized by image size; matches live in `[0, 0.5]`.
pub const RADIAL_DISTANCE_MAX: f64 = 0.5;
/// Upper bound of the ray-angle axis, in degrees.
pub const RAY_ANGLE_MAX_DEG: f64 = 125.0;

const RADIAL_SATURATION_EPS: f64 = 1e-6;
const ANGLE_SATURATION_EPS: f64 = 1e-5;

/// Bucket index for `value` on `[0, value_max)` split into `num_bins` bins.
///
/// `eps` is the saturation margin subtracted from `value_max`.
#[inline]
pub fn bucket_index(value: f64, value_max: f64, num_bins: usize, eps: f64) -> usize {
    if num_bins == 0 {
        return 0;
    }
    let width = value_max / num_bins as f64;
    let saturated = value.min(value_max - eps);
    let idx = (saturated / width).floor();
    if idx.is_nan() || idx <= 0.0 {
        0
    } else {
        (idx as usize).min(num_bins - 1)
    }
}

/// A concrete binning scheme: range, bin count and saturation margin.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinearBinning {
    pub value_max: f64,
    pub num_bins: usize,
    pub eps: f64,
}

impl LinearBinning {
    /// A `num_bins` of zero is raised to one bin, matching [`bucket_index`].
    ///
    /// # Panics
    ///
    /// Panics if `value_max` is not a positive finite number.
    pub fn new(value_max: f64, num_bins: usize, eps: f64) -> Self {
        let num_bins = num_bins.max(1);
        assert!(
            value_max.is_finite() && value_max > 0.0,
            "binning range must be positive"
        );
        Self {
            value_max,
            num_bins,
            eps,
        }
    }

    /// Binning over normalized radial distance, `[0, 0.5]`.
    pub fn radial(num_bins: usize) -> Self {
        Self::new(RADIAL_DISTANCE_MAX, num_bins, RADIAL_SATURATION_EPS)
    }

    /// Binning over ray angle in degrees, `[0, 125]`.
    pub fn angle(num_bins: usize) -> Self {
        Self::new(RAY_ANGLE_MAX_DEG, num_bins, ANGLE_SATURATION_EPS)
    }

    #[inline]
    pub fn bin_width(&self) -> f64 {
        self.value_max / self.num_bins as f64
    }

    #[inline]
    pub fn index(&self, value: f64) -> usize {
        bucket_index(value, self.value_max, self.num_bins, self.eps)
    }

    /// Covariate value reported for bucket `index` (its midpoint).
    #[inline]
    pub fn center(&self, index: usize) -> f64 {
        let width = self.bin_width();
        index as f64 * width + width / 2.0
    }
}
