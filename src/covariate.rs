//! The two geometric covariates observations are bucketed by.

use crate::binning::LinearBinning;
use crate::types::Observation;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Covariate {
    /// Normalized distance of the match from the image centre.
    RadialDistance,
    /// Angle between the corresponding rays, binned in degrees.
    RayAngle,
}

impl Covariate {
    pub const ALL: [Covariate; 2] = [Covariate::RadialDistance, Covariate::RayAngle];

    /// Binning scheme for this covariate with `num_bins` buckets.
    pub fn binning(self, num_bins: usize) -> LinearBinning {
        match self {
            Covariate::RadialDistance => LinearBinning::radial(num_bins),
            Covariate::RayAngle => LinearBinning::angle(num_bins),
        }
    }

    /// Value to bin, or `None` if the observation has no usable value.
    ///
    /// Non-finite radial distances are treated like undefined angles so they
    /// never saturate into the last bucket.
    #[inline]
    pub fn value(self, obs: &Observation) -> Option<f64> {
        match self {
            Covariate::RadialDistance => Some(obs.radial_distance).filter(|r| r.is_finite()),
            Covariate::RayAngle => obs.ray_angle_deg(),
        }
    }

    /// Column header for the bucket-centre axis.
    pub fn axis_label(self) -> &'static str {
        match self {
            Covariate::RadialDistance => "Change in radial distance",
            Covariate::RayAngle => "Change in ray angle (degrees)",
        }
    }

    pub(crate) fn stream_id(self) -> u64 {
        match self {
            Covariate::RadialDistance => 0,
            Covariate::RayAngle => 1,
        }
    }
}

impl fmt::Display for Covariate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Covariate::RadialDistance => f.write_str("radial"),
            Covariate::RayAngle => f.write_str("angle"),
        }
    }
}
