use serde::{Deserialize, Serialize};
use std::fmt;

/// One sampled geometric-match observation.
///
/// `ray_angle` is in radians and is `NaN` when the inter-view geometry could
/// not be computed for the match.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Observation {
    pub radial_distance: f64,
    pub ray_angle: f64,
    pub descriptor_distance: f64,
}

impl Observation {
    pub fn new(radial_distance: f64, ray_angle: f64, descriptor_distance: f64) -> Self {
        Self {
            radial_distance,
            ray_angle,
            descriptor_distance,
        }
    }

    /// Ray angle converted to degrees, or `None` when undefined.
    #[inline]
    pub fn ray_angle_deg(&self) -> Option<f64> {
        if self.ray_angle.is_nan() {
            None
        } else {
            Some(self.ray_angle.to_degrees())
        }
    }
}

/// Detector/descriptor/field-of-view triple identifying one evaluated setup.
///
/// Ordering is lexicographic over `(detector, descriptor, field_of_view)`,
/// which fixes the row order of the derived tables.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigKey {
    pub detector: String,
    pub descriptor: String,
    pub field_of_view: u32,
}

impl ConfigKey {
    pub fn new(
        detector: impl Into<String>,
        descriptor: impl Into<String>,
        field_of_view: u32,
    ) -> Self {
        Self {
            detector: detector.into(),
            descriptor: descriptor.into(),
            field_of_view,
        }
    }

    /// `"{detector}+{descriptor}"`, the label used to facet the trend plots.
    pub fn label(&self) -> String {
        format!("{}+{}", self.detector, self.descriptor)
    }
}

impl fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}+{}@{}",
            self.detector, self.descriptor, self.field_of_view
        )
    }
}

/// Which population an observation was sampled from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Good,
    Bad,
}

impl Side {
    /// Cluster label used by the separation statistic.
    #[inline]
    pub fn label(self) -> usize {
        match self {
            Side::Good => 0,
            Side::Bad => 1,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Good => f.write_str("good"),
            Side::Bad => f.write_str("bad"),
        }
    }
}

/// One derived-table row: a scored bucket of one configuration.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreRow {
    pub bucket_center: f64,
    pub score: f64,
    pub label: String,
    pub field_of_view: u32,
}
