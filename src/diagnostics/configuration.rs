use crate::covariate::Covariate;
use crate::types::ConfigKey;
use serde::Serialize;

/// Occupancy of one bucket that received at least one observation.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BucketStats {
    pub index: usize,
    pub center: f64,
    pub good: usize,
    pub bad: usize,
    /// Sizes after subsampling; zero when the bucket was not scored.
    pub sampled_good: usize,
    pub sampled_bad: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
}

impl BucketStats {
    pub fn is_scored(&self) -> bool {
        self.score.is_some()
    }
}

/// How one configuration's pools were bucketed for one covariate.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CovariateTrace {
    pub covariate: Covariate,
    /// Good observations without a value for this covariate.
    pub skipped_good: usize,
    /// Bad observations without a value for this covariate.
    pub skipped_bad: usize,
    pub buckets: Vec<BucketStats>,
}

impl CovariateTrace {
    pub fn scored_buckets(&self) -> usize {
        self.buckets.iter().filter(|b| b.is_scored()).count()
    }

    /// Buckets that held observations on only one side.
    pub fn one_sided_buckets(&self) -> usize {
        self.buckets.len() - self.scored_buckets()
    }
}

/// Pool sizes and per-covariate bucketing of one configuration.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigurationTrace {
    pub key: ConfigKey,
    pub good_total: usize,
    pub bad_total: usize,
    pub radial: CovariateTrace,
    pub angle: CovariateTrace,
}
