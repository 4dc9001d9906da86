//! Parameters controlling bucketing, subsampling and scheduling.
//!
//! Defaults reproduce the reference analysis: 20 buckets per covariate and at
//! most 1000 descriptor distances per bucket side.

use serde::Deserialize;

/// Knobs for [`SeparationPipeline`](super::SeparationPipeline).
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct PipelineParams {
    /// Number of buckets on each covariate axis (>=1).
    pub num_bins: usize,
    /// Per-side cap applied to a bucket before scoring (>=1).
    pub num_samples: usize,
    /// Base seed for subsampling. `None` draws a fresh seed per run, so
    /// repeated runs agree only statistically.
    pub seed: Option<u64>,
    /// Score configurations on the rayon thread pool.
    pub parallel: bool,
}

impl Default for PipelineParams {
    fn default() -> Self {
        Self {
            num_bins: 20,
            num_samples: 1000,
            seed: None,
            parallel: true,
        }
    }
}

impl PipelineParams {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.num_bins == 0 {
            return Err("num_bins must be at least 1".to_string());
        }
        if self.num_samples == 0 {
            return Err("num_samples must be at least 1".to_string());
        }
        Ok(())
    }
}
