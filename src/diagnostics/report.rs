use crate::diagnostics::{ConfigurationTrace, TimingBreakdown};
use crate::table::ScoreTable;
use serde::Serialize;

/// Result produced by [`SeparationPipeline::run`](crate::SeparationPipeline::run).
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeparationReport {
    pub radial: ScoreTable,
    pub angle: ScoreTable,
    pub trace: PipelineTrace,
}

/// What the run saw and did, beyond the two derived tables.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineTrace {
    pub input: InputDescriptor,
    /// Distinct fields of view, ascending.
    pub fovs: Vec<u32>,
    /// Distinct `detector+descriptor` labels, sorted.
    pub labels: Vec<String>,
    pub configurations: Vec<ConfigurationTrace>,
    pub timings: TimingBreakdown,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InputDescriptor {
    pub trials: usize,
    pub configurations: usize,
    pub num_bins: usize,
    pub num_samples: usize,
    /// Base seed actually used for subsampling.
    pub seed: u64,
}

impl PipelineTrace {
    pub fn configuration(&self, key: &crate::ConfigKey) -> Option<&ConfigurationTrace> {
        self.configurations.iter().find(|c| &c.key == key)
    }
}
