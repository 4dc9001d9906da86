use serde::{Deserialize, Serialize};

/// Wall-clock cost of one pipeline phase (ingest, radial scoring, ...).
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhaseTiming {
    pub label: String,
    pub elapsed_ms: f64,
}

/// Per-phase timings of one run plus the overall total.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimingBreakdown {
    pub total_ms: f64,
    pub phases: Vec<PhaseTiming>,
}

impl TimingBreakdown {
    /// Record a phase and fold it into the total.
    pub fn push(&mut self, label: impl Into<String>, elapsed_ms: f64) {
        self.phases.push(PhaseTiming {
            label: label.into(),
            elapsed_ms,
        });
        self.total_ms += elapsed_ms;
    }

    pub fn get(&self, label: &str) -> Option<f64> {
        self.phases
            .iter()
            .find(|p| p.label == label)
            .map(|p| p.elapsed_ms)
    }
}
