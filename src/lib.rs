#![doc = include_str!("../README.md")]

// Public modules (stable-ish surface)
pub mod diagnostics;
pub mod error;
pub mod pipeline;
pub mod store;
pub mod table;
pub mod types;

// Building blocks, usable on their own.
pub mod binning;
pub mod config;
pub mod covariate;
pub mod io;
pub mod sampling;
pub mod silhouette;

// --- High-level re-exports -------------------------------------------------

pub use crate::covariate::Covariate;
pub use crate::error::IngestError;
pub use crate::pipeline::{PipelineParams, SeparationPipeline};
pub use crate::store::{RecordStore, SamplePool};
pub use crate::table::ScoreTable;
pub use crate::types::{ConfigKey, Observation, ScoreRow, Side};

pub use crate::diagnostics::{PipelineTrace, SeparationReport};

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```no_run
/// use match_separation::prelude::*;
///
/// # fn main() {
/// let mut store = RecordStore::new();
/// store.add(
///     ConfigKey::new("ORB", "BRIEF", 60),
///     &[Observation::new(0.10, 0.02, 0.2), Observation::new(0.11, 0.03, 0.3)],
///     &[Observation::new(0.10, 0.05, 0.9), Observation::new(0.12, f64::NAN, 0.95)],
/// );
/// let pipeline = SeparationPipeline::new(PipelineParams::default().with_seed(7));
/// let table = pipeline.score_covariate(&store, Covariate::RadialDistance);
/// for row in &table.rows {
///     println!("{} fov={} r={:.4} s={:.3}", row.label, row.field_of_view, row.bucket_center, row.score);
/// }
/// # }
/// ```
pub mod prelude {
    pub use crate::{
        ConfigKey, Covariate, Observation, PipelineParams, RecordStore, ScoreTable,
        SeparationPipeline,
    };
}
