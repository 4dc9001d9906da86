//! Serializable report of a separation run.
//!
//! `SeparationReport` is the entry point returned by the pipeline: the two
//! derived tables plus a `PipelineTrace` describing pool sizes, bucket
//! occupancy before and after subsampling, and phase timings.

pub mod configuration;
pub mod report;
pub mod timing;

pub use configuration::{BucketStats, ConfigurationTrace, CovariateTrace};
pub use report::{InputDescriptor, PipelineTrace, SeparationReport};
pub use timing::{PhaseTiming, TimingBreakdown};
