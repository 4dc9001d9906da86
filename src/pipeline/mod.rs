//! Bucketing and scoring of merged sample pools.
//!
//! Overview
//! - Every distinct configuration in the [`RecordStore`](crate::RecordStore)
//!   is processed independently, in sorted order.
//! - Each pool side is bucketed along one covariate; observations without a
//!   value for that covariate (undefined ray angle) are dropped.
//! - Buckets reached by both populations are capped per side by uniform
//!   subsampling and scored with the L1 silhouette coefficient; one-sided
//!   buckets produce no row.
//! - The whole pass runs once per covariate, yielding the radial-distance
//!   table and the ray-angle table.
//!
//! Modules
//! - [`params`] – bucket count, subsampling cap, seed and scheduling.
//! - `separation` – the [`SeparationPipeline`] implementation.
//! - `buckets` – per-bucket accumulation and the scorable predicate.
//!
//! Configurations only read their own pool, so scoring fans out across the
//! rayon pool. Each configuration/covariate pair draws from its own `StdRng`
//! whose seed is derived from the run seed, so seeded runs are reproducible
//! independent of scheduling.

mod buckets;
pub mod params;
mod separation;

pub use buckets::is_scorable;
pub use params::PipelineParams;
pub use separation::SeparationPipeline;
