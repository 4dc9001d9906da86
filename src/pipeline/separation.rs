//! Pipeline driving bucketing, subsampling and scoring end-to-end.
//!
//! Typical usage:
//! ```no_run
//! use match_separation::{ConfigKey, Observation, PipelineParams, RecordStore, SeparationPipeline};
//!
//! let mut store = RecordStore::new();
//! store.add(
//!     ConfigKey::new("ORB", "BRIEF", 60),
//!     &[Observation::new(0.1, 0.0, 0.2)],
//!     &[Observation::new(0.1, 0.0, 0.9)],
//! );
//! let report = SeparationPipeline::new(PipelineParams::default()).run(&store);
//! println!("radial rows: {}", report.radial.len());
//! ```
use super::buckets::BucketAccumulator;
use super::params::PipelineParams;
use crate::covariate::Covariate;
use crate::diagnostics::{
    BucketStats, ConfigurationTrace, CovariateTrace, InputDescriptor, PipelineTrace,
    SeparationReport, TimingBreakdown,
};
use crate::sampling::{derive_seed, subsample};
use crate::silhouette::separation_score;
use crate::store::{RecordStore, SamplePool};
use crate::table::ScoreTable;
use crate::types::{ConfigKey, ScoreRow, Side};
use log::{debug, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;
use std::time::Instant;

/// Rows and bucket trace of one configuration under one covariate.
struct ConfigurationScores {
    rows: Vec<ScoreRow>,
    trace: CovariateTrace,
}

/// Orchestrates the per-configuration scoring passes.
pub struct SeparationPipeline {
    params: PipelineParams,
}

impl SeparationPipeline {
    /// Create a pipeline; a zero bucket count or cap is raised to 1.
    pub fn new(mut params: PipelineParams) -> Self {
        if let Err(err) = params.validate() {
            warn!("SeparationPipeline: {err}; clamping to 1");
            params.num_bins = params.num_bins.max(1);
            params.num_samples = params.num_samples.max(1);
        }
        Self { params }
    }

    pub fn params(&self) -> &PipelineParams {
        &self.params
    }

    /// Score every configuration in `store` along both covariates.
    pub fn run(&self, store: &RecordStore) -> SeparationReport {
        let seed = self.resolve_seed();
        let keys: Vec<ConfigKey> = store.configurations().cloned().collect();
        debug!(
            "SeparationPipeline::run start configurations={} trials={} bins={} cap={} seed={}",
            keys.len(),
            store.trial_count(),
            self.params.num_bins,
            self.params.num_samples,
            seed
        );
        for (key, pool) in store.iter() {
            if pool.good.is_empty() || pool.bad.is_empty() {
                warn!(
                    "configuration {key} has good={} bad={} observations; it cannot be scored",
                    pool.good.len(),
                    pool.bad.len()
                );
            }
        }

        let mut timings = TimingBreakdown::default();

        let radial_start = Instant::now();
        let (radial, radial_traces) =
            self.score_keys(store, &keys, Covariate::RadialDistance, seed);
        timings.push("radial", radial_start.elapsed().as_secs_f64() * 1000.0);

        let angle_start = Instant::now();
        let (angle, angle_traces) = self.score_keys(store, &keys, Covariate::RayAngle, seed);
        timings.push("angle", angle_start.elapsed().as_secs_f64() * 1000.0);

        let configurations = keys
            .iter()
            .zip(radial_traces)
            .zip(angle_traces)
            .map(|((key, radial), angle)| {
                let (good_total, bad_total) = store
                    .pool_for(key)
                    .map(|p| (p.good.len(), p.bad.len()))
                    .unwrap_or((0, 0));
                ConfigurationTrace {
                    key: key.clone(),
                    good_total,
                    bad_total,
                    radial,
                    angle,
                }
            })
            .collect();

        debug!(
            "SeparationPipeline::run done radial_rows={} angle_rows={} elapsed_ms={:.3}",
            radial.len(),
            angle.len(),
            timings.total_ms
        );

        SeparationReport {
            radial,
            angle,
            trace: PipelineTrace {
                input: InputDescriptor {
                    trials: store.trial_count(),
                    configurations: keys.len(),
                    num_bins: self.params.num_bins,
                    num_samples: self.params.num_samples,
                    seed,
                },
                fovs: store.fields_of_view(),
                labels: store.labels(),
                configurations,
                timings,
            },
        }
    }

    /// Derived table for one covariate over every configuration in `store`.
    pub fn score_covariate(&self, store: &RecordStore, covariate: Covariate) -> ScoreTable {
        let keys: Vec<ConfigKey> = store.configurations().cloned().collect();
        self.score_keys(store, &keys, covariate, self.resolve_seed())
            .0
    }

    /// Derived table for one covariate over the given configurations.
    ///
    /// Keys are sorted and deduplicated first. Keys with no pool in `store`
    /// contribute no rows.
    pub fn score_configurations(
        &self,
        store: &RecordStore,
        configurations: &[ConfigKey],
        covariate: Covariate,
    ) -> ScoreTable {
        let mut keys = configurations.to_vec();
        keys.sort();
        keys.dedup();
        self.score_keys(store, &keys, covariate, self.resolve_seed())
            .0
    }

    fn resolve_seed(&self) -> u64 {
        self.params.seed.unwrap_or_else(rand::random)
    }

    fn score_keys(
        &self,
        store: &RecordStore,
        keys: &[ConfigKey],
        covariate: Covariate,
        seed: u64,
    ) -> (ScoreTable, Vec<CovariateTrace>) {
        let work = |(index, key): (usize, &ConfigKey)| {
            let stream = ((index as u64) << 1) | covariate.stream_id();
            let mut rng = StdRng::seed_from_u64(derive_seed(seed, stream));
            match store.pool_for(key) {
                Some(pool) => self.score_configuration(key, pool, covariate, &mut rng),
                None => {
                    warn!("configuration {key} has no pool; skipping");
                    ConfigurationScores {
                        rows: Vec::new(),
                        trace: CovariateTrace {
                            covariate,
                            skipped_good: 0,
                            skipped_bad: 0,
                            buckets: Vec::new(),
                        },
                    }
                }
            }
        };

        let outcomes: Vec<ConfigurationScores> = if self.params.parallel {
            keys.par_iter().enumerate().map(work).collect()
        } else {
            keys.iter().enumerate().map(work).collect()
        };

        let mut table = ScoreTable::new(covariate);
        let mut traces = Vec::with_capacity(outcomes.len());
        for outcome in outcomes {
            table.rows.extend(outcome.rows);
            traces.push(outcome.trace);
        }
        (table, traces)
    }

    fn score_configuration(
        &self,
        key: &ConfigKey,
        pool: &SamplePool,
        covariate: Covariate,
        rng: &mut StdRng,
    ) -> ConfigurationScores {
        let mut acc = BucketAccumulator::new(covariate.binning(self.params.num_bins));
        acc.fill(Side::Good, &pool.good, covariate);
        acc.fill(Side::Bad, &pool.bad, covariate);

        let label = key.label();
        let binning = *acc.binning();
        let mut rows = Vec::new();
        let mut buckets = Vec::new();
        for index in 0..binning.num_bins {
            let good = acc.side(Side::Good, index);
            let bad = acc.side(Side::Bad, index);
            if good.is_empty() && bad.is_empty() {
                continue;
            }
            let center = binning.center(index);
            let mut stats = BucketStats {
                index,
                center,
                good: good.len(),
                bad: bad.len(),
                sampled_good: 0,
                sampled_bad: 0,
                score: None,
            };
            if acc.is_scorable(index) {
                let good_sampled = subsample(good, self.params.num_samples, rng);
                let bad_sampled = subsample(bad, self.params.num_samples, rng);
                let score = separation_score(&good_sampled, &bad_sampled);
                stats.sampled_good = good_sampled.len();
                stats.sampled_bad = bad_sampled.len();
                stats.score = Some(score);
                rows.push(ScoreRow {
                    bucket_center: center,
                    score,
                    label: label.clone(),
                    field_of_view: key.field_of_view,
                });
            }
            buckets.push(stats);
        }

        let trace = CovariateTrace {
            covariate,
            skipped_good: acc.skipped(Side::Good),
            skipped_bad: acc.skipped(Side::Bad),
            buckets,
        };
        debug!(
            "score_configuration {key} {covariate}: rows={} one_sided={} skipped_good={} skipped_bad={}",
            rows.len(),
            trace.one_sided_buckets(),
            trace.skipped_good,
            trace.skipped_bad
        );
        ConfigurationScores { rows, trace }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Observation;

    fn seeded(seed: u64) -> SeparationPipeline {
        SeparationPipeline::new(PipelineParams::default().with_seed(seed))
    }

    fn orb_brief_store() -> (RecordStore, ConfigKey) {
        let key = ConfigKey::new("ORB", "BRIEF", 60);
        let mut store = RecordStore::new();
        store.add(
            key.clone(),
            &[Observation::new(0.1, 0.0, 0.2), Observation::new(0.1, 0.0, 0.3)],
            &[Observation::new(0.1, 0.0, 0.9), Observation::new(0.1, 0.0, 0.95)],
        );
        (store, key)
    }

    #[test]
    fn concrete_radial_scenario_emits_one_row_in_bucket_four() {
        let (store, key) = orb_brief_store();
        let report = seeded(1).run(&store);
        assert_eq!(report.radial.rows.len(), 1);
        let row = &report.radial.rows[0];
        assert!((row.bucket_center - 0.1125).abs() < 1e-12);
        assert_eq!(row.label, "ORB+BRIEF");
        assert_eq!(row.field_of_view, 60);
        assert!(row.score > 0.85, "score={}", row.score);

        let trace = report.trace.configuration(&key).unwrap();
        assert_eq!(trace.radial.buckets.len(), 1);
        assert_eq!(trace.radial.buckets[0].index, 4);
        assert_eq!(trace.radial.buckets[0].good, 2);
        assert_eq!(trace.radial.buckets[0].bad, 2);
    }

    #[test]
    fn empty_bad_pool_emits_no_rows() {
        let key = ConfigKey::new("FAST", "ORB", 90);
        let mut store = RecordStore::new();
        store.add(
            key,
            &[Observation::new(0.2, 0.3, 0.4), Observation::new(0.4, 1.0, 0.1)],
            &[],
        );
        let report = seeded(2).run(&store);
        assert!(report.radial.is_empty());
        assert!(report.angle.is_empty());
        assert_eq!(report.trace.configurations[0].radial.scored_buckets(), 0);
        assert_eq!(report.trace.configurations[0].radial.one_sided_buckets(), 2);
    }

    #[test]
    fn undefined_angles_only_feed_radial_mode() {
        let key = ConfigKey::new("ORB", "ORB", 120);
        let mut store = RecordStore::new();
        store.add(
            key,
            &[Observation::new(0.3, f64::NAN, 0.2), Observation::new(0.3, f64::NAN, 0.25)],
            &[Observation::new(0.3, f64::NAN, 0.8)],
        );
        let report = seeded(3).run(&store);
        assert_eq!(report.radial.len(), 1);
        assert!(report.angle.is_empty());
        let trace = &report.trace.configurations[0];
        assert_eq!(trace.angle.skipped_good, 2);
        assert_eq!(trace.angle.skipped_bad, 1);
        assert!(trace.angle.buckets.is_empty());
    }

    #[test]
    fn buckets_are_capped_before_scoring() {
        let key = ConfigKey::new("SIFT", "SIFT", 60);
        let good: Vec<Observation> = (0..40)
            .map(|i| Observation::new(0.01, 0.1, 0.1 + i as f64 * 1e-3))
            .collect();
        let bad: Vec<Observation> = (0..25)
            .map(|i| Observation::new(0.01, 0.1, 0.7 + i as f64 * 1e-3))
            .collect();
        let mut store = RecordStore::new();
        store.add(key, &good, &bad);
        let params = PipelineParams {
            num_samples: 10,
            ..PipelineParams::default().with_seed(4)
        };
        let report = SeparationPipeline::new(params).run(&store);
        let bucket = &report.trace.configurations[0].radial.buckets[0];
        assert_eq!((bucket.good, bucket.bad), (40, 25));
        assert_eq!((bucket.sampled_good, bucket.sampled_bad), (10, 10));
        assert!(bucket.score.unwrap() > 0.9);
    }

    #[test]
    fn seeded_runs_agree_across_scheduling() {
        let mut store = RecordStore::new();
        for (i, det) in ["AKAZE", "FAST", "ORB"].iter().enumerate() {
            let good: Vec<Observation> = (0..300)
                .map(|j| Observation::new((j % 50) as f64 / 100.0, 0.2, (j as f64 * 0.013).fract()))
                .collect();
            let bad: Vec<Observation> = (0..300)
                .map(|j| {
                    Observation::new((j % 45) as f64 / 90.0, 0.4, 0.3 + i as f64 * 0.1 + (j as f64 * 0.007).fract())
                })
                .collect();
            store.add(ConfigKey::new(*det, "BRIEF", 60), &good, &bad);
        }
        let base = PipelineParams {
            num_samples: 5,
            ..PipelineParams::default().with_seed(99)
        };
        let serial = SeparationPipeline::new(PipelineParams {
            parallel: false,
            ..base.clone()
        })
        .run(&store);
        let parallel = SeparationPipeline::new(base).run(&store);
        assert_eq!(serial.radial.rows, parallel.radial.rows);
        assert_eq!(serial.angle.rows, parallel.angle.rows);
    }

    #[test]
    fn explicit_configuration_list_is_deduplicated() {
        let (store, key) = orb_brief_store();
        let missing = ConfigKey::new("NOPE", "NOPE", 1);
        let table = seeded(5).score_configurations(
            &store,
            &[key.clone(), missing, key.clone()],
            Covariate::RadialDistance,
        );
        assert_eq!(table.len(), 1);
        assert_eq!(table.rows_for(&key).count(), 1);
    }

    #[test]
    fn zero_bins_are_clamped() {
        let pipeline = SeparationPipeline::new(PipelineParams {
            num_bins: 0,
            num_samples: 0,
            ..PipelineParams::default()
        });
        assert_eq!(pipeline.params().num_bins, 1);
        assert_eq!(pipeline.params().num_samples, 1);
    }
}
