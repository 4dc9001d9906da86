#[allow(dead_code)]
mod common;

use common::synthetic_records::uniform_observations;
use match_separation::binning::LinearBinning;
use match_separation::{
    ConfigKey, Covariate, Observation, PipelineParams, RecordStore, SeparationPipeline,
};

fn mixed_store() -> RecordStore {
    let mut store = RecordStore::new();
    let setups = [
        ("AKAZE", "AKAZE", 60, 0.55),
        ("FAST", "BRIEF", 60, 0.3),
        ("FAST", "BRIEF", 120, 0.1),
        ("ORB", "ORB", 90, 0.0),
    ];
    for (i, (det, desc, fov, gap)) in setups.iter().enumerate() {
        let seed = i as u64 * 10;
        // Two motions per configuration.
        for motion in 0..2 {
            let good = uniform_observations(seed + motion, 400, 0.1, 0.5, 7);
            let bad = uniform_observations(seed + motion + 100, 300, 0.1 + gap, 0.5 + gap, 5);
            store.add(ConfigKey::new(*det, *desc, *fov), &good, &bad);
        }
    }
    store
}

#[test]
fn rows_exist_only_for_buckets_with_both_sides() {
    let _ = env_logger::builder().is_test(true).try_init();
    let key = ConfigKey::new("SIFT", "SIFT", 60);
    let mut store = RecordStore::new();
    // Good matches only near the centre, bad matches only near the border;
    // they only share bucket 10 (radial 0.25..0.275).
    let good: Vec<Observation> = (0..30)
        .map(|i| Observation::new(0.01 * i as f64 * 0.9, 0.1, 0.2))
        .collect();
    let bad: Vec<Observation> = (0..30)
        .map(|i| Observation::new(0.255 + 0.0083 * i as f64, 0.9, 0.8))
        .collect();
    store.add(key.clone(), &good, &bad);

    let report = SeparationPipeline::new(PipelineParams::default().with_seed(1)).run(&store);
    let trace = report.trace.configuration(&key).unwrap();
    for table_trace in [&trace.radial, &trace.angle] {
        for bucket in &table_trace.buckets {
            assert_eq!(
                bucket.is_scored(),
                bucket.good > 0 && bucket.bad > 0,
                "bucket {:?}",
                bucket
            );
        }
    }
    let binning = LinearBinning::radial(20);
    let scored_centers: Vec<f64> = report.radial.rows.iter().map(|r| r.bucket_center).collect();
    assert_eq!(scored_centers, vec![binning.center(10)]);
    // Angles 0.1 rad and 0.9 rad never share a bucket.
    assert!(report.angle.is_empty());
}

#[test]
fn scores_stay_within_silhouette_bounds() {
    let store = mixed_store();
    let report = SeparationPipeline::new(PipelineParams::default().with_seed(5)).run(&store);
    assert!(!report.radial.is_empty());
    assert!(!report.angle.is_empty());
    for row in report.radial.rows.iter().chain(&report.angle.rows) {
        assert!(
            (-1.0..=1.0).contains(&row.score),
            "score out of range: {:?}",
            row
        );
    }
}

#[test]
fn wider_gap_separates_better() {
    let store = mixed_store();
    let table = SeparationPipeline::new(PipelineParams::default().with_seed(9))
        .score_covariate(&store, Covariate::RadialDistance);
    let summary = table.summarize();
    let mean = |label: &str, fov: u32| {
        summary
            .iter()
            .find(|g| g.label == label && g.field_of_view == fov)
            .map(|g| g.mean_score)
            .unwrap()
    };
    assert!(mean("AKAZE+AKAZE", 60) > mean("FAST+BRIEF", 60));
    assert!(mean("FAST+BRIEF", 60) > mean("ORB+ORB", 90));
    assert!(mean("ORB+ORB", 90).abs() < 0.15);
}

#[test]
fn rows_follow_configuration_order_then_bucket() {
    let store = mixed_store();
    let report = SeparationPipeline::new(PipelineParams::default().with_seed(3)).run(&store);
    for table in [&report.radial, &report.angle] {
        let keys: Vec<(String, u32, f64)> = table
            .rows
            .iter()
            .map(|r| (r.label.clone(), r.field_of_view, r.bucket_center))
            .collect();
        let mut sorted = keys.clone();
        sorted.sort_by(|a, b| {
            (a.0.as_str(), a.1)
                .cmp(&(b.0.as_str(), b.1))
                .then(a.2.partial_cmp(&b.2).unwrap())
        });
        assert_eq!(keys, sorted);
    }
    assert_eq!(report.trace.fovs, vec![60, 90, 120]);
    assert_eq!(
        report.trace.labels,
        vec!["AKAZE+AKAZE", "FAST+BRIEF", "ORB+ORB"]
    );
    assert_eq!(report.trace.input.trials, 8);
    assert_eq!(report.trace.input.configurations, 4);
}

#[test]
fn undefined_angles_count_for_radial_but_not_angle() {
    let key = ConfigKey::new("ORB", "BRIEF", 60);
    let good = uniform_observations(1, 200, 0.1, 0.4, 4);
    let bad = uniform_observations(2, 200, 0.5, 0.9, 4);
    let nan_good = good.iter().filter(|o| o.ray_angle.is_nan()).count();
    let nan_bad = bad.iter().filter(|o| o.ray_angle.is_nan()).count();
    let mut store = RecordStore::new();
    store.add(key.clone(), &good, &bad);

    let report = SeparationPipeline::new(PipelineParams::default().with_seed(11)).run(&store);
    let trace = report.trace.configuration(&key).unwrap();
    let radial_good: usize = trace.radial.buckets.iter().map(|b| b.good).sum();
    let angle_good: usize = trace.angle.buckets.iter().map(|b| b.good).sum();
    let angle_bad: usize = trace.angle.buckets.iter().map(|b| b.bad).sum();
    assert_eq!(radial_good, 200);
    assert_eq!(angle_good, 200 - nan_good);
    assert_eq!(angle_bad, 200 - nan_bad);
    assert_eq!(trace.angle.skipped_good, nan_good);
    assert_eq!(trace.angle.skipped_bad, nan_bad);
    assert_eq!(trace.radial.skipped_good, 0);
}

#[test]
fn empty_bad_pool_yields_no_rows_in_either_mode() {
    let key = ConfigKey::new("BRISK", "BRISK", 180);
    let mut store = RecordStore::new();
    store.add(key.clone(), &uniform_observations(4, 500, 0.1, 0.9, 3), &[]);
    let report = SeparationPipeline::new(PipelineParams::default()).run(&store);
    assert!(report.radial.rows_for(&key).next().is_none());
    assert!(report.angle.rows_for(&key).next().is_none());
    assert_eq!(report.trace.configurations[0].bad_total, 0);
}

#[test]
fn seeded_runs_are_reproducible() {
    let store = mixed_store();
    let params = PipelineParams {
        num_samples: 20,
        ..PipelineParams::default().with_seed(77)
    };
    let a = SeparationPipeline::new(params.clone()).run(&store);
    let b = SeparationPipeline::new(params).run(&store);
    assert_eq!(a.radial.rows, b.radial.rows);
    assert_eq!(a.angle.rows, b.angle.rows);
    assert_eq!(a.trace.input.seed, 77);
}
