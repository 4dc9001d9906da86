use match_separation::Observation;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde_json::{json, Value};

/// Observations spread uniformly over radial distance and ray angle, with
/// descriptor distances drawn from `[dist_lo, dist_hi)`.
///
/// Every `nan_every`-th observation (if non-zero) has an undefined angle.
pub fn uniform_observations(
    seed: u64,
    count: usize,
    dist_lo: f64,
    dist_hi: f64,
    nan_every: usize,
) -> Vec<Observation> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|i| {
            let radial = rng.random_range(0.0..0.55);
            let angle = if nan_every > 0 && i % nan_every == 0 {
                f64::NAN
            } else {
                rng.random_range(0.0..130f64.to_radians())
            };
            Observation::new(radial, angle, rng.random_range(dist_lo..dist_hi))
        })
        .collect()
}

fn rows(observations: &[Observation]) -> Value {
    Value::Array(
        observations
            .iter()
            .map(|o| {
                let angle = if o.ray_angle.is_nan() {
                    Value::Null
                } else {
                    json!(o.ray_angle)
                };
                json!([o.radial_distance, angle, o.descriptor_distance])
            })
            .collect(),
    )
}

/// JSON trial record in the on-disk format, without a `field_of_view` field.
pub fn trial_record_json(
    detector: &str,
    descriptor: &str,
    good: &[Observation],
    bad: &[Observation],
) -> String {
    json!({
        "attributes": { "detector_type": detector, "descriptor_type": descriptor },
        "good_radial_distances": rows(good),
        "bad_radial_distances": rows(bad),
    })
    .to_string()
}
