//! Trial record files: one JSON document per detector/descriptor/FOV/motion.
//!
//! ```json
//! {
//!   "attributes": { "detector_type": "ORB", "descriptor_type": "BRIEF" },
//!   "field_of_view": 60,
//!   "good_radial_distances": [[0.12, 0.031, 0.21], [0.40, null, 0.18]],
//!   "bad_radial_distances": [[0.33, 0.250, 0.87]]
//! }
//! ```
//!
//! Each row is `[radial_distance, ray_angle, descriptor_distance]`. A `null`
//! ray angle marks undefined geometry. `field_of_view` may be omitted, in which
//! case it is taken from the file name (`<motion>.<fov>.matching.json`).
use crate::error::{IngestError, Result};
use crate::types::{ConfigKey, Observation, Side};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
struct RawAttributes {
    detector_type: String,
    descriptor_type: String,
}

#[derive(Debug, Deserialize)]
struct RawTrialRecord {
    attributes: RawAttributes,
    #[serde(default)]
    field_of_view: Option<u32>,
    #[serde(default)]
    good_radial_distances: Vec<Vec<Option<f64>>>,
    #[serde(default)]
    bad_radial_distances: Vec<Vec<Option<f64>>>,
}

/// One parsed trial: its configuration key and both observation batches.
#[derive(Clone, Debug)]
pub struct TrialRecord {
    pub source: PathBuf,
    pub key: ConfigKey,
    pub good: Vec<Observation>,
    pub bad: Vec<Observation>,
}

/// Read and validate a trial record from disk.
pub fn load_trial_record(path: &Path) -> Result<TrialRecord> {
    let contents = fs::read_to_string(path).map_err(|source| IngestError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_trial_record(path, &contents)
}

/// Parse a trial record; `path` is used for the FOV fallback and for errors.
pub fn parse_trial_record(path: &Path, contents: &str) -> Result<TrialRecord> {
    let raw: RawTrialRecord =
        serde_json::from_str(contents).map_err(|source| IngestError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
    let field_of_view = match raw.field_of_view {
        Some(fov) => fov,
        None => fov_from_file_name(path).ok_or_else(|| IngestError::MissingFieldOfView {
            path: path.to_path_buf(),
        })?,
    };
    let good = parse_rows(path, Side::Good, &raw.good_radial_distances)?;
    let bad = parse_rows(path, Side::Bad, &raw.bad_radial_distances)?;
    Ok(TrialRecord {
        source: path.to_path_buf(),
        key: ConfigKey::new(
            raw.attributes.detector_type,
            raw.attributes.descriptor_type,
            field_of_view,
        ),
        good,
        bad,
    })
}

/// Field of view encoded as the second dot-separated file name component.
pub fn fov_from_file_name(path: &Path) -> Option<u32> {
    path.file_name()?
        .to_str()?
        .split('.')
        .nth(1)?
        .parse()
        .ok()
}

fn parse_rows(path: &Path, side: Side, rows: &[Vec<Option<f64>>]) -> Result<Vec<Observation>> {
    let malformed = |row: usize, reason: String| IngestError::MalformedObservation {
        path: path.to_path_buf(),
        side,
        row,
        reason,
    };
    rows.iter()
        .enumerate()
        .map(|(i, row)| {
            let [radial, angle, distance] = row.as_slice() else {
                return Err(malformed(i, format!("expected 3 values, found {}", row.len())));
            };
            let radial = radial.ok_or_else(|| malformed(i, "radial distance is null".into()))?;
            let distance =
                distance.ok_or_else(|| malformed(i, "descriptor distance is null".into()))?;
            Ok(Observation::new(radial, angle.unwrap_or(f64::NAN), distance))
        })
        .collect()
}
