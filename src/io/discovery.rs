//! Locating trial files under a results directory and loading them.
//!
//! Layout: every immediate sub-directory of the results directory holds the
//! trials of one camera motion. The results directory itself may carry one
//! `<fov>.yaml` per evaluated field of view; their stems select which trial
//! files are loaded.
use super::records::{fov_from_file_name, load_trial_record};
use crate::error::{IngestError, Result};
use crate::store::RecordStore;
use log::{debug, info};
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

/// File name suffix of a trial record.
pub const TRIAL_FILE_SUFFIX: &str = ".matching.json";

/// Set of accepted fields of view; an empty filter accepts everything.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FovFilter {
    accepted: BTreeSet<u32>,
}

impl FovFilter {
    pub fn any() -> Self {
        Self::default()
    }

    pub fn only(fovs: impl IntoIterator<Item = u32>) -> Self {
        Self {
            accepted: fovs.into_iter().collect(),
        }
    }

    pub fn accepts(&self, fov: u32) -> bool {
        self.accepted.is_empty() || self.accepted.contains(&fov)
    }

    pub fn is_any(&self) -> bool {
        self.accepted.is_empty()
    }
}

/// Outcome of [`ingest`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct IngestSummary {
    pub loaded: usize,
    pub filtered: usize,
}

fn read_dir_sorted(dir: &Path) -> Result<Vec<PathBuf>> {
    let io_err = |source: std::io::Error| IngestError::Io {
        path: dir.to_path_buf(),
        source,
    };
    let mut entries = Vec::new();
    for entry in fs::read_dir(dir).map_err(io_err)? {
        entries.push(entry.map_err(io_err)?.path());
    }
    entries.sort();
    Ok(entries)
}

/// Trial files in every motion sub-directory of `results_dir`, sorted.
///
/// Files whose name contains any of `exclude` are skipped.
pub fn discover_trial_files(results_dir: &Path, exclude: &[String]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for motion_dir in read_dir_sorted(results_dir)? {
        if !motion_dir.is_dir() {
            continue;
        }
        for path in read_dir_sorted(&motion_dir)? {
            let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            if !path.is_file() || !name.ends_with(TRIAL_FILE_SUFFIX) {
                continue;
            }
            if exclude.iter().any(|pat| name.contains(pat.as_str())) {
                debug!("discover_trial_files: excluding {}", path.display());
                continue;
            }
            files.push(path);
        }
    }
    debug!(
        "discover_trial_files: {} trial files under {}",
        files.len(),
        results_dir.display()
    );
    Ok(files)
}

/// Integer stems of the `*.yaml` files directly in `results_dir`, ascending.
pub fn discover_fovs(results_dir: &Path) -> Result<Vec<u32>> {
    let mut fovs: Vec<u32> = read_dir_sorted(results_dir)?
        .into_iter()
        .filter(|p| p.is_file() && p.extension().is_some_and(|e| e == "yaml"))
        .filter_map(|p| p.file_stem()?.to_str()?.parse().ok())
        .collect();
    fovs.sort_unstable();
    fovs.dedup();
    Ok(fovs)
}

/// Load every file and add the accepted ones to `store`.
///
/// Files are checked against `filter` by name first, so filtered-out trials
/// are not parsed when their name encodes the FOV. The first malformed file
/// aborts ingestion and leaves `store` untouched.
pub fn ingest(
    store: &mut RecordStore,
    files: &[PathBuf],
    filter: &FovFilter,
) -> Result<IngestSummary> {
    let mut summary = IngestSummary::default();
    let mut accepted = Vec::with_capacity(files.len());
    for path in files {
        if let Some(fov) = fov_from_file_name(path) {
            if !filter.accepts(fov) {
                summary.filtered += 1;
                continue;
            }
        }
        let record = load_trial_record(path)?;
        if !filter.accepts(record.key.field_of_view) {
            summary.filtered += 1;
            continue;
        }
        debug!(
            "ingest {}: {} good={} bad={}",
            path.display(),
            record.key,
            record.good.len(),
            record.bad.len()
        );
        accepted.push(record);
    }
    summary.loaded = accepted.len();
    for record in accepted {
        store.add(record.key, &record.good, &record.bad);
    }
    info!(
        "ingested {} trial files ({} filtered by field of view) into {} configurations",
        summary.loaded,
        summary.filtered,
        store.len()
    );
    Ok(summary)
}
