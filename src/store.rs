//! Per-configuration accumulation of good/bad observation pools.
//!
//! Pools only grow: every trial file sharing a configuration key appends its
//! batches, so a key evaluated under several motions ends up holding all of
//! them. The store is owned by one pipeline run and is filled completely
//! before any scoring starts.

use crate::types::{ConfigKey, Observation};
use std::collections::BTreeMap;

/// Good and bad observations accumulated for one configuration.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SamplePool {
    pub good: Vec<Observation>,
    pub bad: Vec<Observation>,
}

impl SamplePool {
    pub fn len(&self) -> usize {
        self.good.len() + self.bad.len()
    }

    pub fn is_empty(&self) -> bool {
        self.good.is_empty() && self.bad.is_empty()
    }
}

/// Mapping from configuration key to its merged sample pool.
///
/// Keys are held in a `BTreeMap`, so iteration yields each distinct
/// configuration once in sorted order no matter how many trials touched it.
#[derive(Clone, Debug, Default)]
pub struct RecordStore {
    pools: BTreeMap<ConfigKey, SamplePool>,
    trials: usize,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one trial's batches to the pool for `key`, creating it if absent.
    pub fn add(&mut self, key: ConfigKey, good: &[Observation], bad: &[Observation]) {
        let pool = self.pools.entry(key).or_default();
        pool.good.extend_from_slice(good);
        pool.bad.extend_from_slice(bad);
        self.trials += 1;
    }

    /// Full accumulated pools for `key`, if any trial contributed to it.
    pub fn pool_for(&self, key: &ConfigKey) -> Option<&SamplePool> {
        self.pools.get(key)
    }

    /// Distinct configuration keys in sorted order.
    pub fn configurations(&self) -> impl Iterator<Item = &ConfigKey> {
        self.pools.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ConfigKey, &SamplePool)> {
        self.pools.iter()
    }

    /// Distinct fields of view across all configurations, ascending.
    pub fn fields_of_view(&self) -> Vec<u32> {
        let mut fovs: Vec<u32> = self.pools.keys().map(|k| k.field_of_view).collect();
        fovs.sort_unstable();
        fovs.dedup();
        fovs
    }

    /// Distinct `detector+descriptor` labels, sorted.
    pub fn labels(&self) -> Vec<String> {
        let mut labels: Vec<String> = self.pools.keys().map(ConfigKey::label).collect();
        labels.sort();
        labels.dedup();
        labels
    }

    /// Number of distinct configurations.
    pub fn len(&self) -> usize {
        self.pools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pools.is_empty()
    }

    /// Number of trial batches added so far.
    pub fn trial_count(&self) -> usize {
        self.trials
    }
}
