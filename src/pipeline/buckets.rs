use crate::binning::LinearBinning;
use crate::covariate::Covariate;
use crate::types::{Observation, Side};

/// A bucket is scored only when both populations reached it.
#[inline]
pub fn is_scorable(good_populated: bool, bad_populated: bool) -> bool {
    good_populated && bad_populated
}

/// Descriptor distances of one configuration, split by bucket and side.
pub(crate) struct BucketAccumulator {
    binning: LinearBinning,
    good: Vec<Vec<f64>>,
    bad: Vec<Vec<f64>>,
    skipped_good: usize,
    skipped_bad: usize,
}

impl BucketAccumulator {
    pub(crate) fn new(binning: LinearBinning) -> Self {
        Self {
            binning,
            good: vec![Vec::new(); binning.num_bins],
            bad: vec![Vec::new(); binning.num_bins],
            skipped_good: 0,
            skipped_bad: 0,
        }
    }

    pub(crate) fn binning(&self) -> &LinearBinning {
        &self.binning
    }

    /// Bin every observation of one side; those without a covariate value
    /// are counted and dropped.
    pub(crate) fn fill(&mut self, side: Side, observations: &[Observation], covariate: Covariate) {
        let (bins, skipped) = match side {
            Side::Good => (&mut self.good, &mut self.skipped_good),
            Side::Bad => (&mut self.bad, &mut self.skipped_bad),
        };
        for obs in observations {
            let Some(value) = covariate.value(obs) else {
                *skipped += 1;
                continue;
            };
            let idx = self.binning.index(value);
            bins[idx].push(obs.descriptor_distance);
        }
    }

    pub(crate) fn side(&self, side: Side, index: usize) -> &[f64] {
        match side {
            Side::Good => &self.good[index],
            Side::Bad => &self.bad[index],
        }
    }

    pub(crate) fn is_scorable(&self, index: usize) -> bool {
        is_scorable(!self.good[index].is_empty(), !self.bad[index].is_empty())
    }

    pub(crate) fn skipped(&self, side: Side) -> usize {
        match side {
            Side::Good => self.skipped_good,
            Side::Bad => self.skipped_bad,
        }
    }
}
