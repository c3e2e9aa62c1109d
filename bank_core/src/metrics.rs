use serde::Serialize;

use crate::classifier::{ProfileBanks, Side};

/// Counters collected over one detection run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DetectionMetrics {
    pub samples_in: usize,
    pub nodata_dropped: usize,
    pub profiles: usize,
    pub profiles_skipped: usize,
    pub midpoint_anchors: usize,
    pub left_banks: usize,
    pub right_banks: usize,
}

impl DetectionMetrics {
    pub fn profiles_analyzed(&self) -> usize {
        self.profiles - self.profiles_skipped
    }

    pub fn banks_found(&self) -> usize {
        self.left_banks + self.right_banks
    }

    pub fn record_banks(&mut self, banks: &ProfileBanks) {
        for point in banks.iter() {
            match point.side {
                Side::Left => self.left_banks += 1,
                Side::Right => self.right_banks += 1,
            }
        }
    }
}
