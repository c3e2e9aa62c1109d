//! Cross-section bank classification.
//!
//! Each side of a profile is scanned outward from the anchor. The first sample
//! that rises far enough above the anchor, climbs steeply enough from its
//! predecessor, and is followed by a run of samples that stay above the height
//! threshold is taken as the bank on that side.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::anchor::Anchor;
use crate::geometry::Point2;
use crate::profile::Profile;
use crate::samples::{ElevationSample, TransectKey};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub const ALL: [Side; 2] = [Side::Left, Side::Right];

    pub fn as_str(self) -> &'static str {
        match self {
            Side::Left => "left",
            Side::Right => "right",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClassifierParams {
    /// Minimum rise above the anchor, metres.
    pub height_threshold: f64,
    /// Minimum incoming slope, degrees.
    pub slope_threshold: f64,
    /// Spacing between consecutive samples on a transect, metres.
    pub point_spacing: f64,
    /// Samples, the candidate included, that must stay above the height threshold.
    pub min_consecutive: usize,
}

impl Default for ClassifierParams {
    fn default() -> Self {
        Self {
            height_threshold: 3.0,
            slope_threshold: 8.0,
            point_spacing: 15.0,
            min_consecutive: 3,
        }
    }
}

/// Accepted bank sample on one side of one profile.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BankPoint {
    pub position: Point2,
    pub elevation: f64,
    pub height_above_anchor: f64,
    pub side: Side,
    pub transect: TransectKey,
    pub distance_along: f64,
}

/// Classification of both sides of a profile.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ProfileBanks {
    pub left: Option<BankPoint>,
    pub right: Option<BankPoint>,
}

impl ProfileBanks {
    pub fn get(&self, side: Side) -> Option<&BankPoint> {
        match side {
            Side::Left => self.left.as_ref(),
            Side::Right => self.right.as_ref(),
        }
    }

    /// Accepted points, left before right.
    pub fn iter(&self) -> impl Iterator<Item = &BankPoint> {
        self.left.iter().chain(self.right.iter())
    }
}

/// Incoming slope between two samples `spacing` apart, in degrees.
#[inline]
pub fn slope_degrees(previous: f64, current: f64, spacing: f64) -> f64 {
    ((current - previous) / spacing).atan().to_degrees()
}

/// Index of the first bank sample in `outward`, or `None` when no sample qualifies.
///
/// `outward[0]` is the sample adjacent to the anchor. The slope gate is not
/// applied at index 0 because it has no predecessor on this side.
pub fn find_bank_index(outward: &[f64], baseline: f64, params: &ClassifierParams) -> Option<usize> {
    let window = params.min_consecutive.max(1);
    let clears_height = |elevation: f64| elevation - baseline >= params.height_threshold;

    for i in 0..outward.len().saturating_sub(window - 1) {
        let current = outward[i];
        if !clears_height(current) {
            continue;
        }

        if i > 0 {
            let slope = slope_degrees(outward[i - 1], current, params.point_spacing);
            if slope < params.slope_threshold {
                continue;
            }
        }

        let mut stable = true;
        for j in 1..window {
            // running out of samples counts against the candidate
            match outward.get(i + j) {
                Some(&next) if clears_height(next) => {}
                _ => {
                    stable = false;
                    break;
                }
            }
        }

        if stable {
            return Some(i);
        }
    }

    None
}

/// Classify one side of a profile relative to its anchor.
pub fn classify_side(
    profile: &Profile,
    anchor: &Anchor,
    side: Side,
    params: &ClassifierParams,
) -> Option<BankPoint> {
    let samples = profile.samples();
    let outward: Vec<&ElevationSample> = match side {
        Side::Left => samples.get(..anchor.index)?.iter().rev().collect(),
        Side::Right => samples.get(anchor.index + 1..)?.iter().collect(),
    };
    let elevations: Vec<f64> = outward.iter().map(|sample| sample.elevation).collect();

    let index = find_bank_index(&elevations, anchor.elevation(), params)?;
    let bank = outward[index];
    Some(BankPoint {
        position: bank.position,
        elevation: bank.elevation,
        height_above_anchor: bank.elevation - anchor.elevation(),
        side,
        transect: profile.transect,
        distance_along: anchor.distance_along,
    })
}

/// Classify both sides of a profile independently.
pub fn classify_profile(profile: &Profile, anchor: &Anchor, params: &ClassifierParams) -> ProfileBanks {
    ProfileBanks {
        left: classify_side(profile, anchor, Side::Left, params),
        right: classify_side(profile, anchor, Side::Right, params),
    }
}
