//! Flattening of accepted bank points for the external line builder.

use serde::{Deserialize, Serialize};

use crate::classifier::{BankPoint, ProfileBanks, Side};
use crate::geometry::Point2;
use crate::samples::KeySource;

/// Flat attribute row handed to the line builder, one per bank point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BankPointRecord {
    pub x: f64,
    pub y: f64,
    pub elevation: f64,
    pub height_diff: f64,
    pub side: Side,
    pub profile_id: i64,
    pub profile_source: KeySource,
    pub distance_along: f64,
}

impl From<&BankPoint> for BankPointRecord {
    fn from(point: &BankPoint) -> Self {
        Self {
            x: point.position.x,
            y: point.position.y,
            elevation: point.elevation,
            height_diff: point.height_above_anchor,
            side: point.side,
            profile_id: point.transect.value,
            profile_source: point.transect.source,
            distance_along: point.distance_along,
        }
    }
}

/// Ordered bank points of one side, the input to one output polyline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BankPath {
    pub side: Side,
    pub points: Vec<BankPoint>,
}

impl BankPath {
    pub fn vertices(&self) -> Vec<Point2> {
        self.points.iter().map(|point| point.position).collect()
    }
}

/// All bank points of a run. Empty when nothing was detected.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BankAssembly {
    points: Vec<BankPoint>,
}

impl BankAssembly {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn points(&self) -> &[BankPoint] {
        &self.points
    }

    pub fn into_points(self) -> Vec<BankPoint> {
        self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn count_side(&self, side: Side) -> usize {
        self.points.iter().filter(|point| point.side == side).count()
    }

    pub fn records(&self) -> Vec<BankPointRecord> {
        self.points.iter().map(BankPointRecord::from).collect()
    }

    /// Points grouped by side and ordered by along-river distance.
    ///
    /// Sides without points produce no path. Equal distances keep assembly order.
    pub fn paths(&self) -> Vec<BankPath> {
        Side::ALL
            .into_iter()
            .filter_map(|side| {
                let mut points: Vec<BankPoint> = self
                    .points
                    .iter()
                    .filter(|point| point.side == side)
                    .copied()
                    .collect();
                if points.is_empty() {
                    return None;
                }
                points.sort_by(|a, b| a.distance_along.total_cmp(&b.distance_along));
                Some(BankPath { side, points })
            })
            .collect()
    }
}

/// Flatten per-profile results, skipping sides where no bank was found.
pub fn assemble<'a, I>(results: I) -> BankAssembly
where
    I: IntoIterator<Item = &'a ProfileBanks>,
{
    let points: Vec<BankPoint> = results
        .into_iter()
        .flat_map(|banks| banks.iter().copied())
        .collect();

    if points.is_empty() {
        tracing::info!(
            target: "bedrock_banks::analysis",
            "bank_detection.none_detected"
        );
    }

    BankAssembly { points }
}
