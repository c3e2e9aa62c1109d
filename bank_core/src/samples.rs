//! Elevation samples as delivered by the external transect sampler.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::geometry::Point2;

/// Raster NODATA value used by the sampler unless configured otherwise.
pub const DEFAULT_NODATA: f64 = -9999.0;

/// One point produced by the sampler before any filtering.
///
/// Identifier attributes are optional because sampler outputs differ in which
/// of them they carry; see [`TransectKey::resolve`].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SampleRecord {
    pub position: Point2,
    pub elevation: Option<f64>,
    /// Offset of the point along its transect.
    pub distance: f64,
    pub transect_id: Option<i64>,
    pub segment_id: Option<i64>,
    pub row_id: Option<i64>,
}

/// Attribute that supplied a [`TransectKey`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeySource {
    Transect,
    Segment,
    Row,
    Feature,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TransectKey {
    pub source: KeySource,
    pub value: i64,
}

type KeyAccessor = fn(&SampleRecord) -> Option<i64>;

/// Identifier attributes in the order they are tried.
const KEY_ACCESSORS: [(KeySource, KeyAccessor); 3] = [
    (KeySource::Transect, transect_id),
    (KeySource::Segment, segment_id),
    (KeySource::Row, row_id),
];

fn transect_id(record: &SampleRecord) -> Option<i64> {
    record.transect_id
}

fn segment_id(record: &SampleRecord) -> Option<i64> {
    record.segment_id
}

fn row_id(record: &SampleRecord) -> Option<i64> {
    record.row_id
}

impl TransectKey {
    pub const fn new(source: KeySource, value: i64) -> Self {
        Self { source, value }
    }

    /// First identifier present on the record, else the record's position in
    /// the sampler output.
    pub fn resolve(record: &SampleRecord, feature_index: usize) -> Self {
        KEY_ACCESSORS
            .iter()
            .find_map(|(source, accessor)| accessor(record).map(|value| Self::new(*source, value)))
            .unwrap_or_else(|| Self::new(KeySource::Feature, feature_index as i64))
    }
}

impl fmt::Display for TransectKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prefix = match self.source {
            KeySource::Transect => "tr",
            KeySource::Segment => "seg",
            KeySource::Row => "row",
            KeySource::Feature => "feat",
        };
        write!(f, "{prefix}:{}", self.value)
    }
}

/// Elevation value with the sentinel and NaN both meaning "no measurement".
#[inline]
pub fn valid_elevation(value: Option<f64>, nodata: f64) -> Option<f64> {
    value.filter(|v| !v.is_nan() && *v != nodata)
}

/// Sample with a valid elevation, ready for profile analysis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ElevationSample {
    pub position: Point2,
    pub elevation: f64,
    pub offset: f64,
    pub transect: TransectKey,
}

impl ElevationSample {
    /// Returns `None` when the record carries no valid elevation.
    pub fn from_record(record: &SampleRecord, feature_index: usize, nodata: f64) -> Option<Self> {
        let elevation = valid_elevation(record.elevation, nodata)?;
        Some(Self {
            position: record.position,
            elevation,
            offset: record.distance,
            transect: TransectKey::resolve(record, feature_index),
        })
    }
}
