//! Grouping of raw samples into per-transect profiles.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::samples::{ElevationSample, SampleRecord, TransectKey};

/// Samples of one transect, ascending by offset along the transect.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub transect: TransectKey,
    samples: Vec<ElevationSample>,
}

impl Profile {
    /// Builds a profile, sorting the samples by transect offset.
    pub fn new(transect: TransectKey, mut samples: Vec<ElevationSample>) -> Self {
        samples.sort_by(|a, b| a.offset.total_cmp(&b.offset));
        Self { transect, samples }
    }

    pub fn samples(&self) -> &[ElevationSample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Whether the profile carries enough samples for a stability window.
    pub fn is_analyzable(&self, min_consecutive: usize) -> bool {
        self.samples.len() > min_consecutive
    }
}

/// Outcome of grouping raw sampler output.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileGrouping {
    pub profiles: Vec<Profile>,
    pub nodata_dropped: usize,
}

/// Partition raw samples by transect and order each partition by offset.
///
/// Samples without a valid elevation are dropped before grouping. Profiles are
/// returned in the order their key is first seen.
pub fn group_profiles(records: &[SampleRecord], nodata: f64) -> ProfileGrouping {
    let mut buckets: IndexMap<TransectKey, Vec<ElevationSample>> = IndexMap::new();
    let mut nodata_dropped = 0usize;

    for (feature_index, record) in records.iter().enumerate() {
        match ElevationSample::from_record(record, feature_index, nodata) {
            Some(sample) => buckets.entry(sample.transect).or_default().push(sample),
            None => nodata_dropped += 1,
        }
    }

    let profiles = buckets
        .into_iter()
        .map(|(transect, samples)| Profile::new(transect, samples))
        .collect();

    ProfileGrouping {
        profiles,
        nodata_dropped,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point2;
    use crate::samples::{KeySource, DEFAULT_NODATA};

    fn record(transect: i64, distance: f64, elevation: f64) -> SampleRecord {
        SampleRecord {
            position: Point2::new(distance, transect as f64),
            elevation: Some(elevation),
            distance,
            transect_id: Some(transect),
            ..Default::default()
        }
    }

    #[test]
    fn groups_by_key_and_sorts_by_offset() {
        let records = vec![
            record(2, 30.0, 5.0),
            record(1, 15.0, 2.0),
            record(2, 0.0, 3.0),
            record(1, 0.0, 1.0),
            record(2, 15.0, 4.0),
        ];
        let grouping = group_profiles(&records, DEFAULT_NODATA);

        assert_eq!(grouping.nodata_dropped, 0);
        assert_eq!(grouping.profiles.len(), 2);

        let first = &grouping.profiles[0];
        assert_eq!(first.transect, TransectKey::new(KeySource::Transect, 2));
        let offsets: Vec<f64> = first.samples().iter().map(|s| s.offset).collect();
        assert_eq!(offsets, vec![0.0, 15.0, 30.0]);

        let second = &grouping.profiles[1];
        assert_eq!(second.transect, TransectKey::new(KeySource::Transect, 1));
        assert_eq!(second.len(), 2);
    }

    #[test]
    fn nodata_samples_are_excluded() {
        let records = vec![
            record(1, 0.0, 10.0),
            record(1, 15.0, DEFAULT_NODATA),
            record(1, 30.0, 12.0),
            SampleRecord {
                elevation: None,
                transect_id: Some(1),
                ..Default::default()
            },
        ];
        let grouping = group_profiles(&records, DEFAULT_NODATA);

        assert_eq!(grouping.nodata_dropped, 2);
        assert_eq!(grouping.profiles.len(), 1);
        let elevations: Vec<f64> = grouping.profiles[0]
            .samples()
            .iter()
            .map(|s| s.elevation)
            .collect();
        assert_eq!(elevations, vec![10.0, 12.0]);
    }

    #[test]
    fn transect_with_only_nodata_yields_no_profile() {
        let records = vec![record(4, 0.0, DEFAULT_NODATA), record(4, 15.0, DEFAULT_NODATA)];
        let grouping = group_profiles(&records, DEFAULT_NODATA);
        assert!(grouping.profiles.is_empty());
    }

    #[test]
    fn empty_input_yields_empty_grouping() {
        assert_eq!(group_profiles(&[], DEFAULT_NODATA), ProfileGrouping::default());
    }

    #[test]
    fn records_without_ids_fall_back_to_feature_index() {
        let records = vec![
            SampleRecord {
                elevation: Some(1.0),
                ..Default::default()
            },
            SampleRecord {
                elevation: Some(2.0),
                ..Default::default()
            },
        ];
        let grouping = group_profiles(&records, DEFAULT_NODATA);
        assert_eq!(grouping.profiles.len(), 2);
        assert_eq!(
            grouping.profiles[1].transect,
            TransectKey::new(KeySource::Feature, 1)
        );
    }

    #[test]
    fn analyzable_needs_more_than_min_consecutive() {
        let records: Vec<_> = (0..3).map(|i| record(1, i as f64 * 15.0, 1.0)).collect();
        let profile = &group_profiles(&records, DEFAULT_NODATA).profiles[0];
        assert!(profile.is_analyzable(2));
        assert!(!profile.is_analyzable(3));
    }
}
