//! Anchoring of each profile to the river centerline.

use serde::{Deserialize, Serialize};

use crate::geometry::CenterlineGeometry;
use crate::profile::Profile;
use crate::samples::ElevationSample;

/// How the anchor sample of a profile was chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnchorMethod {
    NearestToCenterline,
    Midpoint,
}

/// Baseline sample of a profile, where the transect meets the river.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Anchor {
    pub index: usize,
    pub sample: ElevationSample,
    /// Arc length along the centerline at the anchor's projection.
    pub distance_along: f64,
    pub method: AnchorMethod,
}

impl Anchor {
    pub fn elevation(&self) -> f64 {
        self.sample.elevation
    }
}

/// Locate the profile sample nearest to the centerline.
///
/// Without a centerline, or with one that has no geometry to measure against,
/// the structural midpoint `len / 2` is used and the along-river distance is
/// zero. Returns `None` only for an empty profile.
pub fn locate_anchor<C>(profile: &Profile, centerline: Option<&C>) -> Option<Anchor>
where
    C: CenterlineGeometry + ?Sized,
{
    let samples = profile.samples();
    if samples.is_empty() {
        return None;
    }

    let Some(centerline) = centerline else {
        return Some(midpoint_anchor(samples));
    };

    let mut nearest: Option<usize> = None;
    let mut min_dist = f64::INFINITY;
    for (idx, sample) in samples.iter().enumerate() {
        let dist = centerline.distance_to(sample.position);
        if dist < min_dist {
            min_dist = dist;
            nearest = Some(idx);
        }
    }

    // no finite distance means the centerline has nothing to project onto
    let Some(index) = nearest else {
        return Some(midpoint_anchor(samples));
    };

    let sample = samples[index];
    Some(Anchor {
        index,
        sample,
        distance_along: centerline.locate(sample.position),
        method: AnchorMethod::NearestToCenterline,
    })
}

fn midpoint_anchor(samples: &[ElevationSample]) -> Anchor {
    let index = samples.len() / 2;
    Anchor {
        index,
        sample: samples[index],
        distance_along: 0.0,
        method: AnchorMethod::Midpoint,
    }
}
