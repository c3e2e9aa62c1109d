//! Whole-run entry points: group, anchor, classify and assemble.

use rayon::prelude::*;

use crate::anchor::{locate_anchor, Anchor, AnchorMethod};
use crate::assembler::{assemble, BankAssembly};
use crate::classifier::{classify_profile, ClassifierParams, ProfileBanks};
use crate::config::{BankDetectionConfig, BankDetectionConfigError};
use crate::geometry::{Centerline, CenterlineGeometry, Polyline};
use crate::metrics::DetectionMetrics;
use crate::profile::{group_profiles, Profile};
use crate::samples::SampleRecord;

/// Result of analysing a single profile.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ProfileOutcome {
    /// Too few samples for a stability window.
    Skipped,
    Classified { anchor: Anchor, banks: ProfileBanks },
}

impl ProfileOutcome {
    pub fn banks(&self) -> Option<&ProfileBanks> {
        match self {
            ProfileOutcome::Skipped => None,
            ProfileOutcome::Classified { banks, .. } => Some(banks),
        }
    }
}

/// Anchor and classify one profile.
pub fn analyze_profile<C>(
    profile: &Profile,
    centerline: Option<&C>,
    params: &ClassifierParams,
) -> ProfileOutcome
where
    C: CenterlineGeometry + ?Sized,
{
    if !profile.is_analyzable(params.min_consecutive) {
        tracing::debug!(
            target: "bedrock_banks::analysis",
            transect = %profile.transect,
            samples = profile.len(),
            "profile.skipped=insufficient_samples"
        );
        return ProfileOutcome::Skipped;
    }
    let Some(anchor) = locate_anchor(profile, centerline) else {
        return ProfileOutcome::Skipped;
    };
    if anchor.method == AnchorMethod::Midpoint {
        tracing::debug!(
            target: "bedrock_banks::analysis",
            transect = %profile.transect,
            index = anchor.index,
            "profile.anchor=midpoint"
        );
    }

    ProfileOutcome::Classified {
        anchor,
        banks: classify_profile(profile, &anchor, params),
    }
}

/// Analyse every profile in parallel. Output order matches `profiles`.
pub fn analyze_profiles<C>(
    profiles: &[Profile],
    centerline: Option<&C>,
    params: &ClassifierParams,
) -> Vec<ProfileOutcome>
where
    C: CenterlineGeometry + Sync + ?Sized,
{
    profiles
        .par_iter()
        .map(|profile| analyze_profile(profile, centerline, params))
        .collect()
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BankDetection {
    pub assembly: BankAssembly,
    pub metrics: DetectionMetrics,
}

/// Run the full detection over raw sampler output.
///
/// Fails only on an invalid configuration; missing data, a missing centerline
/// or an absence of banks all produce a smaller or empty assembly.
pub fn detect_bedrock_banks<C>(
    records: &[SampleRecord],
    centerline: Option<&C>,
    config: &BankDetectionConfig,
) -> Result<BankDetection, BankDetectionConfigError>
where
    C: CenterlineGeometry + Sync + ?Sized,
{
    config.validate()?;
    let params = config.classifier_params();

    tracing::info!(
        target: "bedrock_banks::analysis",
        samples = records.len(),
        height_threshold = params.height_threshold,
        slope_threshold = params.slope_threshold,
        point_spacing = params.point_spacing,
        min_consecutive = params.min_consecutive,
        centerline = centerline.is_some(),
        "bank_detection.started"
    );

    let grouping = group_profiles(records, config.nodata_value);
    let outcomes = analyze_profiles(&grouping.profiles, centerline, &params);

    let mut metrics = DetectionMetrics {
        samples_in: records.len(),
        nodata_dropped: grouping.nodata_dropped,
        profiles: grouping.profiles.len(),
        ..Default::default()
    };
    for outcome in &outcomes {
        match outcome {
            ProfileOutcome::Skipped => metrics.profiles_skipped += 1,
            ProfileOutcome::Classified { anchor, banks } => {
                if anchor.method == AnchorMethod::Midpoint {
                    metrics.midpoint_anchors += 1;
                }
                metrics.record_banks(banks);
            }
        }
    }

    let assembly = assemble(outcomes.iter().filter_map(ProfileOutcome::banks));

    tracing::info!(
        target: "bedrock_banks::analysis",
        profiles = metrics.profiles,
        skipped = metrics.profiles_skipped,
        nodata_dropped = metrics.nodata_dropped,
        midpoint_anchors = metrics.midpoint_anchors,
        left = metrics.left_banks,
        right = metrics.right_banks,
        "bank_detection.completed"
    );

    Ok(BankDetection { assembly, metrics })
}

/// Fold the river features into one centerline, then run the detection.
pub fn detect_bedrock_banks_from_features<I>(
    records: &[SampleRecord],
    river_features: I,
    config: &BankDetectionConfig,
) -> Result<BankDetection, BankDetectionConfigError>
where
    I: IntoIterator<Item = Polyline>,
{
    let centerline = Centerline::combine(river_features);
    detect_bedrock_banks(records, centerline.as_ref(), config)
}
