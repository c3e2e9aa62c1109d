//! Bedrock bank detection along a river.
//!
//! Elevation samples taken on transects across the river are grouped into
//! profiles, anchored at the sample nearest the centerline, and scanned
//! outward on both sides for the first sustained, steep rise. Accepted points
//! are flattened into a [`BankAssembly`] for an external line builder to turn
//! into one polyline per side. See [`detect_bedrock_banks`].

pub mod anchor;
pub mod assembler;
pub mod classifier;
pub mod config;
pub mod geometry;
pub mod metrics;
mod pipeline;
pub mod profile;
pub mod samples;

pub use anchor::{locate_anchor, Anchor, AnchorMethod};
pub use assembler::{assemble, BankAssembly, BankPath, BankPointRecord};
pub use classifier::{
    classify_profile, classify_side, find_bank_index, slope_degrees, BankPoint, ClassifierParams,
    ProfileBanks, Side,
};
pub use config::{
    load_bank_detection_config_from_env, BankDetectionConfig, BankDetectionConfigError,
    BankDetectionConfigMetadata, SamplingPlan, BUILTIN_BANK_DETECTION_CONFIG, CONFIG_PATH_ENV,
};
pub use geometry::{Centerline, CenterlineGeometry, Point2, Polyline};
pub use metrics::DetectionMetrics;
pub use pipeline::{
    analyze_profile, analyze_profiles, detect_bedrock_banks, detect_bedrock_banks_from_features,
    BankDetection, ProfileOutcome,
};
pub use profile::{group_profiles, Profile, ProfileGrouping};
pub use samples::{
    valid_elevation, ElevationSample, KeySource, SampleRecord, TransectKey, DEFAULT_NODATA,
};

const _: fn() = || {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Profile>();
    assert_send_sync::<Centerline>();
    assert_send_sync::<BankAssembly>();
};
