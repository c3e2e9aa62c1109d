//! Configuration for bedrock bank detection.
//!
//! Loaded from `bank_detection_config.json` with support for an environment
//! variable override.

use std::{
    env, fs, io,
    path::{Path, PathBuf},
    sync::Arc,
};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::classifier::ClassifierParams;
use crate::samples::DEFAULT_NODATA;

pub const BUILTIN_BANK_DETECTION_CONFIG: &str = include_str!("data/bank_detection_config.json");

pub const CONFIG_PATH_ENV: &str = "BANK_DETECTION_CONFIG_PATH";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BankDetectionConfig {
    /// Half-length of each transect, metres from the centerline.
    pub buffer_distance: f64,
    pub height_threshold: f64,
    /// Degrees.
    pub slope_threshold: f64,
    pub transect_spacing: f64,
    pub point_spacing: f64,
    pub min_consecutive: usize,
    pub nodata_value: f64,
}

impl Default for BankDetectionConfig {
    fn default() -> Self {
        Self {
            buffer_distance: 200.0,
            height_threshold: 3.0,
            slope_threshold: 8.0,
            transect_spacing: 75.0,
            point_spacing: 15.0,
            min_consecutive: 3,
            nodata_value: DEFAULT_NODATA,
        }
    }
}

impl BankDetectionConfig {
    pub fn builtin() -> Arc<Self> {
        Arc::new(
            serde_json::from_str(BUILTIN_BANK_DETECTION_CONFIG)
                .expect("builtin bank detection config should parse"),
        )
    }

    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn from_file(path: &Path) -> Result<Self, BankDetectionConfigError> {
        let contents =
            fs::read_to_string(path).map_err(|source| BankDetectionConfigError::ReadFailed {
                path: path.to_path_buf(),
                source,
            })?;
        let config = BankDetectionConfig::from_json_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), BankDetectionConfigError> {
        if self.min_consecutive == 0 {
            return Err(BankDetectionConfigError::Invalid(
                "min_consecutive must be at least 1".to_string(),
            ));
        }
        if !(self.point_spacing.is_finite() && self.point_spacing > 0.0) {
            return Err(BankDetectionConfigError::Invalid(format!(
                "point_spacing must be positive, got {}",
                self.point_spacing
            )));
        }
        for (name, value) in [
            ("buffer_distance", self.buffer_distance),
            ("transect_spacing", self.transect_spacing),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(BankDetectionConfigError::Invalid(format!(
                    "{name} must be positive, got {value}"
                )));
            }
        }
        for (name, value) in [
            ("height_threshold", self.height_threshold),
            ("slope_threshold", self.slope_threshold),
        ] {
            if !value.is_finite() {
                return Err(BankDetectionConfigError::Invalid(format!(
                    "{name} must be finite, got {value}"
                )));
            }
        }
        Ok(())
    }

    pub fn classifier_params(&self) -> ClassifierParams {
        ClassifierParams {
            height_threshold: self.height_threshold,
            slope_threshold: self.slope_threshold,
            point_spacing: self.point_spacing,
            min_consecutive: self.min_consecutive,
        }
    }

    pub fn sampling_plan(&self) -> SamplingPlan {
        SamplingPlan {
            transect_half_length: self.buffer_distance,
            transect_spacing: self.transect_spacing,
            transect_angle: 90.0,
            both_sides: true,
            point_spacing: self.point_spacing,
            start_offset: 0.0,
            end_offset: 0.0,
            nodata_value: self.nodata_value,
        }
    }
}

/// What the external engine must produce before the detector can run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SamplingPlan {
    pub transect_half_length: f64,
    pub transect_spacing: f64,
    /// Degrees relative to the centerline.
    pub transect_angle: f64,
    pub both_sides: bool,
    pub point_spacing: f64,
    pub start_offset: f64,
    pub end_offset: f64,
    pub nodata_value: f64,
}

#[derive(Debug, Error)]
pub enum BankDetectionConfigError {
    #[error("failed to parse bank detection config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("failed to read bank detection config from {path:?}: {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid bank detection config: {0}")]
    Invalid(String),
}

/// Where the active configuration came from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BankDetectionConfigMetadata {
    path: Option<PathBuf>,
}

impl BankDetectionConfigMetadata {
    pub fn new(path: Option<PathBuf>) -> Self {
        Self { path }
    }

    pub fn path(&self) -> Option<&PathBuf> {
        self.path.as_ref()
    }

    pub fn is_builtin(&self) -> bool {
        self.path.is_none()
    }
}

/// Load configuration from `BANK_DETECTION_CONFIG_PATH`, else the builtin document.
pub fn load_bank_detection_config_from_env() -> (Arc<BankDetectionConfig>, BankDetectionConfigMetadata)
{
    if let Some(path) = env::var_os(CONFIG_PATH_ENV).map(PathBuf::from) {
        match BankDetectionConfig::from_file(&path) {
            Ok(config) => {
                tracing::info!(
                    target: "bedrock_banks::config",
                    path = %path.display(),
                    "bank_detection_config.loaded=file"
                );
                return (
                    Arc::new(config),
                    BankDetectionConfigMetadata::new(Some(path)),
                );
            }
            Err(err) => {
                tracing::warn!(
                    target: "bedrock_banks::config",
                    path = %path.display(),
                    error = %err,
                    "bank_detection_config.load_failed"
                );
            }
        }
    }

    let config = BankDetectionConfig::builtin();
    tracing::info!(
        target: "bedrock_banks::config",
        "bank_detection_config.loaded=builtin"
    );
    (config, BankDetectionConfigMetadata::new(None))
}
