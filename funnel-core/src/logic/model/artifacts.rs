//! Model Artifacts - preprocessing sidecar and checksums
//!
//! A model ships as `<name>.onnx` plus `<name>.onnx.json`:
//!
//! ```json
//! {
//!   "feature_version": 1,
//!   "layout_hash": 305419896,
//!   "threshold": 0.5,
//!   "label_encoders": { "Traffic_Source": ["Direct", "Organic Search", "Paid Ads", "Social Media"] },
//!   "scaler": { "mean": [...], "scale": [...] }
//! }
//! ```
//!
//! `layout_hash`, `threshold` and `label_encoders` are optional.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::constants::DEFAULT_THRESHOLD;
use crate::error::{CoreError, CoreResult};
use crate::logic::features::{layout, EncoderSet, Preprocessor, StandardScaler};

/// Preprocessing state fit alongside the model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelSidecar {
    pub feature_version: u8,

    #[serde(default)]
    pub layout_hash: Option<u32>,

    #[serde(default = "default_threshold")]
    pub threshold: f32,

    #[serde(default)]
    pub label_encoders: HashMap<String, Vec<String>>,

    pub scaler: StandardScaler,
}

fn default_threshold() -> f32 {
    DEFAULT_THRESHOLD
}

impl ModelSidecar {
    /// Check layout compatibility, scaler shape and threshold range
    pub fn validate(&self) -> CoreResult<()> {
        layout::validate_layout(self.feature_version, self.layout_hash)?;
        self.scaler.validate()?;

        if !(0.0..=1.0).contains(&self.threshold) {
            return Err(CoreError::Shape(format!(
                "threshold must be within [0, 1], got {}",
                self.threshold
            )));
        }
        Ok(())
    }

    pub fn preprocessor(&self) -> Preprocessor {
        Preprocessor::new(
            EncoderSet::with_overrides(self.label_encoders.clone()),
            self.scaler.clone(),
        )
    }
}

/// Read and validate a sidecar file
pub fn load_sidecar(path: &str) -> CoreResult<ModelSidecar> {
    let content = std::fs::read_to_string(path).map_err(|source| CoreError::ArtifactIo {
        path: path.to_string(),
        source,
    })?;

    let sidecar: ModelSidecar =
        serde_json::from_str(&content).map_err(|source| CoreError::ArtifactParse {
            path: path.to_string(),
            source,
        })?;

    sidecar.validate()?;
    log::info!("Model sidecar loaded from: {}", path);
    Ok(sidecar)
}

/// SHA-256 of a file, hex encoded
pub fn file_checksum(path: &Path) -> CoreResult<String> {
    let bytes = std::fs::read(path).map_err(|source| CoreError::ArtifactIo {
        path: path.display().to_string(),
        source,
    })?;
    Ok(bytes_checksum(&bytes))
}

pub fn bytes_checksum(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}
