//! Standard Scaler - per-feature standardization
//!
//! `(x - mean) / scale`, parameters fit offline and shipped in the model
//! sidecar. A zero scale is treated as 1.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use super::layout::FEATURE_COUNT;

/// Scaler parameters, one entry per layout feature
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardScaler {
    pub mean: Vec<f64>,
    pub scale: Vec<f64>,
}

impl StandardScaler {
    pub fn new(mean: Vec<f64>, scale: Vec<f64>) -> CoreResult<Self> {
        let scaler = Self { mean, scale };
        scaler.validate()?;
        Ok(scaler)
    }

    /// No-op scaler
    pub fn identity() -> Self {
        Self {
            mean: vec![0.0; FEATURE_COUNT],
            scale: vec![1.0; FEATURE_COUNT],
        }
    }

    pub fn validate(&self) -> CoreResult<()> {
        if self.mean.len() != FEATURE_COUNT || self.scale.len() != FEATURE_COUNT {
            return Err(CoreError::Shape(format!(
                "scaler expects {} features, got mean={} scale={}",
                FEATURE_COUNT,
                self.mean.len(),
                self.scale.len()
            )));
        }
        if self.mean.iter().chain(&self.scale).any(|v| !v.is_finite()) {
            return Err(CoreError::Shape("scaler parameters must be finite".to_string()));
        }
        Ok(())
    }

    /// Standardize one row in place
    pub fn transform_row(&self, row: &mut [f64; FEATURE_COUNT]) {
        for (i, value) in row.iter_mut().enumerate() {
            let scale = if self.scale[i] == 0.0 { 1.0 } else { self.scale[i] };
            *value = (*value - self.mean[i]) / scale;
        }
    }
}

impl Default for StandardScaler {
    fn default() -> Self {
        Self::identity()
    }
}
