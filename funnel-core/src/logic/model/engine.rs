//! Classifier Engine - loaded once, shared read-only
//!
//! Wraps the active classifier with its metadata and latency counters.
//! ONNX if a model file is present, closed-form fallback otherwise.

use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::{sidecar_path, DEFAULT_THRESHOLD};
use crate::error::{CoreError, CoreResult};
use crate::logic::dataset::SessionRecord;
use crate::logic::features::layout::{layout_hash, FEATURE_VERSION};
use super::artifacts::{file_checksum, load_sidecar};
use super::inference::{Classifier, FormulaClassifier, OnnxClassifier};

/// Model metadata, fixed at load time
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelMetadata {
    pub model_name: String,
    pub model_path: String,
    pub method: String,
    pub checksum: Option<String>,
    pub feature_version: u8,
    pub layout_hash: u32,
    pub threshold: f32,
    pub loaded_at: DateTime<Utc>,
}

/// Engine status for health reporting
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineStatus {
    pub model_loaded: bool,
    #[serde(flatten)]
    pub metadata: ModelMetadata,
    pub inference_count: u64,
    pub avg_latency_ms: f32,
}

pub struct ClassifierEngine {
    classifier: Box<dyn Classifier>,
    metadata: ModelMetadata,
    latency_sum_us: AtomicU64,
    inference_count: AtomicU64,
}

impl ClassifierEngine {
    /// Wrap an already-built classifier
    pub fn new(classifier: Box<dyn Classifier>, model_path: &str, checksum: Option<String>, threshold: f32) -> Self {
        let metadata = ModelMetadata {
            model_name: classifier.name().to_string(),
            model_path: model_path.to_string(),
            method: classifier.method().to_string(),
            checksum,
            feature_version: FEATURE_VERSION,
            layout_hash: layout_hash(),
            threshold,
            loaded_at: Utc::now(),
        };

        Self {
            classifier,
            metadata,
            latency_sum_us: AtomicU64::new(0),
            inference_count: AtomicU64::new(0),
        }
    }

    /// Closed-form fallback engine
    pub fn fallback() -> Self {
        Self::new(Box::new(FormulaClassifier::default()), "<formula>", None, DEFAULT_THRESHOLD)
    }

    /// Load the ONNX model at `model_path` with its sidecar.
    ///
    /// A missing model file falls back to the closed-form classifier
    /// unless `required` is set. Any other artifact error is returned.
    pub fn load(model_path: &str, required: bool) -> CoreResult<Self> {
        if !Path::new(model_path).exists() {
            if required {
                return Err(CoreError::ModelNotFound(model_path.to_string()));
            }
            log::warn!("No ONNX model at {}. Using closed-form fallback.", model_path);
            return Ok(Self::fallback());
        }

        let sidecar = load_sidecar(&sidecar_path(model_path))?;
        let checksum = file_checksum(Path::new(model_path))?;
        let classifier = OnnxClassifier::load(model_path, sidecar.preprocessor())?;

        log::info!("Model checksum (sha256): {}", checksum);

        Ok(Self::new(Box::new(classifier), model_path, Some(checksum), sidecar.threshold))
    }

    /// Score records, tracking latency
    pub fn predict(&self, records: &[SessionRecord]) -> CoreResult<Vec<f32>> {
        let start = std::time::Instant::now();
        let scores = self.classifier.predict_proba(records)?;

        if scores.len() != records.len() {
            return Err(CoreError::Shape(format!(
                "classifier returned {} scores for {} records",
                scores.len(),
                records.len()
            )));
        }

        self.latency_sum_us.fetch_add(start.elapsed().as_micros() as u64, Ordering::Relaxed);
        self.inference_count.fetch_add(1, Ordering::Relaxed);

        Ok(scores)
    }

    pub fn threshold(&self) -> f32 {
        self.metadata.threshold
    }

    pub fn status(&self) -> EngineStatus {
        let sum = self.latency_sum_us.load(Ordering::Relaxed);
        let count = self.inference_count.load(Ordering::Relaxed);
        let avg = if count > 0 { (sum as f32 / count as f32) / 1000.0 } else { 0.0 };

        EngineStatus {
            model_loaded: self.metadata.method == "onnx",
            metadata: self.metadata.clone(),
            inference_count: count,
            avg_latency_ms: avg,
        }
    }
}

impl std::fmt::Debug for ClassifierEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClassifierEngine")
            .field("metadata", &self.metadata)
            .finish_non_exhaustive()
    }
}
