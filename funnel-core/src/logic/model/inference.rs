//! Inference - ONNX Runtime Integration
//!
//! Frozen classifiers that score session records with a conversion
//! probability. The ONNX classifier owns its preprocessing; the formula
//! classifier scores with the closed-form label model and needs none.

use ndarray::{s, Array2};
use ort::session::{builder::GraphOptimizationLevel, Session};
use ort::value::Value;
use parking_lot::Mutex;

use crate::error::{CoreError, CoreResult};
use crate::logic::dataset::{LabelCoefficients, SessionRecord};
use crate::logic::features::Preprocessor;

/// Rows per ONNX run
pub const INFERENCE_BATCH_SIZE: usize = 16_384;

// ============================================================================
// CLASSIFIER TRAIT
// ============================================================================

/// Frozen scoring function (ONNX, closed-form, ...)
pub trait Classifier: Send + Sync {
    /// Human-readable model name
    fn name(&self) -> &str;

    /// Short method tag: "onnx", "formula"
    fn method(&self) -> &'static str;

    /// Positive-class probability per record, row order
    fn predict_proba(&self, records: &[SessionRecord]) -> CoreResult<Vec<f32>>;
}

// ============================================================================
// ONNX IMPLEMENTATION
// ============================================================================

/// ONNX model with its preprocessing
pub struct OnnxClassifier {
    name: String,
    session: Mutex<Session>,
    output_name: String,
    preprocessor: Preprocessor,
}

impl OnnxClassifier {
    /// Load an ONNX model from file
    pub fn load(model_path: &str, preprocessor: Preprocessor) -> CoreResult<Self> {
        log::info!("Loading ONNX model from: {}", model_path);

        if !std::path::Path::new(model_path).exists() {
            return Err(CoreError::ModelNotFound(model_path.to_string()));
        }

        let session = Session::builder()
            .map_err(|e| CoreError::Inference(format!("Failed to create session builder: {}", e)))?
            .with_optimization_level(GraphOptimizationLevel::Level3)
            .map_err(|e| CoreError::Inference(format!("Failed to set optimization: {}", e)))?
            .commit_from_file(model_path)
            .map_err(|e| CoreError::Inference(format!("Failed to load model: {}", e)))?;

        let output_name = session.outputs.first()
            .map(|o| o.name.clone())
            .ok_or_else(|| CoreError::Inference("No output defined".to_string()))?;

        log::info!("ONNX model loaded successfully (output: {})", output_name);

        let name = std::path::Path::new(model_path)
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| model_path.to_string());

        Ok(Self {
            name,
            session: Mutex::new(session),
            output_name,
            preprocessor,
        })
    }

    /// Run one `[n, FEATURE_COUNT]` batch
    fn run_batch(&self, batch: Array2<f32>) -> CoreResult<Vec<f32>> {
        let rows = batch.nrows();

        let input_tensor = Value::from_array(batch)
            .map_err(|e| CoreError::Inference(format!("Tensor error: {}", e)))?;

        let mut session = self.session.lock();
        let outputs = session.run(ort::inputs![input_tensor])
            .map_err(|e| CoreError::Inference(format!("Inference failed: {}", e)))?;

        let output = outputs.get(&self.output_name)
            .ok_or_else(|| CoreError::Inference("No output".to_string()))?;

        let (_, data) = output.try_extract_tensor::<f32>()
            .map_err(|e| CoreError::Inference(format!("Extract error: {}", e)))?;

        // [n] or [n, 1], raveled
        if data.len() != rows {
            return Err(CoreError::Shape(format!(
                "model returned {} values for {} rows",
                data.len(),
                rows
            )));
        }

        Ok(data.to_vec())
    }
}

impl Classifier for OnnxClassifier {
    fn name(&self) -> &str {
        &self.name
    }

    fn method(&self) -> &'static str {
        "onnx"
    }

    fn predict_proba(&self, records: &[SessionRecord]) -> CoreResult<Vec<f32>> {
        let matrix = self.preprocessor.transform(records)?;
        let mut scores = Vec::with_capacity(records.len());

        let mut start = 0;
        while start < matrix.nrows() {
            let end = (start + INFERENCE_BATCH_SIZE).min(matrix.nrows());
            let batch = matrix.slice(s![start..end, ..]).to_owned();
            scores.extend(self.run_batch(batch)?);
            start = end;
        }

        Ok(scores)
    }
}

// ============================================================================
// FORMULA IMPLEMENTATION (fallback)
// ============================================================================

/// Scores with the closed-form label probability
#[derive(Debug, Clone, Default)]
pub struct FormulaClassifier {
    pub coefficients: LabelCoefficients,
}

impl FormulaClassifier {
    pub fn new(coefficients: LabelCoefficients) -> Self {
        Self { coefficients }
    }
}

impl Classifier for FormulaClassifier {
    fn name(&self) -> &str {
        "closed-form"
    }

    fn method(&self) -> &'static str {
        "formula"
    }

    fn predict_proba(&self, records: &[SessionRecord]) -> CoreResult<Vec<f32>> {
        Ok(records
            .iter()
            .map(|r| self.coefficients.conversion_probability(r) as f32)
            .collect())
    }
}
