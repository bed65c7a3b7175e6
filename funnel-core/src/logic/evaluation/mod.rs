//! Evaluation Module - scores vs synthetic labels

pub mod metrics;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
pub use metrics::{mean_squared_error, roc_auc, ConfusionMatrix};

/// Everything reported about one scored dataset
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationMetrics {
    pub accuracy: f64,
    pub precision: f64,
    pub recall: f64,
    pub f1_score: f64,
    pub auc: f64,
    pub mse: f64,
    /// Share of rows predicted to convert
    pub conversion_rate: f64,
    pub confusion: ConfusionMatrix,
}

impl EvaluationMetrics {
    pub fn compute(labels: &[u8], scores: &[f32], threshold: f32) -> CoreResult<Self> {
        if labels.is_empty() {
            return Err(CoreError::DegenerateMetrics("no rows to evaluate".to_string()));
        }

        let confusion = ConfusionMatrix::from_scores(labels, scores, threshold)?;

        Ok(Self {
            accuracy: confusion.accuracy(),
            precision: confusion.precision(),
            recall: confusion.recall(),
            f1_score: confusion.f1(),
            auc: roc_auc(labels, scores)?,
            mse: mean_squared_error(labels, scores)?,
            conversion_rate: confusion.predicted_positive_rate(),
            confusion,
        })
    }

    pub fn true_positives(&self) -> u64 {
        self.confusion.tp
    }

    pub fn false_positives(&self) -> u64 {
        self.confusion.fp
    }
}
