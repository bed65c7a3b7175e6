//! Evaluation metrics for binary scores

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// Confusion counts at a fixed threshold
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfusionMatrix {
    pub tp: u64,
    pub fp: u64,
    pub tn: u64,
    pub fn_: u64,
}

impl ConfusionMatrix {
    /// Predicted class is `score > threshold`
    pub fn from_scores(labels: &[u8], scores: &[f32], threshold: f32) -> CoreResult<Self> {
        check_lengths(labels, scores)?;

        let mut m = Self::default();
        for (&y, &s) in labels.iter().zip(scores) {
            match (s > threshold, y == 1) {
                (true, true) => m.tp += 1,
                (true, false) => m.fp += 1,
                (false, true) => m.fn_ += 1,
                (false, false) => m.tn += 1,
            }
        }
        Ok(m)
    }

    pub fn total(&self) -> u64 {
        self.tp + self.fp + self.tn + self.fn_
    }

    pub fn accuracy(&self) -> f64 {
        ratio(self.tp + self.tn, self.total())
    }

    /// 0 when nothing is predicted positive
    pub fn precision(&self) -> f64 {
        ratio(self.tp, self.tp + self.fp)
    }

    /// 0 when there are no positives
    pub fn recall(&self) -> f64 {
        ratio(self.tp, self.tp + self.fn_)
    }

    pub fn f1(&self) -> f64 {
        let p = self.precision();
        let r = self.recall();
        if p + r == 0.0 {
            0.0
        } else {
            2.0 * p * r / (p + r)
        }
    }

    /// Share of rows predicted positive
    pub fn predicted_positive_rate(&self) -> f64 {
        ratio(self.tp + self.fp, self.total())
    }
}

/// Labels and scores must pair up one to one
fn check_lengths(labels: &[u8], scores: &[f32]) -> CoreResult<()> {
    if labels.len() != scores.len() {
        return Err(CoreError::Shape(format!(
            "{} labels vs {} scores",
            labels.len(),
            scores.len()
        )));
    }
    Ok(())
}

fn ratio(num: u64, denom: u64) -> f64 {
    if denom == 0 {
        0.0
    } else {
        num as f64 / denom as f64
    }
}

/// Rank-based ROC AUC: (sum_ranks_pos - P(P+1)/2) / (P·N), ties get the
/// average rank. Undefined when only one class is present.
pub fn roc_auc(labels: &[u8], scores: &[f32]) -> CoreResult<f64> {
    check_lengths(labels, scores)?;

    let n = scores.len();
    let p_count = labels.iter().filter(|&&y| y == 1).count();
    let n_count = n - p_count;

    if p_count == 0 || n_count == 0 {
        return Err(CoreError::DegenerateMetrics(
            "only one class present in labels, ROC AUC is undefined".to_string(),
        ));
    }

    let mut items: Vec<(f32, bool)> = scores
        .iter()
        .copied()
        .zip(labels.iter().map(|&y| y == 1))
        .collect();
    items.sort_by(|a, b| a.0.total_cmp(&b.0));

    let mut sum_ranks_pos = 0.0;
    let mut i = 0;
    while i < n {
        let mut j = i + 1;
        while j < n && items[j].0 == items[i].0 {
            j += 1;
        }
        // average 1-based rank over the tie group [i, j)
        let avg_rank = (i as f64 + 1.0 + j as f64) / 2.0;
        let positives = items[i..j].iter().filter(|(_, y)| *y).count();
        sum_ranks_pos += avg_rank * positives as f64;
        i = j;
    }

    let p = p_count as f64;
    let neg = n_count as f64;
    Ok((sum_ranks_pos - p * (p + 1.0) / 2.0) / (p * neg))
}

/// Mean squared error between labels and scores
pub fn mean_squared_error(labels: &[u8], scores: &[f32]) -> CoreResult<f64> {
    check_lengths(labels, scores)?;

    if labels.is_empty() {
        return Ok(0.0);
    }
    let sum: f64 = labels
        .iter()
        .zip(scores)
        .map(|(&y, &s)| (y as f64 - s as f64).powi(2))
        .sum();
    Ok(sum / labels.len() as f64)
}
