//! Feature Matrix - records → model input tensor
//!
//! Encodes categorical columns, standardizes every column and lays rows
//! out in `FEATURE_LAYOUT` order.

use ndarray::Array2;

use crate::error::{CoreError, CoreResult};
use crate::logic::dataset::SessionRecord;
use super::encoder::EncoderSet;
use super::layout::FEATURE_COUNT;
use super::scaler::StandardScaler;

/// Encoders + scaler, frozen at load time
#[derive(Debug, Clone, Default)]
pub struct Preprocessor {
    pub encoders: EncoderSet,
    pub scaler: StandardScaler,
}

impl Preprocessor {
    pub fn new(encoders: EncoderSet, scaler: StandardScaler) -> Self {
        Self { encoders, scaler }
    }

    /// Encoded but unscaled row, layout order
    pub fn raw_row(&self, r: &SessionRecord) -> CoreResult<[f64; FEATURE_COUNT]> {
        let enc = &self.encoders;
        Ok([
            enc.encode(r.traffic_source)?,
            r.time_spent,
            r.bounce_rate,
            r.interactions as f64,
            r.visits as f64,
            r.cart_abandonment_rate,
            enc.encode(r.purchase_history)?,
            enc.encode(r.device_type)?,
            enc.encode(r.time_of_day)?,
            enc.encode(r.discount_usage)?,
            r.loyalty_score,
            r.noise_feature_1,
            r.noise_feature_2 as f64,
        ])
    }

    /// Encoded and scaled row
    pub fn transform_row(&self, record: &SessionRecord) -> CoreResult<[f64; FEATURE_COUNT]> {
        let mut row = self.raw_row(record)?;
        self.scaler.transform_row(&mut row);
        Ok(row)
    }

    /// `[records.len(), FEATURE_COUNT]` f32 matrix
    pub fn transform(&self, records: &[SessionRecord]) -> CoreResult<Array2<f32>> {
        let mut data = Vec::with_capacity(records.len() * FEATURE_COUNT);
        for record in records {
            let row = self.transform_row(record)?;
            data.extend(row.iter().map(|&v| v as f32));
        }

        Array2::from_shape_vec((records.len(), FEATURE_COUNT), data)
            .map_err(|e| CoreError::Shape(format!("feature matrix: {}", e)))
    }
}
