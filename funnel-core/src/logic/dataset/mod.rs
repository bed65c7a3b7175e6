//! Dataset Module - Synthetic Funnel Sessions
//!
//! Generates seeded session datasets labelled by a closed-form logistic
//! formula, and exports them as CSV or JSON Lines.

pub mod record;
pub mod label;
pub mod generator;
pub mod export;

#[cfg(test)]
mod tests;

use serde::Serialize;

pub use record::{
    Categorical, DeviceType, DiscountUsage, PurchaseHistory, SessionRecord, TimeOfDay,
    TrafficSource,
};
pub use label::LabelCoefficients;
pub use generator::{generate_dataset, generate_with};
pub use export::ExportFormat;

/// A generated dataset. Records are immutable once produced.
#[derive(Debug, Clone, Serialize)]
pub struct Dataset {
    pub records: Vec<SessionRecord>,
    pub seed: u64,
}

impl Dataset {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Conversion labels, row order
    pub fn labels(&self) -> Vec<u8> {
        self.records.iter().map(|r| r.conversion).collect()
    }

    /// Share of converted sessions (0.0 when empty)
    pub fn conversion_rate(&self) -> f64 {
        if self.records.is_empty() {
            return 0.0;
        }
        let converted = self.records.iter().filter(|r| r.converted()).count();
        converted as f64 / self.records.len() as f64
    }

    /// First `n` records (fewer if the dataset is smaller)
    pub fn head(&self, n: usize) -> &[SessionRecord] {
        &self.records[..n.min(self.records.len())]
    }
}
