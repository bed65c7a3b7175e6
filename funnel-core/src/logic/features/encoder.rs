//! Label Encoders - categorical label → integer code
//!
//! Codes are positions in the lexicographically sorted class list, so the
//! default encoders reproduce what a conventional label encoder fit on the
//! full category set would emit.

use std::collections::HashMap;

use crate::error::{CoreError, CoreResult};
use crate::logic::dataset::record::{
    Categorical, DeviceType, DiscountUsage, PurchaseHistory, TimeOfDay, TrafficSource,
};

/// Encoder for one categorical column
#[derive(Debug, Clone, PartialEq)]
pub struct LabelEncoder {
    column: String,
    classes: Vec<String>,
}

impl LabelEncoder {
    /// Build from any class list; classes are sorted and de-duplicated
    pub fn new(column: impl Into<String>, classes: Vec<String>) -> Self {
        let mut classes = classes;
        classes.sort();
        classes.dedup();
        Self { column: column.into(), classes }
    }

    /// Encoder covering every variant of a categorical column
    pub fn for_column<C: Categorical>() -> Self {
        Self::new(C::COLUMN, C::labels().into_iter().map(String::from).collect())
    }

    pub fn column(&self) -> &str {
        &self.column
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    /// Code of `label`; unknown labels are an error
    pub fn transform(&self, label: &str) -> CoreResult<usize> {
        self.classes
            .binary_search_by(|c| c.as_str().cmp(label))
            .map_err(|_| CoreError::UnknownCategory {
                column: self.column.clone(),
                label: label.to_string(),
            })
    }

    /// Label of `code`
    pub fn inverse(&self, code: usize) -> Option<&str> {
        self.classes.get(code).map(String::as_str)
    }
}

/// Encoders for every categorical column of the layout
#[derive(Debug, Clone)]
pub struct EncoderSet {
    encoders: HashMap<String, LabelEncoder>,
}

impl EncoderSet {
    /// Encoders derived from the known category sets
    pub fn defaults() -> Self {
        let encoders = [
            LabelEncoder::for_column::<TrafficSource>(),
            LabelEncoder::for_column::<PurchaseHistory>(),
            LabelEncoder::for_column::<DeviceType>(),
            LabelEncoder::for_column::<TimeOfDay>(),
            LabelEncoder::for_column::<DiscountUsage>(),
        ]
        .into_iter()
        .map(|e| (e.column.clone(), e))
        .collect();

        Self { encoders }
    }

    /// Defaults, with the given columns replaced by artifact class lists
    pub fn with_overrides(overrides: HashMap<String, Vec<String>>) -> Self {
        let mut set = Self::defaults();
        for (column, classes) in overrides {
            if !super::layout::is_categorical(&column) {
                log::warn!("Ignoring encoder for non-categorical column {}", column);
                continue;
            }
            set.encoders.insert(column.clone(), LabelEncoder::new(column, classes));
        }
        set
    }

    pub fn get(&self, column: &str) -> Option<&LabelEncoder> {
        self.encoders.get(column)
    }

    /// Encode a categorical value as a float feature
    pub fn encode<C: Categorical>(&self, value: C) -> CoreResult<f64> {
        let encoder = self.get(C::COLUMN).ok_or_else(|| CoreError::UnknownCategory {
            column: C::COLUMN.to_string(),
            label: value.label().to_string(),
        })?;
        Ok(encoder.transform(value.label())? as f64)
    }
}

impl Default for EncoderSet {
    fn default() -> Self {
        Self::defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classes_sorted() {
        let encoder = LabelEncoder::for_column::<TrafficSource>();
        assert_eq!(
            encoder.classes(),
            &["Direct", "Organic Search", "Paid Ads", "Social Media"]
        );

        let device = LabelEncoder::for_column::<DeviceType>();
        assert_eq!(device.classes(), &["Desktop", "Mobile", "Tablet"]);
        assert_eq!(device.transform("Mobile").unwrap(), 1);
    }

    #[test]
    fn test_time_of_day_codes() {
        let encoder = LabelEncoder::for_column::<TimeOfDay>();
        assert_eq!(encoder.transform("Afternoon").unwrap(), 0);
        assert_eq!(encoder.transform("Evening").unwrap(), 1);
        assert_eq!(encoder.transform("Morning").unwrap(), 2);
        assert_eq!(encoder.transform("Night").unwrap(), 3);
        assert_eq!(encoder.inverse(2), Some("Morning"));
    }

    #[test]
    fn test_unknown_label_rejected() {
        let encoder = LabelEncoder::for_column::<PurchaseHistory>();
        let err = encoder.transform("Maybe").unwrap_err();
        assert!(matches!(err, CoreError::UnknownCategory { .. }));
    }

    #[test]
    fn test_new_dedups() {
        let encoder = LabelEncoder::new("X", vec!["b".into(), "a".into(), "b".into()]);
        assert_eq!(encoder.classes(), &["a", "b"]);
    }

    #[test]
    fn test_overrides() {
        let mut overrides = HashMap::new();
        overrides.insert("Discount_Usage".to_string(), vec!["Yes".to_string()]);
        overrides.insert("Bounce_Rate".to_string(), vec!["x".to_string()]);
        let set = EncoderSet::with_overrides(overrides);

        assert_eq!(set.encode(DiscountUsage::Yes).unwrap(), 0.0);
        assert!(set.encode(DiscountUsage::No).is_err());
        assert!(set.get("Bounce_Rate").is_none());
        assert_eq!(set.encode(PurchaseHistory::Yes).unwrap(), 1.0);
    }
}
