//! Conversion Label Model
//!
//! Closed-form logistic formula used to label synthetic sessions.
//! Coefficients are fixed constants, never learned.

use serde::{Deserialize, Serialize};
use super::record::SessionRecord;

/// Coefficients of the synthetic-label formula
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LabelCoefficients {
    /// Intercept
    pub intercept: f64,
    /// Per minute on the funnel
    pub time_spent: f64,
    /// Purchase_History == Yes
    pub purchase_history: f64,
    /// Discount_Usage == Yes
    pub discount: f64,
    /// Traffic_Source == Organic Search
    pub organic_search: f64,
    /// Per unit of bounce rate
    pub bounce_rate: f64,
    /// Per sqrt(interactions)
    pub sqrt_interactions: f64,
    /// Per visit
    pub visits: f64,
    /// Per loyalty point
    pub loyalty: f64,
    /// Organic search AND discount used
    pub organic_discount: f64,
    /// Purchase history times loyalty above 5
    pub purchase_high_loyalty: f64,
}

/// Loyalty level above which the purchase-history bonus kicks in
pub const HIGH_LOYALTY_PIVOT: f64 = 5.0;

impl LabelCoefficients {
    /// Coefficients used by the simulation service
    pub const fn service() -> Self {
        Self {
            intercept: -2.0,
            time_spent: 0.15,
            purchase_history: 1.0,
            discount: 0.6,
            organic_search: 0.4,
            bounce_rate: -1.0,
            sqrt_interactions: 0.3,
            visits: 0.15,
            loyalty: 0.1,
            organic_discount: 0.3,
            purchase_high_loyalty: 0.2,
        }
    }

    /// Coefficients of the offline training dataset
    pub const fn training() -> Self {
        Self {
            discount: 0.8,
            organic_search: 0.5,
            ..Self::service()
        }
    }

    /// Linear predictor `z` for one record
    pub fn linear_predictor(&self, record: &SessionRecord) -> f64 {
        let organic = indicator(record.is_organic());
        let purchase = indicator(record.has_purchase_history());
        let discount = indicator(record.used_discount());

        let mut z = self.intercept
            + self.time_spent * record.time_spent
            + self.purchase_history * purchase
            + self.discount * discount
            + self.organic_search * organic
            + self.bounce_rate * record.bounce_rate
            + self.sqrt_interactions * (record.interactions as f64).sqrt()
            + self.visits * record.visits as f64
            + self.loyalty * record.loyalty_score;

        // Interaction effects
        z += self.organic_discount * organic * discount;
        z += self.purchase_high_loyalty * purchase
            * (record.loyalty_score - HIGH_LOYALTY_PIVOT).max(0.0);

        z
    }

    /// Conversion probability `p = sigmoid(z)`
    pub fn conversion_probability(&self, record: &SessionRecord) -> f64 {
        sigmoid(self.linear_predictor(record))
    }
}

impl Default for LabelCoefficients {
    fn default() -> Self {
        Self::service()
    }
}

/// Logistic link
pub fn sigmoid(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}

fn indicator(flag: bool) -> f64 {
    if flag { 1.0 } else { 0.0 }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::dataset::fixtures::sample_record;
    use crate::logic::dataset::record::{DiscountUsage, PurchaseHistory, TrafficSource};

    #[test]
    fn test_sigmoid_bounds() {
        assert_eq!(sigmoid(0.0), 0.5);
        assert!(sigmoid(40.0) > 0.999_999);
        assert!(sigmoid(-40.0) < 1e-6);
    }

    #[test]
    fn test_linear_predictor_hand_computed() {
        // organic + purchase + discount, loyalty 7, interactions 4, visits 3
        let record = sample_record();
        let coef = LabelCoefficients::service();

        let expected = -2.0
            + 0.15 * 8.5
            + 1.0
            + 0.6
            + 0.4
            - 1.0 * 0.25
            + 0.3 * 2.0
            + 0.15 * 3.0
            + 0.1 * 7.0
            + 0.3
            + 0.2 * 2.0;

        assert!((coef.linear_predictor(&record) - expected).abs() < 1e-12);
        assert!((coef.conversion_probability(&record) - sigmoid(expected)).abs() < 1e-12);
    }

    #[test]
    fn test_interactions_only_apply_when_both_flags_set() {
        let mut record = sample_record();
        record.traffic_source = TrafficSource::Direct;
        record.purchase_history = PurchaseHistory::No;
        record.discount_usage = DiscountUsage::No;
        let coef = LabelCoefficients::service();

        let expected = -2.0
            + 0.15 * 8.5
            - 1.0 * 0.25
            + 0.3 * 2.0
            + 0.15 * 3.0
            + 0.1 * 7.0;

        assert!((coef.linear_predictor(&record) - expected).abs() < 1e-12);
    }

    #[test]
    fn test_low_loyalty_has_no_bonus() {
        let mut record = sample_record();
        record.loyalty_score = 3.0;
        let coef = LabelCoefficients::service();

        let mut without_bonus = coef;
        without_bonus.purchase_high_loyalty = 0.0;

        assert_eq!(coef.linear_predictor(&record), without_bonus.linear_predictor(&record));
    }

    #[test]
    fn test_training_coefficients_differ_only_in_discount_and_organic() {
        let service = LabelCoefficients::service();
        let training = LabelCoefficients::training();

        assert_eq!(training.discount, 0.8);
        assert_eq!(training.organic_search, 0.5);
        assert_eq!(
            LabelCoefficients { discount: 0.6, organic_search: 0.4, ..training },
            service
        );
    }
}
