//! Session Record - one simulated user session
//!
//! Categorical columns are strong-typed enums that serialize as their
//! display labels, so a record serializes to the exact column names and
//! values of the tabular dataset.

use serde::{Deserialize, Serialize};

// ============================================================================
// CATEGORICAL COLUMNS
// ============================================================================

/// Common behavior of a categorical column
pub trait Categorical: Copy + Sized + 'static {
    /// Column name in the dataset
    const COLUMN: &'static str;

    /// All variants, in sampling order
    fn variants() -> &'static [Self];

    /// Sampling probability of each variant (same order as `variants`)
    fn probabilities() -> &'static [f64];

    /// Display label
    fn label(self) -> &'static str;

    /// All labels, in sampling order
    fn labels() -> Vec<&'static str> {
        Self::variants().iter().map(|v| v.label()).collect()
    }
}

macro_rules! categorical {
    (
        $name:ident, $column:literal,
        [ $( $variant:ident => $label:literal @ $prob:literal ),+ $(,)? ]
    ) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $label)]
                $variant,
            )+
        }

        impl Categorical for $name {
            const COLUMN: &'static str = $column;

            fn variants() -> &'static [Self] {
                &[ $( $name::$variant ),+ ]
            }

            fn probabilities() -> &'static [f64] {
                &[ $( $prob ),+ ]
            }

            fn label(self) -> &'static str {
                match self {
                    $( $name::$variant => $label, )+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.label())
            }
        }
    };
}

categorical!(TrafficSource, "Traffic_Source", [
    Direct => "Direct" @ 0.3,
    OrganicSearch => "Organic Search" @ 0.4,
    PaidAds => "Paid Ads" @ 0.2,
    SocialMedia => "Social Media" @ 0.1,
]);

categorical!(PurchaseHistory, "Purchase_History", [
    No => "No" @ 0.7,
    Yes => "Yes" @ 0.3,
]);

categorical!(DeviceType, "Device_Type", [
    Mobile => "Mobile" @ 0.6,
    Desktop => "Desktop" @ 0.3,
    Tablet => "Tablet" @ 0.1,
]);

categorical!(TimeOfDay, "Time_of_Day", [
    Morning => "Morning" @ 0.2,
    Afternoon => "Afternoon" @ 0.4,
    Evening => "Evening" @ 0.3,
    Night => "Night" @ 0.1,
]);

categorical!(DiscountUsage, "Discount_Usage", [
    No => "No" @ 0.5,
    Yes => "Yes" @ 0.5,
]);

// ============================================================================
// RECORD
// ============================================================================

/// One simulated user session.
///
/// Field order matches the dataset column order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionRecord {
    #[serde(rename = "Traffic_Source")]
    pub traffic_source: TrafficSource,

    /// Minutes spent across funnel stages, in [1, 30]
    #[serde(rename = "Time_Spent_on_Funnel_Stages")]
    pub time_spent: f64,

    /// In [0, 1]
    #[serde(rename = "Bounce_Rate")]
    pub bounce_rate: f64,

    /// In [1, 20]
    #[serde(rename = "Interactions")]
    pub interactions: u32,

    /// In [1, 10]
    #[serde(rename = "Number_of_Visits_Before_Conversion")]
    pub visits: u32,

    /// In [0, 1]
    #[serde(rename = "Cart_Abandonment_Rate")]
    pub cart_abandonment_rate: f64,

    #[serde(rename = "Purchase_History")]
    pub purchase_history: PurchaseHistory,

    #[serde(rename = "Device_Type")]
    pub device_type: DeviceType,

    #[serde(rename = "Time_of_Day")]
    pub time_of_day: TimeOfDay,

    #[serde(rename = "Discount_Usage")]
    pub discount_usage: DiscountUsage,

    /// In [0, 10]
    #[serde(rename = "Loyalty_Score")]
    pub loyalty_score: f64,

    /// In [0, 1)
    #[serde(rename = "Noise_Feature_1")]
    pub noise_feature_1: f64,

    /// In [0, 99]
    #[serde(rename = "Noise_Feature_2")]
    pub noise_feature_2: u32,

    /// Derived label: 1 = converted
    #[serde(rename = "Conversion")]
    pub conversion: u8,
}

impl SessionRecord {
    pub fn is_organic(&self) -> bool {
        self.traffic_source == TrafficSource::OrganicSearch
    }

    pub fn has_purchase_history(&self) -> bool {
        self.purchase_history == PurchaseHistory::Yes
    }

    pub fn used_discount(&self) -> bool {
        self.discount_usage == DiscountUsage::Yes
    }

    pub fn converted(&self) -> bool {
        self.conversion == 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::dataset::fixtures::sample_record;

    #[test]
    fn test_probabilities_sum_to_one() {
        let sums = [
            TrafficSource::probabilities().iter().sum::<f64>(),
            PurchaseHistory::probabilities().iter().sum::<f64>(),
            DeviceType::probabilities().iter().sum::<f64>(),
            TimeOfDay::probabilities().iter().sum::<f64>(),
            DiscountUsage::probabilities().iter().sum::<f64>(),
        ];
        for sum in sums {
            assert!((sum - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_variants_and_probabilities_align() {
        assert_eq!(TrafficSource::variants().len(), TrafficSource::probabilities().len());
        assert_eq!(DeviceType::variants().len(), DeviceType::probabilities().len());
        assert_eq!(TimeOfDay::variants().len(), TimeOfDay::probabilities().len());
    }

    #[test]
    fn test_serializes_with_column_names() {
        let json = serde_json::to_value(sample_record()).unwrap();

        assert_eq!(json["Traffic_Source"], "Organic Search");
        assert_eq!(json["Purchase_History"], "Yes");
        assert_eq!(json["Number_of_Visits_Before_Conversion"], 3);
        assert_eq!(json["Noise_Feature_2"], 17);
        assert_eq!(json["Conversion"], 1);
        assert_eq!(json.as_object().unwrap().len(), 14);
    }

    #[test]
    fn test_column_order_preserved() {
        let json = serde_json::to_string(&sample_record()).unwrap();
        let source = json.find("Traffic_Source").unwrap();
        let time = json.find("Time_Spent_on_Funnel_Stages").unwrap();
        let conversion = json.find("\"Conversion\"").unwrap();

        assert!(source < time);
        assert!(time < conversion);
    }

    #[test]
    fn test_label_roundtrip_through_serde() {
        let parsed: TrafficSource = serde_json::from_str("\"Paid Ads\"").unwrap();
        assert_eq!(parsed, TrafficSource::PaidAds);
        assert_eq!(parsed.to_string(), "Paid Ads");
    }
}
