//! Feature Layout - Centralized Feature Definition
//!
//! **This file controls the model input schema**
//!
//! ## Rules:
//! 1. Add feature → increment FEATURE_VERSION
//! 2. Change order → increment FEATURE_VERSION
//! 3. Remove feature → increment FEATURE_VERSION
//!
//! Preprocessing sidecars record the version and hash they were fit
//! against; a mismatch is rejected at load time.

use crc32fast::Hasher;

// ============================================================================
// FEATURE VERSION
// ============================================================================

/// Current feature layout version
pub const FEATURE_VERSION: u8 = 1;

// ============================================================================
// FEATURE LAYOUT (Authoritative source)
// ============================================================================

/// Model input columns in the exact order they appear in a row
pub const FEATURE_LAYOUT: &[&str] = &[
    "Traffic_Source",                       // 0: categorical
    "Time_Spent_on_Funnel_Stages",          // 1
    "Bounce_Rate",                          // 2
    "Interactions",                         // 3
    "Number_of_Visits_Before_Conversion",   // 4
    "Cart_Abandonment_Rate",                // 5
    "Purchase_History",                     // 6: categorical
    "Device_Type",                          // 7: categorical
    "Time_of_Day",                          // 8: categorical
    "Discount_Usage",                       // 9: categorical
    "Loyalty_Score",                        // 10
    "Noise_Feature_1",                      // 11
    "Noise_Feature_2",                      // 12
];

/// Total number of features
/// Must match FEATURE_LAYOUT.len()
pub const FEATURE_COUNT: usize = 13;

/// Columns that go through a label encoder
pub const CATEGORICAL_COLUMNS: &[&str] = &[
    "Traffic_Source",
    "Purchase_History",
    "Device_Type",
    "Time_of_Day",
    "Discount_Usage",
];

// ============================================================================
// LAYOUT HASH
// ============================================================================

/// CRC32 over the version byte and the NUL-separated column names
pub fn layout_hash() -> u32 {
    let mut hasher = Hasher::new();

    hasher.update(&[FEATURE_VERSION]);

    for name in FEATURE_LAYOUT {
        hasher.update(name.as_bytes());
        hasher.update(&[0]); // Separator
    }

    hasher.finalize()
}

// ============================================================================
// LAYOUT VALIDATION
// ============================================================================

/// Error when a preprocessing artifact doesn't match the current layout
#[derive(Debug, Clone)]
pub struct LayoutMismatchError {
    pub expected_version: u8,
    pub expected_hash: u32,
    pub actual_version: u8,
    pub actual_hash: u32,
}

impl std::fmt::Display for LayoutMismatchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Feature layout mismatch: expected v{} (hash: {:08x}), got v{} (hash: {:08x})",
            self.expected_version,
            self.expected_hash,
            self.actual_version,
            self.actual_hash
        )
    }
}

impl std::error::Error for LayoutMismatchError {}

/// Validate that an artifact matches the current layout.
/// A missing hash is checked by version only.
pub fn validate_layout(version: u8, hash: Option<u32>) -> Result<(), LayoutMismatchError> {
    let current_hash = layout_hash();
    let hash_ok = hash.map_or(true, |h| h == current_hash);

    if version != FEATURE_VERSION || !hash_ok {
        return Err(LayoutMismatchError {
            expected_version: FEATURE_VERSION,
            expected_hash: current_hash,
            actual_version: version,
            actual_hash: hash.unwrap_or(0),
        });
    }

    Ok(())
}

// ============================================================================
// FEATURE INDEX LOOKUP
// ============================================================================

/// Get feature index by name
pub fn feature_index(name: &str) -> Option<usize> {
    FEATURE_LAYOUT.iter().position(|&n| n == name)
}

/// Get feature name by index
pub fn feature_name(index: usize) -> Option<&'static str> {
    FEATURE_LAYOUT.get(index).copied()
}

pub fn is_categorical(name: &str) -> bool {
    CATEGORICAL_COLUMNS.contains(&name)
}

// ============================================================================
// TESTS
// ============================================================================
