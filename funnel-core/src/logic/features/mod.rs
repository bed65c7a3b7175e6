//! Features Module - Model Input Preparation
//!
//! Turns session records into the standardized matrix the classifier
//! was trained on.

pub mod layout;
pub mod encoder;
pub mod scaler;
pub mod matrix;


// Re-export common types
pub use layout::{FEATURE_COUNT, FEATURE_LAYOUT, LayoutMismatchError};
pub use encoder::{EncoderSet, LabelEncoder};
pub use scaler::StandardScaler;
pub use matrix::Preprocessor;
