//! Central Configuration Constants
//!
//! Single source of truth for simulation defaults.

/// Default dataset seed, applied on every simulation
pub const DEFAULT_SEED: u64 = 42;

/// Lower bound of simulated users per request (inclusive)
pub const DEFAULT_MIN_USERS: usize = 10_000;

/// Upper bound of simulated users per request (inclusive)
pub const DEFAULT_MAX_USERS: usize = 200_000;

/// Maximum number of records returned in a report
pub const DEFAULT_SAMPLE_SIZE: usize = 1_000;

/// Probability cut-off for the positive class
pub const DEFAULT_THRESHOLD: f32 = 0.5;

/// Default model location
pub const DEFAULT_MODEL_PATH: &str = "saved_model/model.onnx";

/// Suffix appended to the model path to locate its preprocessing sidecar
pub const SIDECAR_SUFFIX: &str = ".json";

/// Default row count for the offline generator
pub const DEFAULT_GENERATE_ROWS: usize = 10_000;

/// Default output of the offline generator
pub const DEFAULT_GENERATE_OUTPUT: &str = "funnel_conversion_data.csv";

/// Sidecar path for a given model path (`model.onnx` → `model.onnx.json`)
pub fn sidecar_path(model_path: &str) -> String {
    format!("{}{}", model_path, SIDECAR_SUFFIX)
}
