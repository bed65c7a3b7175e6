//! Logic Module - simulation pipeline
//!
//! - `dataset/` - synthetic sessions, label model, export
//! - `features/` - layout, encoders, scaler, model input matrix
//! - `model/` - artifacts and inference (ONNX, closed-form fallback)
//! - `evaluation/` - classification metrics
//! - `simulation` - one end-to-end run

pub mod dataset;
pub mod features;
pub mod model;
pub mod evaluation;
pub mod simulation;
