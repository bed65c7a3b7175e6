//! Model Module - Frozen Classifier
//!
//! Artifact loading and inference, kept apart from data synthesis.
//! Easy to swap the model: anything implementing `Classifier` plugs in.

pub mod artifacts;
pub mod inference;
pub mod engine;

// Re-export common types
pub use artifacts::ModelSidecar;
pub use inference::{Classifier, FormulaClassifier, OnnxClassifier};
pub use engine::{ClassifierEngine, EngineStatus, ModelMetadata};
