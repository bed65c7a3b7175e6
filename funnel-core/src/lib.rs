//! Funnel Simulator - Core Engine
//!
//! Synthesizes marketing-funnel sessions, scores them with a frozen
//! classifier and evaluates the predictions against the synthetic labels.
//!
//! # Pipeline
//!
//! ```text
//! ┌────────────┐   ┌──────────────┐   ┌────────────┐   ┌────────────┐
//! │  dataset   │──▶│  features    │──▶│  model     │──▶│ evaluation │
//! │ (generate) │   │ (encode +    │   │ (ONNX or   │   │ (metrics)  │
//! │            │   │  scale)      │   │  formula)  │   │            │
//! └────────────┘   └──────────────┘   └────────────┘   └────────────┘
//! ```

pub mod constants;
pub mod error;
pub mod logic;

pub use error::{CoreError, CoreResult};
pub use logic::dataset::{generate_dataset, Dataset, SessionRecord};
pub use logic::evaluation::EvaluationMetrics;
pub use logic::model::{ClassifierEngine, EngineStatus};
pub use logic::simulation::{run_simulation, SimulationParams, SimulationReport};
