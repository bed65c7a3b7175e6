//! Simulation - one end-to-end funnel run
//!
//! generate → score → evaluate → report

use std::ops::RangeInclusive;
use std::time::Instant;

use rand::Rng;
use serde::Serialize;

use crate::constants::{DEFAULT_MAX_USERS, DEFAULT_MIN_USERS, DEFAULT_SAMPLE_SIZE, DEFAULT_SEED};
use crate::error::CoreResult;
use crate::logic::dataset::{generate_dataset, SessionRecord};
use crate::logic::evaluation::EvaluationMetrics;
use crate::logic::model::ClassifierEngine;

/// Inputs of one simulation run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimulationParams {
    pub num_users: usize,
    pub seed: u64,
    pub sample_size: usize,
}

impl SimulationParams {
    /// Draw `num_users` uniformly from `users` (inclusive). Inverted
    /// bounds are swapped.
    pub fn random(users: RangeInclusive<usize>, seed: u64, sample_size: usize) -> Self {
        let (lo, hi) = users.into_inner();
        let num_users = rand::thread_rng().gen_range(lo.min(hi)..=lo.max(hi));
        Self { num_users, seed, sample_size }
    }
}

impl Default for SimulationParams {
    fn default() -> Self {
        Self::random(DEFAULT_MIN_USERS..=DEFAULT_MAX_USERS, DEFAULT_SEED, DEFAULT_SAMPLE_SIZE)
    }
}

/// Response body of `/simulate`
#[derive(Debug, Clone, Serialize)]
pub struct SimulationReport {
    pub number_of_users_simulated: usize,
    pub conversion_rate: f64,
    pub accuracy: f64,
    pub precision: f64,
    pub f1_score: f64,
    pub auc: f64,
    pub mse: f64,
    pub true_positives: u64,
    pub false_positives: u64,
    pub sample_data: Vec<SessionRecord>,
}

impl SimulationReport {
    fn new(num_users: usize, metrics: &EvaluationMetrics, sample_data: Vec<SessionRecord>) -> Self {
        Self {
            number_of_users_simulated: num_users,
            conversion_rate: metrics.conversion_rate,
            accuracy: metrics.accuracy,
            precision: metrics.precision,
            f1_score: metrics.f1_score,
            auc: metrics.auc,
            mse: metrics.mse,
            true_positives: metrics.true_positives(),
            false_positives: metrics.false_positives(),
            sample_data,
        }
    }
}

/// Run the full pipeline. CPU-bound; call from a blocking context.
pub fn run_simulation(engine: &ClassifierEngine, params: &SimulationParams) -> CoreResult<SimulationReport> {
    let start = Instant::now();

    let dataset = generate_dataset(params.num_users, params.seed)?;
    let scores = engine.predict(&dataset.records)?;
    let metrics = EvaluationMetrics::compute(&dataset.labels(), &scores, engine.threshold())?;

    log::debug!(
        "Simulated {} users in {:?} (auc={:.4}, predicted conversion={:.4})",
        dataset.len(),
        start.elapsed(),
        metrics.auc,
        metrics.conversion_rate
    );

    let sample = dataset.head(params.sample_size).to_vec();
    Ok(SimulationReport::new(dataset.len(), &metrics, sample))
}
