//! Simulation handler

use axum::{extract::State, Json};
use funnel_core::{run_simulation, SimulationParams, SimulationReport};

use crate::{AppResult, AppState};

/// GET /simulate - run one simulation with a random number of users
pub async fn simulate(State(state): State<AppState>) -> AppResult<Json<SimulationReport>> {
    let params = SimulationParams::random(
        state.config.user_range(),
        state.config.simulation_seed,
        state.config.sample_size,
    );
    tracing::info!(num_users = params.num_users, "Running simulation");

    let engine = state.engine.clone();
    let report = tokio::task::spawn_blocking(move || run_simulation(&engine, &params)).await??;

    tracing::info!(
        num_users = report.number_of_users_simulated,
        accuracy = report.accuracy,
        auc = report.auc,
        "Simulation complete"
    );

    Ok(Json(report))
}
