//! Funnel Simulator server binary

use anyhow::Context;
use funnel_core::ClassifierEngine;
use funnel_server::{create_router, AppState, Config};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::from_env();

    // Initialize logging (JSON lines in production)
    let json_logs = config.is_production();
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "funnel_server=debug,funnel_core=info,tower_http=debug".into()))
        .with(json_logs.then(|| tracing_subscriber::fmt::layer().json()))
        .with((!json_logs).then(|| tracing_subscriber::fmt::layer()))
        .init();

    tracing::info!("Funnel Simulator server starting ({})...", config.environment);
    tracing::info!(
        "Users per request: {}..={}, seed {}, sample size {}",
        config.min_users,
        config.max_users,
        config.simulation_seed,
        config.sample_size
    );

    // Load the frozen classifier once
    let engine = ClassifierEngine::load(&config.model_path, config.model_required)
        .with_context(|| format!("Failed to load model from {}", config.model_path))?;
    let status = engine.status();
    tracing::info!(
        "Classifier ready: {} ({}, layout v{} {:08x})",
        status.metadata.model_name,
        status.metadata.method,
        status.metadata.feature_version,
        status.metadata.layout_hash
    );

    let addr = config.bind_addr();
    let app = create_router(AppState::new(engine, config));

    // Start server
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!("🚀 Server listening on http://{}", addr);

    axum::serve(listener, app).await.context("Server error")?;
    Ok(())
}
