//! Funnel Simulator - HTTP Service
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    FUNNEL SERVER                            │
//! ├─────────────────────────────────────────────────────────────┤
//! │  ┌───────────┐   ┌────────────────┐   ┌──────────────────┐ │
//! │  │  Router   │──▶│  spawn_blocking│──▶│  funnel-core     │ │
//! │  │  (Axum)   │   │  (per request) │   │  run_simulation  │ │
//! │  └───────────┘   └────────────────┘   └────────┬─────────┘ │
//! │                                                ▼           │
//! │                                  ┌──────────────────────┐  │
//! │                                  │ ClassifierEngine     │  │
//! │                                  │ (Arc, loaded once)   │  │
//! │                                  └──────────────────────┘  │
//! └─────────────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod error;
pub mod handlers;

use std::sync::Arc;

use axum::{routing::get, Router};
use funnel_core::ClassifierEngine;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub use config::Config;
pub use error::{AppError, AppResult};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<ClassifierEngine>,
    pub config: Config,
}

impl AppState {
    pub fn new(engine: ClassifierEngine, config: Config) -> Self {
        Self {
            engine: Arc::new(engine),
            config,
        }
    }
}

/// Create the main router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health::check))
        .route("/simulate", get(handlers::simulate::simulate))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        )
        .with_state(state)
}
