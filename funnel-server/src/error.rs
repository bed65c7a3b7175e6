//! Error handling

use axum::{
    response::{IntoResponse, Response},
    http::StatusCode,
    Json,
};
use funnel_core::CoreError;
use serde_json::json;

pub type AppResult<T> = Result<T, AppError>;

/// Body message for every failed simulation; detail stays in the log
pub const SIMULATION_FAILED: &str = "Simulation failed";

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Any failure inside the simulation pipeline
    #[error("simulation error: {0}")]
    Simulation(#[from] CoreError),

    /// Blocking task panicked or was cancelled
    #[error("worker error: {0}")]
    Worker(#[from] tokio::task::JoinError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match &self {
            AppError::Simulation(err) => {
                tracing::error!("Simulation error: {}", err);
                (StatusCode::INTERNAL_SERVER_ERROR, SIMULATION_FAILED)
            }
            AppError::Worker(err) => {
                tracing::error!("Simulation worker error: {}", err);
                (StatusCode::INTERNAL_SERVER_ERROR, SIMULATION_FAILED)
            }
        };

        let body = Json(json!({
            "error": error_message,
            "status": status.as_u16()
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_of(err: AppError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_core_error_is_generic_500() {
        let err = AppError::from(CoreError::DegenerateMetrics("only one class".to_string()));
        let (status, json) = body_of(err).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json["error"], SIMULATION_FAILED);
        assert_eq!(json["status"], 500);
        assert!(!json.to_string().contains("only one class"));
    }

    #[tokio::test]
    async fn test_join_error_is_generic_500() {
        let handle = tokio::spawn(async { panic!("boom") });
        let err = AppError::from(handle.await.unwrap_err());
        let (status, json) = body_of(err).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json["error"], SIMULATION_FAILED);
    }
}
