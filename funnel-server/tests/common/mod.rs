//! Shared helpers for server integration tests.

#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use funnel_core::logic::model::Classifier;
use funnel_core::{ClassifierEngine, CoreError, CoreResult, SessionRecord};
use funnel_server::{create_router, AppState, Config};
use http_body_util::BodyExt;
use tower::ServiceExt;

/// Small, fixed-size simulations so tests stay fast.
pub fn test_config(num_users: usize) -> Config {
    Config {
        min_users: num_users,
        max_users: num_users,
        ..Config::default()
    }
}

/// Router backed by the closed-form fallback classifier.
pub fn build_test_app(num_users: usize) -> Router {
    create_router(AppState::new(ClassifierEngine::fallback(), test_config(num_users)))
}

/// Router backed by a classifier that always fails.
pub fn build_failing_app() -> Router {
    let engine = ClassifierEngine::new(Box::new(FailingClassifier), "failing", None, 0.5);
    create_router(AppState::new(engine, test_config(100)))
}

struct FailingClassifier;

impl Classifier for FailingClassifier {
    fn name(&self) -> &str {
        "failing"
    }

    fn method(&self) -> &'static str {
        "failing"
    }

    fn predict_proba(&self, _records: &[SessionRecord]) -> CoreResult<Vec<f32>> {
        Err(CoreError::Inference("session poisoned at /models/secret.onnx".to_string()))
    }
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
