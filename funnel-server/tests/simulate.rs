//! Integration tests for the simulation endpoint.

mod common;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use common::{body_json, get};
use tower::ServiceExt;

// ---------------------------------------------------------------------------
// Test: GET /simulate returns every metric and a capped sample
// ---------------------------------------------------------------------------

#[tokio::test]
async fn simulate_returns_metrics_and_sample() {
    let app = common::build_test_app(2_500);
    let response = get(app, "/simulate").await;

    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;

    assert_eq!(json["number_of_users_simulated"], 2_500);
    for key in ["conversion_rate", "accuracy", "precision", "f1_score", "auc", "mse"] {
        let value = json[key].as_f64().unwrap_or_else(|| panic!("{key} is not a number"));
        assert!((0.0..=1.0).contains(&value), "{key} out of range: {value}");
    }
    assert!(json["true_positives"].is_u64());
    assert!(json["false_positives"].is_u64());

    let sample = json["sample_data"].as_array().unwrap();
    assert_eq!(sample.len(), 1_000);
}

// ---------------------------------------------------------------------------
// Test: sample rows carry the dataset column names
// ---------------------------------------------------------------------------

#[tokio::test]
async fn sample_rows_use_column_names() {
    let app = common::build_test_app(300);
    let json = body_json(get(app, "/simulate").await).await;

    let sample = json["sample_data"].as_array().unwrap();
    assert_eq!(sample.len(), 300);

    let row = sample[0].as_object().unwrap();
    for column in [
        "Traffic_Source",
        "Time_Spent_on_Funnel_Stages",
        "Bounce_Rate",
        "Interactions",
        "Number_of_Visits_Before_Conversion",
        "Cart_Abandonment_Rate",
        "Purchase_History",
        "Device_Type",
        "Time_of_Day",
        "Discount_Usage",
        "Loyalty_Score",
        "Noise_Feature_1",
        "Noise_Feature_2",
        "Conversion",
    ] {
        assert!(row.contains_key(column), "missing column {column}");
    }
    assert_eq!(row.len(), 14);
}

// ---------------------------------------------------------------------------
// Test: the dataset seed is fixed, so repeated runs agree
// ---------------------------------------------------------------------------

#[tokio::test]
async fn simulate_is_deterministic_for_fixed_size() {
    let first = body_json(get(common::build_test_app(800), "/simulate").await).await;
    let second = body_json(get(common::build_test_app(800), "/simulate").await).await;

    assert_eq!(first["true_positives"], second["true_positives"]);
    assert_eq!(first["auc"], second["auc"]);
    assert_eq!(first["sample_data"][0], second["sample_data"][0]);
}

// ---------------------------------------------------------------------------
// Test: pipeline failures become a generic 500 body
// ---------------------------------------------------------------------------

#[tokio::test]
async fn simulate_failure_returns_generic_500() {
    let app = common::build_failing_app();
    let response = get(app, "/simulate").await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let json = body_json(response).await;
    assert_eq!(json["status"], 500);
    assert!(json["error"].is_string());
    assert!(!json.to_string().contains("secret.onnx"));
}

// ---------------------------------------------------------------------------
// Test: only GET is routed
// ---------------------------------------------------------------------------

#[tokio::test]
async fn simulate_rejects_post() {
    let app = common::build_test_app(100);
    let request = Request::builder()
        .method(Method::POST)
        .uri("/simulate")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}
