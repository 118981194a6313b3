use std::path::{Path, PathBuf};

use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use prediction_cell::services::model::{load_predictor, RemoteInferenceModel, TreeEnsembleModel};
use shared_models::predictor::{PredictorError, WaitPredictor};
use shared_utils::test_utils::{sample_features, TestConfig};

fn artifact_json() -> serde_json::Value {
    json!({
        "feature_names": [
            "day_of_week",
            "month",
            "hour",
            "days_between_schedule_and_visit",
            "sex_encoded",
            "age"
        ],
        "trees": [
            {
                "nodes": [
                    { "feature": 2, "threshold": 10.0, "left": 1, "right": 2 },
                    { "value": 12.0 },
                    { "value": 6.0 }
                ]
            },
            {
                "nodes": [
                    { "value": 8.0 }
                ]
            }
        ]
    })
}

fn write_artifact(dir: &tempfile::TempDir, value: &serde_json::Value) -> PathBuf {
    let path = dir.path().join("model.json");
    std::fs::write(&path, serde_json::to_string(value).unwrap()).unwrap();
    path
}

#[tokio::test]
async fn ensemble_scores_are_averaged() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_artifact(&dir, &artifact_json());
    let model = TreeEnsembleModel::load(&path).unwrap();

    // hour 9 takes the left branch (12.0), the stump adds 8.0
    let base = sample_features();
    assert_eq!(model.predict(&base).await.unwrap(), 10.0);

    // hour 12 takes the right branch (6.0)
    assert_eq!(model.predict(&base.with_hour(12)).await.unwrap(), 7.0);
}

#[tokio::test]
async fn predictions_are_floored_at_zero() {
    let dir = tempfile::tempdir().unwrap();
    let mut artifact = artifact_json();
    artifact["trees"] = json!([{ "nodes": [{ "value": -3.0 }] }]);
    let path = write_artifact(&dir, &artifact);

    let model = TreeEnsembleModel::load(&path).unwrap();
    assert_eq!(model.predict(&sample_features()).await.unwrap(), 0.0);
}

#[test]
fn missing_artifact_is_model_unavailable() {
    let err = TreeEnsembleModel::load(Path::new("/nonexistent/model.json")).unwrap_err();
    assert!(matches!(err, PredictorError::ModelUnavailable(_)));
}

#[test]
fn mismatched_feature_columns_are_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let mut artifact = artifact_json();
    artifact["feature_names"] = json!(["age", "hour"]);
    let path = write_artifact(&dir, &artifact);

    assert!(TreeEnsembleModel::load(&path).is_err());
}

#[test]
fn malformed_trees_are_rejected() {
    let dir = tempfile::tempdir().unwrap();

    // no trees at all
    let mut artifact = artifact_json();
    artifact["trees"] = json!([]);
    assert!(TreeEnsembleModel::load(&write_artifact(&dir, &artifact)).is_err());

    // split pointing back at itself would never terminate
    let mut artifact = artifact_json();
    artifact["trees"] = json!([{
        "nodes": [
            { "feature": 0, "threshold": 1.0, "left": 0, "right": 1 },
            { "value": 4.0 }
        ]
    }]);
    assert!(TreeEnsembleModel::load(&write_artifact(&dir, &artifact)).is_err());

    // child index out of bounds
    let mut artifact = artifact_json();
    artifact["trees"] = json!([{
        "nodes": [
            { "feature": 0, "threshold": 1.0, "left": 1, "right": 9 },
            { "value": 4.0 }
        ]
    }]);
    assert!(TreeEnsembleModel::load(&write_artifact(&dir, &artifact)).is_err());
}

#[tokio::test]
async fn remote_backend_round_trips() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/predict"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "predicted_waiting_time": 12.5 })),
        )
        .mount(&server)
        .await;

    let model = RemoteInferenceModel::new(format!("{}/predict", server.uri()));
    assert_eq!(model.predict(&sample_features()).await.unwrap(), 12.5);
}

#[tokio::test]
async fn remote_backend_maps_server_errors() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let model = RemoteInferenceModel::new(server.uri());
    let err = model.predict(&sample_features()).await.unwrap_err();
    assert!(matches!(err, PredictorError::ModelUnavailable(_)));
}

#[test]
fn load_predictor_prefers_the_remote_endpoint() {
    // no artifact needed when an inference endpoint is configured
    let cfg = TestConfig {
        model_path: "/nonexistent/model.json".to_string(),
        model_inference_url: Some("http://localhost:9/predict".to_string()),
        ..TestConfig::default()
    }
    .to_app_config();

    assert!(load_predictor(&cfg).is_ok());
}

#[test]
fn load_predictor_fails_without_an_artifact() {
    let cfg = TestConfig {
        model_path: "/nonexistent/model.json".to_string(),
        ..TestConfig::default()
    }
    .to_app_config();

    assert!(load_predictor(&cfg).is_err());
}
