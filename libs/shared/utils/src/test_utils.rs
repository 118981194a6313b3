use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;

use shared_config::AppConfig;
use shared_models::feature::FeatureRecord;
use shared_models::predictor::{PredictorError, WaitPredictor};

pub struct TestConfig {
    pub model_path: String,
    pub model_inference_url: Option<String>,
    pub appointments_path: String,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            model_path: "test_model.json".to_string(),
            model_inference_url: None,
            appointments_path: "test_appointments.csv".to_string(),
        }
    }
}

impl TestConfig {
    pub fn to_app_config(&self) -> AppConfig {
        AppConfig {
            model_path: self.model_path.clone(),
            model_inference_url: self.model_inference_url.clone(),
            appointments_path: self.appointments_path.clone(),
            allowed_origins: vec!["http://localhost:3000".to_string()],
            bind_addr: "127.0.0.1:0".to_string(),
        }
    }

    pub fn to_arc(&self) -> Arc<AppConfig> {
        Arc::new(self.to_app_config())
    }
}

/// Predictor returning the same wait for every record.
pub struct FixedPredictor(pub f64);

#[async_trait]
impl WaitPredictor for FixedPredictor {
    async fn predict(&self, _features: &FeatureRecord) -> Result<f64, PredictorError> {
        Ok(self.0)
    }
}

/// Predictor keyed on the record's hour, with a fallback for hours the
/// table does not mention. Deterministic, so repeated scans agree.
pub struct HourTablePredictor {
    default_wait: f64,
    by_hour: HashMap<u8, f64>,
}

impl HourTablePredictor {
    pub fn new(default_wait: f64, entries: &[(u8, f64)]) -> Self {
        Self {
            default_wait,
            by_hour: entries.iter().copied().collect(),
        }
    }
}

#[async_trait]
impl WaitPredictor for HourTablePredictor {
    async fn predict(&self, features: &FeatureRecord) -> Result<f64, PredictorError> {
        Ok(self
            .by_hour
            .get(&features.hour)
            .copied()
            .unwrap_or(self.default_wait))
    }
}

/// Predictor whose output is a linear function of the full feature vector,
/// so tests can detect which record a prediction was computed from.
pub struct WeightedSumPredictor {
    pub weights: [f64; 6],
}

#[async_trait]
impl WaitPredictor for WeightedSumPredictor {
    async fn predict(&self, features: &FeatureRecord) -> Result<f64, PredictorError> {
        let x = features.to_vector();
        let wait = x.iter().zip(self.weights.iter()).map(|(a, w)| a * w).sum::<f64>();
        Ok(wait.max(0.0))
    }
}

/// Predictor that always fails, for exercising the ModelUnavailable path.
pub struct UnavailablePredictor;

#[async_trait]
impl WaitPredictor for UnavailablePredictor {
    async fn predict(&self, _features: &FeatureRecord) -> Result<f64, PredictorError> {
        Err(PredictorError::ModelUnavailable(
            "stub predictor is configured to fail".to_string(),
        ))
    }
}

pub fn sample_features() -> FeatureRecord {
    FeatureRecord {
        day_of_week: 1,
        month: 3,
        hour: 9,
        days_between_schedule_and_visit: 7,
        sex_encoded: 0,
        age: 35.0,
    }
}
