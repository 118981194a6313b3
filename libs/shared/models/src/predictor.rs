use async_trait::async_trait;
use thiserror::Error;

use crate::feature::FeatureRecord;

#[derive(Error, Debug)]
pub enum PredictorError {
    #[error("waiting-time model unavailable: {0}")]
    ModelUnavailable(String),
}

impl From<PredictorError> for crate::error::AppError {
    fn from(err: PredictorError) -> Self {
        crate::error::AppError::ModelUnavailable(err.to_string())
    }
}

/// Capability interface over the trained regression model.
///
/// Implementations are deterministic for identical input, side-effect free,
/// and return a non-negative wait estimate in minutes. Backends are
/// initialized once at process start and shared for the process lifetime;
/// a backend that cannot be loaded or invoked reports
/// [`PredictorError::ModelUnavailable`].
#[async_trait]
pub trait WaitPredictor: Send + Sync {
    async fn predict(&self, features: &FeatureRecord) -> Result<f64, PredictorError>;
}
