pub mod handlers;
pub mod models;
pub mod router;
pub mod services;

use std::sync::Arc;

use shared_models::predictor::WaitPredictor;

pub use models::*;
pub use router::*;

/// Shared state for the prediction routes: the process-wide predictor,
/// initialized once at startup.
pub struct PredictionState {
    pub predictor: Arc<dyn WaitPredictor>,
}
