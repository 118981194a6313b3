use std::sync::Arc;

use axum::{routing::post, Router};

use crate::handlers::{predict_waiting_time, recommend_for_form};
use crate::PredictionState;

pub fn prediction_routes(state: Arc<PredictionState>) -> Router {
    Router::new()
        .route("/predict_waiting_time", post(predict_waiting_time))
        .route("/form", post(recommend_for_form))
        .with_state(state)
}
