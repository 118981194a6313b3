use std::sync::Arc;

use axum::{extract::State, Form, Json};
use serde_json::{json, Value};

use shared_models::error::AppError;
use shared_models::feature::FeatureRecord;

use crate::models::{RecommendationForm, RecommendationResponse};
use crate::services::RecommendationService;
use crate::PredictionState;

/// Standalone prediction: no persistence, full-precision output.
#[axum::debug_handler]
pub async fn predict_waiting_time(
    State(state): State<Arc<PredictionState>>,
    Json(features): Json<FeatureRecord>,
) -> Result<Json<Value>, AppError> {
    features.validate()?;

    let predicted = state.predictor.predict(&features).await?;

    Ok(Json(json!({ "predicted_waiting_time": predicted })))
}

/// Reception-desk form flow: current prediction plus the nearby and
/// whole-day hour recommendations, rounded for display.
#[axum::debug_handler]
pub async fn recommend_for_form(
    State(state): State<Arc<PredictionState>>,
    Form(form): Form<RecommendationForm>,
) -> Result<Json<RecommendationResponse>, AppError> {
    let features = form.into_features();
    features.validate()?;

    let service = RecommendationService::new(state.predictor.clone());
    let recommendation = service.recommend(&features).await?;

    Ok(Json(RecommendationResponse::from(recommendation)))
}
