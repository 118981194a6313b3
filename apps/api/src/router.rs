use std::sync::Arc;

use axum::{routing::get, Json, Router};
use serde_json::{json, Value};

use appointment_cell::models::{Appointment, APPOINTMENT_COLUMNS};
use appointment_cell::router::appointment_routes;
use appointment_cell::services::AppointmentStore;
use prediction_cell::router::prediction_routes;
use prediction_cell::PredictionState;
use shared_config::AppConfig;
use shared_models::predictor::WaitPredictor;
use shared_storage::{CsvTable, TableBackend};

pub fn create_router(config: &AppConfig, predictor: Arc<dyn WaitPredictor>) -> Router {
    let table: Arc<dyn TableBackend<Appointment>> = Arc::new(CsvTable::<Appointment>::new(
        &config.appointments_path,
        &APPOINTMENT_COLUMNS,
    ));
    let store = Arc::new(AppointmentStore::new(table, predictor.clone()));
    let prediction_state = Arc::new(PredictionState { predictor });

    Router::new()
        .route("/", get(root))
        .route("/healthz", get(healthz))
        .nest("/api/appointments", appointment_routes(store))
        .merge(prediction_routes(prediction_state))
}

async fn root() -> Json<Value> {
    Json(json!({ "message": "Hospital Waiting Time API is running" }))
}

async fn healthz() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
