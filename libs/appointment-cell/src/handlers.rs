use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::{json, Value};

use shared_models::error::AppError;

use crate::models::{Appointment, AppointmentCreate, CreateAppointmentResponse};
use crate::services::AppointmentStore;

#[axum::debug_handler]
pub async fn create_appointment(
    State(store): State<Arc<AppointmentStore>>,
    Json(request): Json<AppointmentCreate>,
) -> Result<Json<CreateAppointmentResponse>, AppError> {
    request.validate()?;

    let created = store.create(request).await?;
    Ok(Json(created))
}

#[axum::debug_handler]
pub async fn list_appointments(
    State(store): State<Arc<AppointmentStore>>,
) -> Result<Json<Vec<Appointment>>, AppError> {
    Ok(Json(store.list()?))
}

#[axum::debug_handler]
pub async fn get_appointment(
    State(store): State<Arc<AppointmentStore>>,
    Path(id): Path<u64>,
) -> Result<Json<Appointment>, AppError> {
    Ok(Json(store.get(id)?))
}

#[axum::debug_handler]
pub async fn update_appointment(
    State(store): State<Arc<AppointmentStore>>,
    Path(id): Path<u64>,
    Json(request): Json<AppointmentCreate>,
) -> Result<Json<Value>, AppError> {
    request.validate()?;

    store.update(id, request).await?;
    Ok(Json(json!({ "message": "updated" })))
}

#[axum::debug_handler]
pub async fn delete_appointment(
    State(store): State<Arc<AppointmentStore>>,
    Path(id): Path<u64>,
) -> Result<Json<Value>, AppError> {
    store.delete(id)?;
    Ok(Json(json!({ "message": "deleted" })))
}
