use serde::{Deserialize, Serialize};
use thiserror::Error;

use shared_models::error::AppError;
use shared_models::feature::FeatureRecord;
use shared_models::predictor::PredictorError;
use shared_storage::StorageError;

/// Durable table columns, in persisted order.
pub const APPOINTMENT_COLUMNS: [&str; 9] = [
    "id",
    "patient_name",
    "day_of_week",
    "month",
    "hour",
    "days_between_schedule_and_visit",
    "sex_encoded",
    "age",
    "predicted_waiting_time",
];

/// Persisted appointment row. Kept flat so the CSV codec sees one column
/// per field. `predicted_waiting_time` is derived, stored at full
/// precision, and recomputed whenever any feature field of the row changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Appointment {
    pub id: u64,
    pub patient_name: String,
    pub day_of_week: u8,
    pub month: u8,
    pub hour: u8,
    pub days_between_schedule_and_visit: u32,
    pub sex_encoded: u8,
    pub age: f64,
    pub predicted_waiting_time: f64,
}

impl Appointment {
    pub fn features(&self) -> FeatureRecord {
        FeatureRecord {
            day_of_week: self.day_of_week,
            month: self.month,
            hour: self.hour,
            days_between_schedule_and_visit: self.days_between_schedule_and_visit,
            sex_encoded: self.sex_encoded,
            age: self.age,
        }
    }
}

/// Request body shared by create and update: everything except the derived
/// fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppointmentCreate {
    pub patient_name: String,
    pub day_of_week: u8,
    pub month: u8,
    pub hour: u8,
    pub days_between_schedule_and_visit: u32,
    pub sex_encoded: u8,
    pub age: f64,
}

impl AppointmentCreate {
    pub fn features(&self) -> FeatureRecord {
        FeatureRecord {
            day_of_week: self.day_of_week,
            month: self.month,
            hour: self.hour,
            days_between_schedule_and_visit: self.days_between_schedule_and_visit,
            sex_encoded: self.sex_encoded,
            age: self.age,
        }
    }

    pub fn validate(&self) -> Result<(), AppError> {
        if self.patient_name.trim().is_empty() {
            return Err(AppError::ValidationError(
                "patient_name must not be empty".to_string(),
            ));
        }
        self.features().validate()
    }
}

/// Create response: the stored row plus the nearby-hour suggestion probed
/// against the just-stored hour.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAppointmentResponse {
    #[serde(flatten)]
    pub appointment: Appointment,
    pub best_local_hour: u8,
    pub best_local_wait: f64,
}

#[derive(Error, Debug)]
pub enum AppointmentError {
    #[error("appointment not found")]
    NotFound,

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Predictor(#[from] PredictorError),
}

impl From<AppointmentError> for AppError {
    fn from(err: AppointmentError) -> Self {
        match err {
            AppointmentError::NotFound => AppError::NotFound("Appointment not found".to_string()),
            AppointmentError::Storage(e) => AppError::Storage(e.to_string()),
            AppointmentError::Predictor(e) => AppError::ModelUnavailable(e.to_string()),
        }
    }
}
