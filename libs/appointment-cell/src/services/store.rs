use std::sync::Arc;

use tracing::{debug, info};

use prediction_cell::services::hour_search::{local_window, scan_hours};
use shared_models::predictor::WaitPredictor;
use shared_storage::TableBackend;

use crate::models::{
    Appointment, AppointmentCreate, AppointmentError, CreateAppointmentResponse,
};

/// Durable appointment table with recompute-on-write predictions.
///
/// Every operation reloads the persisted table, mutates it, and rewrites it
/// in full. The persistence backend sits behind the load/replace seam, so a
/// different table format can be injected without touching callers.
pub struct AppointmentStore {
    table: Arc<dyn TableBackend<Appointment>>,
    predictor: Arc<dyn WaitPredictor>,
}

impl AppointmentStore {
    pub fn new(
        table: Arc<dyn TableBackend<Appointment>>,
        predictor: Arc<dyn WaitPredictor>,
    ) -> Self {
        Self { table, predictor }
    }

    /// Predict the wait for the requested hour, assign the next id, persist
    /// the row, and report the best nearby hour probed against the stored
    /// hour.
    pub async fn create(
        &self,
        request: AppointmentCreate,
    ) -> Result<CreateAppointmentResponse, AppointmentError> {
        let mut rows = self.table.load()?;

        // max+1 assignment; deleting other rows never frees their ids
        let id = rows.iter().map(|row| row.id).max().map_or(1, |max| max + 1);

        let features = request.features();
        let (lo, hi) = local_window(features.hour);
        let scan = scan_hours(self.predictor.as_ref(), &features, lo, hi).await?;

        let appointment = Appointment {
            id,
            patient_name: request.patient_name,
            day_of_week: features.day_of_week,
            month: features.month,
            hour: features.hour,
            days_between_schedule_and_visit: features.days_between_schedule_and_visit,
            sex_encoded: features.sex_encoded,
            age: features.age,
            predicted_waiting_time: scan.current_wait,
        };

        rows.push(appointment.clone());
        self.table.replace(&rows)?;

        info!(
            "stored appointment {} with predicted wait {:.2}",
            id, appointment.predicted_waiting_time
        );

        Ok(CreateAppointmentResponse {
            appointment,
            best_local_hour: scan.best_hour,
            best_local_wait: scan.best_wait,
        })
    }

    /// All rows in stored order.
    pub fn list(&self) -> Result<Vec<Appointment>, AppointmentError> {
        Ok(self.table.load()?)
    }

    pub fn get(&self, id: u64) -> Result<Appointment, AppointmentError> {
        self.table
            .load()?
            .into_iter()
            .find(|row| row.id == id)
            .ok_or(AppointmentError::NotFound)
    }

    /// Overwrite every field of the row and recompute its prediction from
    /// the new features. The not-found check and the prediction both happen
    /// before anything is persisted, so a failure leaves the table intact.
    pub async fn update(
        &self,
        id: u64,
        request: AppointmentCreate,
    ) -> Result<Appointment, AppointmentError> {
        let mut rows = self.table.load()?;
        let idx = rows
            .iter()
            .position(|row| row.id == id)
            .ok_or(AppointmentError::NotFound)?;

        let features = request.features();
        let predicted = self.predictor.predict(&features).await?;

        let updated = Appointment {
            id,
            patient_name: request.patient_name,
            day_of_week: features.day_of_week,
            month: features.month,
            hour: features.hour,
            days_between_schedule_and_visit: features.days_between_schedule_and_visit,
            sex_encoded: features.sex_encoded,
            age: features.age,
            predicted_waiting_time: predicted,
        };

        rows[idx] = updated.clone();
        self.table.replace(&rows)?;

        debug!("updated appointment {} with recomputed wait {:.2}", id, predicted);

        Ok(updated)
    }

    /// Remove the row; remaining ids are never renumbered.
    pub fn delete(&self, id: u64) -> Result<(), AppointmentError> {
        let mut rows = self.table.load()?;
        let before = rows.len();
        rows.retain(|row| row.id != id);
        if rows.len() == before {
            return Err(AppointmentError::NotFound);
        }

        self.table.replace(&rows)?;

        debug!("deleted appointment {}", id);
        Ok(())
    }
}
