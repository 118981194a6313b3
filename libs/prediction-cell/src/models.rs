use serde::{Deserialize, Serialize};

use shared_models::feature::FeatureRecord;

/// Wire shape of a standalone prediction; also the response body expected
/// from a remote inference endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WaitingTimeResponse {
    pub predicted_waiting_time: f64,
}

/// Fields posted by the reception-desk form. The legacy field name
/// `day_name` is still accepted as an alias of `day_of_week`.
#[derive(Debug, Clone, Deserialize)]
pub struct RecommendationForm {
    #[serde(alias = "day_name")]
    pub day_of_week: u8,
    pub month: u8,
    pub hour: u8,
    pub days_between_schedule_and_visit: u32,
    pub sex: u8,
    pub age: f64,
}

impl RecommendationForm {
    pub fn into_features(self) -> FeatureRecord {
        FeatureRecord {
            day_of_week: self.day_of_week,
            month: self.month,
            hour: self.hour,
            days_between_schedule_and_visit: self.days_between_schedule_and_visit,
            sex_encoded: self.sex,
            age: self.age,
        }
    }
}

/// Result of probing the model across one hour window.
#[derive(Debug, Clone, PartialEq)]
pub struct HourScan {
    pub best_hour: u8,
    pub best_wait: f64,
    pub current_wait: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HourRecommendation {
    pub hour: u8,
    pub predicted_wait: f64,
}

/// Orchestrator output: the current prediction plus whichever window
/// recommendations cleared the materiality threshold.
#[derive(Debug, Clone, PartialEq)]
pub struct Recommendation {
    pub hour: u8,
    pub current_wait: f64,
    pub local: Option<HourRecommendation>,
    pub global: Option<HourRecommendation>,
}

/// JSON rendering of a recommendation. Displayed predictions are rounded to
/// one decimal here and nowhere else; persisted values keep full precision.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationResponse {
    pub prediction: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub better_local_hour: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_hour: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_pred: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub better_local_pred: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub better_global_hour: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub better_global_pred: Option<f64>,
}

fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

impl From<Recommendation> for RecommendationResponse {
    fn from(rec: Recommendation) -> Self {
        let mut response = Self {
            prediction: round_to_tenth(rec.current_wait),
            better_local_hour: None,
            current_hour: None,
            current_pred: None,
            better_local_pred: None,
            better_global_hour: None,
            better_global_pred: None,
        };

        if let Some(local) = rec.local {
            response.better_local_hour = Some(local.hour);
            response.current_hour = Some(rec.hour);
            response.current_pred = Some(round_to_tenth(rec.current_wait));
            response.better_local_pred = Some(round_to_tenth(local.predicted_wait));
        }

        if let Some(global) = rec.global {
            response.better_global_hour = Some(global.hour);
            response.better_global_pred = Some(round_to_tenth(global.predicted_wait));
        }

        response
    }
}
