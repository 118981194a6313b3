use std::sync::Arc;

use tracing::debug;

use shared_models::feature::FeatureRecord;
use shared_models::predictor::{PredictorError, WaitPredictor};

use crate::models::{HourRecommendation, Recommendation};
use crate::services::hour_search::{local_window, scan_hours, CLOSING_HOUR, OPENING_HOUR};

/// Minimum predicted improvement, in minutes, before a better hour is
/// surfaced. Smaller deltas are treated as model noise.
pub const MIN_IMPROVEMENT_MINUTES: f64 = 5.0;

pub struct RecommendationService {
    predictor: Arc<dyn WaitPredictor>,
}

impl RecommendationService {
    pub fn new(predictor: Arc<dyn WaitPredictor>) -> Self {
        Self { predictor }
    }

    /// Predict the wait for the submitted record, then probe the nearby
    /// (±2h) and full business-day windows for materially better hours.
    /// The two recommendations are surfaced independently of each other.
    pub async fn recommend(
        &self,
        features: &FeatureRecord,
    ) -> Result<Recommendation, PredictorError> {
        let (lo, hi) = local_window(features.hour);
        let local = scan_hours(self.predictor.as_ref(), features, lo, hi).await?;
        let global =
            scan_hours(self.predictor.as_ref(), features, OPENING_HOUR, CLOSING_HOUR).await?;

        debug!(
            "hour {}: current wait {:.2}, best local {} ({:.2}), best global {} ({:.2})",
            features.hour,
            local.current_wait,
            local.best_hour,
            local.best_wait,
            global.best_hour,
            global.best_wait
        );

        Ok(Recommendation {
            hour: features.hour,
            current_wait: local.current_wait,
            local: surface(features.hour, local.best_hour, local.current_wait, local.best_wait),
            global: surface(
                features.hour,
                global.best_hour,
                global.current_wait,
                global.best_wait,
            ),
        })
    }
}

fn surface(hour: u8, best_hour: u8, current: f64, best_wait: f64) -> Option<HourRecommendation> {
    if best_hour != hour && current - best_wait >= MIN_IMPROVEMENT_MINUTES {
        Some(HourRecommendation {
            hour: best_hour,
            predicted_wait: best_wait,
        })
    } else {
        None
    }
}
