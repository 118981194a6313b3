use shared_models::feature::FeatureRecord;
use shared_models::predictor::{PredictorError, WaitPredictor};

use crate::models::HourScan;

/// First and last bookable hours of the business day, inclusive.
pub const OPENING_HOUR: u8 = 8;
pub const CLOSING_HOUR: u8 = 17;

/// Business-hour window within two hours of the given hour. The window can
/// be empty (lo > hi) when the hour lies outside the business day.
pub fn local_window(hour: u8) -> (u8, u8) {
    let lo = hour.saturating_sub(2).max(OPENING_HOUR);
    let hi = (hour + 2).min(CLOSING_HOUR);
    (lo, hi)
}

/// Probe the model for every hour in `[lo, hi]` except the record's own
/// hour and keep the lowest prediction. The scan runs in ascending hour
/// order with a strict comparison, so ties resolve to the earliest hour.
/// An empty window leaves `best_hour` at the record's hour with
/// `best_wait == current_wait`.
pub async fn scan_hours(
    predictor: &dyn WaitPredictor,
    base: &FeatureRecord,
    lo: u8,
    hi: u8,
) -> Result<HourScan, PredictorError> {
    let current_wait = predictor.predict(base).await?;

    let mut best_hour = base.hour;
    let mut best_wait = current_wait;

    for hour in lo..=hi {
        if hour == base.hour {
            continue;
        }
        let predicted = predictor.predict(&base.with_hour(hour)).await?;
        if predicted < best_wait {
            best_hour = hour;
            best_wait = predicted;
        }
    }

    Ok(HourScan {
        best_hour,
        best_wait,
        current_wait,
    })
}
