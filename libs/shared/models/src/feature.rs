use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Model input columns, in the order the regression model was trained on.
pub const FEATURE_COLUMNS: [&str; 6] = [
    "day_of_week",
    "month",
    "hour",
    "days_between_schedule_and_visit",
    "sex_encoded",
    "age",
];

/// Normalized appointment attributes consumed by the waiting-time model.
///
/// A record is always structurally complete; partial records never reach a
/// predictor. Field domains are enforced by [`FeatureRecord::validate`],
/// which handlers call before any prediction or persistence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureRecord {
    pub day_of_week: u8,
    pub month: u8,
    pub hour: u8,
    pub days_between_schedule_and_visit: u32,
    pub sex_encoded: u8,
    pub age: f64,
}

impl FeatureRecord {
    /// Copy of this record with the hour replaced, used by the hour scan.
    pub fn with_hour(&self, hour: u8) -> Self {
        Self {
            hour,
            ..self.clone()
        }
    }

    /// Model input vector in [`FEATURE_COLUMNS`] order.
    pub fn to_vector(&self) -> [f64; 6] {
        [
            f64::from(self.day_of_week),
            f64::from(self.month),
            f64::from(self.hour),
            f64::from(self.days_between_schedule_and_visit),
            f64::from(self.sex_encoded),
            self.age,
        ]
    }

    pub fn validate(&self) -> Result<(), AppError> {
        if self.day_of_week > 6 {
            return Err(AppError::ValidationError(
                "day_of_week must be between 0 and 6".to_string(),
            ));
        }
        if !(1..=12).contains(&self.month) {
            return Err(AppError::ValidationError(
                "month must be between 1 and 12".to_string(),
            ));
        }
        if self.hour > 23 {
            return Err(AppError::ValidationError(
                "hour must be between 0 and 23".to_string(),
            ));
        }
        if self.sex_encoded > 1 {
            return Err(AppError::ValidationError(
                "sex_encoded must be 0 or 1".to_string(),
            ));
        }
        if !self.age.is_finite() || self.age < 0.0 {
            return Err(AppError::ValidationError(
                "age must be a non-negative number".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> FeatureRecord {
        FeatureRecord {
            day_of_week: 2,
            month: 6,
            hour: 10,
            days_between_schedule_and_visit: 14,
            sex_encoded: 1,
            age: 43.0,
        }
    }

    #[test]
    fn valid_record_passes() {
        assert!(record().validate().is_ok());
    }

    #[test]
    fn out_of_domain_fields_are_rejected() {
        let mut r = record();
        r.day_of_week = 7;
        assert!(r.validate().is_err());

        let mut r = record();
        r.month = 0;
        assert!(r.validate().is_err());

        let mut r = record();
        r.hour = 24;
        assert!(r.validate().is_err());

        let mut r = record();
        r.sex_encoded = 2;
        assert!(r.validate().is_err());

        let mut r = record();
        r.age = -1.0;
        assert!(r.validate().is_err());

        let mut r = record();
        r.age = f64::NAN;
        assert!(r.validate().is_err());
    }

    #[test]
    fn with_hour_only_changes_the_hour() {
        let base = record();
        let shifted = base.with_hour(15);
        assert_eq!(shifted.hour, 15);
        assert_eq!(shifted.day_of_week, base.day_of_week);
        assert_eq!(shifted.age, base.age);
    }

    #[test]
    fn vector_follows_column_order() {
        let v = record().to_vector();
        assert_eq!(v, [2.0, 6.0, 10.0, 14.0, 1.0, 43.0]);
    }
}
