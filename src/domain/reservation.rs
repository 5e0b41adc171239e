//! Reservation domain entity and pricing rules.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use crate::config::MIN_RENTAL_DAYS;

/// Reservation lifecycle status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum ReservationStatus {
    #[default]
    Pending,
    Confirmed,
    Cancelled,
    Completed,
}

impl ReservationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReservationStatus::Pending => "Pending",
            ReservationStatus::Confirmed => "Confirmed",
            ReservationStatus::Cancelled => "Cancelled",
            ReservationStatus::Completed => "Completed",
        }
    }
}

impl From<&str> for ReservationStatus {
    fn from(s: &str) -> Self {
        match s {
            "Confirmed" => ReservationStatus::Confirmed,
            "Cancelled" => ReservationStatus::Cancelled,
            "Completed" => ReservationStatus::Completed,
            _ => ReservationStatus::Pending,
        }
    }
}

/// A booking of one car by one user over a date range
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Reservation {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = 1)]
    pub user_id: i32,
    #[schema(example = 1)]
    pub car_id: i32,
    #[schema(example = "2025-06-01")]
    pub pickup_date: NaiveDate,
    #[schema(example = "2025-06-04")]
    pub dropoff_date: NaiveDate,
    /// Derived from the car's daily rate when the reservation is written
    #[schema(example = 148.5)]
    pub total_price: f64,
    pub status: ReservationStatus,
    pub created_at: DateTime<Utc>,
}

impl Reservation {
    /// Billable days between pickup and dropoff, never less than one.
    pub fn rental_days(pickup: NaiveDate, dropoff: NaiveDate) -> i64 {
        (dropoff - pickup).num_days().max(MIN_RENTAL_DAYS)
    }

    /// Price of renting at `daily_rate` over the given range.
    pub fn quote(daily_rate: f64, pickup: NaiveDate, dropoff: NaiveDate) -> f64 {
        daily_rate * Self::rental_days(pickup, dropoff) as f64
    }
}

/// Row values for a reservation about to be inserted
#[derive(Debug, Clone, PartialEq)]
pub struct NewReservation {
    pub user_id: i32,
    pub car_id: i32,
    pub pickup_date: NaiveDate,
    pub dropoff_date: NaiveDate,
    pub total_price: f64,
    pub status: ReservationStatus,
}

/// Reservation creation request
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_create_dates"))]
pub struct CreateReservation {
    #[schema(example = 1)]
    pub user_id: i32,
    #[schema(example = 1)]
    pub car_id: i32,
    #[schema(example = "2025-06-01")]
    pub pickup_date: NaiveDate,
    #[schema(example = "2025-06-04")]
    pub dropoff_date: NaiveDate,
}

/// Full replacement of a reservation
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_update_dates"))]
pub struct UpdateReservation {
    #[schema(example = 1)]
    pub id: i32,
    pub user_id: i32,
    pub car_id: i32,
    pub pickup_date: NaiveDate,
    pub dropoff_date: NaiveDate,
    #[serde(default)]
    pub status: ReservationStatus,
}

fn check_date_order(pickup: NaiveDate, dropoff: NaiveDate) -> Result<(), ValidationError> {
    if dropoff < pickup {
        let mut error = ValidationError::new("date_order");
        error.message = Some("Dropoff date cannot be before pickup date".into());
        return Err(error);
    }
    Ok(())
}

fn validate_create_dates(request: &CreateReservation) -> Result<(), ValidationError> {
    check_date_order(request.pickup_date, request.dropoff_date)
}

fn validate_update_dates(request: &UpdateReservation) -> Result<(), ValidationError> {
    check_date_order(request.pickup_date, request.dropoff_date)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_rental_days_counts_nights() {
        assert_eq!(Reservation::rental_days(date(2025, 6, 1), date(2025, 6, 4)), 3);
    }

    #[test]
    fn test_same_day_rental_bills_one_day() {
        assert_eq!(Reservation::rental_days(date(2025, 6, 1), date(2025, 6, 1)), 1);
        assert_eq!(Reservation::quote(40.0, date(2025, 6, 1), date(2025, 6, 1)), 40.0);
    }

    #[test]
    fn test_quote_multiplies_rate() {
        assert_eq!(Reservation::quote(49.5, date(2025, 6, 1), date(2025, 6, 4)), 148.5);
    }

    #[test]
    fn test_dropoff_before_pickup_rejected() {
        let request = CreateReservation {
            user_id: 1,
            car_id: 1,
            pickup_date: date(2025, 6, 4),
            dropoff_date: date(2025, 6, 1),
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_status_strings() {
        assert_eq!(ReservationStatus::from("Cancelled"), ReservationStatus::Cancelled);
        assert_eq!(ReservationStatus::from("garbage"), ReservationStatus::Pending);
        assert_eq!(ReservationStatus::Completed.as_str(), "Completed");
    }
}
