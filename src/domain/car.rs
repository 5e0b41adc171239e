//! Car domain entity.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// A rentable car
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Car {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "Toyota")]
    pub make: String,
    #[schema(example = "Corolla")]
    pub model: String,
    #[schema(example = 2022)]
    pub year: i32,
    /// Price per rental day
    #[schema(example = 49.5)]
    pub daily_rate: f64,
    #[schema(example = "Downtown")]
    pub location: Option<String>,
    pub available: bool,
}

/// Car fields shared by create and replace requests
#[derive(Debug, Clone, PartialEq, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CarDetails {
    #[validate(length(min = 1, message = "Make is required"))]
    #[schema(example = "Toyota")]
    pub make: String,
    #[validate(length(min = 1, message = "Model is required"))]
    #[schema(example = "Corolla")]
    pub model: String,
    #[validate(range(min = 1900, max = 2100, message = "Year must be between 1900 and 2100"))]
    #[schema(example = 2022)]
    pub year: i32,
    #[validate(range(min = 0.0, message = "Daily rate cannot be negative"))]
    #[schema(example = 49.5)]
    pub daily_rate: f64,
    pub location: Option<String>,
    #[serde(default = "default_available")]
    pub available: bool,
}

fn default_available() -> bool {
    true
}

/// Full replacement of a car
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCar {
    #[schema(example = 1)]
    pub id: i32,
    #[serde(flatten)]
    #[validate(nested)]
    pub details: CarDetails,
}

impl Car {
    /// Materialize a stored car from its id and details.
    pub fn from_details(id: i32, details: CarDetails) -> Self {
        Self {
            id,
            make: details.make,
            model: details.model,
            year: details.year,
            daily_rate: details.daily_rate,
            location: details.location,
            available: details.available,
        }
    }
}
