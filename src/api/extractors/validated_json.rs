//! Validated JSON extractor - Combines deserialization with validation.

use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors, ValidationErrorsKind};

use crate::errors::AppError;

/// JSON body that has passed its `validator` rules.
///
/// # Example
///
/// ```rust,ignore
/// use car_rental_api::api::extractors::ValidatedJson;
/// use car_rental_api::domain::CreateReview;
///
/// async fn create_review(ValidatedJson(payload): ValidatedJson<CreateReview>) {
///     // rating is already known to be 1-5
/// }
/// ```
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e| AppError::validation(e.body_text()))?;

        value
            .validate()
            .map_err(|e| AppError::validation(format_validation_errors(&e)))?;

        Ok(ValidatedJson(value))
    }
}

/// Flatten field, struct-level and nested errors into one message.
fn format_validation_errors(errors: &ValidationErrors) -> String {
    let mut messages = Vec::new();
    collect_messages(errors, &mut messages);
    messages.sort();
    messages.join(", ")
}

fn collect_messages(errors: &ValidationErrors, messages: &mut Vec<String>) {
    for (field, kind) in errors.errors() {
        match kind {
            ValidationErrorsKind::Field(errs) => {
                messages.extend(errs.iter().map(|e| {
                    e.message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("{} is invalid", field))
                }));
            }
            ValidationErrorsKind::Struct(nested) => collect_messages(nested, messages),
            ValidationErrorsKind::List(items) => {
                for nested in items.values() {
                    collect_messages(nested, messages);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::domain::{CarDetails, CreateReservation, UpdateCar};

    #[test]
    fn test_struct_level_message_reported() {
        let request = CreateReservation {
            user_id: 1,
            car_id: 1,
            pickup_date: NaiveDate::from_ymd_opt(2025, 3, 5).unwrap(),
            dropoff_date: NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
        };
        let errors = request.validate().unwrap_err();
        assert_eq!(
            format_validation_errors(&errors),
            "Dropoff date cannot be before pickup date"
        );
    }

    #[test]
    fn test_nested_messages_reported() {
        let request = UpdateCar {
            id: 1,
            details: CarDetails {
                make: String::new(),
                model: "Golf".to_string(),
                year: 2020,
                daily_rate: 10.0,
                location: None,
                available: true,
            },
        };
        let errors = request.validate().unwrap_err();
        assert_eq!(format_validation_errors(&errors), "Make is required");
    }
}
