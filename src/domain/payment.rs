//! Payment domain entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Money received from a user, optionally against a reservation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = 1)]
    pub user_id: i32,
    #[schema(example = 1)]
    pub reservation_id: Option<i32>,
    #[schema(example = 148.5)]
    pub amount: f64,
    #[schema(example = "CreditCard")]
    pub payment_method: String,
    pub paid_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewPayment {
    pub user_id: i32,
    pub reservation_id: Option<i32>,
    pub amount: f64,
    pub payment_method: String,
    pub paid_at: DateTime<Utc>,
}

/// Payment creation request
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatePayment {
    #[schema(example = 1)]
    pub user_id: i32,
    #[schema(example = 1)]
    pub reservation_id: Option<i32>,
    #[validate(range(exclusive_min = 0.0, message = "Amount must be positive"))]
    #[schema(example = 148.5)]
    pub amount: f64,
    #[validate(length(min = 1, message = "Payment method is required"))]
    #[schema(example = "CreditCard")]
    pub payment_method: String,
}

/// Full replacement of a payment
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePayment {
    #[schema(example = 1)]
    pub id: i32,
    pub user_id: i32,
    pub reservation_id: Option<i32>,
    #[validate(range(exclusive_min = 0.0, message = "Amount must be positive"))]
    pub amount: f64,
    #[validate(length(min = 1, message = "Payment method is required"))]
    pub payment_method: String,
    pub paid_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_amount_must_be_positive() {
        let mut request = CreatePayment {
            user_id: 1,
            reservation_id: None,
            amount: 0.0,
            payment_method: "Cash".to_string(),
        };
        assert!(request.validate().is_err());

        request.amount = 0.01;
        assert!(request.validate().is_ok());
    }
}
