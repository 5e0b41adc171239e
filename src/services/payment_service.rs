//! Payment service - Money received from users.

use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;

use crate::domain::{Caller, CreatePayment, NewPayment, Payment, UpdatePayment};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::UnitOfWork;

#[async_trait]
pub trait PaymentService: Send + Sync {
    async fn list_payments(&self) -> AppResult<Vec<Payment>>;

    async fn get_payment(&self, id: i32) -> AppResult<Payment>;

    /// Every payment made by the named user; not-found when there are none
    async fn payments_for_user_name(&self, user_name: &str) -> AppResult<Vec<Payment>>;

    /// Non-admin callers may only pay for themselves
    async fn add_payment(&self, request: CreatePayment, caller: Caller) -> AppResult<Payment>;

    async fn update_payment(&self, request: UpdatePayment) -> AppResult<Payment>;

    async fn delete_payment(&self, id: i32) -> AppResult<()>;
}

pub struct PaymentManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> PaymentManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }

    /// The payer must exist; a linked reservation must exist and belong to them.
    async fn check_references(&self, user_id: i32, reservation_id: Option<i32>) -> AppResult<()> {
        if self.uow.users().find_by_id(user_id).await?.is_none() {
            return Err(AppError::bad_request(format!("user {} does not exist", user_id)));
        }

        if let Some(reservation_id) = reservation_id {
            let reservation = self
                .uow
                .reservations()
                .find_by_id(reservation_id)
                .await?
                .ok_or_else(|| {
                    AppError::bad_request(format!("reservation {} does not exist", reservation_id))
                })?;
            if reservation.user_id != user_id {
                return Err(AppError::bad_request(format!(
                    "reservation {} belongs to another user",
                    reservation_id
                )));
            }
        }
        Ok(())
    }
}

#[async_trait]
impl<U: UnitOfWork> PaymentService for PaymentManager<U> {
    async fn list_payments(&self) -> AppResult<Vec<Payment>> {
        self.uow.payments().list().await
    }

    async fn get_payment(&self, id: i32) -> AppResult<Payment> {
        self.uow.payments().find_by_id(id).await?.ok_or_not_found("Payment")
    }

    async fn payments_for_user_name(&self, user_name: &str) -> AppResult<Vec<Payment>> {
        let user = self
            .uow
            .users()
            .find_by_user_name(user_name)
            .await?
            .ok_or_not_found("User")?;

        let payments = self.uow.payments().list_by_user(user.id).await?;
        if payments.is_empty() {
            return Err(AppError::NotFound(
                "No payments found for this user".to_string(),
            ));
        }
        Ok(payments)
    }

    async fn add_payment(&self, request: CreatePayment, caller: Caller) -> AppResult<Payment> {
        caller.ensure_acts_for(request.user_id)?;
        self.check_references(request.user_id, request.reservation_id).await?;

        let payment = self
            .uow
            .payments()
            .create(NewPayment {
                user_id: request.user_id,
                reservation_id: request.reservation_id,
                amount: request.amount,
                payment_method: request.payment_method,
                paid_at: Utc::now(),
            })
            .await?;

        tracing::info!(payment_id = payment.id, amount = payment.amount, "Payment recorded");
        Ok(payment)
    }

    async fn update_payment(&self, request: UpdatePayment) -> AppResult<Payment> {
        let stored = self.get_payment(request.id).await?;
        self.check_references(request.user_id, request.reservation_id).await?;

        self.uow
            .payments()
            .update(Payment {
                id: stored.id,
                user_id: request.user_id,
                reservation_id: request.reservation_id,
                amount: request.amount,
                payment_method: request.payment_method,
                paid_at: request.paid_at,
            })
            .await
    }

    async fn delete_payment(&self, id: i32) -> AppResult<()> {
        self.uow.payments().delete(id).await
    }
}
