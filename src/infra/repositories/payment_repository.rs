//! Payment repository implementation.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};

use super::entities::payment::{self, ActiveModel, Entity as PaymentEntity};
use super::write_error;
use crate::domain::{NewPayment, Payment};
use crate::errors::{AppError, AppResult, OptionExt};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait PaymentRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Payment>>;

    async fn list(&self) -> AppResult<Vec<Payment>>;

    async fn list_by_user(&self, user_id: i32) -> AppResult<Vec<Payment>>;

    async fn create(&self, payment: NewPayment) -> AppResult<Payment>;

    async fn update(&self, payment: Payment) -> AppResult<Payment>;

    async fn delete(&self, id: i32) -> AppResult<()>;
}

pub struct PaymentStore {
    db: DatabaseConnection,
}

impl PaymentStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl PaymentRepository for PaymentStore {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Payment>> {
        let result = PaymentEntity::find_by_id(id).one(&self.db).await?;
        Ok(result.map(Payment::from))
    }

    async fn list(&self) -> AppResult<Vec<Payment>> {
        let models = PaymentEntity::find()
            .order_by_asc(payment::Column::Id)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(Payment::from).collect())
    }

    async fn list_by_user(&self, user_id: i32) -> AppResult<Vec<Payment>> {
        let models = PaymentEntity::find()
            .filter(payment::Column::UserId.eq(user_id))
            .order_by_asc(payment::Column::Id)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(Payment::from).collect())
    }

    async fn create(&self, payment: NewPayment) -> AppResult<Payment> {
        let active_model = ActiveModel {
            user_id: Set(payment.user_id),
            reservation_id: Set(payment.reservation_id),
            amount: Set(payment.amount),
            payment_method: Set(payment.payment_method),
            paid_at: Set(payment.paid_at),
            ..Default::default()
        };

        let model = active_model
            .insert(&self.db)
            .await
            .map_err(|e| write_error(e, "Payment"))?;
        Ok(Payment::from(model))
    }

    async fn update(&self, payment: Payment) -> AppResult<Payment> {
        let existing = PaymentEntity::find_by_id(payment.id)
            .one(&self.db)
            .await?
            .ok_or_not_found("Payment")?;

        let mut active: ActiveModel = existing.into();
        active.user_id = Set(payment.user_id);
        active.reservation_id = Set(payment.reservation_id);
        active.amount = Set(payment.amount);
        active.payment_method = Set(payment.payment_method);
        active.paid_at = Set(payment.paid_at);

        let model = active
            .update(&self.db)
            .await
            .map_err(|e| write_error(e, "Payment"))?;
        Ok(Payment::from(model))
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        let result = PaymentEntity::delete_by_id(id).exec(&self.db).await?;

        if result.rows_affected == 0 {
            return Err(AppError::not_found("Payment"));
        }

        Ok(())
    }
}
