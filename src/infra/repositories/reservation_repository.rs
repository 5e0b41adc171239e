//! Reservation repository implementation.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};

use super::entities::reservation::{self, ActiveModel, Entity as ReservationEntity};
use super::write_error;
use crate::domain::{NewReservation, Reservation};
use crate::errors::{AppError, AppResult, OptionExt};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Reservation repository trait for dependency injection.
///
/// Listing methods return rows ordered by ID so that callers see a stable
/// order across requests.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait ReservationRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Reservation>>;

    async fn list(&self) -> AppResult<Vec<Reservation>>;

    /// Reservations pointing at one car
    async fn list_by_car(&self, car_id: i32) -> AppResult<Vec<Reservation>>;

    /// Reservations made by one user
    async fn list_by_user(&self, user_id: i32) -> AppResult<Vec<Reservation>>;

    async fn create(&self, reservation: NewReservation) -> AppResult<Reservation>;

    /// Replace every stored field except the creation time
    async fn update(&self, reservation: Reservation) -> AppResult<Reservation>;

    async fn delete(&self, id: i32) -> AppResult<()>;
}

pub struct ReservationStore {
    db: DatabaseConnection,
}

impl ReservationStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn list_where(&self, column: reservation::Column, id: i32) -> AppResult<Vec<Reservation>> {
        let models = ReservationEntity::find()
            .filter(column.eq(id))
            .order_by_asc(reservation::Column::Id)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(Reservation::from).collect())
    }
}

#[async_trait]
impl ReservationRepository for ReservationStore {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Reservation>> {
        let result = ReservationEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Reservation::from))
    }

    async fn list(&self) -> AppResult<Vec<Reservation>> {
        let models = ReservationEntity::find()
            .order_by_asc(reservation::Column::Id)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(Reservation::from).collect())
    }

    async fn list_by_car(&self, car_id: i32) -> AppResult<Vec<Reservation>> {
        self.list_where(reservation::Column::CarId, car_id).await
    }

    async fn list_by_user(&self, user_id: i32) -> AppResult<Vec<Reservation>> {
        self.list_where(reservation::Column::UserId, user_id).await
    }

    async fn create(&self, reservation: NewReservation) -> AppResult<Reservation> {
        let active_model = ActiveModel {
            user_id: Set(reservation.user_id),
            car_id: Set(reservation.car_id),
            pickup_date: Set(reservation.pickup_date),
            dropoff_date: Set(reservation.dropoff_date),
            total_price: Set(reservation.total_price),
            status: Set(reservation.status.as_str().to_string()),
            created_at: Set(chrono::Utc::now()),
            ..Default::default()
        };

        let model = active_model
            .insert(&self.db)
            .await
            .map_err(|e| write_error(e, "Reservation"))?;
        Ok(Reservation::from(model))
    }

    async fn update(&self, reservation: Reservation) -> AppResult<Reservation> {
        let existing = ReservationEntity::find_by_id(reservation.id)
            .one(&self.db)
            .await?
            .ok_or_not_found("Reservation")?;

        let mut active: ActiveModel = existing.into();
        active.user_id = Set(reservation.user_id);
        active.car_id = Set(reservation.car_id);
        active.pickup_date = Set(reservation.pickup_date);
        active.dropoff_date = Set(reservation.dropoff_date);
        active.total_price = Set(reservation.total_price);
        active.status = Set(reservation.status.as_str().to_string());

        let model = active
            .update(&self.db)
            .await
            .map_err(|e| write_error(e, "Reservation"))?;
        Ok(Reservation::from(model))
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        let result = ReservationEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        if result.rows_affected == 0 {
            return Err(AppError::not_found("Reservation"));
        }

        Ok(())
    }
}
