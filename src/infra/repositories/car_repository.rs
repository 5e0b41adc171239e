//! Car repository implementation.

use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Set};

use super::entities::car::{self, ActiveModel, Entity as CarEntity};
use crate::domain::{Car, CarDetails};
use crate::errors::{AppError, AppResult, OptionExt};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait CarRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Car>>;

    async fn create(&self, car: CarDetails) -> AppResult<Car>;

    /// Replace every stored field of an existing car
    async fn update(&self, car: Car) -> AppResult<Car>;

    async fn delete(&self, id: i32) -> AppResult<()>;

    async fn list(&self) -> AppResult<Vec<Car>>;
}

pub struct CarStore {
    db: DatabaseConnection,
}

impl CarStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CarRepository for CarStore {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Car>> {
        let result = CarEntity::find_by_id(id).one(&self.db).await?;
        Ok(result.map(Car::from))
    }

    async fn create(&self, car: CarDetails) -> AppResult<Car> {
        let active_model = ActiveModel {
            make: Set(car.make),
            model: Set(car.model),
            year: Set(car.year),
            daily_rate: Set(car.daily_rate),
            location: Set(car.location),
            available: Set(car.available),
            ..Default::default()
        };

        let model = active_model.insert(&self.db).await.map_err(AppError::from)?;
        Ok(Car::from(model))
    }

    async fn update(&self, car: Car) -> AppResult<Car> {
        let existing = CarEntity::find_by_id(car.id)
            .one(&self.db)
            .await?
            .ok_or_not_found("Car")?;

        let mut active: ActiveModel = existing.into();
        active.make = Set(car.make);
        active.model = Set(car.model);
        active.year = Set(car.year);
        active.daily_rate = Set(car.daily_rate);
        active.location = Set(car.location);
        active.available = Set(car.available);

        let model = active.update(&self.db).await.map_err(AppError::from)?;
        Ok(Car::from(model))
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        let result = CarEntity::delete_by_id(id).exec(&self.db).await?;

        if result.rows_affected == 0 {
            return Err(AppError::not_found("Car"));
        }

        Ok(())
    }

    async fn list(&self) -> AppResult<Vec<Car>> {
        let models = CarEntity::find()
            .order_by_asc(car::Column::Id)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(Car::from).collect())
    }
}
