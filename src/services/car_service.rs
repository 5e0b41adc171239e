//! Car service - Fleet management.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::{Car, CarDetails, UpdateCar};
use crate::errors::{AppResult, OptionExt};
use crate::infra::UnitOfWork;

#[async_trait]
pub trait CarService: Send + Sync {
    async fn list_cars(&self) -> AppResult<Vec<Car>>;

    async fn get_car(&self, id: i32) -> AppResult<Car>;

    async fn add_car(&self, details: CarDetails) -> AppResult<Car>;

    async fn update_car(&self, request: UpdateCar) -> AppResult<Car>;

    async fn delete_car(&self, id: i32) -> AppResult<()>;
}

pub struct CarManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> CarManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> CarService for CarManager<U> {
    async fn list_cars(&self) -> AppResult<Vec<Car>> {
        self.uow.cars().list().await
    }

    async fn get_car(&self, id: i32) -> AppResult<Car> {
        self.uow.cars().find_by_id(id).await?.ok_or_not_found("Car")
    }

    async fn add_car(&self, details: CarDetails) -> AppResult<Car> {
        let car = self.uow.cars().create(details).await?;
        tracing::info!(car_id = car.id, "Car added");
        Ok(car)
    }

    async fn update_car(&self, request: UpdateCar) -> AppResult<Car> {
        self.uow
            .cars()
            .update(Car::from_details(request.id, request.details))
            .await
    }

    async fn delete_car(&self, id: i32) -> AppResult<()> {
        self.uow.cars().delete(id).await
    }
}
