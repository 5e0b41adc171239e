//! Unit of Work pattern implementation.
//!
//! Centralizes access to every repository so services depend on one
//! handle instead of five. Each repository call runs on its own pooled
//! connection.

use sea_orm::DatabaseConnection;
use std::sync::Arc;

use super::repositories::{
    CarRepository, CarStore, PaymentRepository, PaymentStore, ReservationRepository,
    ReservationStore, ReviewRepository, ReviewStore, UserRepository, UserStore,
};

/// Unit of Work trait for dependency injection.
pub trait UnitOfWork: Send + Sync {
    fn users(&self) -> Arc<dyn UserRepository>;

    fn cars(&self) -> Arc<dyn CarRepository>;

    fn reservations(&self) -> Arc<dyn ReservationRepository>;

    fn reviews(&self) -> Arc<dyn ReviewRepository>;

    fn payments(&self) -> Arc<dyn PaymentRepository>;
}

/// SeaORM-backed UnitOfWork
pub struct Persistence {
    users: Arc<UserStore>,
    cars: Arc<CarStore>,
    reservations: Arc<ReservationStore>,
    reviews: Arc<ReviewStore>,
    payments: Arc<PaymentStore>,
}

impl Persistence {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            users: Arc::new(UserStore::new(db.clone())),
            cars: Arc::new(CarStore::new(db.clone())),
            reservations: Arc::new(ReservationStore::new(db.clone())),
            reviews: Arc::new(ReviewStore::new(db.clone())),
            payments: Arc::new(PaymentStore::new(db)),
        }
    }
}

impl UnitOfWork for Persistence {
    fn users(&self) -> Arc<dyn UserRepository> {
        self.users.clone()
    }

    fn cars(&self) -> Arc<dyn CarRepository> {
        self.cars.clone()
    }

    fn reservations(&self) -> Arc<dyn ReservationRepository> {
        self.reservations.clone()
    }

    fn reviews(&self) -> Arc<dyn ReviewRepository> {
        self.reviews.clone()
    }

    fn payments(&self) -> Arc<dyn PaymentRepository> {
        self.payments.clone()
    }
}
