//! Service Container - Centralized service access.
//!
//! Builds every service over one unit of work and hands them out as trait
//! objects, plus a small helper for running independent lookups together.

use std::future::Future;
use std::sync::Arc;

use super::{
    AuthService, Authenticator, CarManager, CarService, PaymentManager, PaymentService,
    ReservationManager, ReservationService, ReviewManager, ReviewService, UserManager,
    UserService,
};
use crate::config::Config;
use crate::errors::AppResult;
use crate::infra::{Persistence, UnitOfWork};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Service container trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
pub trait ServiceContainer: Send + Sync {
    fn auth(&self) -> Arc<dyn AuthService>;

    fn users(&self) -> Arc<dyn UserService>;

    fn cars(&self) -> Arc<dyn CarService>;

    fn reservations(&self) -> Arc<dyn ReservationService>;

    fn reviews(&self) -> Arc<dyn ReviewService>;

    fn payments(&self) -> Arc<dyn PaymentService>;
}

/// Concrete implementation of ServiceContainer
pub struct Services {
    auth_service: Arc<dyn AuthService>,
    user_service: Arc<dyn UserService>,
    car_service: Arc<dyn CarService>,
    reservation_service: Arc<dyn ReservationService>,
    review_service: Arc<dyn ReviewService>,
    payment_service: Arc<dyn PaymentService>,
}

impl Services {
    /// Wire every service to the same unit of work.
    pub fn from_unit_of_work<U: UnitOfWork + 'static>(uow: Arc<U>, config: Config) -> Self {
        Self {
            auth_service: Arc::new(Authenticator::new(uow.clone(), config)),
            user_service: Arc::new(UserManager::new(uow.clone())),
            car_service: Arc::new(CarManager::new(uow.clone())),
            reservation_service: Arc::new(ReservationManager::new(uow.clone())),
            review_service: Arc::new(ReviewManager::new(uow.clone())),
            payment_service: Arc::new(PaymentManager::new(uow)),
        }
    }

    /// Create service container from database connection and config
    pub fn from_connection(db: sea_orm::DatabaseConnection, config: Config) -> Self {
        Self::from_unit_of_work(Arc::new(Persistence::new(db)), config)
    }
}

impl ServiceContainer for Services {
    fn auth(&self) -> Arc<dyn AuthService> {
        self.auth_service.clone()
    }

    fn users(&self) -> Arc<dyn UserService> {
        self.user_service.clone()
    }

    fn cars(&self) -> Arc<dyn CarService> {
        self.car_service.clone()
    }

    fn reservations(&self) -> Arc<dyn ReservationService> {
        self.reservation_service.clone()
    }

    fn reviews(&self) -> Arc<dyn ReviewService> {
        self.review_service.clone()
    }

    fn payments(&self) -> Arc<dyn PaymentService> {
        self.payment_service.clone()
    }
}

/// Parallel execution utilities for running independent operations concurrently.
pub mod parallel {
    use super::*;
    use tokio::try_join;

    /// Execute two independent async operations in parallel.
    ///
    /// If either operation fails, the error is returned immediately.
    pub async fn join2<F1, F2, T1, T2>(f1: F1, f2: F2) -> AppResult<(T1, T2)>
    where
        F1: Future<Output = AppResult<T1>>,
        F2: Future<Output = AppResult<T2>>,
    {
        try_join!(f1, f2)
    }
}
