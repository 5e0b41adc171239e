//! Application state - Dependency injection container.
//!
//! Provides centralized access to all application services and infrastructure.

use std::sync::Arc;

use crate::config::Config;
use crate::infra::Database;
use crate::services::{
    AuthService, CarService, PaymentService, ReservationService, ReviewService,
    ServiceContainer, Services, UserService,
};

/// Application state containing all services (DI container).
#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<dyn AuthService>,
    pub user_service: Arc<dyn UserService>,
    pub car_service: Arc<dyn CarService>,
    pub reservation_service: Arc<dyn ReservationService>,
    pub review_service: Arc<dyn ReviewService>,
    pub payment_service: Arc<dyn PaymentService>,
    /// Origins the CORS policy admits; `*` admits any
    pub cors_allowed_origins: Arc<[String]>,
    /// Database handle for health checks; absent when services are injected
    database: Option<Arc<Database>>,
}

impl AppState {
    /// Create application state from database connection and config.
    pub fn from_config(database: Arc<Database>, config: Config) -> Self {
        let cors_allowed_origins: Arc<[String]> = config.cors_allowed_origins.clone().into();
        let container = Services::from_connection(database.get_connection(), config);

        Self {
            database: Some(database),
            ..Self::from_container(&container, cors_allowed_origins)
        }
    }

    /// Create application state from any service container.
    pub fn from_container<C: ServiceContainer + ?Sized>(
        container: &C,
        cors_allowed_origins: Arc<[String]>,
    ) -> Self {
        Self {
            auth_service: container.auth(),
            user_service: container.users(),
            car_service: container.cars(),
            reservation_service: container.reservations(),
            review_service: container.reviews(),
            payment_service: container.payments(),
            cors_allowed_origins,
            database: None,
        }
    }

    pub fn database(&self) -> Option<&Arc<Database>> {
        self.database.as_ref()
    }
}
