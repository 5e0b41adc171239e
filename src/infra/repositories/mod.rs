//! Repository layer - Data access abstraction
//!
//! Repositories provide an abstraction over data persistence,
//! following the Repository pattern for clean separation of concerns.

mod car_repository;
pub(crate) mod entities;
mod payment_repository;
mod reservation_repository;
mod review_repository;
mod user_repository;

use sea_orm::{DbErr, SqlErr};

use crate::errors::AppError;

pub use car_repository::{CarRepository, CarStore};
pub use payment_repository::{PaymentRepository, PaymentStore};
pub use reservation_repository::{ReservationRepository, ReservationStore};
pub use review_repository::{ReviewRepository, ReviewStore};
pub use user_repository::{UserRepository, UserStore};

// Export mocks for tests (both unit and integration)
#[cfg(any(test, feature = "test-utils"))]
pub use car_repository::MockCarRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use payment_repository::MockPaymentRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use reservation_repository::MockReservationRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use review_repository::MockReviewRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use user_repository::MockUserRepository;

/// Map constraint violations raised by inserts and updates.
///
/// A broken foreign key means the request named a row that does not exist.
fn write_error(err: DbErr, entity: &str) -> AppError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(detail)) => {
            tracing::debug!("Unique violation on {}: {}", entity, detail);
            AppError::conflict(entity)
        }
        Some(SqlErr::ForeignKeyConstraintViolation(detail)) => {
            tracing::debug!("Foreign key violation on {}: {}", entity, detail);
            AppError::bad_request(format!("{} references a missing record", entity))
        }
        _ => AppError::from(err),
    }
}
