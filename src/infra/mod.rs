//! Infrastructure layer - External systems integration
//!
//! Database connection, migrations, SeaORM repositories and the unit of
//! work that hands them out.

pub mod db;
pub mod repositories;
pub mod unit_of_work;

pub use db::{Database, Migrator};
pub use repositories::{
    CarRepository, CarStore, PaymentRepository, PaymentStore, ReservationRepository,
    ReservationStore, ReviewRepository, ReviewStore, UserRepository, UserStore,
};
pub use unit_of_work::{Persistence, UnitOfWork};

#[cfg(any(test, feature = "test-utils"))]
pub use repositories::{
    MockCarRepository, MockPaymentRepository, MockReservationRepository, MockReviewRepository,
    MockUserRepository,
};
