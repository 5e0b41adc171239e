//! Unit of work over mock repositories for service tests.
//!
//! Repositories that a test does not configure are fresh mocks, so any
//! unexpected call fails the test.

use std::sync::Arc;

use crate::infra::{
    CarRepository, MockCarRepository, MockPaymentRepository, MockReservationRepository,
    MockReviewRepository, MockUserRepository, PaymentRepository, ReservationRepository,
    ReviewRepository, UnitOfWork, UserRepository,
};

pub(crate) struct TestUnitOfWork {
    users: Arc<MockUserRepository>,
    cars: Arc<MockCarRepository>,
    reservations: Arc<MockReservationRepository>,
    reviews: Arc<MockReviewRepository>,
    payments: Arc<MockPaymentRepository>,
}

impl Default for TestUnitOfWork {
    fn default() -> Self {
        Self {
            users: Arc::new(MockUserRepository::new()),
            cars: Arc::new(MockCarRepository::new()),
            reservations: Arc::new(MockReservationRepository::new()),
            reviews: Arc::new(MockReviewRepository::new()),
            payments: Arc::new(MockPaymentRepository::new()),
        }
    }
}

impl TestUnitOfWork {
    pub(crate) fn with_users(mut self, repo: MockUserRepository) -> Self {
        self.users = Arc::new(repo);
        self
    }

    pub(crate) fn with_cars(mut self, repo: MockCarRepository) -> Self {
        self.cars = Arc::new(repo);
        self
    }

    pub(crate) fn with_reservations(mut self, repo: MockReservationRepository) -> Self {
        self.reservations = Arc::new(repo);
        self
    }

    pub(crate) fn with_reviews(mut self, repo: MockReviewRepository) -> Self {
        self.reviews = Arc::new(repo);
        self
    }

    pub(crate) fn with_payments(mut self, repo: MockPaymentRepository) -> Self {
        self.payments = Arc::new(repo);
        self
    }
}

impl UnitOfWork for TestUnitOfWork {
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
