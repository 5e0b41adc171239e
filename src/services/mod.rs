//! Application services layer - Use cases and business logic.
//!
//! Services orchestrate domain logic and infrastructure to fulfill
//! application use cases. They depend on abstractions (traits) for
//! dependency inversion, and reach repositories through the unit of work.

mod auth_service;
mod car_service;
pub mod container;
mod payment_service;
mod reservation_service;
mod review_service;
mod user_service;

#[cfg(test)]
mod testing;

// Service Container
pub use container::{parallel, ServiceContainer, Services};

// Service traits and implementations
pub use auth_service::{AuthService, Authenticator, Claims, TokenResponse};
pub use car_service::{CarManager, CarService};
pub use payment_service::{PaymentManager, PaymentService};
pub use reservation_service::{ReservationManager, ReservationService};
pub use review_service::{ReviewManager, ReviewService};
pub use user_service::{UserManager, UserService};

#[cfg(any(test, feature = "test-utils"))]
pub use container::MockServiceContainer;
