//! HTTP request handlers.

pub mod auth_handler;
pub mod car_handler;
pub mod payment_handler;
pub mod reservation_handler;
pub mod review_handler;
pub mod user_handler;

pub use auth_handler::auth_routes;
pub use car_handler::car_routes;
pub use payment_handler::payment_routes;
pub use reservation_handler::reservation_routes;
pub use review_handler::review_routes;
pub use user_handler::user_routes;
