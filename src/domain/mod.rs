//! Domain layer - Core business entities and logic
//!
//! Entities, request DTOs and value objects for the rental business,
//! independent of persistence and HTTP.

pub mod car;
pub mod graph;
pub mod password;
pub mod payment;
pub mod reservation;
pub mod review;
pub mod user;

pub use car::{Car, CarDetails, UpdateCar};
pub use graph::ReservationGraph;
pub use password::Password;
pub use payment::{CreatePayment, NewPayment, Payment, UpdatePayment};
pub use reservation::{
    CreateReservation, NewReservation, Reservation, ReservationStatus, UpdateReservation,
};
pub use review::{CreateReview, NewReview, Review, UpdateReview};
pub use user::{Caller, CreateUser, NewUser, UpdateUser, User, UserResponse, UserRole};
