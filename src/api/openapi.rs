//! OpenAPI documentation configuration.
//!
//! Provides Swagger UI for API exploration and testing.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::api::handlers::{
    auth_handler, car_handler, payment_handler, reservation_handler, review_handler, user_handler,
};
use crate::domain::{
    Car, CarDetails, CreatePayment, CreateReservation, CreateReview, CreateUser, Payment,
    Reservation, ReservationStatus, Review, UpdateCar, UpdatePayment, UpdateReservation,
    UpdateReview, UpdateUser, UserResponse, UserRole,
};
use crate::services::TokenResponse;
use crate::types::MessageResponse;

/// OpenAPI documentation for the Car Rental API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Car Rental API",
        version = "0.1.0",
        description = "Reservations, users, cars, reviews and payments for a car rental business"
    ),
    servers(
        (url = "http://localhost:3000", description = "Local development server")
    ),
    paths(
        auth_handler::login,
        user_handler::list_users,
        user_handler::get_user,
        user_handler::get_user_by_user_name,
        user_handler::create_user,
        user_handler::update_user,
        user_handler::delete_user,
        reservation_handler::list_reservations,
        reservation_handler::get_reservation,
        reservation_handler::reservations_by_car,
        reservation_handler::reservations_by_user,
        reservation_handler::create_reservation,
        reservation_handler::update_reservation,
        reservation_handler::delete_reservation,
        car_handler::list_cars,
        car_handler::get_car,
        car_handler::create_car,
        car_handler::update_car,
        car_handler::delete_car,
        review_handler::list_reviews,
        review_handler::get_review,
        review_handler::reviews_by_user,
        review_handler::create_review,
        review_handler::update_review,
        review_handler::delete_review,
        payment_handler::list_payments,
        payment_handler::get_payment,
        payment_handler::payments_by_user_name,
        payment_handler::create_payment,
        payment_handler::update_payment,
        payment_handler::delete_payment,
    ),
    components(
        schemas(
            UserRole,
            UserResponse,
            CreateUser,
            UpdateUser,
            Car,
            CarDetails,
            UpdateCar,
            ReservationStatus,
            Reservation,
            CreateReservation,
            UpdateReservation,
            Review,
            CreateReview,
            UpdateReview,
            Payment,
            CreatePayment,
            UpdatePayment,
            MessageResponse,
            auth_handler::LoginRequest,
            TokenResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Token issuance"),
        (name = "Users", description = "User accounts"),
        (name = "Reservations", description = "Car bookings"),
        (name = "Cars", description = "Fleet"),
        (name = "Reviews", description = "Customer feedback"),
        (name = "Payments", description = "Payments received")
    )
)]
pub struct ApiDoc;

/// Security scheme modifier for JWT Bearer authentication
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("JWT token obtained from /api/auth/login"))
                        .build(),
                ),
            );
        }
    }
}
