//! Reservation handlers.
//!
//! The by-car and by-user lookups answer with reference-preserving JSON:
//! each reservation navigates to its car (or user), which navigates back
//! to the same reservations through `$ref`s.

use axum::{
    extract::{Path, State},
    response::Json,
    routing::{delete, get},
    Router,
};

use crate::api::extractors::ValidatedJson;
use crate::api::middleware::{guarded, Access};
use crate::api::AppState;
use crate::domain::{CreateReservation, Reservation, UpdateReservation};
use crate::errors::AppResult;
use crate::types::{Created, MessageResponse, PreservedJson};
use crate::utils::preserve;

/// Create reservation routes
pub fn reservation_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(list_reservations)
                .post(create_reservation)
                .put(update_reservation),
        )
        .route("/:id", guarded(get(get_reservation), Access::ADMIN_OR_USER))
        .route("/:id", guarded(delete(delete_reservation), Access::ADMIN))
        .route(
            "/car/:car_id",
            guarded(get(reservations_by_car), Access::Authenticated),
        )
        .route("/user/:user_id", get(reservations_by_user))
}

/// List all reservations
#[utoipa::path(
    get,
    path = "/api/Reservation",
    tag = "Reservations",
    responses(
        (status = 200, description = "All reservations", body = Vec<Reservation>)
    )
)]
pub async fn list_reservations(State(state): State<AppState>) -> AppResult<Json<Vec<Reservation>>> {
    let reservations = state.reservation_service.list_reservations().await?;
    Ok(Json(reservations))
}

/// Get reservation by ID
#[utoipa::path(
    get,
    path = "/api/Reservation/{id}",
    tag = "Reservations",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Reservation ID")
    ),
    responses(
        (status = 200, description = "Reservation", body = Reservation),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Reservation not found")
    )
)]
pub async fn get_reservation(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Reservation>> {
    tracing::info!(reservation_id = id, "Fetching reservation");
    let reservation = state.reservation_service.get_reservation(id).await?;
    Ok(Json(reservation))
}

/// Reservations of one car, with the car they share
#[utoipa::path(
    get,
    path = "/api/Reservation/car/{carId}",
    tag = "Reservations",
    security(("bearer_auth" = [])),
    params(
        ("carId" = i32, Path, description = "Car ID")
    ),
    responses(
        (status = 200, description = "Reference-preserving JSON ($id/$ref) of the car's reservations"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Car not found, or it has no reservations")
    )
)]
pub async fn reservations_by_car(
    State(state): State<AppState>,
    Path(car_id): Path<i32>,
) -> AppResult<PreservedJson> {
    tracing::info!(car_id, "Fetching reservations by car");
    let graph = state.reservation_service.reservations_for_car(car_id).await?;
    Ok(PreservedJson(preserve::to_string_pretty(&graph)?))
}

/// Reservations of one user, with the user they share
#[utoipa::path(
    get,
    path = "/api/Reservation/user/{userId}",
    tag = "Reservations",
    params(
        ("userId" = i32, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "Reference-preserving JSON ($id/$ref) of the user's reservations"),
        (status = 404, description = "User not found, or they have no reservations")
    )
)]
pub async fn reservations_by_user(
    State(state): State<AppState>,
    Path(user_id): Path<i32>,
) -> AppResult<PreservedJson> {
    tracing::info!(user_id, "Fetching reservations by user");
    let graph = state.reservation_service.reservations_for_user(user_id).await?;
    Ok(PreservedJson(preserve::to_string_pretty(&graph)?))
}

/// Book a car
#[utoipa::path(
    post,
    path = "/api/Reservation",
    tag = "Reservations",
    request_body = CreateReservation,
    responses(
        (status = 201, description = "Reservation created", body = Reservation),
        (status = 400, description = "Invalid dates or unknown user/car")
    )
)]
pub async fn create_reservation(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateReservation>,
) -> AppResult<Created<Reservation>> {
    tracing::info!(car_id = payload.car_id, user_id = payload.user_id, "Creating reservation");
    let reservation = state.reservation_service.add_reservation(payload).await?;

    Ok(Created::at(
        format!("/api/Reservation/{}", reservation.id),
        reservation,
    ))
}

/// Replace a reservation
#[utoipa::path(
    put,
    path = "/api/Reservation",
    tag = "Reservations",
    request_body = UpdateReservation,
    responses(
        (status = 200, description = "Reservation updated", body = Reservation),
        (status = 400, description = "Invalid dates or unknown user/car"),
        (status = 404, description = "Reservation not found")
    )
)]
pub async fn update_reservation(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<UpdateReservation>,
) -> AppResult<Json<Reservation>> {
    tracing::info!(reservation_id = payload.id, "Updating reservation");
    let reservation = state.reservation_service.update_reservation(payload).await?;
    Ok(Json(reservation))
}

/// Cancel and remove a reservation (admin only)
#[utoipa::path(
    delete,
    path = "/api/Reservation/{id}",
    tag = "Reservations",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Reservation ID")
    ),
    responses(
        (status = 200, description = "Reservation deleted", body = MessageResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - Admin only"),
        (status = 404, description = "Reservation not found")
    )
)]
pub async fn delete_reservation(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<MessageResponse>> {
    tracing::info!(reservation_id = id, "Deleting reservation");
    state.reservation_service.delete_reservation(id).await?;
    Ok(Json(MessageResponse::new("Reservation deleted successfully")))
}
