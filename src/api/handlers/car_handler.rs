//! Car handlers.

use axum::{
    extract::{Path, State},
    response::Json,
    routing::{delete, get, post},
    Router,
};

use crate::api::extractors::ValidatedJson;
use crate::api::middleware::{guarded, Access};
use crate::api::AppState;
use crate::domain::{Car, CarDetails, UpdateCar};
use crate::errors::AppResult;
use crate::types::{Created, MessageResponse};

/// Create car routes
pub fn car_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_cars))
        .route("/", guarded(post(create_car).put(update_car), Access::ADMIN))
        .route("/:id", get(get_car))
        .route("/:id", guarded(delete(delete_car), Access::ADMIN))
}

/// List the fleet
#[utoipa::path(
    get,
    path = "/api/Car",
    tag = "Cars",
    responses(
        (status = 200, description = "All cars", body = Vec<Car>)
    )
)]
pub async fn list_cars(State(state): State<AppState>) -> AppResult<Json<Vec<Car>>> {
    Ok(Json(state.car_service.list_cars().await?))
}

/// Get car by ID
#[utoipa::path(
    get,
    path = "/api/Car/{id}",
    tag = "Cars",
    params(
        ("id" = i32, Path, description = "Car ID")
    ),
    responses(
        (status = 200, description = "Car", body = Car),
        (status = 404, description = "Car not found")
    )
)]
pub async fn get_car(State(state): State<AppState>, Path(id): Path<i32>) -> AppResult<Json<Car>> {
    Ok(Json(state.car_service.get_car(id).await?))
}

/// Add a car (admin only)
#[utoipa::path(
    post,
    path = "/api/Car",
    tag = "Cars",
    security(("bearer_auth" = [])),
    request_body = CarDetails,
    responses(
        (status = 201, description = "Car added", body = Car),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - Admin only")
    )
)]
pub async fn create_car(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CarDetails>,
) -> AppResult<Created<Car>> {
    tracing::info!(make = %payload.make, model = %payload.model, "Adding car");
    let car = state.car_service.add_car(payload).await?;
    Ok(Created::at(format!("/api/Car/{}", car.id), car))
}

/// Replace a car (admin only)
#[utoipa::path(
    put,
    path = "/api/Car",
    tag = "Cars",
    security(("bearer_auth" = [])),
    request_body = UpdateCar,
    responses(
        (status = 200, description = "Car updated", body = Car),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - Admin only"),
        (status = 404, description = "Car not found")
    )
)]
pub async fn update_car(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<UpdateCar>,
) -> AppResult<Json<Car>> {
    tracing::info!(car_id = payload.id, "Updating car");
    Ok(Json(state.car_service.update_car(payload).await?))
}

/// Remove a car (admin only)
#[utoipa::path(
    delete,
    path = "/api/Car/{id}",
    tag = "Cars",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Car ID")
    ),
    responses(
        (status = 200, description = "Car deleted", body = MessageResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - Admin only"),
        (status = 404, description = "Car not found")
    )
)]
pub async fn delete_car(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<MessageResponse>> {
    tracing::info!(car_id = id, "Deleting car");
    state.car_service.delete_car(id).await?;
    Ok(Json(MessageResponse::new("Car deleted successfully")))
}
