//! Payment handlers.

use axum::{
    extract::{Extension, Path, State},
    response::Json,
    routing::{delete, get, post, put},
    Router,
};

use crate::api::extractors::ValidatedJson;
use crate::api::middleware::{guarded, Access, CurrentUser};
use crate::api::AppState;
use crate::domain::{Caller, CreatePayment, Payment, UpdatePayment};
use crate::errors::AppResult;
use crate::types::{Created, MessageResponse};

/// Create payment routes
pub fn payment_routes() -> Router<AppState> {
    Router::new()
        .route("/", guarded(get(list_payments), Access::ADMIN))
        .route("/", guarded(post(create_payment), Access::Authenticated))
        .route("/", guarded(put(update_payment), Access::ADMIN))
        .route("/:id", guarded(get(get_payment), Access::ADMIN_OR_USER))
        .route("/:id", guarded(delete(delete_payment), Access::ADMIN))
        .route(
            "/user/userName/:user_name",
            guarded(get(payments_by_user_name), Access::ADMIN_OR_USER),
        )
}

/// List all payments (admin only)
#[utoipa::path(
    get,
    path = "/api/Payment",
    tag = "Payments",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All payments", body = Vec<Payment>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - Admin only")
    )
)]
pub async fn list_payments(State(state): State<AppState>) -> AppResult<Json<Vec<Payment>>> {
    Ok(Json(state.payment_service.list_payments().await?))
}

/// Get payment by ID
#[utoipa::path(
    get,
    path = "/api/Payment/{id}",
    tag = "Payments",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Payment ID")
    ),
    responses(
        (status = 200, description = "Payment", body = Payment),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Payment not found")
    )
)]
pub async fn get_payment(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Payment>> {
    Ok(Json(state.payment_service.get_payment(id).await?))
}

/// Payments made by the named user
#[utoipa::path(
    get,
    path = "/api/Payment/user/userName/{userName}",
    tag = "Payments",
    security(("bearer_auth" = [])),
    params(
        ("userName" = String, Path, description = "Unique user name")
    ),
    responses(
        (status = 200, description = "The user's payments", body = Vec<Payment>),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "User not found, or they made no payments")
    )
)]
pub async fn payments_by_user_name(
    State(state): State<AppState>,
    Path(user_name): Path<String>,
) -> AppResult<Json<Vec<Payment>>> {
    tracing::info!(%user_name, "Fetching payments by user name");
    Ok(Json(
        state.payment_service.payments_for_user_name(&user_name).await?,
    ))
}

/// Record a payment
#[utoipa::path(
    post,
    path = "/api/Payment",
    tag = "Payments",
    security(("bearer_auth" = [])),
    request_body = CreatePayment,
    responses(
        (status = 201, description = "Payment recorded", body = Payment),
        (status = 400, description = "Validation error or unknown user/reservation"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Payment made for another user")
    )
)]
pub async fn create_payment(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    ValidatedJson(payload): ValidatedJson<CreatePayment>,
) -> AppResult<Created<Payment>> {
    tracing::info!(user_id = payload.user_id, amount = payload.amount, "Recording payment");
    let payment = state
        .payment_service
        .add_payment(payload, Caller::from(&current_user))
        .await?;
    Ok(Created::at(format!("/api/Payment/{}", payment.id), payment))
}

/// Replace a payment (admin only)
#[utoipa::path(
    put,
    path = "/api/Payment",
    tag = "Payments",
    security(("bearer_auth" = [])),
    request_body = UpdatePayment,
    responses(
        (status = 200, description = "Payment updated", body = Payment),
        (status = 400, description = "Validation error or unknown user/reservation"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - Admin only"),
        (status = 404, description = "Payment not found")
    )
)]
pub async fn update_payment(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<UpdatePayment>,
) -> AppResult<Json<Payment>> {
    tracing::info!(payment_id = payload.id, "Updating payment");
    Ok(Json(state.payment_service.update_payment(payload).await?))
}

/// Delete a payment (admin only)
#[utoipa::path(
    delete,
    path = "/api/Payment/{id}",
    tag = "Payments",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Payment ID")
    ),
    responses(
        (status = 200, description = "Payment deleted", body = MessageResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - Admin only"),
        (status = 404, description = "Payment not found")
    )
)]
pub async fn delete_payment(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<MessageResponse>> {
    tracing::info!(payment_id = id, "Deleting payment");
    state.payment_service.delete_payment(id).await?;
    Ok(Json(MessageResponse::new("Payment deleted successfully")))
}
