//! Review handlers.

use axum::{
    extract::{Extension, Path, State},
    response::Json,
    routing::{delete, get, post},
    Router,
};

use crate::api::extractors::ValidatedJson;
use crate::api::middleware::{guarded, Access, CurrentUser};
use crate::api::AppState;
use crate::domain::{Caller, CreateReview, Review, UpdateReview};
use crate::errors::AppResult;
use crate::types::{Created, MessageResponse};

/// Create review routes
pub fn review_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_reviews))
        .route(
            "/",
            guarded(post(create_review).put(update_review), Access::Authenticated),
        )
        .route("/:id", get(get_review))
        .route("/:id", guarded(delete(delete_review), Access::ADMIN))
        .route("/user/:user_id", get(reviews_by_user))
}

/// List all reviews
#[utoipa::path(
    get,
    path = "/api/Review",
    tag = "Reviews",
    responses(
        (status = 200, description = "All reviews", body = Vec<Review>)
    )
)]
pub async fn list_reviews(State(state): State<AppState>) -> AppResult<Json<Vec<Review>>> {
    Ok(Json(state.review_service.list_reviews().await?))
}

/// Get review by ID
#[utoipa::path(
    get,
    path = "/api/Review/{id}",
    tag = "Reviews",
    params(
        ("id" = i32, Path, description = "Review ID")
    ),
    responses(
        (status = 200, description = "Review", body = Review),
        (status = 404, description = "Review not found")
    )
)]
pub async fn get_review(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Review>> {
    Ok(Json(state.review_service.get_review(id).await?))
}

/// Reviews written by one user
#[utoipa::path(
    get,
    path = "/api/Review/user/{userId}",
    tag = "Reviews",
    params(
        ("userId" = i32, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "The user's reviews", body = Vec<Review>),
        (status = 404, description = "User not found, or they wrote no reviews")
    )
)]
pub async fn reviews_by_user(
    State(state): State<AppState>,
    Path(user_id): Path<i32>,
) -> AppResult<Json<Vec<Review>>> {
    tracing::info!(user_id, "Fetching reviews by user");
    Ok(Json(state.review_service.reviews_for_user(user_id).await?))
}

/// Write a review
#[utoipa::path(
    post,
    path = "/api/Review",
    tag = "Reviews",
    security(("bearer_auth" = [])),
    request_body = CreateReview,
    responses(
        (status = 201, description = "Review created", body = Review),
        (status = 400, description = "Validation error or unknown user"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Review written for another user")
    )
)]
pub async fn create_review(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    ValidatedJson(payload): ValidatedJson<CreateReview>,
) -> AppResult<Created<Review>> {
    tracing::info!(user_id = payload.user_id, rating = payload.rating, "Creating review");
    let review = state
        .review_service
        .add_review(payload, Caller::from(&current_user))
        .await?;
    Ok(Created::at(format!("/api/Review/{}", review.id), review))
}

/// Replace a review
#[utoipa::path(
    put,
    path = "/api/Review",
    tag = "Reviews",
    security(("bearer_auth" = [])),
    request_body = UpdateReview,
    responses(
        (status = 200, description = "Review updated", body = Review),
        (status = 400, description = "Validation error or unknown user"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Review belongs to another user"),
        (status = 404, description = "Review not found")
    )
)]
pub async fn update_review(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    ValidatedJson(payload): ValidatedJson<UpdateReview>,
) -> AppResult<Json<Review>> {
    tracing::info!(review_id = payload.id, "Updating review");
    let review = state
        .review_service
        .update_review(payload, Caller::from(&current_user))
        .await?;
    Ok(Json(review))
}

/// Delete a review (admin only)
#[utoipa::path(
    delete,
    path = "/api/Review/{id}",
    tag = "Reviews",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Review ID")
    ),
    responses(
        (status = 200, description = "Review deleted", body = MessageResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - Admin only"),
        (status = 404, description = "Review not found")
    )
)]
pub async fn delete_review(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<MessageResponse>> {
    tracing::info!(review_id = id, "Deleting review");
    state.review_service.delete_review(id).await?;
    Ok(Json(MessageResponse::new("Review deleted successfully")))
}
