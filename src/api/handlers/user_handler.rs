//! User handlers.

use axum::{
    extract::{Extension, Path, State},
    response::Json,
    routing::{delete, get, post},
    Router,
};

use crate::api::extractors::ValidatedJson;
use crate::api::middleware::{caller, guarded, Access, CurrentUser};
use crate::api::AppState;
use crate::domain::{CreateUser, UpdateUser, UserResponse};
use crate::errors::AppResult;
use crate::types::{Created, MessageResponse};

/// Create user routes
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/", guarded(get(list_users), Access::ADMIN))
        .route("/", post(create_user).put(update_user))
        .route("/user/id/:id", guarded(get(get_user), Access::Authenticated))
        .route(
            "/user/userName/:user_name",
            guarded(get(get_user_by_user_name), Access::Authenticated),
        )
        .route("/:id", guarded(delete(delete_user), Access::ADMIN))
}

/// List all users (admin only)
#[utoipa::path(
    get,
    path = "/api/User",
    tag = "Users",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "List of all users", body = Vec<UserResponse>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - Admin only")
    )
)]
pub async fn list_users(State(state): State<AppState>) -> AppResult<Json<Vec<UserResponse>>> {
    let users = state.user_service.list_users().await?;
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

/// Get user by ID
#[utoipa::path(
    get,
    path = "/api/User/user/id/{id}",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User profile", body = UserResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "User not found")
    )
)]
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<UserResponse>> {
    tracing::info!(user_id = id, "Fetching user");
    let user = state.user_service.get_user(id).await?;
    Ok(Json(UserResponse::from(user)))
}

/// Get user by user name
#[utoipa::path(
    get,
    path = "/api/User/user/userName/{userName}",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(
        ("userName" = String, Path, description = "Unique user name")
    ),
    responses(
        (status = 200, description = "User profile", body = UserResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "User not found")
    )
)]
pub async fn get_user_by_user_name(
    State(state): State<AppState>,
    Path(user_name): Path<String>,
) -> AppResult<Json<UserResponse>> {
    tracing::info!(%user_name, "Fetching user by user name");
    let user = state.user_service.get_user_by_user_name(&user_name).await?;
    Ok(Json(UserResponse::from(user)))
}

/// Register a user
///
/// Only an admin caller may set `role`.
#[utoipa::path(
    post,
    path = "/api/User",
    tag = "Users",
    request_body = CreateUser,
    responses(
        (status = 201, description = "User created", body = UserResponse),
        (status = 400, description = "Validation error"),
        (status = 403, description = "Role assignment requires admin"),
        (status = 409, description = "User name already taken")
    )
)]
pub async fn create_user(
    State(state): State<AppState>,
    current_user: Option<Extension<CurrentUser>>,
    ValidatedJson(payload): ValidatedJson<CreateUser>,
) -> AppResult<Created<UserResponse>> {
    tracing::info!(user_name = %payload.user_name, "Creating user");
    let user = state
        .user_service
        .add_user(payload, caller(&current_user))
        .await?;

    Ok(Created::at(
        format!("/api/User/user/id/{}", user.id),
        UserResponse::from(user),
    ))
}

/// Replace a user's profile
#[utoipa::path(
    put,
    path = "/api/User",
    tag = "Users",
    request_body = UpdateUser,
    responses(
        (status = 200, description = "User updated", body = UserResponse),
        (status = 400, description = "Validation error"),
        (status = 403, description = "Role change, password change or admin account edit by another caller"),
        (status = 404, description = "User not found")
    )
)]
pub async fn update_user(
    State(state): State<AppState>,
    current_user: Option<Extension<CurrentUser>>,
    ValidatedJson(payload): ValidatedJson<UpdateUser>,
) -> AppResult<Json<UserResponse>> {
    tracing::info!(user_id = payload.id, "Updating user");
    let user = state
        .user_service
        .update_user(payload, caller(&current_user))
        .await?;

    Ok(Json(UserResponse::from(user)))
}

/// Delete a user (admin only)
#[utoipa::path(
    delete,
    path = "/api/User/{id}",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User deleted", body = MessageResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - Admin only"),
        (status = 404, description = "User not found")
    )
)]
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<MessageResponse>> {
    tracing::info!(user_id = id, "Deleting user");
    state.user_service.delete_user(id).await?;
    Ok(Json(MessageResponse::new("User deleted successfully")))
}
