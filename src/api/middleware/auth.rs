//! JWT authentication and per-route access guards.
//!
//! `auth_middleware` runs on every request and only identifies the caller;
//! routes that need a principal add `require_access` with the capability
//! they demand.

use axum::{
    extract::{Extension, Request, State},
    http::header::AUTHORIZATION,
    middleware::{self, Next},
    response::Response,
    routing::MethodRouter,
};

use crate::api::AppState;
use crate::config::BEARER_TOKEN_PREFIX;
use crate::domain::{Caller, UserRole};
use crate::errors::{AppError, AppResult};

/// Authenticated user extracted from JWT token
#[derive(Clone, Debug, PartialEq)]
pub struct CurrentUser {
    pub id: i32,
    pub user_name: String,
    pub role: UserRole,
}

impl CurrentUser {
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

impl From<&CurrentUser> for Caller {
    fn from(user: &CurrentUser) -> Self {
        Caller::User {
            id: user.id,
            role: user.role,
        }
    }
}

/// Service-layer identity for a route that also admits anonymous callers.
pub fn caller(current_user: &Option<Extension<CurrentUser>>) -> Caller {
    match current_user {
        Some(Extension(user)) => Caller::from(user),
        None => Caller::Anonymous,
    }
}

/// Identify the caller from `Authorization: Bearer <jwt>`.
///
/// A missing or invalid token leaves the request anonymous; rejecting it is
/// left to the route's guard.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    if let Some(current_user) = identify(&state, &request) {
        request.extensions_mut().insert(current_user);
    }

    next.run(request).await
}

fn identify(state: &AppState, request: &Request) -> Option<CurrentUser> {
    let token = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())?
        .strip_prefix(BEARER_TOKEN_PREFIX)?;

    match state.auth_service.verify_token(token) {
        Ok(claims) => Some(CurrentUser {
            id: claims.sub,
            user_name: claims.user_name,
            role: UserRole::from(claims.role.as_str()),
        }),
        Err(e) => {
            tracing::debug!("Ignoring invalid bearer token: {}", e);
            None
        }
    }
}

/// What a route demands of its caller
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Access {
    /// Any identified caller
    Authenticated,
    /// An identified caller holding one of these roles
    Roles(&'static [UserRole]),
}

impl Access {
    pub const ADMIN: Access = Access::Roles(&[UserRole::Admin]);
    pub const ADMIN_OR_USER: Access = Access::Roles(&[UserRole::Admin, UserRole::User]);

    /// No principal is 401; a principal without a listed role is 403.
    pub fn check(&self, current_user: Option<&CurrentUser>) -> AppResult<()> {
        let current_user = current_user.ok_or(AppError::Unauthorized)?;

        match self {
            Access::Authenticated => Ok(()),
            Access::Roles(roles) if roles.contains(&current_user.role) => Ok(()),
            Access::Roles(_) => {
                tracing::warn!(
                    user_id = current_user.id,
                    role = %current_user.role,
                    "Access denied"
                );
                Err(AppError::Forbidden)
            }
        }
    }
}

/// Guard middleware; the demanded `Access` is its state.
pub async fn require_access(
    State(access): State<Access>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    access.check(request.extensions().get::<CurrentUser>())?;
    Ok(next.run(request).await)
}

/// Put `route` behind an access guard.
pub fn guarded(route: MethodRouter<AppState>, access: Access) -> MethodRouter<AppState> {
    route.route_layer(middleware::from_fn_with_state(access, require_access))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn caller(role: UserRole) -> CurrentUser {
        CurrentUser {
            id: 1,
            user_name: "caller".to_string(),
            role,
        }
    }

    #[test]
    fn test_anonymous_is_unauthorized() {
        assert!(matches!(
            Access::Authenticated.check(None),
            Err(AppError::Unauthorized)
        ));
        assert!(matches!(Access::ADMIN.check(None), Err(AppError::Unauthorized)));
    }

    #[test]
    fn test_role_sets() {
        let user = caller(UserRole::User);
        let admin = caller(UserRole::Admin);

        assert!(Access::Authenticated.check(Some(&user)).is_ok());
        assert!(Access::ADMIN_OR_USER.check(Some(&user)).is_ok());
        assert!(matches!(
            Access::ADMIN.check(Some(&user)),
            Err(AppError::Forbidden)
        ));
        assert!(Access::ADMIN.check(Some(&admin)).is_ok());
    }

    #[test]
    fn test_missing_principal_is_anonymous_caller() {
        assert_eq!(super::caller(&None), Caller::Anonymous);
        assert_eq!(
            super::caller(&Some(Extension(caller(UserRole::User)))),
            Caller::User {
                id: 1,
                role: UserRole::User
            }
        );
    }
}
