//! User domain entity and related types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::config::{ROLE_ADMIN, ROLE_USER};
use crate::errors::{AppError, AppResult};

/// User roles enumeration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum UserRole {
    #[default]
    User,
    Admin,
}

impl UserRole {
    /// Check if this role has admin privileges
    pub fn is_admin(&self) -> bool {
        matches!(self, UserRole::Admin)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Admin => ROLE_ADMIN,
            UserRole::User => ROLE_USER,
        }
    }
}

impl From<&str> for UserRole {
    fn from(s: &str) -> Self {
        match s {
            ROLE_ADMIN => UserRole::Admin,
            _ => UserRole::User,
        }
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Who is behind a service call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Caller {
    /// No valid bearer token
    Anonymous,
    /// A signed-in account
    User { id: i32, role: UserRole },
    /// Local operator, e.g. the CLI
    System,
}

impl Caller {
    pub fn is_admin(&self) -> bool {
        match self {
            Caller::System => true,
            Caller::User { role, .. } => role.is_admin(),
            Caller::Anonymous => false,
        }
    }

    /// Whether the caller is signed in as `user_id`
    pub fn is(&self, user_id: i32) -> bool {
        matches!(self, Caller::User { id, .. } if *id == user_id)
    }

    /// Admins act for anyone; everyone else only for themselves.
    pub fn ensure_acts_for(&self, user_id: i32) -> AppResult<()> {
        if self.is_admin() || self.is(user_id) {
            return Ok(());
        }
        tracing::warn!(caller = ?self, target_user = user_id, "Caller may not act for this user");
        Err(AppError::Forbidden)
    }
}

/// User domain entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i32,
    pub user_name: String,
    pub email: String,
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub phone_number: Option<String>,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Check if user has admin role
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

/// Everything needed to insert a user row; the store assigns the id.
#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    pub user_name: String,
    pub email: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub phone_number: Option<String>,
    pub role: UserRole,
}

/// User creation request
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateUser {
    /// Unique login name
    #[validate(length(min = 3, max = 50, message = "User name must be 3-50 characters"))]
    #[schema(example = "jdoe")]
    pub user_name: String,
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "jdoe@example.com")]
    pub email: String,
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    #[schema(example = "SecurePass123!", min_length = 8)]
    pub password: String,
    #[validate(length(min = 1, message = "First name is required"))]
    #[schema(example = "John")]
    pub first_name: String,
    #[validate(length(min = 1, message = "Last name is required"))]
    #[schema(example = "Doe")]
    pub last_name: String,
    #[schema(example = "+1-555-0100")]
    pub phone_number: Option<String>,
    /// Requested role; only admins may grant anything but `User`
    pub role: Option<UserRole>,
}

/// Full replacement of a user's profile
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUser {
    #[schema(example = 1)]
    pub id: i32,
    #[validate(length(min = 3, max = 50, message = "User name must be 3-50 characters"))]
    pub user_name: String,
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    /// New password; the stored hash is kept when omitted
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: Option<String>,
    #[validate(length(min = 1, message = "First name is required"))]
    pub first_name: String,
    #[validate(length(min = 1, message = "Last name is required"))]
    pub last_name: String,
    pub phone_number: Option<String>,
    /// New role; the stored role is kept when omitted
    pub role: Option<UserRole>,
}

/// User response (safe to return to client)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "jdoe")]
    pub user_name: String,
    #[schema(example = "jdoe@example.com")]
    pub email: String,
    #[schema(example = "John")]
    pub first_name: String,
    #[schema(example = "Doe")]
    pub last_name: String,
    pub phone_number: Option<String>,
    pub role: UserRole,
    /// Account creation timestamp
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            user_name: user.user_name,
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
            phone_number: user.phone_number,
            role: user.role,
            created_at: user.created_at,
        }
    }
}
