//! API middleware.

mod auth;

pub use auth::{auth_middleware, caller, guarded, require_access, Access, CurrentUser};
