//! Create-admin command - Seeds an administrator account.

use std::sync::Arc;

use crate::cli::args::CreateAdminArgs;
use crate::config::Config;
use crate::domain::{Caller, CreateUser, UserRole};
use crate::errors::{AppError, AppResult};
use crate::infra::Database;
use crate::services::{ServiceContainer, Services};

/// Execute the create-admin command
pub async fn execute(args: CreateAdminArgs, config: Config) -> AppResult<()> {
    let db = Arc::new(Database::connect(&config).await?);
    let services = Services::from_connection(db.get_connection(), config);

    let request = admin_request(args);
    validator::Validate::validate(&request)
        .map_err(|e| AppError::validation(e.to_string()))?;

    let admin = services.users().add_user(request, Caller::System).await?;
    tracing::info!(user_id = admin.id, "Administrator '{}' created", admin.user_name);

    Ok(())
}

fn admin_request(args: CreateAdminArgs) -> CreateUser {
    CreateUser {
        user_name: args.user_name,
        email: args.email,
        password: args.password,
        first_name: args.first_name,
        last_name: args.last_name,
        phone_number: None,
        role: Some(UserRole::Admin),
    }
}
