//! Migrate command - Database migration management.

use crate::cli::args::{MigrateAction, MigrateArgs};
use crate::config::Config;
use crate::errors::AppResult;
use crate::infra::Database;

/// Execute the migrate command
pub async fn execute(args: MigrateArgs, config: Config) -> AppResult<()> {
    // Manual control: nothing runs on connect
    let db = Database::connect_without_migrations(&config).await?;

    match args.action {
        MigrateAction::Up => {
            db.run_migrations().await?;
            tracing::info!("Migrations applied");
        }
        MigrateAction::Down => {
            db.rollback_migration().await?;
            tracing::info!("Last migration rolled back");
        }
        MigrateAction::Status => {
            let status = db.migration_status().await?;
            print!("{}", status_report(&status));
            let pending = status.iter().filter(|(_, applied)| !applied).count();
            tracing::info!(pending, total = status.len(), "Migration status checked");
        }
        MigrateAction::Fresh => {
            tracing::warn!("Dropping every table and re-running all migrations");
            db.fresh_migrations().await?;
            tracing::info!("Schema rebuilt");
        }
    }

    Ok(())
}

fn status_report(status: &[(String, bool)]) -> String {
    status
        .iter()
        .map(|(name, applied)| {
            let state = if *applied { "applied" } else { "pending" };
            format!("{:<8} {}\n", state, name)
        })
        .collect()
}
