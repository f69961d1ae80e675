//! Create-superuser command.

use std::sync::Arc;

use crate::cli::args::CreateSuperuserArgs;
use crate::config::Config;
use crate::domain::NewIdentity;
use crate::errors::{AppError, AppResult};
use crate::infra::{Database, Persistence};
use crate::services::{IdentityManager, IdentityService};

/// Execute the create-superuser command
pub async fn execute(args: CreateSuperuserArgs, config: Config) -> AppResult<()> {
    let db = Database::connect(&config)
        .await
        .map_err(|e| AppError::internal(format!("Database connection failed: {}", e)))?;

    let identities = IdentityManager::new(Arc::new(Persistence::new(db.get_connection())));
    let identity = identities
        .create_superuser(
            Some(&args.email),
            args.password.as_deref(),
            NewIdentity::named(args.name),
        )
        .await?;

    if !identity.password.is_usable() {
        tracing::warn!("No password given; the account cannot log in yet");
    }
    println!("Superuser {} created ({})", identity, identity.id);
    Ok(())
}
