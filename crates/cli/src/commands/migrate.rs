//! Database migration command.
//!
//! # Usage
//!
//! ```bash
//! bio-cli migrate
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` - SQLite connection string (defaults to `sqlite://dev.db`)
//!
//! Migrations live in `crates/site/migrations/` and are embedded in the site
//! crate, so the CLI and the server always agree on the schema.

use bioarchitettura_site::db::MIGRATOR;
use thiserror::Error;

use super::{ConnectError, connect};

/// Errors that can occur while migrating.
#[derive(Debug, Error)]
pub enum MigrationError {
    #[error(transparent)]
    Connect(#[from] ConnectError),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

/// Run all pending migrations.
///
/// # Errors
///
/// Returns an error if the database cannot be reached or a migration fails.
pub async fn run() -> Result<(), MigrationError> {
    let pool = connect().await?;

    tracing::info!("Running migrations...");
    MIGRATOR.run(&pool).await?;

    tracing::info!("Migrations complete!");
    Ok(())
}
