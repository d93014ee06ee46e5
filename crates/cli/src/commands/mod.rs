//! CLI subcommands.

pub mod migrate;
pub mod seed;

use bioarchitettura_site::config::{ConfigError, SiteConfig};
use bioarchitettura_site::db;
use sqlx::SqlitePool;

/// Connect to the configured database.
///
/// # Errors
///
/// Returns an error if the configuration is invalid or the connection fails.
pub async fn connect() -> Result<SqlitePool, ConnectError> {
    let config = SiteConfig::from_env()?;
    tracing::info!(environment = %config.environment, "Connecting to database...");
    Ok(db::create_pool(&config.database_url_or_default()).await?)
}

/// Errors raised while opening the database.
#[derive(Debug, thiserror::Error)]
pub enum ConnectError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}
