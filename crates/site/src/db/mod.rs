//! Database operations for the site's SQLite store.
//!
//! # Tables
//!
//! - `categories` - Article and product categories
//! - `issues` - Numbered magazine issues
//! - `articles` - Magazine articles (`published_at IS NULL` means draft)
//! - `products` - Shop products (masters, subscriptions, e-books, books)
//! - `webinars` - Webinar calendar
//! - `users`, `orders` - Only counted by the admin dashboard
//!
//! # Migrations
//!
//! Migrations are stored in `crates/site/migrations/`, embedded in the binary
//! as [`MIGRATOR`] and run via:
//! ```bash
//! cargo run -p bioarchitettura-cli -- migrate
//! ```

pub mod articles;
pub mod categories;
pub mod issues;
pub mod products;
pub mod stats;
pub mod webinars;

use std::str::FromStr;
use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use sqlx::SqlitePool;
use sqlx::migrate::Migrator;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use thiserror::Error;

pub use articles::{ArticleFilter, ArticleRepository};
pub use categories::CategoryRepository;
pub use issues::IssueRepository;
pub use products::{ProductFilter, ProductRepository};
pub use stats::{EntityCounts, StatsRepository};
pub use webinars::WebinarRepository;

/// Embedded schema migrations.
pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Constraint violation (e.g., duplicate slug).
    #[error("constraint violation: {0}")]
    Conflict(String),

    /// A referenced category or issue does not exist.
    #[error("invalid reference: {0}")]
    InvalidReference(String),
}

/// Translate constraint failures from an INSERT into repository errors.
pub(crate) fn map_write_error(e: sqlx::Error, entity: &str) -> RepositoryError {
    if let sqlx::Error::Database(ref db_err) = e {
        if db_err.is_unique_violation() {
            return RepositoryError::Conflict(format!("{entity} slug already exists"));
        }
        if db_err.is_foreign_key_violation() {
            return RepositoryError::InvalidReference(format!(
                "{entity} references an unknown category or issue"
            ));
        }
    }
    RepositoryError::Database(e)
}

/// Whether a connection string points at a private in-memory database.
fn is_in_memory(url: &str) -> bool {
    url.contains(":memory:") || url.contains("mode=memory")
}

/// Create a SQLite connection pool with sensible defaults.
///
/// File databases are created if missing and run in WAL mode. In-memory
/// databases are pinned to a single long-lived connection so every query
/// sees the same data.
///
/// # Arguments
///
/// * `database_url` - SQLite connection string (wrapped in `SecretString`)
///
/// # Errors
///
/// Returns `sqlx::Error` if the URL is invalid or the connection cannot be
/// established.
pub async fn create_pool(database_url: &SecretString) -> Result<SqlitePool, sqlx::Error> {
    let url = database_url.expose_secret();
    let options = SqliteConnectOptions::from_str(url)?
        .create_if_missing(true)
        .foreign_keys(true);

    if is_in_memory(url) {
        return SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await;
    }

    SqlitePoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect_with(options.journal_mode(SqliteJournalMode::Wal))
        .await
}

#[cfg(test)]
pub(crate) mod testing {
    use secrecy::SecretString;
    use sqlx::SqlitePool;

    use super::{MIGRATOR, create_pool};

    /// A fresh, migrated in-memory database.
    #[allow(clippy::expect_used)]
    pub(crate) async fn test_pool() -> SqlitePool {
        let pool = create_pool(&SecretString::from("sqlite::memory:"))
            .await
            .expect("in-memory pool");
        MIGRATOR.run(&pool).await.expect("migrations");
        pool
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_memory_detection() {
        assert!(is_in_memory("sqlite::memory:"));
        assert!(is_in_memory("sqlite://file.db?mode=memory"));
        assert!(!is_in_memory("sqlite://dev.db"));
    }

    #[tokio::test]
    async fn test_migrations_apply_cleanly() {
        let pool = testing::test_pool().await;
        let tables: Vec<String> = sqlx::query_scalar(
            "SELECT name FROM sqlite_master WHERE type = 'table' AND name NOT LIKE '\\_%' ESCAPE '\\' AND name NOT LIKE 'sqlite%' ORDER BY name",
        )
        .fetch_all(&pool)
        .await
        .unwrap_or_default();
        assert_eq!(
            tables,
            vec![
                "articles",
                "categories",
                "issues",
                "orders",
                "products",
                "users",
                "webinars"
            ]
        );
    }
}
