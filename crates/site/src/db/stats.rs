//! Entity counts for the admin dashboard.

use serde::Serialize;
use sqlx::SqlitePool;

use super::RepositoryError;

/// Row counts shown on the admin dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct EntityCounts {
    pub articles: i64,
    pub products: i64,
    pub webinars: i64,
    pub users: i64,
    pub orders: i64,
}

/// Repository for aggregate queries.
pub struct StatsRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> StatsRepository<'a> {
    /// Create a new stats repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    async fn count(&self, table: &'static str) -> Result<i64, RepositoryError> {
        Ok(sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(self.pool)
            .await?)
    }

    /// Count every entity shown on the dashboard, concurrently.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if any count fails.
    pub async fn counts(&self) -> Result<EntityCounts, RepositoryError> {
        let (articles, products, webinars, users, orders) = tokio::try_join!(
            self.count("articles"),
            self.count("products"),
            self.count("webinars"),
            self.count("users"),
            self.count("orders"),
        )?;

        Ok(EntityCounts {
            articles,
            products,
            webinars,
            users,
            orders,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::db::testing::test_pool;

    #[tokio::test]
    async fn test_counts_empty_database() {
        let pool = test_pool().await;
        let counts = StatsRepository::new(&pool).counts().await.unwrap();
        assert_eq!(counts, EntityCounts::default());
    }

    #[tokio::test]
    async fn test_counts_users_and_orders() {
        let pool = test_pool().await;
        let user_id: i64 = sqlx::query_scalar(
            "INSERT INTO users (email, name, created_at) VALUES (?, ?, ?) RETURNING id",
        )
        .bind("lettore@example.it")
        .bind("Lettore")
        .bind(Utc::now())
        .fetch_one(&pool)
        .await
        .unwrap();
        for total in ["49.00", "120.00"] {
            sqlx::query("INSERT INTO orders (user_id, total, status, created_at) VALUES (?, ?, 'PAID', ?)")
                .bind(user_id)
                .bind(total)
                .bind(Utc::now())
                .execute(&pool)
                .await
                .unwrap();
        }

        let counts = StatsRepository::new(&pool).counts().await.unwrap();
        assert_eq!(counts.users, 1);
        assert_eq!(counts.orders, 2);
        assert_eq!(counts.articles, 0);
    }
}
