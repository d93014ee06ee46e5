//! Magazine issue repository.

use std::num::NonZeroU32;

use chrono::Utc;
use sqlx::{FromRow, SqlitePool};

use bioarchitettura_core::IssueId;

use super::{RepositoryError, map_write_error};
use crate::models::{Issue, NewIssue};

#[derive(Debug, FromRow)]
struct IssueRow {
    id: i64,
    number: i64,
    title: String,
    year: i32,
    cover_image: Option<String>,
}

impl From<IssueRow> for Issue {
    fn from(row: IssueRow) -> Self {
        Self {
            id: IssueId::new(row.id),
            number: row.number,
            title: row.title,
            year: row.year,
            cover_image: row.cover_image,
        }
    }
}

/// Repository for issue database operations.
pub struct IssueRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> IssueRepository<'a> {
    /// Create a new issue repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// List issues, newest year first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self, limit: Option<NonZeroU32>) -> Result<Vec<Issue>, RepositoryError> {
        // SQLite treats a negative LIMIT as unbounded.
        let limit = limit.map_or(-1, |l| i64::from(l.get()));
        let rows: Vec<IssueRow> = sqlx::query_as(
            r"
            SELECT id, number, title, year, cover_image
            FROM issues
            ORDER BY year DESC, number DESC, id DESC
            LIMIT ?
            ",
        )
        .bind(limit)
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Get an issue by year and number.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn find(&self, year: i32, number: i64) -> Result<Option<Issue>, RepositoryError> {
        let row: Option<IssueRow> = sqlx::query_as(
            "SELECT id, number, title, year, cover_image FROM issues WHERE year = ? AND number = ?",
        )
        .bind(year)
        .bind(number)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Into::into))
    }

    /// Create a new issue.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the year/number pair exists.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(&self, input: &NewIssue) -> Result<Issue, RepositoryError> {
        let row: IssueRow = sqlx::query_as(
            r"
            INSERT INTO issues (number, title, year, cover_image, created_at)
            VALUES (?, ?, ?, ?, ?)
            RETURNING id, number, title, year, cover_image
            ",
        )
        .bind(input.number)
        .bind(&input.title)
        .bind(input.year)
        .bind(&input.cover_image)
        .bind(Utc::now())
        .fetch_one(self.pool)
        .await
        .map_err(|e| map_write_error(e, "issue"))?;

        Ok(row.into())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::db::testing::test_pool;

    fn new_issue(number: i64, year: i32) -> NewIssue {
        NewIssue {
            number,
            title: format!("Bioarchitettura {number}"),
            year,
            cover_image: None,
        }
    }

    #[tokio::test]
    async fn test_list_orders_by_year_desc() {
        let pool = test_pool().await;
        let repo = IssueRepository::new(&pool);
        for (number, year) in [(120, 2022), (131, 2024), (125, 2023), (132, 2024)] {
            repo.create(&new_issue(number, year)).await.unwrap();
        }

        let issues = repo.list(None).await.unwrap();
        let order: Vec<(i32, i64)> = issues.iter().map(|i| (i.year, i.number)).collect();
        assert_eq!(order, vec![(2024, 132), (2024, 131), (2023, 125), (2022, 120)]);

        let latest = repo.list(NonZeroU32::new(2)).await.unwrap();
        assert_eq!(latest.len(), 2);
    }

    #[tokio::test]
    async fn test_find_by_year_and_number() {
        let pool = test_pool().await;
        let repo = IssueRepository::new(&pool);
        let created = repo.create(&new_issue(140, 2025)).await.unwrap();

        assert_eq!(repo.find(2025, 140).await.unwrap(), Some(created));
        assert_eq!(repo.find(2025, 141).await.unwrap(), None);
    }
}
