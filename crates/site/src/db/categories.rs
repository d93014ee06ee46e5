//! Category repository.

use chrono::Utc;
use sqlx::{FromRow, SqlitePool};

use bioarchitettura_core::{CategoryId, Slug};

use super::{RepositoryError, map_write_error};
use crate::models::{Category, NewCategory};

#[derive(Debug, FromRow)]
struct CategoryRow {
    id: i64,
    name: String,
    slug: String,
}

impl TryFrom<CategoryRow> for Category {
    type Error = RepositoryError;

    fn try_from(row: CategoryRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: CategoryId::new(row.id),
            name: row.name,
            slug: parse_slug(&row.slug)?,
        })
    }
}

/// Parse a slug read back from the database.
pub(crate) fn parse_slug(raw: &str) -> Result<Slug, RepositoryError> {
    Slug::parse(raw)
        .map_err(|e| RepositoryError::DataCorruption(format!("invalid slug '{raw}' in database: {e}")))
}

/// Repository for category database operations.
pub struct CategoryRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> CategoryRepository<'a> {
    /// Create a new category repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// List all categories by name.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self) -> Result<Vec<Category>, RepositoryError> {
        let rows: Vec<CategoryRow> =
            sqlx::query_as("SELECT id, name, slug FROM categories ORDER BY name, id")
                .fetch_all(self.pool)
                .await?;

        rows.into_iter().map(Category::try_from).collect()
    }

    /// Get a category by its slug.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn find_by_slug(&self, slug: &Slug) -> Result<Option<Category>, RepositoryError> {
        let row: Option<CategoryRow> =
            sqlx::query_as("SELECT id, name, slug FROM categories WHERE slug = ?")
                .bind(slug.as_str())
                .fetch_optional(self.pool)
                .await?;

        row.map(Category::try_from).transpose()
    }

    /// Create a new category.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the slug already exists.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(&self, input: &NewCategory) -> Result<Category, RepositoryError> {
        let row: CategoryRow = sqlx::query_as(
            r"
            INSERT INTO categories (name, slug, created_at)
            VALUES (?, ?, ?)
            RETURNING id, name, slug
            ",
        )
        .bind(&input.name)
        .bind(input.slug.as_str())
        .bind(Utc::now())
        .fetch_one(self.pool)
        .await
        .map_err(|e| map_write_error(e, "category"))?;

        row.try_into()
    }
}
