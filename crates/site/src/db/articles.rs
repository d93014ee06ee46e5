//! Article repository.
//!
//! Articles are always read together with their category and issue, which
//! are joined in and embedded into [`Article`].

use std::num::NonZeroU32;

use chrono::{DateTime, Utc};
use sqlx::{FromRow, QueryBuilder, Sqlite, SqlitePool};

use bioarchitettura_core::{ArticleId, CategoryId, IssueId, Slug};

use super::categories::parse_slug;
use super::{RepositoryError, map_write_error};
use crate::models::{Article, Category, Issue, NewArticle};

const SELECT_ARTICLE: &str = r"
    SELECT
        a.id, a.title, a.slug, a.content, a.excerpt, a.cover_image, a.author,
        a.published_at, a.category_id, a.issue_id, a.created_at, a.updated_at,
        c.name AS category_name, c.slug AS category_slug,
        i.number AS issue_number, i.title AS issue_title, i.year AS issue_year,
        i.cover_image AS issue_cover_image
    FROM articles a
    LEFT JOIN categories c ON c.id = a.category_id
    LEFT JOIN issues i ON i.id = a.issue_id
";

#[derive(Debug, FromRow)]
struct ArticleRow {
    id: i64,
    title: String,
    slug: String,
    content: String,
    excerpt: Option<String>,
    cover_image: Option<String>,
    author: String,
    published_at: Option<DateTime<Utc>>,
    category_id: Option<i64>,
    issue_id: Option<i64>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    category_name: Option<String>,
    category_slug: Option<String>,
    issue_number: Option<i64>,
    issue_title: Option<String>,
    issue_year: Option<i32>,
    issue_cover_image: Option<String>,
}

impl TryFrom<ArticleRow> for Article {
    type Error = RepositoryError;

    fn try_from(row: ArticleRow) -> Result<Self, Self::Error> {
        let category = match (row.category_id, row.category_name, row.category_slug) {
            (Some(id), Some(name), Some(slug)) => Some(Category {
                id: CategoryId::new(id),
                name,
                slug: parse_slug(&slug)?,
            }),
            _ => None,
        };

        let issue = match (row.issue_id, row.issue_number, row.issue_title, row.issue_year) {
            (Some(id), Some(number), Some(title), Some(year)) => Some(Issue {
                id: IssueId::new(id),
                number,
                title,
                year,
                cover_image: row.issue_cover_image,
            }),
            _ => None,
        };

        Ok(Self {
            id: ArticleId::new(row.id),
            title: row.title,
            slug: parse_slug(&row.slug)?,
            content: row.content,
            excerpt: row.excerpt,
            cover_image: row.cover_image,
            author: row.author,
            published_at: row.published_at,
            category_id: row.category_id.map(CategoryId::new),
            issue_id: row.issue_id.map(IssueId::new),
            created_at: row.created_at,
            updated_at: row.updated_at,
            category,
            issue,
        })
    }
}

/// Filters for listing articles.
///
/// Ordering is fixed: most recently published first.
#[derive(Debug, Clone, Copy, Default)]
pub struct ArticleFilter {
    /// Only articles with a publication date.
    pub published_only: bool,
    /// Only articles in this category.
    pub category_id: Option<CategoryId>,
    /// Maximum number of articles; `None` means unbounded.
    pub limit: Option<NonZeroU32>,
}

impl ArticleFilter {
    /// Filter for public listings: published articles only.
    #[must_use]
    pub const fn published() -> Self {
        Self {
            published_only: true,
            category_id: None,
            limit: None,
        }
    }

    #[must_use]
    pub const fn in_category(mut self, category_id: Option<CategoryId>) -> Self {
        self.category_id = category_id;
        self
    }

    #[must_use]
    pub const fn limit(mut self, limit: Option<NonZeroU32>) -> Self {
        self.limit = limit;
        self
    }
}

/// Repository for article database operations.
pub struct ArticleRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> ArticleRepository<'a> {
    /// Create a new article repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// List articles matching `filter`, newest publication first.
    ///
    /// Drafts (no publication date) sort after every published article.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if a stored slug is invalid.
    pub async fn list(&self, filter: ArticleFilter) -> Result<Vec<Article>, RepositoryError> {
        let mut query = QueryBuilder::<Sqlite>::new(SELECT_ARTICLE);
        query.push(" WHERE 1 = 1");

        if filter.published_only {
            query.push(" AND a.published_at IS NOT NULL");
        }
        if let Some(category_id) = filter.category_id {
            query.push(" AND a.category_id = ");
            query.push_bind(category_id.as_i64());
        }

        query.push(" ORDER BY a.published_at IS NULL, a.published_at DESC, a.id DESC");

        if let Some(limit) = filter.limit {
            query.push(" LIMIT ");
            query.push_bind(i64::from(limit.get()));
        }

        let rows: Vec<ArticleRow> = query.build_query_as().fetch_all(self.pool).await?;
        rows.into_iter().map(Article::try_from).collect()
    }

    /// Get an article by ID, published or not.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn find_by_id(&self, id: ArticleId) -> Result<Option<Article>, RepositoryError> {
        let row: Option<ArticleRow> = sqlx::query_as(&format!("{SELECT_ARTICLE} WHERE a.id = ?"))
            .bind(id.as_i64())
            .fetch_optional(self.pool)
            .await?;

        row.map(Article::try_from).transpose()
    }

    /// Get a published article by slug. Drafts are not returned.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn find_by_slug(&self, slug: &Slug) -> Result<Option<Article>, RepositoryError> {
        let row: Option<ArticleRow> = sqlx::query_as(&format!(
            "{SELECT_ARTICLE} WHERE a.slug = ? AND a.published_at IS NOT NULL"
        ))
        .bind(slug.as_str())
        .fetch_optional(self.pool)
        .await?;

        row.map(Article::try_from).transpose()
    }

    /// Create a new article with a single INSERT.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the slug already exists.
    /// Returns `RepositoryError::InvalidReference` if the category or issue
    /// does not exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(&self, input: &NewArticle) -> Result<Article, RepositoryError> {
        let now = Utc::now();
        let id: i64 = sqlx::query_scalar(
            r"
            INSERT INTO articles (
                title, slug, content, excerpt, cover_image, author,
                published_at, category_id, issue_id, created_at, updated_at
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            RETURNING id
            ",
        )
        .bind(&input.title)
        .bind(input.slug.as_str())
        .bind(&input.content)
        .bind(&input.excerpt)
        .bind(&input.cover_image)
        .bind(&input.author)
        .bind(input.published_at)
        .bind(input.category_id.map(|c| c.as_i64()))
        .bind(input.issue_id.map(|i| i.as_i64()))
        .bind(now)
        .bind(now)
        .fetch_one(self.pool)
        .await
        .map_err(|e| map_write_error(e, "article"))?;

        self.find_by_id(ArticleId::new(id))
            .await?
            .ok_or(RepositoryError::NotFound)
    }

    /// Count all articles, drafts included.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count(&self) -> Result<i64, RepositoryError> {
        Ok(sqlx::query_scalar("SELECT COUNT(*) FROM articles")
            .fetch_one(self.pool)
            .await?)
    }
}
