//! Article API handlers.

use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::instrument;

use bioarchitettura_core::{CategoryId, IssueId, Slug};

use super::{optional_date_time, parse_body, parse_limit, parse_query, require_text};
use crate::db::{ArticleFilter, ArticleRepository};
use crate::error::{ApiError, ApiResultExt, AppError};
use crate::models::{Article, NewArticle};
use crate::state::AppState;

/// Query parameters for `GET /api/articles`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleQuery {
    pub limit: Option<String>,
    pub category_id: Option<String>,
}

/// Body of `POST /api/articles`.
///
/// A missing or null `publishedAt` creates a draft. A bare `YYYY-MM-DD`
/// date publishes at midnight UTC.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateArticle {
    pub title: String,
    pub slug: Slug,
    pub content: String,
    pub excerpt: Option<String>,
    pub cover_image: Option<String>,
    pub author: String,
    #[serde(default, deserialize_with = "optional_date_time")]
    pub published_at: Option<DateTime<Utc>>,
    pub category_id: Option<CategoryId>,
    pub issue_id: Option<IssueId>,
}

impl CreateArticle {
    fn validate(self) -> Result<NewArticle, ApiError> {
        require_text("title", &self.title)?;
        require_text("content", &self.content)?;
        require_text("author", &self.author)?;

        Ok(NewArticle {
            title: self.title,
            slug: self.slug,
            content: self.content,
            excerpt: self.excerpt,
            cover_image: self.cover_image,
            author: self.author,
            published_at: self.published_at,
            category_id: self.category_id,
            issue_id: self.issue_id,
        })
    }
}

/// `GET /api/articles` - published articles, newest first.
#[instrument(skip(state))]
pub async fn list(
    State(state): State<AppState>,
    query: Result<Query<ArticleQuery>, QueryRejection>,
) -> Result<Json<Vec<Article>>, ApiError> {
    let query = parse_query(query)?;
    let limit = parse_limit(query.limit.as_deref())?;
    let category_id = match query.category_id.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(value) => match value.parse::<CategoryId>() {
            Ok(id) => Some(id),
            // Non-numeric ids match no category.
            Err(_) => return Ok(Json(Vec::new())),
        },
    };

    let filter = ArticleFilter::published()
        .in_category(category_id)
        .limit(limit);

    let articles = ArticleRepository::new(state.pool())
        .list(filter)
        .await
        .api_context("Failed to fetch articles")?;

    Ok(Json(articles))
}

/// `GET /api/articles/{slug}` - a single published article.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<Article>, ApiError> {
    let not_found = || {
        ApiError::new(
            "Failed to fetch article",
            AppError::NotFound("Article not found".to_string()),
        )
    };
    let slug = Slug::parse(&slug).map_err(|_| not_found())?;

    ArticleRepository::new(state.pool())
        .find_by_slug(&slug)
        .await
        .api_context("Failed to fetch article")?
        .map(Json)
        .ok_or_else(not_found)
}

/// `POST /api/articles` - create an article.
#[instrument(skip(state, body))]
pub async fn create(
    State(state): State<AppState>,
    body: Result<Json<CreateArticle>, JsonRejection>,
) -> Result<(StatusCode, Json<Article>), ApiError> {
    let input = parse_body(body)?.validate()?;

    let article = ArticleRepository::new(state.pool())
        .create(&input)
        .await
        .api_context("Failed to create article")?;

    tracing::info!(article_id = %article.id, slug = %article.slug, "Article created");
    Ok((StatusCode::CREATED, Json(article)))
}
