//! Magazine articles.

use chrono::{DateTime, Utc};
use serde::Serialize;

use bioarchitettura_core::{ArticleId, CategoryId, IssueId, Slug};

use super::{Category, Issue};

/// A magazine article with its category and issue embedded.
///
/// An article is published exactly when `published_at` is set; there is no
/// other workflow state.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub id: ArticleId,
    pub title: String,
    pub slug: Slug,
    /// Markdown body.
    pub content: String,
    pub excerpt: Option<String>,
    pub cover_image: Option<String>,
    pub author: String,
    pub published_at: Option<DateTime<Utc>>,
    pub category_id: Option<CategoryId>,
    pub issue_id: Option<IssueId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub category: Option<Category>,
    pub issue: Option<Issue>,
}

impl Article {
    #[must_use]
    pub const fn is_published(&self) -> bool {
        self.published_at.is_some()
    }
}

/// Input for creating an article.
#[derive(Debug, Clone)]
pub struct NewArticle {
    pub title: String,
    pub slug: Slug,
    pub content: String,
    pub excerpt: Option<String>,
    pub cover_image: Option<String>,
    pub author: String,
    pub published_at: Option<DateTime<Utc>>,
    pub category_id: Option<CategoryId>,
    pub issue_id: Option<IssueId>,
}
