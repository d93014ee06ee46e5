//! Magazine route handlers.

use std::num::NonZeroU32;

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
};
use tracing::instrument;

use bioarchitettura_core::{Slug, format};

use crate::db::{ArticleFilter, ArticleRepository, IssueRepository};
use crate::error::{AppError, Result};
use crate::filters;
use crate::markdown;
use crate::models::{Article, Issue};
use crate::state::AppState;

const LATEST_ARTICLES: u32 = 6;
const LATEST_ISSUES: u32 = 4;

/// Article summary for listings.
#[derive(Debug, Clone)]
pub struct ArticleCard {
    pub title: String,
    pub slug: String,
    pub excerpt: Option<String>,
    pub cover_image: Option<String>,
    pub author: String,
    pub category: Option<String>,
    pub published: Option<String>,
}

impl From<&Article> for ArticleCard {
    fn from(article: &Article) -> Self {
        Self {
            title: article.title.clone(),
            slug: article.slug.to_string(),
            excerpt: article.excerpt.clone(),
            cover_image: article.cover_image.clone(),
            author: article.author.clone(),
            category: article.category.as_ref().map(|c| c.name.clone()),
            published: article.published_at.map(format::long_date),
        }
    }
}

/// Issue view for templates.
#[derive(Debug, Clone)]
pub struct IssueView {
    pub number: i64,
    pub title: String,
    pub year: i32,
    pub cover_image: Option<String>,
}

impl From<&Issue> for IssueView {
    fn from(issue: &Issue) -> Self {
        Self {
            number: issue.number,
            title: issue.title.clone(),
            year: issue.year,
            cover_image: issue.cover_image.clone(),
        }
    }
}

/// Magazine landing page template.
#[derive(Template, WebTemplate)]
#[template(path = "magazine/index.html")]
pub struct MagazineIndexTemplate {
    pub articles: Vec<ArticleCard>,
    pub issues: Vec<IssueView>,
}

/// Article page template.
#[derive(Template, WebTemplate)]
#[template(path = "magazine/show.html")]
pub struct ArticleTemplate {
    pub article: ArticleCard,
    pub issue: Option<IssueView>,
    pub content: String,
    pub body_html: String,
}

/// `GET /rivista`
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let articles = ArticleRepository::new(state.pool())
        .list(ArticleFilter::published().limit(NonZeroU32::new(LATEST_ARTICLES)))
        .await?;
    let issues = IssueRepository::new(state.pool())
        .list(NonZeroU32::new(LATEST_ISSUES))
        .await?;

    Ok(MagazineIndexTemplate {
        articles: articles.iter().map(ArticleCard::from).collect(),
        issues: issues.iter().map(IssueView::from).collect(),
    })
}

/// `GET /rivista/{slug}`. Drafts are not found.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<impl IntoResponse> {
    let not_found = || AppError::NotFound("Articolo non trovato".to_string());
    let slug = Slug::parse(&slug).map_err(|_| not_found())?;

    let article = ArticleRepository::new(state.pool())
        .find_by_slug(&slug)
        .await?
        .ok_or_else(not_found)?;

    Ok(ArticleTemplate {
        body_html: markdown::render(&article.content),
        issue: article.issue.as_ref().map(IssueView::from),
        article: ArticleCard::from(&article),
        content: article.content,
    })
}
