//! Seed the database from a YAML fixture.
//!
//! The fixture lists categories, issues, articles, products and webinars.
//! Articles and products point at categories by slug and at issues by
//! year and number, so a fixture never contains database ids.
//!
//! Seeding is repeatable: categories and issues that already exist are
//! reused, and records whose slug is taken are skipped.

use std::collections::HashMap;
use std::path::Path;

use bioarchitettura_core::{CategoryId, IssueId, Price, ProductType, Slug, WebinarStatus};
use bioarchitettura_site::db::{
    ArticleRepository, CategoryRepository, IssueRepository, ProductRepository, RepositoryError,
    WebinarRepository,
};
use bioarchitettura_site::models::{NewArticle, NewCategory, NewIssue, NewProduct, NewWebinar};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use sqlx::SqlitePool;
use thiserror::Error;
use tracing::info;

use super::{ConnectError, connect};

/// Errors that can occur while seeding.
#[derive(Debug, Error)]
pub enum SeedError {
    #[error(transparent)]
    Connect(#[from] ConnectError),

    #[error("Failed to read fixture: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid fixture: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("{0} references unknown {1}")]
    UnknownReference(String, String),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Root of a seed fixture file.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Fixture {
    pub categories: Vec<CategoryFixture>,
    pub issues: Vec<IssueFixture>,
    pub articles: Vec<ArticleFixture>,
    pub products: Vec<ProductFixture>,
    pub webinars: Vec<WebinarFixture>,
}

#[derive(Debug, Deserialize)]
pub struct CategoryFixture {
    pub name: String,
    pub slug: Slug,
}

/// Issues are identified by year and number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
pub struct IssueKey {
    pub year: i32,
    pub number: i64,
}

#[derive(Debug, Deserialize)]
pub struct IssueFixture {
    #[serde(flatten)]
    pub key: IssueKey,
    pub title: String,
    pub cover_image: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ArticleFixture {
    pub title: String,
    pub slug: Slug,
    pub content: String,
    pub excerpt: Option<String>,
    pub cover_image: Option<String>,
    pub author: String,
    pub published_at: Option<DateTime<Utc>>,
    pub category: Option<Slug>,
    pub issue: Option<IssueKey>,
}

#[derive(Debug, Deserialize)]
pub struct ProductFixture {
    pub title: String,
    pub slug: Slug,
    pub description: String,
    pub price: Price,
    #[serde(rename = "type")]
    pub product_type: ProductType,
    pub cover_image: Option<String>,
    #[serde(default)]
    pub featured: bool,
    #[serde(default = "in_stock_default")]
    pub in_stock: bool,
    pub category: Option<Slug>,
}

const fn in_stock_default() -> bool {
    true
}

#[derive(Debug, Deserialize)]
pub struct WebinarFixture {
    pub title: String,
    pub slug: Slug,
    pub description: String,
    pub cover_image: Option<String>,
    pub date: DateTime<Utc>,
    pub duration: u32,
    pub presenter: String,
    pub price: Price,
    pub max_attendees: Option<u32>,
    #[serde(default)]
    pub status: WebinarStatus,
}

/// What a seeding run did.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SeedSummary {
    pub inserted: usize,
    pub skipped: usize,
}

impl SeedSummary {
    fn record<T>(&mut self, result: Result<T, RepositoryError>) -> Result<(), RepositoryError> {
        match result {
            Ok(_) => self.inserted += 1,
            Err(RepositoryError::Conflict(msg)) => {
                info!(reason = %msg, "Skipping existing record");
                self.skipped += 1;
            }
            Err(e) => return Err(e),
        }
        Ok(())
    }
}

/// Seed the configured database from the fixture at `path`.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed, the database is
/// unreachable, or the fixture references a missing category or issue.
pub async fn run(path: &Path) -> Result<(), SeedError> {
    info!(path = %path.display(), "Loading fixture");
    let content = tokio::fs::read_to_string(path).await?;
    let fixture: Fixture = serde_yaml::from_str(&content)?;

    let pool = connect().await?;
    let summary = seed(&pool, &fixture).await?;

    info!("Seeding complete!");
    info!("  Records inserted: {}", summary.inserted);
    info!("  Records skipped (already exist): {}", summary.skipped);
    Ok(())
}

/// Insert everything in `fixture`, resolving references by slug.
///
/// # Errors
///
/// Returns `SeedError::UnknownReference` for a category or issue that is
/// neither in the fixture nor in the database, and `SeedError::Repository`
/// for any other store failure.
#[allow(clippy::too_many_lines)]
pub async fn seed(pool: &SqlitePool, fixture: &Fixture) -> Result<SeedSummary, SeedError> {
    let mut summary = SeedSummary::default();

    let categories_repo = CategoryRepository::new(pool);
    let mut categories: HashMap<String, CategoryId> = HashMap::new();
    for category in &fixture.categories {
        let id = match categories_repo.find_by_slug(&category.slug).await? {
            Some(existing) => {
                summary.skipped += 1;
                existing.id
            }
            None => {
                summary.inserted += 1;
                categories_repo
                    .create(&NewCategory {
                        name: category.name.clone(),
                        slug: category.slug.clone(),
                    })
                    .await?
                    .id
            }
        };
        categories.insert(category.slug.as_str().to_string(), id);
    }

    let issues_repo = IssueRepository::new(pool);
    let mut issues: HashMap<IssueKey, IssueId> = HashMap::new();
    for issue in &fixture.issues {
        let id = match issues_repo.find(issue.key.year, issue.key.number).await? {
            Some(existing) => {
                summary.skipped += 1;
                existing.id
            }
            None => {
                summary.inserted += 1;
                issues_repo
                    .create(&NewIssue {
                        number: issue.key.number,
                        title: issue.title.clone(),
                        year: issue.key.year,
                        cover_image: issue.cover_image.clone(),
                    })
                    .await?
                    .id
            }
        };
        issues.insert(issue.key, id);
    }

    let articles = ArticleRepository::new(pool);
    for article in &fixture.articles {
        let category_id =
            resolve_category(pool, &mut categories, article.category.as_ref(), &article.slug)
                .await?;
        let issue_id = match article.issue {
            Some(key) => Some(resolve_issue(pool, &mut issues, key, &article.slug).await?),
            None => None,
        };
        let input = NewArticle {
            title: article.title.clone(),
            slug: article.slug.clone(),
            content: article.content.clone(),
            excerpt: article.excerpt.clone(),
            cover_image: article.cover_image.clone(),
            author: article.author.clone(),
            published_at: article.published_at,
            category_id,
            issue_id,
        };
        summary.record(articles.create(&input).await)?;
    }

    let products = ProductRepository::new(pool);
    for product in &fixture.products {
        let category_id =
            resolve_category(pool, &mut categories, product.category.as_ref(), &product.slug)
                .await?;
        let input = NewProduct {
            title: product.title.clone(),
            slug: product.slug.clone(),
            description: product.description.clone(),
            price: product.price,
            product_type: product.product_type,
            cover_image: product.cover_image.clone(),
            featured: product.featured,
            in_stock: product.in_stock,
            category_id,
        };
        summary.record(products.create(&input).await)?;
    }

    let webinars = WebinarRepository::new(pool);
    for webinar in &fixture.webinars {
        let input = NewWebinar {
            title: webinar.title.clone(),
            slug: webinar.slug.clone(),
            description: webinar.description.clone(),
            cover_image: webinar.cover_image.clone(),
            date: webinar.date,
            duration: webinar.duration,
            presenter: webinar.presenter.clone(),
            price: webinar.price,
            max_attendees: webinar.max_attendees,
            status: webinar.status,
        };
        summary.record(webinars.create(&input).await)?;
    }

    Ok(summary)
}

async fn resolve_category(
    pool: &SqlitePool,
    known: &mut HashMap<String, CategoryId>,
    slug: Option<&Slug>,
    owner: &Slug,
) -> Result<Option<CategoryId>, SeedError> {
    let Some(slug) = slug else {
        return Ok(None);
    };
    if let Some(id) = known.get(slug.as_str()) {
        return Ok(Some(*id));
    }
    let category = CategoryRepository::new(pool)
        .find_by_slug(slug)
        .await?
        .ok_or_else(|| {
            SeedError::UnknownReference(owner.to_string(), format!("category '{slug}'"))
        })?;
    known.insert(slug.as_str().to_string(), category.id);
    Ok(Some(category.id))
}

async fn resolve_issue(
    pool: &SqlitePool,
    known: &mut HashMap<IssueKey, IssueId>,
    key: IssueKey,
    owner: &Slug,
) -> Result<IssueId, SeedError> {
    if let Some(id) = known.get(&key) {
        return Ok(*id);
    }
    let issue = IssueRepository::new(pool)
        .find(key.year, key.number)
        .await?
        .ok_or_else(|| {
            SeedError::UnknownReference(
                owner.to_string(),
                format!("issue {}/{}", key.number, key.year),
            )
        })?;
    known.insert(key, issue.id);
    Ok(issue.id)
}
