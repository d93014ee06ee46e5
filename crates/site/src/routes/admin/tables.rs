//! Admin tables listing every record, drafts and out-of-stock included.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, response::IntoResponse};
use chrono::Utc;
use tracing::instrument;

use bioarchitettura_core::{WebinarSchedule, format};

use crate::db::{ArticleFilter, ArticleRepository, ProductFilter, ProductRepository, WebinarRepository};
use crate::error::Result;
use crate::filters;
use crate::models::{Article, Product, Webinar};
use crate::state::AppState;

#[derive(Debug, Clone)]
pub struct ArticleRow {
    pub title: String,
    pub slug: String,
    pub author: String,
    pub category: String,
    pub published: Option<String>,
}

impl From<&Article> for ArticleRow {
    fn from(article: &Article) -> Self {
        Self {
            title: article.title.clone(),
            slug: article.slug.to_string(),
            author: article.author.clone(),
            category: article
                .category
                .as_ref()
                .map_or_else(|| "-".to_string(), |c| c.name.clone()),
            published: article.published_at.map(format::long_date),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ProductRow {
    pub title: String,
    pub slug: String,
    pub type_label: &'static str,
    pub price: String,
    pub featured: bool,
    pub in_stock: bool,
}

impl From<&Product> for ProductRow {
    fn from(product: &Product) -> Self {
        Self {
            title: product.title.clone(),
            slug: product.slug.to_string(),
            type_label: product.product_type.label(),
            price: product.price.display(),
            featured: product.featured,
            in_stock: product.in_stock,
        }
    }
}

#[derive(Debug, Clone)]
pub struct WebinarRow {
    pub title: String,
    pub slug: String,
    pub date: String,
    pub status_label: &'static str,
    pub listed_as: &'static str,
    pub registrations: String,
}

impl WebinarRow {
    fn new(webinar: &Webinar, schedule: WebinarSchedule) -> Self {
        Self {
            title: webinar.title.clone(),
            slug: webinar.slug.to_string(),
            date: format::long_date_time(webinar.date),
            status_label: webinar.status.label(),
            listed_as: match schedule {
                WebinarSchedule::Upcoming => "Prossimi",
                WebinarSchedule::Past => "Passati",
                WebinarSchedule::Unlisted => "Non in elenco",
            },
            registrations: webinar.max_attendees.map_or_else(
                || webinar.registrations.to_string(),
                |max| format!("{}/{max}", webinar.registrations),
            ),
        }
    }
}

#[derive(Template, WebTemplate)]
#[template(path = "admin/articles.html")]
pub struct ArticlesTemplate {
    pub rows: Vec<ArticleRow>,
}

#[derive(Template, WebTemplate)]
#[template(path = "admin/products.html")]
pub struct ProductsTemplate {
    pub rows: Vec<ProductRow>,
}

#[derive(Template, WebTemplate)]
#[template(path = "admin/webinars.html")]
pub struct WebinarsTemplate {
    pub rows: Vec<WebinarRow>,
}

/// `GET /admin/articoli`
#[instrument(skip(state))]
pub async fn articles(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let articles = ArticleRepository::new(state.pool())
        .list(ArticleFilter::default())
        .await?;
    Ok(ArticlesTemplate {
        rows: articles.iter().map(ArticleRow::from).collect(),
    })
}

/// `GET /admin/prodotti`
#[instrument(skip(state))]
pub async fn products(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let products = ProductRepository::new(state.pool())
        .list(ProductFilter::default())
        .await?;
    Ok(ProductsTemplate {
        rows: products.iter().map(ProductRow::from).collect(),
    })
}

/// `GET /admin/webinar`
#[instrument(skip(state))]
pub async fn webinars(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let now = Utc::now();
    let webinars = WebinarRepository::new(state.pool()).list(None).await?;
    Ok(WebinarsTemplate {
        rows: webinars
            .iter()
            .map(|w| WebinarRow::new(w, w.schedule(now)))
            .collect(),
    })
}
