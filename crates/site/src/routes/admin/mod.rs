//! Admin dashboard route handlers.
//!
//! Read-only: records are created through the JSON API or the seed command.

pub mod tables;

use askama::Template;
use askama_web::WebTemplate;
use axum::{Router, extract::State, response::IntoResponse, routing::get};
use tracing::instrument;

use crate::db::{EntityCounts, StatsRepository};
use crate::error::Result;
use crate::filters;
use crate::state::AppState;

/// Create the `/admin` router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(dashboard))
        .route("/articoli", get(tables::articles))
        .route("/prodotti", get(tables::products))
        .route("/webinar", get(tables::webinars))
}

/// A dashboard tile.
#[derive(Debug, Clone)]
pub struct StatTile {
    pub name: &'static str,
    pub value: i64,
    pub href: Option<&'static str>,
}

impl StatTile {
    fn tiles(counts: EntityCounts) -> Vec<Self> {
        vec![
            Self {
                name: "Articoli",
                value: counts.articles,
                href: Some("/admin/articoli"),
            },
            Self {
                name: "Prodotti",
                value: counts.products,
                href: Some("/admin/prodotti"),
            },
            Self {
                name: "Webinar",
                value: counts.webinars,
                href: Some("/admin/webinar"),
            },
            Self {
                name: "Utenti",
                value: counts.users,
                href: None,
            },
            Self {
                name: "Ordini",
                value: counts.orders,
                href: None,
            },
        ]
    }
}

/// Dashboard template.
#[derive(Template, WebTemplate)]
#[template(path = "admin/dashboard.html")]
pub struct DashboardTemplate {
    pub stats: Vec<StatTile>,
}

/// `GET /admin`
#[instrument(skip(state))]
pub async fn dashboard(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let counts = StatsRepository::new(state.pool()).counts().await?;
    Ok(DashboardTemplate {
        stats: StatTile::tiles(counts),
    })
}
