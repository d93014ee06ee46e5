//! Home page route handler.

use std::num::NonZeroU32;

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, response::IntoResponse};
use tracing::instrument;

use super::magazine::ArticleCard;
use crate::db::{ArticleFilter, ArticleRepository};
use crate::filters;
use crate::state::AppState;

const LATEST_ARTICLES: u32 = 3;

/// A card in the "Cosa offriamo" section.
#[derive(Debug, Clone)]
pub struct Feature {
    pub title: &'static str,
    pub description: &'static str,
    pub href: &'static str,
    pub accent: &'static str,
}

const FEATURES: [Feature; 4] = [
    Feature {
        title: "Rivista",
        description: "Articoli, numeri arretrati e abbonamenti alla prima rivista italiana di architettura ecologica",
        href: "/rivista",
        accent: "blue",
    },
    Feature {
        title: "Master",
        description: "Corsi di formazione e master in architettura sostenibile e bioedilizia",
        href: "/negozio#master",
        accent: "green",
    },
    Feature {
        title: "Webinar",
        description: "Seminari online con esperti del settore dell'architettura ecologica",
        href: "/webinar",
        accent: "purple",
    },
    Feature {
        title: "Negozio",
        description: "E-books, pubblicazioni e materiali didattici per professionisti e appassionati",
        href: "/negozio",
        accent: "orange",
    },
];

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub features: Vec<Feature>,
    pub articles: Vec<ArticleCard>,
}

/// `GET /`
///
/// A failing article query only hides the latest-articles strip; the rest of
/// the page is static.
#[instrument(skip(state))]
pub async fn home(State(state): State<AppState>) -> impl IntoResponse {
    let articles = ArticleRepository::new(state.pool())
        .list(ArticleFilter::published().limit(NonZeroU32::new(LATEST_ARTICLES)))
        .await
        .map_or_else(
            |e| {
                tracing::error!("Failed to fetch latest articles: {e}");
                Vec::new()
            },
            |articles| articles.iter().map(ArticleCard::from).collect(),
        );

    HomeTemplate {
        features: FEATURES.to_vec(),
        articles,
    }
}
