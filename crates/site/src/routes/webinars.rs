//! Webinar route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
};
use chrono::{DateTime, Utc};
use tracing::instrument;

use bioarchitettura_core::{Slug, WebinarSchedule, format};

use crate::db::WebinarRepository;
use crate::error::{AppError, Result};
use crate::filters;
use crate::models::Webinar;
use crate::state::AppState;

const PAST_WEBINARS: usize = 6;

/// Webinar card for templates.
#[derive(Debug, Clone)]
pub struct WebinarCard {
    pub title: String,
    pub slug: String,
    pub description: String,
    pub cover_image: Option<String>,
    pub date: String,
    pub duration: u32,
    pub presenter: String,
    pub price: String,
    pub status_label: &'static str,
    /// `"12/100 iscritti"`, only when attendance is capped.
    pub attendees: Option<String>,
}

impl From<&Webinar> for WebinarCard {
    fn from(webinar: &Webinar) -> Self {
        Self {
            title: webinar.title.clone(),
            slug: webinar.slug.to_string(),
            description: webinar.description.clone(),
            cover_image: webinar.cover_image.clone(),
            date: format::long_date_time(webinar.date),
            duration: webinar.duration,
            presenter: webinar.presenter.clone(),
            price: webinar.price.display(),
            status_label: webinar.status.label(),
            attendees: webinar
                .max_attendees
                .map(|max| format!("{}/{max} iscritti", webinar.registrations)),
        }
    }
}

/// Webinars split into the two public lists.
#[derive(Debug, Default)]
pub struct WebinarLists<'a> {
    pub upcoming: Vec<&'a Webinar>,
    pub past: Vec<&'a Webinar>,
}

/// Split webinars (already ordered by date descending) into upcoming and
/// past at `now`. Unlisted webinars appear in neither; past is capped.
#[must_use]
pub fn split_schedule(webinars: &[Webinar], now: DateTime<Utc>) -> WebinarLists<'_> {
    let mut lists = WebinarLists::default();
    for webinar in webinars {
        match webinar.schedule(now) {
            WebinarSchedule::Upcoming => lists.upcoming.push(webinar),
            WebinarSchedule::Past if lists.past.len() < PAST_WEBINARS => lists.past.push(webinar),
            WebinarSchedule::Past | WebinarSchedule::Unlisted => {}
        }
    }
    lists
}

/// Webinar listing template.
#[derive(Template, WebTemplate)]
#[template(path = "webinars/index.html")]
pub struct WebinarIndexTemplate {
    pub upcoming: Vec<WebinarCard>,
    pub past: Vec<WebinarCard>,
}

/// Webinar page template.
#[derive(Template, WebTemplate)]
#[template(path = "webinars/show.html")]
pub struct WebinarTemplate {
    pub webinar: WebinarCard,
    pub open: bool,
    pub seats_left: Option<u32>,
}

/// `GET /webinar`
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let webinars = WebinarRepository::new(state.pool()).list(None).await?;
    let lists = split_schedule(&webinars, Utc::now());

    Ok(WebinarIndexTemplate {
        upcoming: lists.upcoming.into_iter().map(WebinarCard::from).collect(),
        past: lists.past.into_iter().map(WebinarCard::from).collect(),
    })
}

/// `GET /webinar/{slug}`
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<impl IntoResponse> {
    let not_found = || AppError::NotFound("Webinar non trovato".to_string());
    let slug = Slug::parse(&slug).map_err(|_| not_found())?;

    let webinar = WebinarRepository::new(state.pool())
        .find_by_slug(&slug)
        .await?
        .ok_or_else(not_found)?;

    Ok(WebinarTemplate {
        open: webinar.schedule(Utc::now()) == WebinarSchedule::Upcoming
            && webinar.seats_left() != Some(0),
        seats_left: webinar.seats_left(),
        webinar: WebinarCard::from(&webinar),
    })
}
