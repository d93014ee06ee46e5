//! Webinar API handlers.

use axum::{
    Json,
    extract::{
        Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::instrument;

use bioarchitettura_core::{Price, Slug, WebinarStatus};

use super::{parse_body, parse_limit, parse_query, require_text};
use crate::db::WebinarRepository;
use crate::error::{ApiError, ApiResultExt};
use crate::models::{NewWebinar, Webinar};
use crate::state::AppState;

/// Query parameters for `GET /api/webinars`.
#[derive(Debug, Default, Deserialize)]
pub struct WebinarQuery {
    pub limit: Option<String>,
}

/// Body of `POST /api/webinars`. `status` defaults to `SCHEDULED`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateWebinar {
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

impl CreateWebinar {
    fn validate(self) -> Result<NewWebinar, ApiError> {
        require_text("title", &self.title)?;
        require_text("presenter", &self.presenter)?;
        if self.duration == 0 {
            return Err(ApiError::bad_request("duration must be at least one minute"));
        }
        if self.max_attendees == Some(0) {
            return Err(ApiError::bad_request("maxAttendees must be positive"));
        }

        Ok(NewWebinar {
            title: self.title,
            slug: self.slug,
            description: self.description,
            cover_image: self.cover_image,
            date: self.date,
            duration: self.duration,
            presenter: self.presenter,
            price: self.price,
            max_attendees: self.max_attendees,
            status: self.status,
        })
    }
}

/// `GET /api/webinars` - all webinars, latest date first.
#[instrument(skip(state))]
pub async fn list(
    State(state): State<AppState>,
    query: Result<Query<WebinarQuery>, QueryRejection>,
) -> Result<Json<Vec<Webinar>>, ApiError> {
    let query = parse_query(query)?;
    let limit = parse_limit(query.limit.as_deref())?;

    let webinars = WebinarRepository::new(state.pool())
        .list(limit)
        .await
        .api_context("Failed to fetch webinars")?;

    Ok(Json(webinars))
}

/// `POST /api/webinars` - create a webinar.
#[instrument(skip(state, body))]
pub async fn create(
    State(state): State<AppState>,
    body: Result<Json<CreateWebinar>, JsonRejection>,
) -> Result<(StatusCode, Json<Webinar>), ApiError> {
    let input = parse_body(body)?.validate()?;

    let webinar = WebinarRepository::new(state.pool())
        .create(&input)
        .await
        .api_context("Failed to create webinar")?;

    tracing::info!(webinar_id = %webinar.id, slug = %webinar.slug, "Webinar created");
    Ok((StatusCode::CREATED, Json(webinar)))
}
