//! JSON API handlers.
//!
//! Every error body is `{"error": "..."}`. Store failures carry a fixed
//! per-route message; validation failures describe the offending field.

pub mod articles;
pub mod products;
pub mod status;
pub mod webinars;

use std::num::NonZeroU32;

use axum::{
    Json, Router,
    extract::{
        Query,
        rejection::{JsonRejection, QueryRejection},
    },
    routing::get,
};
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Deserializer, de};

use crate::error::ApiError;
use crate::state::AppState;

/// Create the `/api` router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/articles", get(articles::list).post(articles::create))
        .route("/articles/{slug}", get(articles::show))
        .route("/products", get(products::list).post(products::create))
        .route("/products/{slug}", get(products::show))
        .route("/webinars", get(webinars::list).post(webinars::create))
        .route("/status", get(status::status))
}

/// Parse the optional `limit` query parameter as a positive integer.
///
/// # Errors
///
/// Returns a 400 `ApiError` for zero, negative or non-numeric values.
pub(crate) fn parse_limit(raw: Option<&str>) -> Result<Option<NonZeroU32>, ApiError> {
    raw.map(str::trim)
        .filter(|value| !value.is_empty())
        .map(|value| {
            value
                .parse::<NonZeroU32>()
                .map_err(|_| ApiError::bad_request("limit must be a positive integer"))
        })
        .transpose()
}

/// Unwrap a JSON body, turning any rejection into a 400.
///
/// axum reports well-formed JSON with missing or mistyped fields as 422;
/// the API treats every malformed body the same way.
///
/// # Errors
///
/// Returns a 400 `ApiError` describing why the body was rejected.
pub(crate) fn parse_body<T>(body: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    body.map(|Json(value)| value)
        .map_err(|rejection| ApiError::bad_request(rejection.body_text()))
}

/// Unwrap a query string, turning any rejection into a JSON 400.
///
/// # Errors
///
/// Returns a 400 `ApiError` describing why the query string was rejected.
pub(crate) fn parse_query<T>(query: Result<Query<T>, QueryRejection>) -> Result<T, ApiError> {
    query
        .map(|Query(value)| value)
        .map_err(|rejection| ApiError::bad_request(rejection.body_text()))
}

/// Deserialize an optional timestamp given either as RFC 3339 or as a bare
/// `YYYY-MM-DD` date, which is read as midnight UTC.
///
/// Use with `#[serde(default, deserialize_with = "optional_date_time")]`.
///
/// # Errors
///
/// Fails when the value is neither form.
pub(crate) fn optional_date_time<'de, D>(
    deserializer: D,
) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(raw) = Option::<String>::deserialize(deserializer)? else {
        return Ok(None);
    };
    let raw = raw.trim();
    if let Ok(timestamp) = raw.parse::<DateTime<Utc>>() {
        return Ok(Some(timestamp));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map(|date| Some(date.and_time(NaiveTime::MIN).and_utc()))
        .map_err(|_| {
            de::Error::custom(format!(
                "invalid date '{raw}': expected RFC 3339 or YYYY-MM-DD"
            ))
        })
}

/// Reject blank required text fields.
///
/// # Errors
///
/// Returns a 400 `ApiError` naming `field` when `value` is blank.
pub(crate) fn require_text(field: &str, value: &str) -> Result<(), ApiError> {
    if value.trim().is_empty() {
        return Err(ApiError::bad_request(format!("{field} is required")));
    }
    Ok(())
}
