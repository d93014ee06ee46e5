//! Webinar repository.

use std::num::NonZeroU32;

use chrono::{DateTime, Utc};
use sqlx::{FromRow, SqlitePool};

use bioarchitettura_core::{Price, Slug, WebinarId, WebinarStatus};

use super::categories::parse_slug;
use super::{RepositoryError, map_write_error};
use crate::models::{NewWebinar, Webinar};

const SELECT_WEBINAR: &str = r"
    SELECT id, title, slug, description, cover_image, date, duration_minutes,
           presenter, price, max_attendees, registrations, status,
           created_at, updated_at
    FROM webinars
";

#[derive(Debug, FromRow)]
struct WebinarRow {
    id: i64,
    title: String,
    slug: String,
    description: String,
    cover_image: Option<String>,
    date: DateTime<Utc>,
    duration_minutes: i64,
    presenter: String,
    price: String,
    max_attendees: Option<i64>,
    registrations: i64,
    status: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

fn to_u32(value: i64, column: &str) -> Result<u32, RepositoryError> {
    u32::try_from(value)
        .map_err(|_| RepositoryError::DataCorruption(format!("{column} out of range: {value}")))
}

impl TryFrom<WebinarRow> for Webinar {
    type Error = RepositoryError;

    fn try_from(row: WebinarRow) -> Result<Self, Self::Error> {
        let price: Price = row.price.parse().map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid price '{}': {e}", row.price))
        })?;
        let status: WebinarStatus = row
            .status
            .parse()
            .map_err(|e| RepositoryError::DataCorruption(format!("{e}")))?;

        Ok(Self {
            id: WebinarId::new(row.id),
            title: row.title,
            slug: parse_slug(&row.slug)?,
            description: row.description,
            cover_image: row.cover_image,
            date: row.date,
            duration: to_u32(row.duration_minutes, "duration_minutes")?,
            presenter: row.presenter,
            price,
            max_attendees: row
                .max_attendees
                .map(|max| to_u32(max, "max_attendees"))
                .transpose()?,
            registrations: to_u32(row.registrations, "registrations")?,
            status,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Repository for webinar database operations.
pub struct WebinarRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> WebinarRepository<'a> {
    /// Create a new webinar repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// List webinars, latest date first.
    ///
    /// Splitting into upcoming and past is left to
    /// [`Webinar::schedule`], so one query serves both lists.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if a row cannot be decoded.
    pub async fn list(&self, limit: Option<NonZeroU32>) -> Result<Vec<Webinar>, RepositoryError> {
        let limit = limit.map_or(-1, |l| i64::from(l.get()));
        let rows: Vec<WebinarRow> = sqlx::query_as(&format!(
            "{SELECT_WEBINAR} ORDER BY date DESC, id DESC LIMIT ?"
        ))
        .bind(limit)
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(Webinar::try_from).collect()
    }

    /// Get a webinar by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn find_by_id(&self, id: WebinarId) -> Result<Option<Webinar>, RepositoryError> {
        let row: Option<WebinarRow> = sqlx::query_as(&format!("{SELECT_WEBINAR} WHERE id = ?"))
            .bind(id.as_i64())
            .fetch_optional(self.pool)
            .await?;

        row.map(Webinar::try_from).transpose()
    }

    /// Get a webinar by slug, whatever its status.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn find_by_slug(&self, slug: &Slug) -> Result<Option<Webinar>, RepositoryError> {
        let row: Option<WebinarRow> = sqlx::query_as(&format!("{SELECT_WEBINAR} WHERE slug = ?"))
            .bind(slug.as_str())
            .fetch_optional(self.pool)
            .await?;

        row.map(Webinar::try_from).transpose()
    }

    /// Create a new webinar with no registrations.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the slug already exists.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(&self, input: &NewWebinar) -> Result<Webinar, RepositoryError> {
        let now = Utc::now();
        let row: WebinarRow = sqlx::query_as(
            r"
            INSERT INTO webinars (
                title, slug, description, cover_image, date, duration_minutes,
                presenter, price, max_attendees, registrations, status,
                created_at, updated_at
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, 0, ?, ?, ?)
            RETURNING id, title, slug, description, cover_image, date,
                      duration_minutes, presenter, price, max_attendees,
                      registrations, status, created_at, updated_at
            ",
        )
        .bind(&input.title)
        .bind(input.slug.as_str())
        .bind(&input.description)
        .bind(&input.cover_image)
        .bind(input.date)
        .bind(i64::from(input.duration))
        .bind(&input.presenter)
        .bind(input.price.to_string())
        .bind(input.max_attendees.map(i64::from))
        .bind(input.status.as_str())
        .bind(now)
        .bind(now)
        .fetch_one(self.pool)
        .await
        .map_err(|e| map_write_error(e, "webinar"))?;

        row.try_into()
    }

    /// Count all webinars.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count(&self) -> Result<i64, RepositoryError> {
        Ok(sqlx::query_scalar("SELECT COUNT(*) FROM webinars")
            .fetch_one(self.pool)
            .await?)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use bioarchitettura_core::WebinarSchedule;
    use chrono::{Duration, TimeZone};

    use super::*;
    use crate::db::testing::test_pool;

    fn new_webinar(slug: &str, date: DateTime<Utc>, status: WebinarStatus) -> NewWebinar {
        NewWebinar {
            title: format!("Webinar {slug}"),
            slug: Slug::parse(slug).unwrap(),
            description: "Incontro online".to_string(),
            cover_image: None,
            date,
            duration: 90,
            presenter: "Arch. Rossi".to_string(),
            price: Price::from_cents(2500),
            max_attendees: Some(100),
            status,
        }
    }

    #[tokio::test]
    async fn test_list_is_date_desc() {
        let pool = test_pool().await;
        let repo = WebinarRepository::new(&pool);
        let base = Utc.with_ymd_and_hms(2025, 6, 1, 18, 0, 0).unwrap();
        for (slug, offset) in [("primo", 0), ("terzo", 20), ("secondo", 10)] {
            repo.create(&new_webinar(slug, base + Duration::days(offset), WebinarStatus::Scheduled))
                .await
                .unwrap();
        }

        let slugs: Vec<String> = repo
            .list(None)
            .await
            .unwrap()
            .into_iter()
            .map(|w| w.slug.into_inner())
            .collect();
        assert_eq!(slugs, vec!["terzo", "secondo", "primo"]);
        assert_eq!(repo.list(NonZeroU32::new(1)).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_completed_future_webinar_is_past() {
        let pool = test_pool().await;
        let repo = WebinarRepository::new(&pool);
        let now = Utc::now();
        let webinar = repo
            .create(&new_webinar(
                "gia-svolto",
                now + Duration::days(7),
                WebinarStatus::Completed,
            ))
            .await
            .unwrap();

        assert_eq!(webinar.registrations, 0);
        assert_eq!(webinar.seats_left(), Some(100));
        assert_eq!(webinar.schedule(now), WebinarSchedule::Past);
    }

    #[tokio::test]
    async fn test_find_by_slug() {
        let pool = test_pool().await;
        let repo = WebinarRepository::new(&pool);
        let date = Utc.with_ymd_and_hms(2025, 9, 12, 17, 30, 0).unwrap();
        let created = repo
            .create(&new_webinar("calce", date, WebinarStatus::Live))
            .await
            .unwrap();

        let found = repo
            .find_by_slug(&Slug::parse("calce").unwrap())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.id, created.id);
        assert_eq!(found.date, date);
        assert_eq!(found.status, WebinarStatus::Live);
        assert_eq!(repo.count().await.unwrap(), 1);
    }
}
