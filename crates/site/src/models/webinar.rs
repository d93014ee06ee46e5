//! Webinars.

use chrono::{DateTime, Utc};
use serde::Serialize;

use bioarchitettura_core::{Price, Slug, WebinarId, WebinarSchedule, WebinarStatus};

/// A webinar on the calendar.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Webinar {
    pub id: WebinarId,
    pub title: String,
    pub slug: Slug,
    pub description: String,
    pub cover_image: Option<String>,
    pub date: DateTime<Utc>,
    /// Length in minutes.
    pub duration: u32,
    pub presenter: String,
    pub price: Price,
    pub max_attendees: Option<u32>,
    pub registrations: u32,
    pub status: WebinarStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Webinar {
    /// Which list the webinar belongs to at `now`.
    #[must_use]
    pub fn schedule(&self, now: DateTime<Utc>) -> WebinarSchedule {
        WebinarSchedule::classify(self.status, self.date, now)
    }

    /// Remaining seats, when attendance is capped.
    #[must_use]
    pub fn seats_left(&self) -> Option<u32> {
        self.max_attendees
            .map(|max| max.saturating_sub(self.registrations))
    }
}

/// Input for creating a webinar.
#[derive(Debug, Clone)]
pub struct NewWebinar {
    pub title: String,
    pub slug: Slug,
    pub description: String,
    pub cover_image: Option<String>,
    pub date: DateTime<Utc>,
    pub duration: u32,
    pub presenter: String,
    pub price: Price,
    pub max_attendees: Option<u32>,
    pub status: WebinarStatus,
}
