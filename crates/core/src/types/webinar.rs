//! Webinar status and schedule classification.

use core::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ParseEnumError;

/// Lifecycle status of a webinar, maintained by editors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WebinarStatus {
    #[default]
    Scheduled,
    Live,
    Completed,
    Cancelled,
}

impl WebinarStatus {
    pub const ALL: [Self; 4] = [Self::Scheduled, Self::Live, Self::Completed, Self::Cancelled];

    /// The stored/serialized representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Scheduled => "SCHEDULED",
            Self::Live => "LIVE",
            Self::Completed => "COMPLETED",
            Self::Cancelled => "CANCELLED",
        }
    }

    /// Italian badge label.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Scheduled => "In programma",
            Self::Live => "In diretta",
            Self::Completed => "Concluso",
            Self::Cancelled => "Annullato",
        }
    }
}

impl fmt::Display for WebinarStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WebinarStatus {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| ParseEnumError::new("webinar status", s))
    }
}

/// Where a webinar belongs on the public webinar page.
///
/// Every webinar falls in exactly one bucket:
///
/// 1. `Completed` status is always [`Past`](Self::Past), whatever the date.
/// 2. A date before `now` is [`Past`](Self::Past), whatever the status.
/// 3. `Scheduled` with a date after `now` is [`Upcoming`](Self::Upcoming).
/// 4. Anything else (live or cancelled in the future, or exactly `now`) is
///    [`Unlisted`](Self::Unlisted).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WebinarSchedule {
    Upcoming,
    Past,
    Unlisted,
}

impl WebinarSchedule {
    /// Classify a webinar relative to `now`.
    #[must_use]
    pub fn classify(status: WebinarStatus, date: DateTime<Utc>, now: DateTime<Utc>) -> Self {
        if status == WebinarStatus::Completed || date < now {
            Self::Past
        } else if status == WebinarStatus::Scheduled && date > now {
            Self::Upcoming
        } else {
            Self::Unlisted
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;

    fn now() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2025-06-01T10:00:00Z")
            .map(|d| d.with_timezone(&Utc))
            .unwrap_or_default()
    }

    #[test]
    fn test_scheduled_future_is_upcoming() {
        let date = now() + Duration::days(3);
        assert_eq!(
            WebinarSchedule::classify(WebinarStatus::Scheduled, date, now()),
            WebinarSchedule::Upcoming
        );
    }

    #[test]
    fn test_completed_future_is_only_past() {
        let date = now() + Duration::days(3);
        assert_eq!(
            WebinarSchedule::classify(WebinarStatus::Completed, date, now()),
            WebinarSchedule::Past
        );
    }

    #[test]
    fn test_scheduled_with_elapsed_date_is_past() {
        let date = now() - Duration::hours(1);
        assert_eq!(
            WebinarSchedule::classify(WebinarStatus::Scheduled, date, now()),
            WebinarSchedule::Past
        );
    }

    #[test]
    fn test_cancelled_and_live_future_are_unlisted() {
        let date = now() + Duration::days(1);
        for status in [WebinarStatus::Cancelled, WebinarStatus::Live] {
            assert_eq!(
                WebinarSchedule::classify(status, date, now()),
                WebinarSchedule::Unlisted
            );
        }
    }

    #[test]
    fn test_exactly_now_is_unlisted() {
        assert_eq!(
            WebinarSchedule::classify(WebinarStatus::Scheduled, now(), now()),
            WebinarSchedule::Unlisted
        );
    }

    #[test]
    fn test_status_round_trip() {
        for status in WebinarStatus::ALL {
            assert_eq!(status.as_str().parse::<WebinarStatus>(), Ok(status));
        }
        assert!("DONE".parse::<WebinarStatus>().is_err());
    }
}
