//! Italian display formatting.

use chrono::{DateTime, Datelike, Utc};

const MONTHS: [&str; 12] = [
    "gennaio",
    "febbraio",
    "marzo",
    "aprile",
    "maggio",
    "giugno",
    "luglio",
    "agosto",
    "settembre",
    "ottobre",
    "novembre",
    "dicembre",
];

/// Format a date the way Italian readers expect it (`5 marzo 2025`).
#[must_use]
pub fn long_date(date: DateTime<Utc>) -> String {
    let month = MONTHS
        .get(date.month0() as usize)
        .copied()
        .unwrap_or_default();
    format!("{} {} {}", date.day(), month, date.year())
}

/// Format a date with its time (`5 marzo 2025, 18:30`).
#[must_use]
pub fn long_date_time(date: DateTime<Utc>) -> String {
    format!("{}, {}", long_date(date), date.format("%H:%M"))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn test_long_date() {
        let date = Utc.with_ymd_and_hms(2025, 3, 5, 18, 30, 0).unwrap();
        assert_eq!(long_date(date), "5 marzo 2025");
        assert_eq!(long_date_time(date), "5 marzo 2025, 18:30");
    }

    #[test]
    fn test_every_month_has_a_name() {
        for month in 1..=12 {
            let date = Utc.with_ymd_and_hms(2024, month, 1, 0, 0, 0).unwrap();
            assert!(!long_date(date).contains("  "));
        }
        let december = Utc.with_ymd_and_hms(2024, 12, 31, 0, 0, 0).unwrap();
        assert_eq!(long_date(december), "31 dicembre 2024");
    }
}
