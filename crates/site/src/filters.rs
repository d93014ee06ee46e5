//! Custom Askama template filters.

#![allow(clippy::unnecessary_wraps)]

use std::fmt::Display;

use chrono::{Datelike, Utc};

/// Words read per minute when estimating article length.
const WORDS_PER_MINUTE: usize = 200;

/// The current year, for the footer copyright line.
///
/// Usage in templates: `{{ ""|current_year }}`
#[askama::filter_fn]
pub fn current_year(_value: impl Display, _env: &dyn askama::Values) -> askama::Result<i32> {
    Ok(Utc::now().year())
}

/// Estimated reading time in whole minutes, never less than one.
///
/// Usage in templates: `{{ content|reading_time }}`
#[askama::filter_fn]
pub fn reading_time(value: impl Display, _env: &dyn askama::Values) -> askama::Result<usize> {
    Ok(minutes_to_read(&value.to_string()))
}

fn minutes_to_read(text: &str) -> usize {
    text.split_whitespace()
        .count()
        .div_ceil(WORDS_PER_MINUTE)
        .max(1)
}
