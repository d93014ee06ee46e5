//! Store product kinds.

use core::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::ParseEnumError;

/// Kind of product sold in the shop.
///
/// Stored and serialized as `SCREAMING_SNAKE_CASE` text (`"EBOOK"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProductType {
    /// Master course.
    Master,
    /// Magazine subscription.
    Subscription,
    /// Digital book.
    Ebook,
    /// Printed book or publication.
    Book,
    /// Paid access to a webinar.
    Webinar,
}

impl ProductType {
    /// All product types, in shop display order.
    pub const ALL: [Self; 5] = [
        Self::Master,
        Self::Subscription,
        Self::Ebook,
        Self::Book,
        Self::Webinar,
    ];

    /// The stored/serialized representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Master => "MASTER",
            Self::Subscription => "SUBSCRIPTION",
            Self::Ebook => "EBOOK",
            Self::Book => "BOOK",
            Self::Webinar => "WEBINAR",
        }
    }

    /// Italian label used on shop pages.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Master => "Master",
            Self::Subscription => "Abbonamento",
            Self::Ebook => "E-book",
            Self::Book => "Pubblicazione",
            Self::Webinar => "Webinar",
        }
    }
}

impl fmt::Display for ProductType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProductType {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| ParseEnumError::new("product type", s))
    }
}
