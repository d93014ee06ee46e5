//! Core types for Bioarchitettura.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod price;
pub mod product_type;
pub mod slug;
pub mod webinar;

pub use id::*;
pub use price::{Price, PriceError};
pub use product_type::ProductType;
pub use slug::{Slug, SlugError};
pub use webinar::{WebinarSchedule, WebinarStatus};

/// Error returned when a stored or submitted enum value is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid {kind}: {value}")]
pub struct ParseEnumError {
    /// Name of the enum being parsed (e.g. "product type").
    pub kind: &'static str,
    /// The rejected input.
    pub value: String,
}

impl ParseEnumError {
    pub(crate) fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_owned(),
        }
    }
}
