//! Bioarchitettura Core - Shared domain types.
//!
//! This crate provides the types used across all Bioarchitettura components:
//! - `site` - Magazine, shop, webinars and admin dashboard (axum server)
//! - `cli` - Command-line tools for migrations and seeding
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no database
//! access, no HTTP. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Typed IDs, slugs, prices, product types and webinar statuses
//! - [`format`] - Italian display formatting for dates

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod format;
pub mod types;

pub use types::*;
