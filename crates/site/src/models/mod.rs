//! Domain models for the site.
//!
//! These are the shapes handed to templates and serialized by the JSON API
//! (camelCase field names). Row decoding lives in [`crate::db`].

pub mod article;
pub mod category;
pub mod issue;
pub mod product;
pub mod webinar;

pub use article::{Article, NewArticle};
pub use category::{Category, NewCategory};
pub use issue::{Issue, NewIssue};
pub use product::{NewProduct, Product};
pub use webinar::{NewWebinar, Webinar};
