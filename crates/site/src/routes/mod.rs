//! HTTP route handlers for the site.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                        - Home page
//! GET  /rivista                 - Magazine: latest articles and issues
//! GET  /rivista/{slug}          - Article detail
//! GET  /negozio                 - Shop: products grouped by type
//! GET  /negozio/{slug}          - Product detail
//! GET  /webinar                 - Upcoming and past webinars
//! GET  /webinar/{slug}          - Webinar detail
//! GET  /chi-siamo               - About and contacts
//!
//! # Admin
//! GET  /admin                   - Dashboard counts
//! GET  /admin/articoli          - All articles, drafts included
//! GET  /admin/prodotti          - All products, out of stock included
//! GET  /admin/webinar           - All webinars
//!
//! # JSON API
//! GET  /api/articles            - Published articles (?limit, ?categoryId)
//! POST /api/articles            - Create article
//! GET  /api/articles/{slug}     - Published article
//! GET  /api/products            - In-stock products (?type, ?featured, ?limit)
//! POST /api/products            - Create product
//! GET  /api/products/{slug}     - In-stock product
//! GET  /api/webinars            - Webinars (?limit)
//! POST /api/webinars            - Create webinar
//! GET  /api/status              - Configuration status
//! ```

pub mod about;
pub mod admin;
pub mod api;
pub mod home;
pub mod magazine;
pub mod shop;
pub mod webinars;

use axum::{Router, routing::get};

use crate::state::AppState;

/// Create the magazine routes router.
pub fn magazine_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(magazine::index))
        .route("/{slug}", get(magazine::show))
}

/// Create the shop routes router.
pub fn shop_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(shop::index))
        .route("/{slug}", get(shop::show))
}

/// Create the webinar routes router.
pub fn webinar_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(webinars::index))
        .route("/{slug}", get(webinars::show))
}

/// Create all routes for the site.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::home))
        .route("/chi-siamo", get(about::about))
        .nest("/rivista", magazine_routes())
        .nest("/negozio", shop_routes())
        .nest("/webinar", webinar_routes())
        .nest("/admin", admin::routes())
        .nest("/api", api::routes())
}
