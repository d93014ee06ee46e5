//! About page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::response::IntoResponse;
use tracing::instrument;

use crate::filters;

/// Contact details shown on the about page and in the footer.
pub const CONTACT_EMAIL: &str = "info@bioarchitettura.org";

/// About page template.
#[derive(Template, WebTemplate)]
#[template(path = "about.html")]
pub struct AboutTemplate {
    pub email: &'static str,
}

/// `GET /chi-siamo`
#[instrument]
pub async fn about() -> impl IntoResponse {
    AboutTemplate {
        email: CONTACT_EMAIL,
    }
}
