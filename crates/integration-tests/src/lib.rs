//! Integration tests for Bioarchitettura.
//!
//! Every test drives the full site router in-process, with the production
//! middleware stack, against a fresh migrated in-memory SQLite database. No
//! server or external service is needed:
//!
//! ```bash
//! cargo test -p bioarchitettura-integration-tests
//! ```

#![allow(clippy::expect_used, clippy::missing_panics_doc)]

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{HeaderMap, Method, Request, StatusCode, header::CONTENT_TYPE},
};
use bioarchitettura_site::{app, config::SiteConfig, db, state::AppState};
use secrecy::SecretString;
use serde_json::Value;
use sqlx::SqlitePool;
use tower::ServiceExt;

/// Variables of a fully configured (but payment-less) deployment.
pub const CONFIGURED_ENV: &[(&str, &str)] = &[
    ("SITE_ENV", "test"),
    ("DATABASE_URL", "sqlite::memory:"),
    ("AUTH_SECRET", "integration-test-secret-0123456789abcdef"),
    ("AUTH_URL", "http://localhost:3000"),
];

/// A router wired to its own database.
pub struct TestContext {
    router: Router,
    pool: SqlitePool,
}

impl TestContext {
    /// Context with auth and database configured.
    pub async fn new() -> Self {
        Self::with_env(CONFIGURED_ENV).await
    }

    /// Context whose configuration is read from `vars` only.
    pub async fn with_env(vars: &[(&str, &str)]) -> Self {
        let config = SiteConfig::from_lookup(|key| {
            vars.iter()
                .find(|(name, _)| *name == key)
                .map(|(_, value)| (*value).to_string())
        })
        .expect("Failed to load test configuration");

        let pool = db::create_pool(&SecretString::from("sqlite::memory:"))
            .await
            .expect("Failed to open in-memory database");
        db::MIGRATOR
            .run(&pool)
            .await
            .expect("Failed to run migrations");

        Self {
            router: app(AppState::new(config, pool.clone())),
            pool,
        }
    }

    /// The database behind the router, for arranging fixtures directly.
    #[must_use]
    pub const fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Send a GET request.
    pub async fn get(&self, uri: &str) -> TestResponse {
        self.send(
            Request::builder()
                .uri(uri)
                .body(Body::empty())
                .expect("Failed to build request"),
        )
        .await
    }

    /// Send a POST request with a JSON body.
    pub async fn post_json(&self, uri: &str, body: &Value) -> TestResponse {
        self.post_raw(uri, body.to_string()).await
    }

    /// Send a POST request with an arbitrary body labelled as JSON.
    pub async fn post_raw(&self, uri: &str, body: impl Into<Body>) -> TestResponse {
        self.send(
            Request::builder()
                .method(Method::POST)
                .uri(uri)
                .header(CONTENT_TYPE, "application/json")
                .body(body.into())
                .expect("Failed to build request"),
        )
        .await
    }

    async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Router is infallible");
        let status = response.status();
        let headers = response.headers().clone();
        let body = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read response body");

        TestResponse {
            status,
            headers,
            body: body.to_vec(),
        }
    }
}

/// A fully buffered response.
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl TestResponse {
    /// Body parsed as JSON.
    #[must_use]
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).expect("Response body is not JSON")
    }

    /// Body as text.
    #[must_use]
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Value of a response header, if present and valid UTF-8.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// The `slug` of every object in a JSON array body, in order.
    #[must_use]
    pub fn slugs(&self) -> Vec<String> {
        self.json()
            .as_array()
            .expect("Response body is not a JSON array")
            .iter()
            .filter_map(|item| item.get("slug").and_then(Value::as_str))
            .map(str::to_string)
            .collect()
    }
}
