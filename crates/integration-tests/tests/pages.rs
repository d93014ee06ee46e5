//! Integration tests for the server-rendered pages and middleware.

use axum::http::StatusCode;
use bioarchitettura_integration_tests::TestContext;
use chrono::{Duration, Utc};
use serde_json::json;

#[tokio::test]
async fn test_pages_render_on_empty_database() {
    let ctx = TestContext::new().await;

    for uri in ["/", "/chi-siamo", "/rivista", "/negozio", "/webinar", "/admin"] {
        let resp = ctx.get(uri).await;
        assert_eq!(resp.status, StatusCode::OK, "{uri}");
        assert!(
            resp.header("content-type")
                .is_some_and(|ct| ct.starts_with("text/html")),
            "{uri}"
        );
        assert!(resp.text().contains("Bioarchitettura"), "{uri}");
    }
}

#[tokio::test]
async fn test_admin_tables_render() {
    let ctx = TestContext::new().await;

    for uri in ["/admin/articoli", "/admin/prodotti", "/admin/webinar"] {
        assert_eq!(ctx.get(uri).await.status, StatusCode::OK, "{uri}");
    }
}

#[tokio::test]
async fn test_unknown_slugs_are_not_found() {
    let ctx = TestContext::new().await;

    for uri in ["/rivista/nessuno", "/negozio/nessuno", "/webinar/nessuno"] {
        assert_eq!(ctx.get(uri).await.status, StatusCode::NOT_FOUND, "{uri}");
    }
}

#[tokio::test]
async fn test_completed_future_webinar_is_listed_as_past() {
    let ctx = TestContext::new().await;
    let next_week = (Utc::now() + Duration::days(7)).to_rfc3339();

    for (title, slug, status) in [
        ("Calce e cocciopesto", "calce-e-cocciopesto", "COMPLETED"),
        ("Tetti verdi", "tetti-verdi", "SCHEDULED"),
    ] {
        let resp = ctx
            .post_json(
                "/api/webinars",
                &json!({
                    "title": title,
                    "slug": slug,
                    "description": "Incontro online",
                    "date": next_week,
                    "duration": 90,
                    "presenter": "Arch. Rossi",
                    "price": 25,
                    "status": status,
                }),
            )
            .await;
        assert_eq!(resp.status, StatusCode::CREATED, "{}", resp.text());
    }

    let html = ctx.get("/webinar").await.text();
    let (upcoming, past) = html
        .split_once("Webinar Passati")
        .expect("past section is rendered");
    assert!(upcoming.contains("Tetti verdi"));
    assert!(!upcoming.contains("Calce e cocciopesto"));
    assert!(past.contains("Calce e cocciopesto"));
    assert!(!past.contains("Tetti verdi"));
}

#[tokio::test]
async fn test_shop_lists_in_stock_products() {
    let ctx = TestContext::new().await;
    for (slug, in_stock) in [("master-casaclima", true), ("libro-esaurito", false)] {
        let resp = ctx
            .post_json(
                "/api/products",
                &json!({
                    "title": slug,
                    "slug": slug,
                    "description": "Descrizione",
                    "price": 49,
                    "type": "MASTER",
                    "inStock": in_stock,
                }),
            )
            .await;
        assert_eq!(resp.status, StatusCode::CREATED);
    }

    let html = ctx.get("/negozio").await.text();
    assert!(html.contains("/negozio/master-casaclima"));
    assert!(!html.contains("/negozio/libro-esaurito"));

    // The admin table lists everything.
    let html = ctx.get("/admin/prodotti").await.text();
    assert!(html.contains("libro-esaurito"));
}

#[tokio::test]
async fn test_responses_carry_security_headers_and_request_id() {
    let ctx = TestContext::new().await;

    let resp = ctx.get("/").await;
    assert_eq!(resp.header("x-frame-options"), Some("DENY"));
    assert_eq!(resp.header("x-content-type-options"), Some("nosniff"));
    assert!(resp.header("content-security-policy").is_some());
    assert!(resp.header("x-request-id").is_some_and(|id| !id.is_empty()));
}
