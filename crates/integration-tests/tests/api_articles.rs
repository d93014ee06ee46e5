//! Integration tests for the article API.

use axum::http::StatusCode;
use bioarchitettura_core::Slug;
use bioarchitettura_integration_tests::TestContext;
use bioarchitettura_site::db::CategoryRepository;
use bioarchitettura_site::models::NewCategory;
use serde_json::{Value, json};

fn article(slug: &str, published_at: Option<&str>) -> Value {
    json!({
        "title": format!("Articolo {slug}"),
        "slug": slug,
        "content": "## Introduzione\n\nTesto dell'articolo.",
        "author": "Redazione",
        "publishedAt": published_at,
    })
}

async fn create(ctx: &TestContext, body: &Value) -> Value {
    let resp = ctx.post_json("/api/articles", body).await;
    assert_eq!(resp.status, StatusCode::CREATED, "{}", resp.text());
    resp.json()
}

#[tokio::test]
async fn test_drafts_are_hidden() {
    let ctx = TestContext::new().await;
    create(&ctx, &article("pubblicato", Some("2025-04-01T09:00:00Z"))).await;
    create(&ctx, &article("bozza", None)).await;

    let resp = ctx.get("/api/articles").await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.slugs(), vec!["pubblicato"]);

    let resp = ctx.get("/api/articles/bozza").await;
    assert_eq!(resp.status, StatusCode::NOT_FOUND);
    assert_eq!(resp.json(), json!({ "error": "Article not found" }));

    assert_eq!(ctx.get("/rivista/bozza").await.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_list_is_newest_first_with_limit() {
    let ctx = TestContext::new().await;
    create(&ctx, &article("gennaio", Some("2025-01-10T09:00:00Z"))).await;
    create(&ctx, &article("marzo", Some("2025-03-10T09:00:00Z"))).await;
    create(&ctx, &article("febbraio", Some("2025-02-10T09:00:00Z"))).await;

    assert_eq!(
        ctx.get("/api/articles").await.slugs(),
        vec!["marzo", "febbraio", "gennaio"]
    );
    assert_eq!(
        ctx.get("/api/articles?limit=2").await.slugs(),
        vec!["marzo", "febbraio"]
    );
    assert_eq!(
        ctx.get("/api/articles?limit=0").await.status,
        StatusCode::BAD_REQUEST
    );
}

#[tokio::test]
async fn test_create_then_list_by_category() {
    let ctx = TestContext::new().await;
    let category = CategoryRepository::new(ctx.pool())
        .create(&NewCategory {
            name: "Materiali naturali".to_string(),
            slug: Slug::parse("materiali-naturali").expect("valid slug"),
        })
        .await
        .expect("create category");

    let mut body = article("terra-cruda", Some("2025-05-05T09:00:00Z"));
    body["categoryId"] = json!(category.id);
    let created = create(&ctx, &body).await;
    assert_eq!(created["category"]["slug"], "materiali-naturali");
    create(&ctx, &article("senza-categoria", Some("2025-05-06T09:00:00Z"))).await;

    let resp = ctx
        .get(&format!("/api/articles?categoryId={}", category.id))
        .await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.slugs(), vec!["terra-cruda"]);

    let resp = ctx.get("/api/articles?categoryId=abc").await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.json(), json!([]));
}

#[tokio::test]
async fn test_malformed_query_gets_json_error() {
    let ctx = TestContext::new().await;

    for uri in [
        "/api/articles?limit=1&limit=2",
        "/api/products?type=BOOK&type=EBOOK",
        "/api/webinars?limit=3&limit=4",
    ] {
        let resp = ctx.get(uri).await;
        assert_eq!(resp.status, StatusCode::BAD_REQUEST, "{uri}");
        assert!(
            resp.header("content-type")
                .is_some_and(|ct| ct.starts_with("application/json")),
            "{uri}"
        );
        assert!(resp.json()["error"].is_string(), "{uri}");
    }
}

#[tokio::test]
async fn test_date_only_published_at_is_midnight_utc() {
    let ctx = TestContext::new().await;

    let created = create(&ctx, &article("solo-data", Some("2025-03-01"))).await;
    assert_eq!(created["publishedAt"], "2025-03-01T00:00:00Z");
    assert_eq!(ctx.get("/api/articles").await.slugs(), vec!["solo-data"]);

    let resp = ctx
        .post_json("/api/articles", &article("data-errata", Some("1 marzo")))
        .await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    assert!(resp.json()["error"].is_string());
}

#[tokio::test]
async fn test_show_embeds_markdown_source() {
    let ctx = TestContext::new().await;
    create(&ctx, &article("intonaci", Some("2025-06-01T09:00:00Z"))).await;

    let resp = ctx.get("/api/articles/intonaci").await;
    assert_eq!(resp.status, StatusCode::OK);
    let body = resp.json();
    assert_eq!(body["author"], "Redazione");
    assert!(body["content"].as_str().is_some_and(|c| c.starts_with("## ")));

    let page = ctx.get("/rivista/intonaci").await;
    assert_eq!(page.status, StatusCode::OK);
    let html = page.text();
    assert!(html.contains("<h2>"));
    assert!(html.contains("Introduzione"));
}

#[tokio::test]
async fn test_create_validation() {
    let ctx = TestContext::new().await;

    let mut blank_title = article("senza-titolo", None);
    blank_title["title"] = json!("   ");
    let resp = ctx.post_json("/api/articles", &blank_title).await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    assert_eq!(resp.json(), json!({ "error": "title is required" }));

    let mut dangling = article("numero-fantasma", None);
    dangling["issueId"] = json!(42);
    let resp = ctx.post_json("/api/articles", &dangling).await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);

    create(&ctx, &article("doppio", None)).await;
    let resp = ctx.post_json("/api/articles", &article("doppio", None)).await;
    assert_eq!(resp.status, StatusCode::CONFLICT);
}
