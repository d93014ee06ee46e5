//! Integration tests for the product API.

use axum::http::StatusCode;
use bioarchitettura_integration_tests::TestContext;
use serde_json::{Value, json};

fn product(slug: &str, product_type: &str, in_stock: bool) -> Value {
    json!({
        "title": format!("Prodotto {slug}"),
        "slug": slug,
        "description": "Descrizione del prodotto",
        "price": 49.0,
        "type": product_type,
        "inStock": in_stock,
    })
}

async fn create(ctx: &TestContext, body: &Value) {
    let resp = ctx.post_json("/api/products", body).await;
    assert_eq!(resp.status, StatusCode::CREATED, "{}", resp.text());
}

// ============================================================================
// Listing
// ============================================================================

#[tokio::test]
async fn test_list_only_returns_in_stock_products() {
    let ctx = TestContext::new().await;
    create(&ctx, &product("master-bioedilizia", "MASTER", true)).await;
    create(&ctx, &product("libro-esaurito", "BOOK", false)).await;

    let resp = ctx.get("/api/products").await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.slugs(), vec!["master-bioedilizia"]);
}

#[tokio::test]
async fn test_list_filters_by_type_and_featured() {
    let ctx = TestContext::new().await;
    let mut featured = product("ebook-calce", "EBOOK", true);
    featured["featured"] = json!(true);
    create(&ctx, &featured).await;
    create(&ctx, &product("ebook-legno", "EBOOK", true)).await;
    create(&ctx, &product("abbonamento", "SUBSCRIPTION", true)).await;

    let mut ebooks = ctx.get("/api/products?type=EBOOK").await.slugs();
    ebooks.sort();
    assert_eq!(ebooks, vec!["ebook-calce", "ebook-legno"]);

    let highlighted = ctx.get("/api/products?featured=true").await.slugs();
    assert_eq!(highlighted, vec!["ebook-calce"]);

    // Anything other than "true" leaves the flag unfiltered.
    assert_eq!(ctx.get("/api/products?featured=yes").await.slugs().len(), 3);
}

#[tokio::test]
async fn test_list_rejects_bad_query_values() {
    let ctx = TestContext::new().await;

    for uri in [
        "/api/products?limit=0",
        "/api/products?limit=-3",
        "/api/products?limit=molti",
        "/api/products?type=DVD",
    ] {
        let resp = ctx.get(uri).await;
        assert_eq!(resp.status, StatusCode::BAD_REQUEST, "{uri}");
        assert!(resp.json()["error"].is_string(), "{uri}");
    }
}

#[tokio::test]
async fn test_limit_caps_results() {
    let ctx = TestContext::new().await;
    for slug in ["uno", "due", "tre"] {
        create(&ctx, &product(slug, "BOOK", true)).await;
    }

    assert_eq!(ctx.get("/api/products?limit=2").await.slugs().len(), 2);
}

// ============================================================================
// Detail
// ============================================================================

#[tokio::test]
async fn test_show_product_by_slug() {
    let ctx = TestContext::new().await;
    create(&ctx, &product("manuale-restauro", "BOOK", true)).await;
    create(&ctx, &product("fuori-catalogo", "BOOK", false)).await;

    let resp = ctx.get("/api/products/manuale-restauro").await;
    assert_eq!(resp.status, StatusCode::OK);
    let body = resp.json();
    assert_eq!(body["type"], "BOOK");
    assert_eq!(body["price"], json!(49.0));
    assert_eq!(body["inStock"], true);

    let resp = ctx.get("/api/products/fuori-catalogo").await;
    assert_eq!(resp.status, StatusCode::NOT_FOUND);
    assert_eq!(resp.json(), json!({ "error": "Product not found" }));
}

// ============================================================================
// Creation
// ============================================================================

#[tokio::test]
async fn test_create_without_price_is_rejected() {
    let ctx = TestContext::new().await;
    let mut body = product("senza-prezzo", "EBOOK", true);
    if let Some(fields) = body.as_object_mut() {
        fields.remove("price");
    }

    let resp = ctx.post_json("/api/products", &body).await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    assert!(resp.json()["error"].is_string());

    let stored: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
        .fetch_one(ctx.pool())
        .await
        .expect("count products");
    assert_eq!(stored, 0);
}

#[tokio::test]
async fn test_create_rejects_malformed_json() {
    let ctx = TestContext::new().await;

    let resp = ctx.post_raw("/api/products", "{ not json").await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);

    let mut body = product("prezzo-negativo", "BOOK", true);
    body["price"] = json!(-10);
    let resp = ctx.post_json("/api/products", &body).await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);

    let mut body = product("slug-non-valido", "BOOK", true);
    body["slug"] = json!("Slug Non Valido");
    let resp = ctx.post_json("/api/products", &body).await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_create_defaults_and_duplicate_slug() {
    let ctx = TestContext::new().await;
    let body = json!({
        "title": "Abbonamento digitale",
        "slug": "abbonamento-digitale",
        "description": "Accesso all'archivio",
        "price": 29.9,
        "type": "SUBSCRIPTION",
    });

    let resp = ctx.post_json("/api/products", &body).await;
    assert_eq!(resp.status, StatusCode::CREATED);
    let created = resp.json();
    assert_eq!(created["featured"], false);
    assert_eq!(created["inStock"], true);
    assert!(created["id"].is_i64());

    let resp = ctx.post_json("/api/products", &body).await;
    assert_eq!(resp.status, StatusCode::CONFLICT);
    assert!(resp.json()["error"].is_string());
}

#[tokio::test]
async fn test_create_with_unknown_category_is_rejected() {
    let ctx = TestContext::new().await;
    let mut body = product("orfano", "BOOK", true);
    body["categoryId"] = json!(999);

    let resp = ctx.post_json("/api/products", &body).await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
}
