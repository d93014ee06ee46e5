//! Shop route handlers.

use std::num::NonZeroU32;

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
};
use tracing::instrument;

use bioarchitettura_core::{ProductType, Slug};

use crate::db::{ProductFilter, ProductRepository};
use crate::error::{AppError, Result};
use crate::filters;
use crate::models::Product;
use crate::state::AppState;

const SHOP_PRODUCTS: u32 = 12;
const NEW_ARRIVALS: usize = 4;

/// Product card for templates.
#[derive(Debug, Clone)]
pub struct ProductCard {
    pub title: String,
    pub slug: String,
    pub description: String,
    pub price: String,
    pub type_label: &'static str,
    pub cover_image: Option<String>,
    pub category: Option<String>,
}

impl From<&Product> for ProductCard {
    fn from(product: &Product) -> Self {
        Self {
            title: product.title.clone(),
            slug: product.slug.to_string(),
            description: product.description.clone(),
            price: product.price.display(),
            type_label: product.product_type.label(),
            cover_image: product.cover_image.clone(),
            category: product.category.as_ref().map(|c| c.name.clone()),
        }
    }
}

/// A product type section on the shop page.
#[derive(Debug, Clone)]
pub struct ShopSection {
    pub anchor: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub products: Vec<ProductCard>,
}

/// Shop sections in display order. Webinar products are listed on the
/// webinar page instead.
const SECTIONS: [(ProductType, &str, &str, &str); 4] = [
    (
        ProductType::Master,
        "master",
        "Master",
        "Corsi di formazione avanzata",
    ),
    (
        ProductType::Subscription,
        "abbonamenti",
        "Abbonamenti",
        "Abbonamenti alla rivista",
    ),
    (ProductType::Ebook, "ebooks", "E-books", "Libri digitali"),
    (
        ProductType::Book,
        "pubblicazioni",
        "Pubblicazioni",
        "Libri e pubblicazioni",
    ),
];

/// Group products into the shop sections, keeping their order.
#[must_use]
pub fn group_by_type(products: &[Product]) -> Vec<ShopSection> {
    SECTIONS
        .iter()
        .map(|&(product_type, anchor, name, description)| ShopSection {
            anchor,
            name,
            description,
            products: products
                .iter()
                .filter(|p| p.product_type == product_type)
                .map(ProductCard::from)
                .collect(),
        })
        .collect()
}

/// Shop page template.
#[derive(Template, WebTemplate)]
#[template(path = "shop/index.html")]
pub struct ShopTemplate {
    pub sections: Vec<ShopSection>,
    pub new_arrivals: Vec<ProductCard>,
}

/// Product page template.
#[derive(Template, WebTemplate)]
#[template(path = "shop/show.html")]
pub struct ProductTemplate {
    pub product: ProductCard,
    pub free: bool,
}

/// `GET /negozio`
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let products = ProductRepository::new(state.pool())
        .list(ProductFilter {
            limit: NonZeroU32::new(SHOP_PRODUCTS),
            ..ProductFilter::storefront()
        })
        .await?;

    Ok(ShopTemplate {
        sections: group_by_type(&products),
        new_arrivals: products
            .iter()
            .take(NEW_ARRIVALS)
            .map(ProductCard::from)
            .collect(),
    })
}

/// `GET /negozio/{slug}`. Out-of-stock products are not found.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<impl IntoResponse> {
    let not_found = || AppError::NotFound("Prodotto non trovato".to_string());
    let slug = Slug::parse(&slug).map_err(|_| not_found())?;

    let product = ProductRepository::new(state.pool())
        .find_by_slug(&slug)
        .await?
        .ok_or_else(not_found)?;

    Ok(ProductTemplate {
        free: product.price.is_free(),
        product: ProductCard::from(&product),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use bioarchitettura_core::{Price, ProductId};
    use chrono::Utc;

    use super::*;

    fn product(id: i64, product_type: ProductType) -> Product {
        Product {
            id: ProductId::new(id),
            title: format!("Prodotto {id}"),
            slug: Slug::parse(&format!("prodotto-{id}")).unwrap(),
            description: String::new(),
            price: Price::from_cents(4900),
            product_type,
            cover_image: None,
            featured: false,
            in_stock: true,
            category_id: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
            category: None,
        }
    }

    #[test]
    fn test_group_by_type_counts() {
        let products = vec![
            product(1, ProductType::Master),
            product(2, ProductType::Ebook),
            product(3, ProductType::Master),
            product(4, ProductType::Webinar),
        ];

        let sections = group_by_type(&products);
        let counts: Vec<(&str, usize)> = sections
            .iter()
            .map(|s| (s.name, s.products.len()))
            .collect();
        assert_eq!(
            counts,
            vec![("Master", 2), ("Abbonamenti", 0), ("E-books", 1), ("Pubblicazioni", 0)]
        );
        let master = sections.first().and_then(|s| s.products.first()).unwrap();
        assert_eq!(master.price, "49,00\u{a0}€");
    }
}
