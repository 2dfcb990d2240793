//! Catalog products.
//!
//! A [`Product`] is the full displayable record. It comes from one of two
//! sources: the live catalog in the database, or the static
//! [`fallback_catalog`] compiled into the binary, which keeps the storefront
//! browsable when the database is unreachable and lets stale cart/wishlist ids
//! still resolve.

mod fallback;
pub mod listing;

pub use fallback::{fallback_catalog, fallback_product};
pub use listing::{DEFAULT_MAX_PRICE, ListingFilter, ListingSort, category_counts, merge_listing, refine};

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::cart::ProductSnapshot;
use crate::types::{Badge, Category, Price, ProductId};

/// A purchasable catalog product.
///
/// Serialized in camelCase to match the JSON API (`shortDescription`,
/// `inStock`, `createdAt`); prices serialize as JSON numbers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub slug: String,
    pub name: String,
    pub category: Category,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    /// Image URLs; the first non-empty one is the primary image.
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub badge: Option<Badge>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default = "in_stock_default")]
    pub in_stock: bool,
    #[serde(default)]
    pub short_description: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

const fn in_stock_default() -> bool {
    true
}

impl Product {
    /// The primary image URL, if the product has a non-empty one.
    #[must_use]
    pub fn primary_image(&self) -> Option<&str> {
        self.images
            .iter()
            .map(String::as_str)
            .find(|url| !url.trim().is_empty())
    }

    /// Whether the product carries the `New` badge.
    #[must_use]
    pub fn is_new(&self) -> bool {
        self.badge == Some(Badge::New)
    }

    /// The product price as a displayable rupee amount.
    #[must_use]
    pub const fn display_price(&self) -> Price {
        Price::inr(self.price)
    }

    /// Denormalized fields copied into a cart line on add-to-cart.
    #[must_use]
    pub fn snapshot(&self) -> ProductSnapshot {
        ProductSnapshot {
            id: self.id.clone(),
            name: self.name.clone(),
            price: self.price,
            image: self.primary_image().map(str::to_owned),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_primary_image_skips_blanks() {
        let mut product = fallback_product(&ProductId::new("n1")).unwrap().clone();
        product.images = vec![String::new(), "/static/images/alt.jpg".to_string()];
        assert_eq!(product.primary_image(), Some("/static/images/alt.jpg"));

        product.images.clear();
        assert_eq!(product.primary_image(), None);
    }

    #[test]
    fn test_json_shape_is_camel_case_with_numeric_price() {
        let product = fallback_product(&ProductId::new("e1")).unwrap();
        let json = serde_json::to_value(product).unwrap();

        assert_eq!(json["id"], "e1");
        assert_eq!(json["category"], "earrings");
        assert_eq!(json["price"], serde_json::json!(840.0));
        assert_eq!(json["inStock"], true);
        assert_eq!(json["badge"], "New");
        assert!(json.get("shortDescription").is_some());
        assert!(json.get("createdAt").is_none());
    }

    #[test]
    fn test_deserialize_minimal_record() {
        let product: Product = serde_json::from_value(serde_json::json!({
            "id": "x9",
            "slug": "x9",
            "name": "Untitled",
            "category": "rings",
            "price": 1200
        }))
        .unwrap();

        assert!(product.in_stock);
        assert!(product.images.is_empty());
        assert_eq!(product.price, Decimal::from(1200));
    }

    #[test]
    fn test_snapshot_copies_display_fields() {
        let product = fallback_product(&ProductId::new("r1")).unwrap();
        let snapshot = product.snapshot();
        assert_eq!(snapshot.id, product.id);
        assert_eq!(snapshot.name, "Ethereal Halo Ring");
        assert_eq!(snapshot.price, Decimal::from(1890));
        assert_eq!(snapshot.image.as_deref(), product.primary_image());
    }
}
