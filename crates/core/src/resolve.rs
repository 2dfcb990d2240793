//! Enrichment of stored ids against live and fallback catalog data.
//!
//! Live records always win over fallback records for the same id. Nothing is
//! cached here: callers pass in whatever the live source returned for the
//! current request.

use rust_decimal::Decimal;

use crate::cart::CartItem;
use crate::catalog::Product;
use crate::types::ProductId;

/// Best available record for `id`: live first, then fallback.
#[must_use]
pub fn best_match<'a>(
    id: &ProductId,
    live: &'a [Product],
    fallback: &'a [Product],
) -> Option<&'a Product> {
    live.iter()
        .find(|p| &p.id == id)
        .or_else(|| fallback.iter().find(|p| &p.id == id))
}

/// Resolve ids to displayable products, preserving id order.
///
/// Ids with no record in either source are dropped.
#[must_use]
pub fn resolve_ids(ids: &[ProductId], live: &[Product], fallback: &[Product]) -> Vec<Product> {
    ids.iter()
        .filter_map(|id| best_match(id, live, fallback))
        .cloned()
        .collect()
}

/// Refresh cart lines from the catalog.
///
/// The matched record's name always replaces the stored one; its primary
/// image only when non-empty, its price only when positive. Lines with no
/// match keep their stored snapshot. Quantities are never touched.
#[must_use]
pub fn enrich_cart(items: &[CartItem], live: &[Product], fallback: &[Product]) -> Vec<CartItem> {
    items
        .iter()
        .map(|line| {
            let mut line = line.clone();
            if let Some(product) = best_match(&line.id, live, fallback) {
                line.name.clone_from(&product.name);
                if let Some(image) = product.primary_image() {
                    line.image = Some(image.to_owned());
                }
                if product.price > Decimal::ZERO {
                    line.price = product.price;
                }
            }
            line
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::catalog::{fallback_catalog, fallback_product};

    fn live_copy(id: &str) -> Product {
        fallback_product(&ProductId::new(id)).unwrap().clone()
    }

    #[test]
    fn test_resolution_prefers_live() {
        let mut live = live_copy("n1");
        live.name = "Celeste Étoile Necklace (Live)".to_string();

        let out = resolve_ids(&[ProductId::new("n1")], &[live], fallback_catalog());
        assert_eq!(out[0].name, "Celeste Étoile Necklace (Live)");
    }

    #[test]
    fn test_resolution_falls_back_then_drops() {
        let ids = [
            ProductId::new("gone"),
            ProductId::new("e2"),
            ProductId::new("n4"),
        ];
        let out = resolve_ids(&ids, &[], fallback_catalog());
        let names: Vec<&str> = out.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Solstice Diamond Hoops", "Seraphine Halo Pendant"]);
    }

    fn line(id: &str, name: &str, price: i64, image: Option<&str>) -> CartItem {
        CartItem {
            id: ProductId::new(id),
            name: name.to_string(),
            price: Decimal::from(price),
            image: image.map(str::to_owned),
            qty: 2,
        }
    }

    #[test]
    fn test_enrich_overrides_name_price_image() {
        let mut live = live_copy("r1");
        live.price = Decimal::from(1790);
        live.images = vec!["/static/images/ring1-live.jpg".to_string()];

        let out = enrich_cart(&[line("r1", "Old name", 1, None)], &[live], fallback_catalog());
        assert_eq!(out[0].name, "Ethereal Halo Ring");
        assert_eq!(out[0].price, Decimal::from(1790));
        assert_eq!(out[0].image.as_deref(), Some("/static/images/ring1-live.jpg"));
        assert_eq!(out[0].qty, 2);
    }

    #[test]
    fn test_enrich_keeps_snapshot_for_empty_image_and_zero_price() {
        let mut live = live_copy("r1");
        live.price = Decimal::ZERO;
        live.images = vec![String::new()];

        let stored = line("r1", "Old name", 1500, Some("/static/images/stored.jpg"));
        let out = enrich_cart(&[stored], &[live], fallback_catalog());
        assert_eq!(out[0].name, "Ethereal Halo Ring");
        assert_eq!(out[0].price, Decimal::from(1500));
        assert_eq!(out[0].image.as_deref(), Some("/static/images/stored.jpg"));
    }

    #[test]
    fn test_enrich_unmatched_line_is_unchanged() {
        let stored = line("retired", "Retired piece", 999, None);
        let out = enrich_cart(std::slice::from_ref(&stored), &[], fallback_catalog());
        assert_eq!(out, vec![stored]);
    }
}
