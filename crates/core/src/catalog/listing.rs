//! Listing page refinement: merge, filter and sort.
//!
//! The listing always starts from the fallback catalog so the page is never
//! empty, then overlays whatever the live catalog returned.

use std::collections::HashMap;
use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::Product;
use crate::types::{Category, ProductId};

/// Default upper bound of the price filter.
pub const DEFAULT_MAX_PRICE: u32 = 3000;

/// Sort order of the listing page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ListingSort {
    /// `new`: New-badged products first, otherwise catalog order.
    #[default]
    #[serde(rename = "new")]
    Featured,
    /// `lh`: price ascending.
    #[serde(rename = "lh")]
    PriceLowHigh,
    /// `hl`: price descending.
    #[serde(rename = "hl")]
    PriceHighLow,
}

impl ListingSort {
    pub const ALL: [Self; 3] = [Self::Featured, Self::PriceLowHigh, Self::PriceHighLow];

    /// Parse a query-string value. Unknown values yield `None`.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "new" => Some(Self::Featured),
            "lh" => Some(Self::PriceLowHigh),
            "hl" => Some(Self::PriceHighLow),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Featured => "new",
            Self::PriceLowHigh => "lh",
            Self::PriceHighLow => "hl",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Featured => "Featured",
            Self::PriceLowHigh => "Price: Low to High",
            Self::PriceHighLow => "Price: High to Low",
        }
    }
}

impl fmt::Display for ListingSort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Listing filter state, as read from the page's query string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingFilter {
    /// Case-insensitive substring matched against name and category.
    pub query: String,
    /// Selected categories; empty means all.
    pub categories: Vec<Category>,
    /// Inclusive price cap.
    pub max_price: Decimal,
    pub sort: ListingSort,
}

impl Default for ListingFilter {
    fn default() -> Self {
        Self {
            query: String::new(),
            categories: Vec::new(),
            max_price: Decimal::from(DEFAULT_MAX_PRICE),
            sort: ListingSort::default(),
        }
    }
}

impl ListingFilter {
    /// Whether a product passes the price, category and query filters.
    #[must_use]
    pub fn matches(&self, product: &Product) -> bool {
        if product.price > self.max_price {
            return false;
        }
        if !self.categories.is_empty() && !self.categories.contains(&product.category) {
            return false;
        }
        let needle = self.query.trim().to_lowercase();
        needle.is_empty()
            || product.name.to_lowercase().contains(&needle)
            || product.category.as_str().contains(&needle)
    }
}

/// Merge live products over the fallback listing, keyed by id.
///
/// Fallback order comes first; a live record replaces the fallback record
/// with the same id in place, and live ids unknown to the fallback append in
/// live order.
#[must_use]
pub fn merge_listing(fallback: &[Product], live: &[Product]) -> Vec<Product> {
    let mut merged: Vec<Product> = fallback.to_vec();
    let mut index: HashMap<ProductId, usize> = merged
        .iter()
        .enumerate()
        .map(|(i, p)| (p.id.clone(), i))
        .collect();

    for product in live {
        if let Some(&i) = index.get(&product.id) {
            merged[i] = product.clone();
        } else {
            index.insert(product.id.clone(), merged.len());
            merged.push(product.clone());
        }
    }
    merged
}

/// Filter then sort. Sorting is stable, so ties keep merged order.
#[must_use]
pub fn refine(products: &[Product], filter: &ListingFilter) -> Vec<Product> {
    let mut out: Vec<Product> = products
        .iter()
        .filter(|p| filter.matches(p))
        .cloned()
        .collect();

    match filter.sort {
        ListingSort::Featured => out.sort_by_key(|p| !p.is_new()),
        ListingSort::PriceLowHigh => out.sort_by(|a, b| a.price.cmp(&b.price)),
        ListingSort::PriceHighLow => out.sort_by(|a, b| b.price.cmp(&a.price)),
    }
    out
}

/// Product count per category, in [`Category::ALL`] order.
#[must_use]
pub fn category_counts(products: &[Product]) -> Vec<(Category, usize)> {
    Category::ALL
        .into_iter()
        .map(|c| (c, products.iter().filter(|p| p.category == c).count()))
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::catalog::{fallback_catalog, fallback_product};

    fn ids(products: &[Product]) -> Vec<&str> {
        products.iter().map(|p| p.id.as_str()).collect()
    }

    #[test]
    fn test_default_filter_keeps_everything() {
        let out = refine(fallback_catalog(), &ListingFilter::default());
        assert_eq!(out.len(), fallback_catalog().len());
    }

    #[test]
    fn test_featured_puts_new_first_and_is_stable() {
        let out = refine(fallback_catalog(), &ListingFilter::default());
        assert_eq!(&ids(&out)[..3], &["e1", "b2", "n1"]);
    }

    #[test]
    fn test_price_cap_is_inclusive() {
        let filter = ListingFilter {
            max_price: Decimal::from(980),
            ..ListingFilter::default()
        };
        let out = refine(fallback_catalog(), &filter);
        assert_eq!(ids(&out), vec!["e1", "e3", "r3"]);
    }

    #[test]
    fn test_category_and_sort() {
        let filter = ListingFilter {
            categories: vec![Category::Rings],
            sort: ListingSort::PriceHighLow,
            ..ListingFilter::default()
        };
        let out = refine(fallback_catalog(), &filter);
        assert_eq!(ids(&out), vec!["r2", "r1", "r3"]);

        let filter = ListingFilter {
            sort: ListingSort::PriceLowHigh,
            ..filter
        };
        assert_eq!(ids(&refine(fallback_catalog(), &filter)), vec!["r3", "r1", "r2"]);
    }

    #[test]
    fn test_query_matches_name_or_category() {
        let filter = ListingFilter {
            query: "PEARL".to_string(),
            ..ListingFilter::default()
        };
        assert_eq!(ids(&refine(fallback_catalog(), &filter)), vec!["n3", "e3"]);

        let filter = ListingFilter {
            query: "bracelet".to_string(),
            ..ListingFilter::default()
        };
        assert_eq!(ids(&refine(fallback_catalog(), &filter)).len(), 3);
    }

    #[test]
    fn test_merge_replaces_in_place_and_appends() {
        let mut live_n2 = fallback_product(&ProductId::new("n2")).unwrap().clone();
        live_n2.price = Decimal::from(2500);
        let mut extra = live_n2.clone();
        extra.id = ProductId::new("x1");

        let merged = merge_listing(fallback_catalog(), &[extra, live_n2]);
        assert_eq!(merged.len(), 14);
        assert_eq!(merged[1].id.as_str(), "n2");
        assert_eq!(merged[1].price, Decimal::from(2500));
        assert_eq!(merged[13].id.as_str(), "x1");
    }

    #[test]
    fn test_category_counts() {
        let counts = category_counts(fallback_catalog());
        assert_eq!(
            counts,
            vec![
                (Category::Necklaces, 4),
                (Category::Earrings, 3),
                (Category::Rings, 3),
                (Category::Bracelets, 3),
            ]
        );
    }

    #[test]
    fn test_sort_parse() {
        assert_eq!(ListingSort::parse("lh"), Some(ListingSort::PriceLowHigh));
        assert_eq!(ListingSort::parse("bogus"), None);
        assert_eq!(ListingSort::PriceHighLow.to_string(), "hl");
    }
}
