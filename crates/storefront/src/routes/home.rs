//! Home page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::response::IntoResponse;
use tower_sessions::Session;
use tracing::instrument;

use aurelia_core::{Product, category_counts, fallback_catalog};

use crate::middleware::OptionalAuth;
use crate::routes::views::{Nav, ProductCard, load_wishlist};

/// Number of pieces in the featured row.
const FEATURED_LIMIT: usize = 8;

/// A category tile with its piece count.
pub struct CategoryTile {
    pub slug: &'static str,
    pub label: &'static str,
    pub count: usize,
}

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub nav: Nav,
    pub featured: Vec<ProductCard>,
    pub categories: Vec<CategoryTile>,
}

/// Badged pieces first, then the rest of the catalog, in catalog order.
fn featured(catalog: &[Product]) -> Vec<&Product> {
    let (badged, plain): (Vec<&Product>, Vec<&Product>) =
        catalog.iter().partition(|p| p.badge.is_some());
    badged.into_iter().chain(plain).take(FEATURED_LIMIT).collect()
}

/// Display the home page.
#[instrument(skip(session, user))]
pub async fn home(session: Session, OptionalAuth(user): OptionalAuth) -> impl IntoResponse {
    let catalog = fallback_catalog();
    let wishlist = load_wishlist(&session).await;

    let featured = featured(catalog)
        .into_iter()
        .map(|p| ProductCard::new(p, &wishlist))
        .collect();

    let categories = category_counts(catalog)
        .into_iter()
        .map(|(category, count)| CategoryTile {
            slug: category.as_str(),
            label: category.label(),
            count,
        })
        .collect();

    HomeTemplate {
        nav: Nav::load(&session, user.as_ref()).await,
        featured,
        categories,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_featured_puts_badged_first() {
        let picks = featured(fallback_catalog());
        assert_eq!(picks.len(), FEATURED_LIMIT);

        let first_plain = picks.iter().position(|p| p.badge.is_none());
        if let Some(i) = first_plain {
            assert!(picks[i..].iter().all(|p| p.badge.is_none()));
        }
    }
}
