//! Display structs shared by page templates.
//!
//! Prices are formatted here so templates only print strings.

use tower_sessions::Session;

use aurelia_core::{CartItem, Product, Wishlist};

use crate::models::SessionData;
use crate::services::stores::VisitorStore;

/// Header state: who is signed in and how many pieces are in the bag.
#[derive(Clone, Default)]
pub struct Nav {
    pub user_name: Option<String>,
    pub cart_count: u32,
}

impl Nav {
    pub async fn load(session: &Session, user: Option<&SessionData>) -> Self {
        let cart_count = match VisitorStore::new(session).cart().await {
            Ok(cart) => cart.item_count(),
            Err(e) => {
                tracing::warn!(error = %e, "could not read cart for header");
                0
            }
        };

        Self {
            user_name: user.map(|u| u.name.clone()),
            cart_count,
        }
    }
}

/// The visitor's wishlist for "saved" markers. Read failures show nothing saved.
pub async fn load_wishlist(session: &Session) -> Wishlist {
    VisitorStore::new(session)
        .wishlist()
        .await
        .unwrap_or_else(|e| {
            tracing::warn!(error = %e, "could not read wishlist");
            Wishlist::new()
        })
}

/// Product card data for grids.
#[derive(Clone)]
pub struct ProductCard {
    pub id: String,
    pub slug: String,
    pub name: String,
    pub category: &'static str,
    pub price: String,
    pub image: Option<String>,
    pub badge: Option<&'static str>,
    pub in_stock: bool,
    pub saved: bool,
}

impl ProductCard {
    pub fn new(product: &Product, wishlist: &Wishlist) -> Self {
        Self {
            id: product.id.as_str().to_owned(),
            slug: product.slug.clone(),
            name: product.name.clone(),
            category: product.category.label(),
            price: product.display_price().to_string(),
            image: product.primary_image().map(str::to_owned),
            badge: product.badge.map(|b| b.as_str()),
            in_stock: product.in_stock,
            saved: wishlist.has(&product.id),
        }
    }

    pub fn list(products: &[Product], wishlist: &Wishlist) -> Vec<Self> {
        products.iter().map(|p| Self::new(p, wishlist)).collect()
    }
}

/// One line of the cart or order summary.
#[derive(Clone)]
pub struct LineView {
    pub id: String,
    pub name: String,
    pub image: Option<String>,
    pub price: String,
    pub line_total: String,
    pub qty: u32,
}

impl From<&CartItem> for LineView {
    fn from(item: &CartItem) -> Self {
        Self {
            id: item.id.as_str().to_owned(),
            name: item.name.clone(),
            image: item.image.clone().filter(|url| !url.trim().is_empty()),
            price: item.display_price().to_string(),
            line_total: aurelia_core::Price::inr(item.line_total()).to_string(),
            qty: item.qty,
        }
    }
}
