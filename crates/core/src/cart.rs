//! Cart line items and cart mutations.
//!
//! A cart is an ordered list of lines, at most one per product id. Each line
//! carries a denormalized snapshot of the product taken at add-to-cart time so
//! it stays displayable even when the product later disappears from every
//! catalog source.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{Price, ProductId};

/// Product fields copied into a cart line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductSnapshot {
    pub id: ProductId,
    pub name: String,
    pub price: Decimal,
    pub image: Option<String>,
}

/// A single cart line. `qty` is always at least 1.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    pub id: ProductId,
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub qty: u32,
}

impl CartItem {
    /// Price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.price * Decimal::from(self.qty)
    }

    #[must_use]
    pub const fn display_price(&self) -> Price {
        Price::inr(self.price)
    }
}

/// The visitor's cart.
///
/// Serialized as a bare JSON array of lines.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Add `qty` units of a product.
    ///
    /// An existing line for the same id has its quantity increased (the
    /// snapshot of the first add is kept); otherwise a new line is appended.
    /// Adding zero units does nothing.
    pub fn add(&mut self, product: ProductSnapshot, qty: u32) {
        if qty == 0 {
            return;
        }
        if let Some(line) = self.items.iter_mut().find(|l| l.id == product.id) {
            line.qty = line.qty.saturating_add(qty);
            return;
        }
        self.items.push(CartItem {
            id: product.id,
            name: product.name,
            price: product.price,
            image: product.image,
            qty,
        });
    }

    /// Remove the line for `id`, if any.
    pub fn remove(&mut self, id: &ProductId) {
        self.items.retain(|l| &l.id != id);
    }

    /// Set the quantity of an existing line; zero or below removes it.
    ///
    /// Unknown ids are ignored.
    pub fn set_quantity(&mut self, id: &ProductId, qty: i64) {
        if qty <= 0 {
            self.remove(id);
            return;
        }
        let qty = u32::try_from(qty).unwrap_or(u32::MAX);
        if let Some(line) = self.items.iter_mut().find(|l| &l.id == id) {
            line.qty = qty;
        }
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    #[must_use]
    pub fn into_items(self) -> Vec<CartItem> {
        self.items
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of line totals.
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        subtotal(&self.items)
    }

    /// Total number of units across all lines.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        item_count(&self.items)
    }
}

impl From<Vec<CartItem>> for Cart {
    /// Build a cart from stored lines, folding duplicate ids and dropping
    /// zero-quantity lines.
    fn from(lines: Vec<CartItem>) -> Self {
        let mut cart = Self::new();
        for line in lines {
            let qty = line.qty;
            cart.add(
                ProductSnapshot {
                    id: line.id,
                    name: line.name,
                    price: line.price,
                    image: line.image,
                },
                qty,
            );
        }
        cart
    }
}

pub(crate) fn subtotal(items: &[CartItem]) -> Decimal {
    items.iter().map(CartItem::line_total).sum()
}

pub(crate) fn item_count(items: &[CartItem]) -> u32 {
    items.iter().fold(0, |acc, l| acc.saturating_add(l.qty))
}
