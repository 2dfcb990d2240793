//! Order snapshot captured at "Proceed to checkout".

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::cart::{self, CartItem};
use crate::types::Price;

/// A point-in-time copy of the enriched cart, shown once on the
/// confirmation page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderSnapshot {
    pub items: Vec<CartItem>,
    pub placed_at: DateTime<Utc>,
}

impl OrderSnapshot {
    #[must_use]
    pub fn new(items: Vec<CartItem>, placed_at: DateTime<Utc>) -> Self {
        Self { items, placed_at }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        cart::subtotal(&self.items)
    }

    #[must_use]
    pub fn display_subtotal(&self) -> Price {
        Price::inr(self.subtotal())
    }

    #[must_use]
    pub fn item_count(&self) -> u32 {
        cart::item_count(&self.items)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::types::ProductId;

    #[test]
    fn test_totals() {
        let item = CartItem {
            id: ProductId::new("b2"),
            name: "Gilded Curb Chain".to_string(),
            price: Decimal::from(1120),
            image: None,
            qty: 2,
        };
        let snapshot = OrderSnapshot::new(vec![item], Utc::now());

        assert_eq!(snapshot.subtotal(), Decimal::from(2240));
        assert_eq!(snapshot.item_count(), 2);
        assert_eq!(snapshot.display_subtotal().to_string(), "₹2,240");
    }

    #[test]
    fn test_json_roundtrip_keeps_items() {
        let snapshot = OrderSnapshot::new(Vec::new(), Utc::now());
        let json = serde_json::to_string(&snapshot).unwrap();
        assert!(json.contains("placedAt"));

        let back: OrderSnapshot = serde_json::from_str(&json).unwrap();
        assert!(back.is_empty());
    }
}
