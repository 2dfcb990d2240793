//! Session-related types.
//!
//! The identity payload carried in the signed `session` cookie, and the keys
//! under which the visitor session stores cart, wishlist and order snapshot.

use serde::{Deserialize, Serialize};

use crate::models::user::User;

/// Identity carried in the signed cookie.
///
/// There is no server-side record: whoever holds a validly signed payload is
/// signed in as this email and name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionData {
    pub email: String,
    pub name: String,
}

impl From<&User> for SessionData {
    fn from(user: &User) -> Self {
        Self {
            email: user.email.as_str().to_owned(),
            name: user.name.clone(),
        }
    }
}

/// Visitor-session storage keys.
pub mod keys {
    /// Cart lines (JSON array of cart items).
    pub const CART: &str = "aj-cart-v1";

    /// Wishlist ids (JSON array, rehydrated into a set).
    pub const WISHLIST: &str = "aj-wishlist-v1";

    /// Order snapshot captured at checkout, consumed by the success page.
    pub const LAST_ORDER: &str = "aj-last-order";
}
