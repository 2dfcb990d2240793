//! Cart, wishlist and order snapshot persistence in the visitor session.
//!
//! Each request does load → mutate → save on the visitor's session record;
//! there is no other locking. Unreadable stored values (for example after a
//! format change) are discarded and read as empty.

use tower_sessions::Session;
use tower_sessions::session::Error as SessionError;

use aurelia_core::{Cart, CartItem, OrderSnapshot, Wishlist};

use crate::models::session::keys;

/// Typed access to the stores kept in one visitor session.
pub struct VisitorStore<'a> {
    session: &'a Session,
}

impl<'a> VisitorStore<'a> {
    #[must_use]
    pub const fn new(session: &'a Session) -> Self {
        Self { session }
    }

    /// # Errors
    ///
    /// Returns an error if the session store cannot be read.
    pub async fn cart(&self) -> Result<Cart, SessionError> {
        let lines: Vec<CartItem> = self.read(keys::CART).await?.unwrap_or_default();
        Ok(Cart::from(lines))
    }

    /// # Errors
    ///
    /// Returns an error if the session cannot be written.
    pub async fn save_cart(&self, cart: &Cart) -> Result<(), SessionError> {
        self.session.insert(keys::CART, cart).await
    }

    /// # Errors
    ///
    /// Returns an error if the session store cannot be read.
    pub async fn wishlist(&self) -> Result<Wishlist, SessionError> {
        Ok(self.read(keys::WISHLIST).await?.unwrap_or_default())
    }

    /// # Errors
    ///
    /// Returns an error if the session cannot be written.
    pub async fn save_wishlist(&self, wishlist: &Wishlist) -> Result<(), SessionError> {
        self.session.insert(keys::WISHLIST, wishlist).await
    }

    /// Store the snapshot shown by the confirmation page, replacing any earlier one.
    ///
    /// # Errors
    ///
    /// Returns an error if the session cannot be written.
    pub async fn save_snapshot(&self, snapshot: &OrderSnapshot) -> Result<(), SessionError> {
        self.session.insert(keys::LAST_ORDER, snapshot).await
    }

    /// Read and delete the order snapshot. A second call returns `None`.
    ///
    /// # Errors
    ///
    /// Returns an error if the session store cannot be accessed.
    pub async fn take_snapshot(&self) -> Result<Option<OrderSnapshot>, SessionError> {
        match self.session.remove::<OrderSnapshot>(keys::LAST_ORDER).await {
            Ok(snapshot) => Ok(snapshot),
            Err(SessionError::SerdeJson(e)) => {
                tracing::warn!(error = %e, "discarding unreadable order snapshot");
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    /// The logout event: empty the cart and wishlist and drop their keys.
    ///
    /// # Errors
    ///
    /// Returns an error if the session cannot be written.
    pub async fn clear_on_logout(&self) -> Result<(), SessionError> {
        self.session.remove_value(keys::CART).await?;
        self.session.remove_value(keys::WISHLIST).await?;
        Ok(())
    }

    async fn read<T>(&self, key: &str) -> Result<Option<T>, SessionError>
    where
        T: serde::de::DeserializeOwned,
    {
        match self.session.get::<T>(key).await {
            Ok(value) => Ok(value),
            Err(SessionError::SerdeJson(e)) => {
                tracing::warn!(key, error = %e, "discarding unreadable session value");
                self.session.remove_value(key).await?;
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }
}
