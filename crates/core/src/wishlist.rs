//! Set-semantics wishlist.

use serde::{Deserialize, Deserializer, Serialize};

use crate::types::ProductId;

/// A set of product ids that keeps insertion order.
///
/// Stored as a JSON array. Deserializing collapses duplicates, keeping the
/// first occurrence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Wishlist {
    ids: Vec<ProductId>,
}

impl Wishlist {
    #[must_use]
    pub const fn new() -> Self {
        Self { ids: Vec::new() }
    }

    /// Add the id if absent, remove it if present.
    ///
    /// Returns whether the id is in the wishlist afterwards.
    pub fn toggle(&mut self, id: ProductId) -> bool {
        if let Some(pos) = self.ids.iter().position(|x| x == &id) {
            self.ids.remove(pos);
            false
        } else {
            self.ids.push(id);
            true
        }
    }

    #[must_use]
    pub fn has(&self, id: &ProductId) -> bool {
        self.ids.contains(id)
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    #[must_use]
    pub fn ids(&self) -> &[ProductId] {
        &self.ids
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

impl FromIterator<ProductId> for Wishlist {
    fn from_iter<I: IntoIterator<Item = ProductId>>(iter: I) -> Self {
        let mut ids: Vec<ProductId> = Vec::new();
        for id in iter {
            if !ids.contains(&id) {
                ids.push(id);
            }
        }
        Self { ids }
    }
}

impl<'de> Deserialize<'de> for Wishlist {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let ids = Vec::<ProductId>::deserialize(deserializer)?;
        Ok(ids.into_iter().collect())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_is_its_own_inverse() {
        let mut wishlist = Wishlist::new();
        let id = ProductId::new("r1");

        assert!(wishlist.toggle(id.clone()));
        assert!(wishlist.has(&id));

        assert!(!wishlist.toggle(id.clone()));
        assert!(!wishlist.has(&id));
        assert_eq!(wishlist, Wishlist::new());
    }

    #[test]
    fn test_rehydrate_collapses_duplicates() {
        let wishlist: Wishlist = serde_json::from_str(r#"["n1","e2","n1","r3"]"#).unwrap();
        let ids: Vec<&str> = wishlist.ids().iter().map(ProductId::as_str).collect();
        assert_eq!(ids, vec!["n1", "e2", "r3"]);
    }

    #[test]
    fn test_persisted_as_array() {
        let wishlist: Wishlist = ["b1", "b2"].into_iter().map(ProductId::new).collect();
        assert_eq!(serde_json::to_string(&wishlist).unwrap(), r#"["b1","b2"]"#);
    }

    #[test]
    fn test_clear() {
        let mut wishlist: Wishlist = ["b1"].into_iter().map(ProductId::new).collect();
        wishlist.clear();
        assert!(wishlist.is_empty());
    }
}
