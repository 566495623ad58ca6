//! # Wishlist Store
//!
//! Saved products keyed by id with set semantics: a product is either on the
//! wishlist or it is not. Entries keep insertion order for display.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{Price, Product, ProductId};

/// A saved product. Carries the product fields needed to render it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WishlistEntry {
    pub id: ProductId,
    pub title: String,
    pub price: Decimal,
    pub image_url: String,
}

impl WishlistEntry {
    #[must_use]
    pub fn from_product(product: &Product) -> Self {
        Self {
            id: product.id.clone(),
            title: product.title.clone(),
            price: product.price,
            image_url: product.image_url.clone(),
        }
    }

    #[must_use]
    pub fn unit_price(&self) -> Price {
        Price::usd(self.price)
    }
}

/// Resulting membership after a [`Wishlist::toggle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WishlistToggle {
    Added,
    Removed,
}

impl WishlistToggle {
    /// Feedback message for the visitor.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::Added => "Added to Wishlist",
            Self::Removed => "Removed from Wishlist",
        }
    }

    #[must_use]
    pub const fn is_added(self) -> bool {
        matches!(self, Self::Added)
    }
}

/// The visitor's wishlist.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Wishlist {
    entries: Vec<WishlistEntry>,
}

impl Wishlist {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Flip membership of `product`: add it if absent, remove it if present.
    pub fn toggle(&mut self, product: &Product) -> WishlistToggle {
        if let Some(pos) = self.entries.iter().position(|e| e.id == product.id) {
            self.entries.remove(pos);
            WishlistToggle::Removed
        } else {
            self.entries.push(WishlistEntry::from_product(product));
            WishlistToggle::Added
        }
    }

    /// Whether a product with `id` is on the wishlist.
    #[must_use]
    pub fn contains(&self, id: &ProductId) -> bool {
        self.entries.iter().any(|e| &e.id == id)
    }

    #[must_use]
    pub fn entries(&self) -> &[WishlistEntry] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: &str) -> Product {
        Product::new(id, format!("Chair {id}"), Decimal::new(20, 0), "/a.jpg")
    }

    #[test]
    fn test_toggle_adds_then_removes() {
        let mut wishlist = Wishlist::new();
        let chair = product("1");

        assert_eq!(wishlist.toggle(&chair), WishlistToggle::Added);
        assert!(wishlist.contains(&chair.id));

        assert_eq!(wishlist.toggle(&chair), WishlistToggle::Removed);
        assert!(!wishlist.contains(&chair.id));
    }

    #[test]
    fn test_double_toggle_restores_membership() {
        let mut wishlist = Wishlist::new();
        wishlist.toggle(&product("1"));
        let before = wishlist.clone();

        for id in ["1", "2"] {
            let p = product(id);
            let was_member = wishlist.contains(&p.id);
            wishlist.toggle(&p);
            wishlist.toggle(&p);
            assert_eq!(wishlist.contains(&p.id), was_member);
        }
        assert_eq!(wishlist, before);
    }

    #[test]
    fn test_set_semantics() {
        let mut wishlist = Wishlist::new();
        wishlist.toggle(&product("1"));
        wishlist.toggle(&product("2"));
        wishlist.toggle(&product("1"));
        wishlist.toggle(&product("1"));

        assert_eq!(wishlist.len(), 2);
        let ids: Vec<&str> = wishlist.entries().iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, ["2", "1"]);
    }

    #[test]
    fn test_toggle_messages() {
        assert_eq!(WishlistToggle::Added.message(), "Added to Wishlist");
        assert_eq!(WishlistToggle::Removed.message(), "Removed from Wishlist");
        assert!(WishlistToggle::Added.is_added());
    }
}
