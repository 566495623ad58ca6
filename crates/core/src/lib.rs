//! Hearthwood Core - storefront domain library.
//!
//! This crate holds the visitor-facing business rules of the Hearthwood
//! storefront:
//! - [`cart`] - Line items with merge-by-id quantities
//! - [`wishlist`] - Saved products with set semantics
//! - [`pricing`] - Subtotal, discount, tax and total for a cart
//! - [`checkout`] - Shipping form validation and the order placement flow
//!
//! # Architecture
//!
//! The core crate contains only types and pure operations - no I/O, no
//! sessions, no HTTP. The storefront crate loads and saves these values per
//! visitor and renders them.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod checkout;
pub mod pricing;
pub mod types;
pub mod wishlist;

pub use cart::{Cart, CartLine, MAX_LINE_QUANTITY};
pub use checkout::{
    CheckoutError, CheckoutFlow, CheckoutForm, CheckoutSnapshot, CheckoutState, PlacedOrder,
    RequiredField,
};
pub use pricing::OrderSummary;
pub use types::*;
pub use wishlist::{Wishlist, WishlistEntry, WishlistToggle};
