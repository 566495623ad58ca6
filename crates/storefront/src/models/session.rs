//! Session-related types.
//!
//! Per-visitor storefront state kept in the session.

/// Session keys for visitor state.
pub mod keys {
    /// Key for the visitor's cart lines.
    pub const CART: &str = "cart";

    /// Key for the visitor's wishlist entries.
    pub const WISHLIST: &str = "wishlist";

    /// Key for the current checkout flow instance.
    pub const CHECKOUT_FLOW: &str = "checkout_flow";

    /// Key for the order snapshot shown once on the confirmation page.
    pub const CHECKOUT_DATA: &str = "checkoutData";

    /// Key for the one-shot notice shown on the next rendered page.
    pub const FLASH: &str = "flash";
}
