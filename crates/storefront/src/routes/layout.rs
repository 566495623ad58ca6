//! Data shared by every full page: header counters and the flash notice.

use hearthwood_core::{Cart, Wishlist};

use crate::error::Result;
use crate::middleware::Shopper;

/// Header and notice data rendered by `base.html`.
#[derive(Clone, Debug, Default)]
pub struct LayoutView {
    pub cart_count: u32,
    pub wishlist_count: usize,
    pub flash: Option<String>,
}

impl LayoutView {
    /// Build the layout from already loaded visitor state.
    ///
    /// Consumes the pending flash notice, so call this only for pages that are
    /// actually rendered.
    ///
    /// # Errors
    ///
    /// Returns an error if the session cannot be modified.
    pub async fn build(shopper: &Shopper, cart: &Cart, wishlist: &Wishlist) -> Result<Self> {
        Ok(Self {
            cart_count: cart.item_count(),
            wishlist_count: wishlist.len(),
            flash: shopper.take_flash().await?,
        })
    }
}

/// Resolve a post-action redirect target.
///
/// Only local absolute paths are honoured; anything that could leave the site
/// (`//host`, `https://host`, backslash tricks) falls back to `fallback`.
#[must_use]
pub fn safe_return_to(candidate: Option<&str>, fallback: &str) -> String {
    candidate
        .map(str::trim)
        .filter(|path| {
            path.starts_with('/')
                && !path.starts_with("//")
                && !path.contains('\\')
                && !path.chars().any(char::is_control)
        })
        .unwrap_or(fallback)
        .to_string()
}
