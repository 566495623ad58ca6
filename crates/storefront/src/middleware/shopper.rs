//! Visitor state extractor.
//!
//! [`Shopper`] wraps the visitor's session and provides typed, synchronous-
//! looking access to the cart, wishlist, checkout flow, checkout snapshot and
//! flash notice. Handlers load a value, mutate it through `hearthwood-core`,
//! and save it back.

use axum::{
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Response},
};
use hearthwood_core::{Cart, CheckoutFlow, CheckoutSnapshot, Wishlist};
use tower_sessions::Session;

use crate::models::session_keys;

type SessionResult<T> = Result<T, tower_sessions::session::Error>;

/// Extractor giving access to the visitor's storefront state.
///
/// # Example
///
/// ```rust,ignore
/// async fn handler(shopper: Shopper) -> Result<impl IntoResponse> {
///     let cart = shopper.cart().await?;
///     Ok(format!("{} items", cart.item_count()))
/// }
/// ```
#[derive(Clone)]
pub struct Shopper {
    session: Session,
}

/// Rejection when the session layer is missing from the router.
pub struct MissingSession;

impl IntoResponse for MissingSession {
    fn into_response(self) -> Response {
        tracing::error!("Session not found in request extensions - session layer missing");
        (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response()
    }
}

impl<S> FromRequestParts<S> for Shopper
where
    S: Send + Sync,
{
    type Rejection = MissingSession;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Session>()
            .cloned()
            .map(Self::new)
            .ok_or(MissingSession)
    }
}

impl Shopper {
    #[must_use]
    pub const fn new(session: Session) -> Self {
        Self { session }
    }

    /// The visitor's cart (empty if none was stored yet).
    ///
    /// # Errors
    ///
    /// Returns an error if the session cannot be read.
    pub async fn cart(&self) -> SessionResult<Cart> {
        Ok(self
            .session
            .get::<Cart>(session_keys::CART)
            .await?
            .unwrap_or_default())
    }

    /// Store the visitor's cart.
    ///
    /// # Errors
    ///
    /// Returns an error if the session cannot be modified.
    pub async fn save_cart(&self, cart: &Cart) -> SessionResult<()> {
        self.session.insert(session_keys::CART, cart).await
    }

    /// The visitor's wishlist (empty if none was stored yet).
    ///
    /// # Errors
    ///
    /// Returns an error if the session cannot be read.
    pub async fn wishlist(&self) -> SessionResult<Wishlist> {
        Ok(self
            .session
            .get::<Wishlist>(session_keys::WISHLIST)
            .await?
            .unwrap_or_default())
    }

    /// Store the visitor's wishlist.
    ///
    /// # Errors
    ///
    /// Returns an error if the session cannot be modified.
    pub async fn save_wishlist(&self, wishlist: &Wishlist) -> SessionResult<()> {
        self.session.insert(session_keys::WISHLIST, wishlist).await
    }

    /// The current checkout flow instance (a fresh one if none is stored).
    ///
    /// # Errors
    ///
    /// Returns an error if the session cannot be read.
    pub async fn checkout_flow(&self) -> SessionResult<CheckoutFlow> {
        Ok(self
            .session
            .get::<CheckoutFlow>(session_keys::CHECKOUT_FLOW)
            .await?
            .unwrap_or_default())
    }

    /// Store the checkout flow instance.
    ///
    /// # Errors
    ///
    /// Returns an error if the session cannot be modified.
    pub async fn save_checkout_flow(&self, flow: &CheckoutFlow) -> SessionResult<()> {
        self.session.insert(session_keys::CHECKOUT_FLOW, flow).await
    }

    /// Discard the checkout flow so the next checkout starts in `Editing`.
    ///
    /// # Errors
    ///
    /// Returns an error if the session cannot be modified.
    pub async fn reset_checkout_flow(&self) -> SessionResult<()> {
        self.session
            .remove::<CheckoutFlow>(session_keys::CHECKOUT_FLOW)
            .await?;
        Ok(())
    }

    /// Store the order snapshot for the confirmation page.
    ///
    /// # Errors
    ///
    /// Returns an error if the session cannot be modified.
    pub async fn store_snapshot(&self, snapshot: &CheckoutSnapshot) -> SessionResult<()> {
        self.session
            .insert(session_keys::CHECKOUT_DATA, snapshot)
            .await
    }

    /// Read and delete the order snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error if the session cannot be modified.
    pub async fn take_snapshot(&self) -> SessionResult<Option<CheckoutSnapshot>> {
        self.session
            .remove::<CheckoutSnapshot>(session_keys::CHECKOUT_DATA)
            .await
    }

    /// Queue a notice for the next rendered page.
    ///
    /// # Errors
    ///
    /// Returns an error if the session cannot be modified.
    pub async fn flash(&self, message: impl Into<String>) -> SessionResult<()> {
        self.session
            .insert(session_keys::FLASH, message.into())
            .await
    }

    /// Read and delete the queued notice.
    ///
    /// # Errors
    ///
    /// Returns an error if the session cannot be modified.
    pub async fn take_flash(&self) -> SessionResult<Option<String>> {
        self.session.remove::<String>(session_keys::FLASH).await
    }

    /// Write pending changes to the session store now instead of when the
    /// response is sent.
    ///
    /// # Errors
    ///
    /// Returns an error if the session store rejects the write.
    pub async fn commit(&self) -> SessionResult<()> {
        self.session.save().await
    }
}
