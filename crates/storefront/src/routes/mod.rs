//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Product grid
//! GET  /health                 - Health check
//!
//! # Products
//! GET  /products               - Product grid
//! GET  /products/{id}          - Product detail
//!
//! # Cart (form posts redirect back)
//! GET  /cart                   - Cart page with order summary
//! POST /cart/add               - Add to cart (merges quantities)
//! POST /cart/update            - Set line quantity (0 removes)
//! POST /cart/remove            - Remove line
//! POST /cart/clear             - Empty the cart
//!
//! # Wishlist
//! GET  /wishlist               - Wishlist page
//! POST /wishlist/toggle        - Add or remove a product
//!
//! # Checkout
//! GET  /checkout               - Shipping form + order summary
//! POST /checkout               - Place order
//! GET  /thank-you              - Order confirmation (shown once)
//! ```

pub mod cart;
pub mod checkout;
pub mod layout;
pub mod products;
pub mod wishlist;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index))
        .route("/{id}", get(products::show))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/update", post(cart::update))
        .route("/remove", post(cart::remove))
        .route("/clear", post(cart::clear))
}

/// Create the wishlist routes router.
pub fn wishlist_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(wishlist::show))
        .route("/toggle", post(wishlist::toggle))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index))
        .nest("/products", product_routes())
        .nest("/cart", cart_routes())
        .nest("/wishlist", wishlist_routes())
        .route("/checkout", get(checkout::show).post(checkout::submit))
        .route("/thank-you", get(checkout::thank_you))
}
