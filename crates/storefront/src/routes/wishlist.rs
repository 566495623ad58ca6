//! Wishlist route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect},
};
use hearthwood_core::WishlistEntry;
use serde::Deserialize;
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::filters;
use crate::middleware::Shopper;
use crate::routes::cart::form_product_id;
use crate::routes::layout::{LayoutView, safe_return_to};
use crate::state::AppState;

/// Wishlist entry display data for templates.
#[derive(Clone, Debug)]
pub struct WishlistItemView {
    pub id: String,
    pub title: String,
    pub price: String,
    pub image_url: String,
}

impl From<&WishlistEntry> for WishlistItemView {
    fn from(entry: &WishlistEntry) -> Self {
        Self {
            id: entry.id.to_string(),
            title: entry.title.clone(),
            price: entry.unit_price().display(),
            image_url: entry.image_url.clone(),
        }
    }
}

/// Wishlist toggle form data.
#[derive(Debug, Deserialize)]
pub struct ToggleWishlistForm {
    pub product_id: String,
    pub return_to: Option<String>,
}

/// Wishlist page template.
#[derive(Template, WebTemplate)]
#[template(path = "wishlist/show.html")]
pub struct WishlistShowTemplate {
    pub layout: LayoutView,
    pub items: Vec<WishlistItemView>,
}

/// Display the wishlist page.
#[instrument(skip(shopper))]
pub async fn show(shopper: Shopper) -> Result<impl IntoResponse> {
    let cart = shopper.cart().await?;
    let wishlist = shopper.wishlist().await?;

    Ok(WishlistShowTemplate {
        layout: LayoutView::build(&shopper, &cart, &wishlist).await?,
        items: wishlist
            .entries()
            .iter()
            .map(WishlistItemView::from)
            .collect(),
    })
}

/// Add a product to the wishlist, or remove it when already present.
#[instrument(skip(state, shopper))]
pub async fn toggle(
    State(state): State<AppState>,
    shopper: Shopper,
    Form(form): Form<ToggleWishlistForm>,
) -> Result<Redirect> {
    let id = form_product_id(&form.product_id)?;
    let product = state
        .catalog()
        .get(&id)
        .ok_or_else(|| AppError::NotFound(format!("product {id}")))?;

    let mut wishlist = shopper.wishlist().await?;
    let outcome = wishlist.toggle(product);
    shopper.save_wishlist(&wishlist).await?;
    shopper.flash(outcome.message()).await?;

    tracing::info!(
        product_id = %id,
        added = outcome.is_added(),
        wishlist_size = wishlist.len(),
        "Wishlist toggled"
    );

    Ok(Redirect::to(&safe_return_to(
        form.return_to.as_deref(),
        "/wishlist",
    )))
}

#[cfg(test)]
mod tests {
    use hearthwood_core::Product;
    use rust_decimal::Decimal;

    use super::*;

    #[test]
    fn test_item_view() {
        let product = Product::new("5", "Lounge Chair", Decimal::new(4999, 2), "/e.svg");
        let view = WishlistItemView::from(&WishlistEntry::from_product(&product));
        assert_eq!(view.id, "5");
        assert_eq!(view.price, "$49.99");
    }
}
