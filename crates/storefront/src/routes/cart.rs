//! Cart route handlers.
//!
//! Cart lines are stored in the visitor session. Mutating routes are plain
//! form posts that redirect back (Post/Redirect/Get) and queue a flash notice.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect},
};
use hearthwood_core::{Cart, CartLine, OrderSummary, Price, ProductId};
use serde::{Deserialize, Deserializer};
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::filters;
use crate::middleware::Shopper;
use crate::routes::layout::{LayoutView, safe_return_to};
use crate::state::AppState;

/// Cart item display data for templates.
#[derive(Clone, Debug)]
pub struct CartItemView {
    pub id: String,
    pub title: String,
    pub image_url: String,
    pub quantity: u32,
    pub price: String,
    pub line_price: String,
}

impl From<&CartLine> for CartItemView {
    fn from(line: &CartLine) -> Self {
        Self {
            id: line.id.to_string(),
            title: line.title.clone(),
            image_url: line.image_url.clone(),
            quantity: line.quantity,
            price: line.unit_price().display(),
            line_price: Price::usd(line.line_total()).display(),
        }
    }
}

/// Order summary display data for templates.
#[derive(Clone, Debug)]
pub struct SummaryView {
    pub subtotal: String,
    pub discount: String,
    pub tax: String,
    pub total: String,
}

impl From<&OrderSummary> for SummaryView {
    fn from(summary: &OrderSummary) -> Self {
        Self {
            subtotal: summary.subtotal_price().display(),
            discount: summary.discount_price().display(),
            tax: summary.tax_price().display(),
            total: summary.total_price().display(),
        }
    }
}

/// Line items plus totals, as rendered on the cart and checkout pages.
#[derive(Clone, Debug)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub summary: SummaryView,
    pub item_count: u32,
}

impl From<&Cart> for CartView {
    fn from(cart: &Cart) -> Self {
        Self {
            items: cart.lines().iter().map(CartItemView::from).collect(),
            summary: SummaryView::from(&OrderSummary::for_cart(cart)),
            item_count: cart.item_count(),
        }
    }
}

/// Add to cart form data.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub product_id: String,
    #[serde(default, deserialize_with = "lenient_quantity")]
    pub quantity: Option<u32>,
    pub return_to: Option<String>,
}

/// Update cart form data.
#[derive(Debug, Deserialize)]
pub struct UpdateCartForm {
    pub product_id: String,
    #[serde(default, deserialize_with = "lenient_quantity")]
    pub quantity: Option<u32>,
}

/// Read a posted quantity without rejecting the form.
///
/// Negative values become 0 and values past `u32::MAX` saturate. Blank or
/// non-numeric input reads as absent.
fn lenient_quantity<'de, D>(deserializer: D) -> std::result::Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw
        .and_then(|raw| raw.trim().parse::<i64>().ok())
        .map(|n| u32::try_from(n.max(0)).unwrap_or(u32::MAX)))
}

/// Remove from cart form data.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartForm {
    pub product_id: String,
}

/// Parse a posted product id, rejecting blank values.
///
/// # Errors
///
/// Returns [`AppError::BadRequest`] when the id is empty.
pub fn form_product_id(raw: &str) -> Result<ProductId> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(AppError::BadRequest("missing product id".to_string()));
    }
    Ok(ProductId::new(raw))
}

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart/show.html")]
pub struct CartShowTemplate {
    pub layout: LayoutView,
    pub cart: CartView,
}

/// Display cart page.
#[instrument(skip(shopper))]
pub async fn show(shopper: Shopper) -> Result<impl IntoResponse> {
    let cart = shopper.cart().await?;
    let wishlist = shopper.wishlist().await?;

    Ok(CartShowTemplate {
        layout: LayoutView::build(&shopper, &cart, &wishlist).await?,
        cart: CartView::from(&cart),
    })
}

/// Add a catalog product to the cart.
///
/// Repeated adds of the same product increment its quantity.
#[instrument(skip(state, shopper))]
pub async fn add(
    State(state): State<AppState>,
    shopper: Shopper,
    Form(form): Form<AddToCartForm>,
) -> Result<Redirect> {
    let id = form_product_id(&form.product_id)?;
    let product = state
        .catalog()
        .get(&id)
        .ok_or_else(|| AppError::NotFound(format!("product {id}")))?;
    let quantity = form.quantity.unwrap_or(1);

    let mut cart = shopper.cart().await?;
    cart.add(product, quantity);
    shopper.save_cart(&cart).await?;
    shopper.flash("Item added to cart").await?;

    tracing::info!(
        product_id = %id,
        quantity,
        item_count = cart.item_count(),
        "Added to cart"
    );

    Ok(Redirect::to(&safe_return_to(
        form.return_to.as_deref(),
        "/products",
    )))
}

/// Set the quantity of a cart line. A quantity of 0 or less removes the line;
/// a blank quantity leaves it unchanged.
#[instrument(skip(shopper))]
pub async fn update(shopper: Shopper, Form(form): Form<UpdateCartForm>) -> Result<Redirect> {
    let id = form_product_id(&form.product_id)?;
    let Some(quantity) = form.quantity else {
        return Ok(Redirect::to("/cart"));
    };

    let mut cart = shopper.cart().await?;
    if cart.set_quantity(&id, quantity) {
        shopper.save_cart(&cart).await?;
        shopper.flash("Cart updated").await?;
        tracing::info!(product_id = %id, quantity, "Cart quantity updated");
    }

    Ok(Redirect::to("/cart"))
}

/// Remove a line from the cart.
#[instrument(skip(shopper))]
pub async fn remove(shopper: Shopper, Form(form): Form<RemoveFromCartForm>) -> Result<Redirect> {
    let id = form_product_id(&form.product_id)?;

    let mut cart = shopper.cart().await?;
    if cart.remove(&id) {
        shopper.save_cart(&cart).await?;
        shopper.flash("Item removed from cart").await?;
        tracing::info!(product_id = %id, "Removed from cart");
    }

    Ok(Redirect::to("/cart"))
}

/// Empty the cart.
#[instrument(skip(shopper))]
pub async fn clear(shopper: Shopper) -> Result<Redirect> {
    let mut cart = shopper.cart().await?;
    if !cart.is_empty() {
        cart.clear();
        shopper.save_cart(&cart).await?;
        shopper.flash("Cart cleared").await?;
    }

    Ok(Redirect::to("/cart"))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use hearthwood_core::Product;
    use rust_decimal::Decimal;

    use super::*;

    #[test]
    fn test_cart_view_totals() {
        let mut cart = Cart::new();
        cart.add(
            &Product::new("1", "Library Stool Chair", Decimal::new(20, 0), "/a.svg"),
            2,
        );

        let view = CartView::from(&cart);
        assert_eq!(view.item_count, 2);
        assert_eq!(view.items.len(), 1);
        assert_eq!(view.items[0].price, "$20.00");
        assert_eq!(view.items[0].line_price, "$40.00");
        assert_eq!(view.summary.subtotal, "$40.00");
        assert_eq!(view.summary.discount, "$10.00");
        assert_eq!(view.summary.tax, "$4.00");
        assert_eq!(view.summary.total, "$34.00");
    }

    #[test]
    fn test_form_product_id() {
        assert_eq!(form_product_id(" 3 ").unwrap().as_str(), "3");
        assert!(matches!(
            form_product_id("  "),
            Err(AppError::BadRequest(_))
        ));
    }

    #[test]
    fn test_quantity_is_read_leniently() {
        let quantity = |raw: &str| {
            let json = serde_json::json!({ "product_id": "1", "quantity": raw });
            serde_json::from_value::<AddToCartForm>(json).unwrap().quantity
        };

        assert_eq!(quantity("3"), Some(3));
        assert_eq!(quantity(" 2 "), Some(2));
        assert_eq!(quantity("-1"), Some(0));
        assert_eq!(quantity("99999999999"), Some(u32::MAX));
        assert_eq!(quantity(""), None);
        assert_eq!(quantity("two"), None);

        let form: UpdateCartForm =
            serde_json::from_value(serde_json::json!({ "product_id": "1" })).unwrap();
        assert_eq!(form.quantity, None);
    }

    #[test]
    fn test_empty_cart_view() {
        let view = CartView::from(&Cart::new());
        assert!(view.items.is_empty());
        assert_eq!(view.summary.total, "$0.00");
    }
}
