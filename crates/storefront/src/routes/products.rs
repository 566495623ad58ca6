//! Product route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{OriginalUri, Path, State},
    response::IntoResponse,
};
use hearthwood_core::{Product, ProductId, Wishlist};
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::filters;
use crate::middleware::Shopper;
use crate::routes::layout::LayoutView;
use crate::state::AppState;

/// Product display data for templates.
#[derive(Clone, Debug)]
pub struct ProductView {
    pub id: String,
    pub title: String,
    pub price: String,
    pub compare_at_price: Option<String>,
    pub image_url: String,
    pub tag: Option<String>,
    pub in_wishlist: bool,
}

impl ProductView {
    /// Build the view for `product`, marking wishlist membership.
    #[must_use]
    pub fn new(product: &Product, wishlist: &Wishlist) -> Self {
        Self {
            id: product.id.to_string(),
            title: product.title.clone(),
            price: product.unit_price().display(),
            compare_at_price: product.sale_compare_price().map(|p| p.display()),
            image_url: product.image_url.clone(),
            tag: product.tag.clone(),
            in_wishlist: wishlist.contains(&product.id),
        }
    }
}

/// Product listing page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/index.html")]
pub struct ProductsIndexTemplate {
    pub layout: LayoutView,
    pub products: Vec<ProductView>,
    pub return_to: String,
}

/// Product detail page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/show.html")]
pub struct ProductShowTemplate {
    pub layout: LayoutView,
    pub product: ProductView,
    pub in_cart: u32,
    pub return_to: String,
}

/// Display the product grid.
#[instrument(skip(state, shopper))]
pub async fn index(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    shopper: Shopper,
) -> Result<impl IntoResponse> {
    let cart = shopper.cart().await?;
    let wishlist = shopper.wishlist().await?;

    let products = state
        .catalog()
        .all()
        .iter()
        .map(|product| ProductView::new(product, &wishlist))
        .collect();

    Ok(ProductsIndexTemplate {
        layout: LayoutView::build(&shopper, &cart, &wishlist).await?,
        products,
        return_to: uri.path().to_string(),
    })
}

/// Display a product detail page.
#[instrument(skip(state, shopper))]
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<String>,
    shopper: Shopper,
) -> Result<impl IntoResponse> {
    let id = ProductId::new(id);
    let product = state
        .catalog()
        .get(&id)
        .ok_or_else(|| AppError::NotFound(format!("product {id}")))?;

    let cart = shopper.cart().await?;
    let wishlist = shopper.wishlist().await?;
    let in_cart = cart.get(&id).map_or(0, |line| line.quantity);

    Ok(ProductShowTemplate {
        layout: LayoutView::build(&shopper, &cart, &wishlist).await?,
        product: ProductView::new(product, &wishlist),
        in_cart,
        return_to: format!("/products/{id}"),
    })
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;

    #[test]
    fn test_product_view_formats_prices() {
        let mut product = Product::new("2", "Classic Wooden Chair", Decimal::new(20, 0), "/b.svg");
        product.compare_at_price = Some(Decimal::new(30, 0));
        product.tag = Some("Sales".to_string());

        let mut wishlist = Wishlist::new();
        let view = ProductView::new(&product, &wishlist);
        assert_eq!(view.price, "$20.00");
        assert_eq!(view.compare_at_price.as_deref(), Some("$30.00"));
        assert!(!view.in_wishlist);

        wishlist.toggle(&product);
        assert!(ProductView::new(&product, &wishlist).in_wishlist);
    }
}
