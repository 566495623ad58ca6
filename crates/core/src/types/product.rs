//! Catalog product reference data.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::ProductId;
use super::price::Price;

/// A product offered by the storefront.
///
/// Products are immutable reference data; carts and wishlists copy the fields
/// they need at the moment of interaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    /// Unit price in the default currency. Never negative.
    pub price: Decimal,
    pub image_url: String,
    /// Original price shown struck through next to a sale price.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compare_at_price: Option<Decimal>,
    /// Merchandising badge such as "New" or "Sales".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
}

impl Product {
    /// Create a product without a compare-at price or tag.
    #[must_use]
    pub fn new(
        id: impl Into<ProductId>,
        title: impl Into<String>,
        price: Decimal,
        image_url: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            price,
            image_url: image_url.into(),
            compare_at_price: None,
            tag: None,
        }
    }

    /// Unit price as a displayable [`Price`].
    #[must_use]
    pub fn unit_price(&self) -> Price {
        Price::usd(self.price)
    }

    /// Compare-at price, only when it is higher than the selling price.
    #[must_use]
    pub fn sale_compare_price(&self) -> Option<Price> {
        self.compare_at_price
            .filter(|original| *original > self.price)
            .map(Price::usd)
    }
}
