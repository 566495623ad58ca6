//! Checkout price computation.
//!
//! ```text
//! subtotal = Σ price_i * quantity_i
//! discount = 0.25 * subtotal
//! tax      = 0.10 * subtotal
//! total    = subtotal - discount + tax
//! ```
//!
//! Tax is charged on the pre-discount subtotal. All values are exact decimals;
//! rounding to cents only happens when a value is displayed.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::cart::{Cart, CartLine, subtotal_of};
use crate::types::Price;

/// Flat discount applied to every order (25%).
pub const DISCOUNT_RATE: Decimal = Decimal::from_parts(25, 0, 0, false, 2);

/// Flat tax rate applied to the pre-discount subtotal (10%).
pub const TAX_RATE: Decimal = Decimal::from_parts(10, 0, 0, false, 2);

/// Price breakdown for a cart snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OrderSummary {
    pub subtotal: Decimal,
    pub discount: Decimal,
    pub tax: Decimal,
    pub total: Decimal,
}

impl OrderSummary {
    /// Compute the summary for a set of line items.
    #[must_use]
    pub fn from_lines(lines: &[CartLine]) -> Self {
        let subtotal = subtotal_of(lines);
        let discount = DISCOUNT_RATE.saturating_mul(subtotal);
        let tax = TAX_RATE.saturating_mul(subtotal);

        Self {
            subtotal,
            discount,
            tax,
            total: subtotal.saturating_sub(discount).saturating_add(tax),
        }
    }

    /// Compute the summary for a cart.
    #[must_use]
    pub fn for_cart(cart: &Cart) -> Self {
        Self::from_lines(cart.lines())
    }

    #[must_use]
    pub fn subtotal_price(&self) -> Price {
        Price::usd(self.subtotal)
    }

    #[must_use]
    pub fn discount_price(&self) -> Price {
        Price::usd(self.discount)
    }

    #[must_use]
    pub fn tax_price(&self) -> Price {
        Price::usd(self.tax)
    }

    #[must_use]
    pub fn total_price(&self) -> Price {
        Price::usd(self.total)
    }
}
