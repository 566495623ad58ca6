//! # Cart Store
//!
//! An ordered list of line items. Each product id appears at most once;
//! adding a product that is already in the cart increments its quantity
//! instead of creating a second line.
//!
//! ## Operations
//! ```text
//!   Click "Add to Cart" ──► add()          ──► merge into line / push new line
//!   Change quantity     ──► set_quantity() ──► line.quantity = n (0 removes)
//!   Click "Remove"      ──► remove()       ──► lines.retain(..)
//!   Order placed        ──► clear()        ──► lines.clear()
//! ```
//!
//! All operations are total: they never fail, and derived totals are recomputed
//! on every read. Line quantities are kept within `1..=MAX_LINE_QUANTITY`.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{Price, Product, ProductId};

/// Largest quantity a single line can hold.
pub const MAX_LINE_QUANTITY: u32 = 999;

const fn clamp_quantity(quantity: u32) -> u32 {
    if quantity == 0 {
        1
    } else if quantity > MAX_LINE_QUANTITY {
        MAX_LINE_QUANTITY
    } else {
        quantity
    }
}

/// A single line item in the cart.
///
/// The product fields are frozen at the moment the product was first added.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    pub id: ProductId,
    pub title: String,
    pub price: Decimal,
    pub image_url: String,
    /// Between 1 and [`MAX_LINE_QUANTITY`].
    pub quantity: u32,
}

impl CartLine {
    /// Build a line from a product, clamping the quantity to
    /// `1..=MAX_LINE_QUANTITY`.
    #[must_use]
    pub fn from_product(product: &Product, quantity: u32) -> Self {
        Self {
            id: product.id.clone(),
            title: product.title.clone(),
            price: product.price,
            image_url: product.image_url.clone(),
            quantity: clamp_quantity(quantity),
        }
    }

    /// Unit price as a displayable [`Price`].
    #[must_use]
    pub fn unit_price(&self) -> Price {
        Price::usd(self.price)
    }

    /// Unrounded `price * quantity`, saturating at `Decimal::MAX`.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.price.saturating_mul(Decimal::from(self.quantity))
    }
}

/// The visitor's shopping cart.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Add `quantity` units of `product` (clamped to `1..=MAX_LINE_QUANTITY`).
    pub fn add(&mut self, product: &Product, quantity: u32) {
        self.add_line(CartLine::from_product(product, quantity));
    }

    /// Merge a line into the cart.
    ///
    /// If a line with the same id exists its quantity is incremented by the
    /// incoming quantity, capped at [`MAX_LINE_QUANTITY`]; otherwise the line
    /// is appended.
    pub fn add_line(&mut self, mut line: CartLine) {
        line.quantity = clamp_quantity(line.quantity);

        match self.lines.iter_mut().find(|existing| existing.id == line.id) {
            Some(existing) => {
                existing.quantity =
                    clamp_quantity(existing.quantity.saturating_add(line.quantity));
            }
            None => self.lines.push(line),
        }
    }

    /// Remove the line for `id`. Returns whether a line was removed.
    pub fn remove(&mut self, id: &ProductId) -> bool {
        let before = self.lines.len();
        self.lines.retain(|line| &line.id != id);
        self.lines.len() != before
    }

    /// Set the quantity of an existing line.
    ///
    /// A quantity of 0 removes the line; larger values are capped at
    /// [`MAX_LINE_QUANTITY`]. Unknown ids are ignored. Returns whether the
    /// cart changed.
    pub fn set_quantity(&mut self, id: &ProductId, quantity: u32) -> bool {
        if quantity == 0 {
            return self.remove(id);
        }
        let quantity = clamp_quantity(quantity);

        match self.lines.iter_mut().find(|line| &line.id == id) {
            Some(line) if line.quantity != quantity => {
                line.quantity = quantity;
                true
            }
            _ => false,
        }
    }

    /// Empty the cart.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Line items in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Look up the line for `id`.
    #[must_use]
    pub fn get(&self, id: &ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|line| &line.id == id)
    }

    /// Number of distinct lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Total number of units across all lines.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.lines
            .iter()
            .fold(0_u32, |sum, line| sum.saturating_add(line.quantity))
    }

    /// Unrounded sum of `price * quantity` over all lines, saturating at
    /// `Decimal::MAX`.
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        subtotal_of(&self.lines)
    }
}

/// Saturating sum of line totals.
pub(crate) fn subtotal_of(lines: &[CartLine]) -> Decimal {
    lines
        .iter()
        .map(CartLine::line_total)
        .fold(Decimal::ZERO, Decimal::saturating_add)
}
