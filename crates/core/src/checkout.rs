//! # Checkout
//!
//! Shipping form validation and the order placement state machine.
//!
//! ```text
//!            submit(valid form)             confirm()
//!  Editing ─────────────────────► Submitting ──────────► Placed
//!     │  ▲
//!     └──┘ submit(missing fields) -> CheckoutError::MissingFields
//! ```
//!
//! `submit` clears the cart and produces the [`CheckoutSnapshot`] shown on the
//! confirmation page. The caller decides how long to wait before calling
//! [`CheckoutFlow::confirm`].

use core::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cart::Cart;
use crate::pricing::OrderSummary;

/// Shipping and contact details entered on the checkout page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CheckoutForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub address1: String,
    pub address2: String,
    pub city: String,
    pub zip_code: String,
    pub country: String,
}

/// Fields that must be filled in before an order can be placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RequiredField {
    FirstName,
    Email,
    Phone,
    Address1,
}

impl RequiredField {
    pub const ALL: [Self; 4] = [Self::FirstName, Self::Email, Self::Phone, Self::Address1];

    /// Form field name as posted by the checkout page.
    #[must_use]
    pub const fn field_name(self) -> &'static str {
        match self {
            Self::FirstName => "firstName",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::Address1 => "address1",
        }
    }

    /// Human readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::FirstName => "First Name",
            Self::Email => "Email",
            Self::Phone => "Phone",
            Self::Address1 => "Address Line 1",
        }
    }
}

impl fmt::Display for RequiredField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl CheckoutForm {
    fn value(&self, field: RequiredField) -> &str {
        match field {
            RequiredField::FirstName => &self.first_name,
            RequiredField::Email => &self.email,
            RequiredField::Phone => &self.phone,
            RequiredField::Address1 => &self.address1,
        }
    }

    /// Required fields that are empty or whitespace only, in form order.
    #[must_use]
    pub fn missing_fields(&self) -> Vec<RequiredField> {
        RequiredField::ALL
            .into_iter()
            .filter(|field| self.value(*field).trim().is_empty())
            .collect()
    }

    /// Check that every required field is present.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::MissingFields`] listing the empty fields.
    pub fn validate(&self) -> Result<(), CheckoutError> {
        let missing = self.missing_fields();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(CheckoutError::MissingFields(missing))
        }
    }

    /// Shipping details as shown on the confirmation page.
    #[must_use]
    pub fn snapshot(&self) -> CheckoutSnapshot {
        let name = format!("{} {}", self.first_name.trim(), self.last_name.trim())
            .trim()
            .to_string();

        let address = match self.address2.trim() {
            "" => self.address1.trim().to_string(),
            line2 => format!("{}, {line2}", self.address1.trim()),
        };

        CheckoutSnapshot {
            name,
            email: self.email.trim().to_string(),
            address,
            city: self.city.trim().to_string(),
            postal_code: self.zip_code.trim().to_string(),
            country: self.country.trim().to_string(),
        }
    }
}

/// Shipping data captured when an order is placed.
///
/// Stored transiently for the confirmation page and discarded after it has been
/// read once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutSnapshot {
    pub name: String,
    pub email: String,
    pub address: String,
    pub city: String,
    pub postal_code: String,
    pub country: String,
}

/// Position of a checkout flow instance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CheckoutState {
    #[default]
    Editing,
    Submitting,
    Placed,
}

impl CheckoutState {
    /// Whether the form still accepts a submission.
    #[must_use]
    pub const fn accepts_submission(self) -> bool {
        matches!(self, Self::Editing)
    }
}

/// Errors raised by the checkout flow.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CheckoutError {
    /// One or more required fields are empty.
    #[error("Please fill in all required fields!")]
    MissingFields(Vec<RequiredField>),

    /// The order has already been submitted.
    #[error("order already submitted (state: {0:?})")]
    AlreadySubmitted(CheckoutState),

    /// `confirm` was called outside the `Submitting` state.
    #[error("cannot confirm an order in state {0:?}")]
    InvalidTransition(CheckoutState),
}

/// Result of a successful submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacedOrder {
    pub snapshot: CheckoutSnapshot,
    /// Price breakdown of the cart at the moment it was submitted.
    pub summary: OrderSummary,
    /// Units that were in the cart.
    pub item_count: u32,
}

/// One checkout flow instance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutFlow {
    state: CheckoutState,
}

impl CheckoutFlow {
    /// Start a new flow in the `Editing` state.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            state: CheckoutState::Editing,
        }
    }

    #[must_use]
    pub const fn state(&self) -> CheckoutState {
        self.state
    }

    /// Submit the form.
    ///
    /// On success the flow moves to `Submitting`, the cart is emptied and the
    /// confirmation snapshot is returned. On failure nothing changes.
    ///
    /// # Errors
    ///
    /// - [`CheckoutError::AlreadySubmitted`] when the flow has left `Editing`.
    /// - [`CheckoutError::MissingFields`] when a required field is empty.
    pub fn submit(
        &mut self,
        form: &CheckoutForm,
        cart: &mut Cart,
    ) -> Result<PlacedOrder, CheckoutError> {
        if !self.state.accepts_submission() {
            return Err(CheckoutError::AlreadySubmitted(self.state));
        }
        form.validate()?;

        let order = PlacedOrder {
            snapshot: form.snapshot(),
            summary: OrderSummary::for_cart(cart),
            item_count: cart.item_count(),
        };

        cart.clear();
        self.state = CheckoutState::Submitting;
        Ok(order)
    }

    /// Complete a submitted order.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::InvalidTransition`] unless the flow is
    /// `Submitting`.
    pub fn confirm(&mut self) -> Result<(), CheckoutError> {
        match self.state {
            CheckoutState::Submitting => {
                self.state = CheckoutState::Placed;
                Ok(())
            }
            other => Err(CheckoutError::InvalidTransition(other)),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;
    use crate::types::Product;

    fn complete_form() -> CheckoutForm {
        CheckoutForm {
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            phone: "555-0100".to_string(),
            address1: "12 Analytical Way".to_string(),
            address2: String::new(),
            city: "London".to_string(),
            zip_code: "N1 9GU".to_string(),
            country: "CA".to_string(),
        }
    }

    fn cart_with_chairs() -> Cart {
        let mut cart = Cart::new();
        cart.add(
            &Product::new("1", "Library Stool Chair", Decimal::new(20, 0), "/a.jpg"),
            2,
        );
        cart
    }

    #[test]
    fn test_missing_fields_in_form_order() {
        let form = CheckoutForm {
            first_name: "Ada".to_string(),
            phone: "   ".to_string(),
            ..CheckoutForm::default()
        };

        assert_eq!(
            form.missing_fields(),
            vec![
                RequiredField::Email,
                RequiredField::Phone,
                RequiredField::Address1
            ]
        );
    }

    #[test]
    fn test_optional_fields_not_required() {
        let form = CheckoutForm {
            last_name: String::new(),
            city: String::new(),
            country: String::new(),
            ..complete_form()
        };
        assert!(form.validate().is_ok());
    }

    #[test]
    fn test_empty_email_is_rejected_and_state_unchanged() {
        let mut flow = CheckoutFlow::new();
        let mut cart = cart_with_chairs();
        let form = CheckoutForm {
            email: String::new(),
            ..complete_form()
        };

        let err = flow.submit(&form, &mut cart).unwrap_err();
        assert_eq!(err, CheckoutError::MissingFields(vec![RequiredField::Email]));
        assert_eq!(err.to_string(), "Please fill in all required fields!");
        assert_eq!(flow.state(), CheckoutState::Editing);
        assert_eq!(cart.item_count(), 2);
    }

    #[test]
    fn test_valid_submit_then_confirm() {
        let mut flow = CheckoutFlow::new();
        let mut cart = cart_with_chairs();

        let order = flow.submit(&complete_form(), &mut cart).unwrap();
        assert_eq!(flow.state(), CheckoutState::Submitting);
        assert!(cart.is_empty());
        assert_eq!(order.item_count, 2);
        assert_eq!(order.summary.total_price().display(), "$34.00");

        flow.confirm().unwrap();
        assert_eq!(flow.state(), CheckoutState::Placed);
    }

    #[test]
    fn test_resubmission_is_rejected() {
        let mut flow = CheckoutFlow::new();
        let mut cart = cart_with_chairs();
        flow.submit(&complete_form(), &mut cart).unwrap();

        let mut refilled = cart_with_chairs();
        assert_eq!(
            flow.submit(&complete_form(), &mut refilled),
            Err(CheckoutError::AlreadySubmitted(CheckoutState::Submitting))
        );

        flow.confirm().unwrap();
        assert_eq!(
            flow.submit(&complete_form(), &mut refilled),
            Err(CheckoutError::AlreadySubmitted(CheckoutState::Placed))
        );
        assert_eq!(refilled.item_count(), 2);
    }

    #[test]
    fn test_confirm_requires_submitting() {
        let mut flow = CheckoutFlow::new();
        assert_eq!(
            flow.confirm(),
            Err(CheckoutError::InvalidTransition(CheckoutState::Editing))
        );
    }

    #[test]
    fn test_snapshot_shape() {
        let form = CheckoutForm {
            address2: "Flat 3".to_string(),
            ..complete_form()
        };
        let snapshot = form.snapshot();
        assert_eq!(snapshot.name, "Ada Lovelace");
        assert_eq!(snapshot.address, "12 Analytical Way, Flat 3");

        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "name": "Ada Lovelace",
                "email": "ada@example.com",
                "address": "12 Analytical Way, Flat 3",
                "city": "London",
                "postalCode": "N1 9GU",
                "country": "CA"
            })
        );
    }

    #[test]
    fn test_snapshot_name_without_last_name() {
        let form = CheckoutForm {
            last_name: String::new(),
            ..complete_form()
        };
        assert_eq!(form.snapshot().name, "Ada");
    }
}
