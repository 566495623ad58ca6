//! Checkout route handlers.
//!
//! `POST /checkout` drives the [`CheckoutFlow`] state machine: a valid form
//! empties the cart, stores the shipping snapshot and moves the flow to
//! `Submitting`. After the configured confirmation delay the flow is marked
//! `Placed` and the visitor is redirected to `/thank-you`, which reads the
//! snapshot once.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use hearthwood_core::{
    Cart, CheckoutError, CheckoutFlow, CheckoutForm, CheckoutSnapshot, CheckoutState,
    RequiredField,
};
use tracing::instrument;

use crate::error::{AppError, Result, add_breadcrumb};
use crate::filters;
use crate::middleware::Shopper;
use crate::routes::cart::CartView;
use crate::routes::layout::LayoutView;
use crate::state::AppState;

/// Countries offered by the shipping form: (code, label).
const COUNTRIES: [(&str, &str); 3] = [
    ("USA", "United States"),
    ("CA", "Canada"),
    ("PK", "Pakistan"),
];

/// A single input on the shipping form.
#[derive(Clone, Debug)]
pub struct FieldView {
    pub name: &'static str,
    pub label: &'static str,
    pub input_type: &'static str,
    pub value: String,
    pub required: bool,
    pub invalid: bool,
}

/// A country `<option>`.
#[derive(Clone, Debug)]
pub struct CountryOption {
    pub code: &'static str,
    pub label: &'static str,
    pub selected: bool,
}

/// Checkout page template.
#[derive(Template, WebTemplate)]
#[template(path = "checkout/show.html")]
pub struct CheckoutTemplate {
    pub layout: LayoutView,
    pub fields: Vec<FieldView>,
    pub countries: Vec<CountryOption>,
    pub cart: CartView,
    pub notice: Option<String>,
    pub placing: bool,
}

impl CheckoutTemplate {
    fn new(
        layout: LayoutView,
        form: &CheckoutForm,
        invalid: &[RequiredField],
        cart: &Cart,
        state: CheckoutState,
    ) -> Self {
        Self {
            layout,
            fields: form_fields(form, invalid),
            countries: country_options(&form.country),
            cart: CartView::from(cart),
            notice: (!invalid.is_empty())
                .then(|| CheckoutError::MissingFields(invalid.to_vec()).to_string()),
            placing: state != CheckoutState::Editing,
        }
    }
}

/// Order confirmation template.
#[derive(Template, WebTemplate)]
#[template(path = "thank_you.html")]
pub struct ThankYouTemplate {
    pub layout: LayoutView,
    pub order: Option<CheckoutSnapshot>,
}

/// Build the shipping form inputs, in display order.
fn form_fields(form: &CheckoutForm, invalid: &[RequiredField]) -> Vec<FieldView> {
    let required = |name: &'static str, label, input_type, value: &str, field| FieldView {
        name,
        label,
        input_type,
        value: value.to_string(),
        required: true,
        invalid: invalid.contains(&field),
    };
    let optional = |name: &'static str, label, value: &str| FieldView {
        name,
        label,
        input_type: "text",
        value: value.to_string(),
        required: false,
        invalid: false,
    };

    vec![
        required(
            RequiredField::FirstName.field_name(),
            RequiredField::FirstName.label(),
            "text",
            &form.first_name,
            RequiredField::FirstName,
        ),
        optional("lastName", "Last Name", &form.last_name),
        required(
            RequiredField::Email.field_name(),
            RequiredField::Email.label(),
            "email",
            &form.email,
            RequiredField::Email,
        ),
        required(
            RequiredField::Phone.field_name(),
            RequiredField::Phone.label(),
            "tel",
            &form.phone,
            RequiredField::Phone,
        ),
        required(
            RequiredField::Address1.field_name(),
            RequiredField::Address1.label(),
            "text",
            &form.address1,
            RequiredField::Address1,
        ),
        optional("address2", "Address Line 2", &form.address2),
        optional("city", "City", &form.city),
        optional("zipCode", "Zip Code", &form.zip_code),
    ]
}

fn country_options(selected: &str) -> Vec<CountryOption> {
    COUNTRIES
        .iter()
        .map(|&(code, label)| CountryOption {
            code,
            label,
            selected: code == selected,
        })
        .collect()
}

/// Display the checkout page.
///
/// A flow left behind by an earlier order is restarted once the cart has new
/// items in it.
#[instrument(skip(shopper))]
pub async fn show(shopper: Shopper) -> Result<impl IntoResponse> {
    let cart = shopper.cart().await?;
    let wishlist = shopper.wishlist().await?;
    let mut flow = shopper.checkout_flow().await?;

    if flow.state() != CheckoutState::Editing && !cart.is_empty() {
        shopper.reset_checkout_flow().await?;
        flow = CheckoutFlow::new();
    }

    let layout = LayoutView::build(&shopper, &cart, &wishlist).await?;
    Ok(CheckoutTemplate::new(
        layout,
        &CheckoutForm::default(),
        &[],
        &cart,
        flow.state(),
    ))
}

/// Place the order.
#[instrument(skip(state, shopper, form))]
pub async fn submit(
    State(state): State<AppState>,
    shopper: Shopper,
    Form(form): Form<CheckoutForm>,
) -> Result<Response> {
    let mut cart = shopper.cart().await?;
    let mut flow = shopper.checkout_flow().await?;

    let order = match flow.submit(&form, &mut cart) {
        Ok(order) => order,
        Err(CheckoutError::MissingFields(missing)) => {
            tracing::info!(?missing, "Checkout form incomplete");
            let wishlist = shopper.wishlist().await?;
            let layout = LayoutView::build(&shopper, &cart, &wishlist).await?;
            let page = CheckoutTemplate::new(layout, &form, &missing, &cart, flow.state());
            return Ok((StatusCode::UNPROCESSABLE_ENTITY, page).into_response());
        }
        Err(err @ CheckoutError::AlreadySubmitted(_)) => {
            return Err(AppError::Conflict(err.to_string()));
        }
        Err(err @ CheckoutError::InvalidTransition(_)) => {
            return Err(AppError::Internal(err.to_string()));
        }
    };

    shopper.save_cart(&cart).await?;
    shopper.store_snapshot(&order.snapshot).await?;
    shopper.save_checkout_flow(&flow).await?;
    // A concurrent submit from the same session must see `Submitting`.
    shopper.commit().await?;

    tracing::info!(
        item_count = order.item_count,
        total = %order.summary.total,
        country = %order.snapshot.country,
        "Order submitted"
    );
    let item_count = order.item_count.to_string();
    let total = order.summary.total.to_string();
    add_breadcrumb(
        "checkout",
        "Order submitted",
        Some(&[("item_count", &item_count), ("total", &total)]),
    );

    tokio::time::sleep(state.config().checkout.confirmation_delay).await;

    flow.confirm().map_err(|err| AppError::Internal(err.to_string()))?;
    shopper.save_checkout_flow(&flow).await?;

    tracing::info!("Order placed");

    Ok(Redirect::to("/thank-you").into_response())
}

/// Display the order confirmation.
///
/// The snapshot is consumed, so a reload shows the "no order" page.
#[instrument(skip(shopper))]
pub async fn thank_you(shopper: Shopper) -> Result<impl IntoResponse> {
    let order = shopper.take_snapshot().await?;
    if order.is_some() {
        shopper.reset_checkout_flow().await?;
    } else {
        tracing::debug!("No order data found");
    }

    let cart = shopper.cart().await?;
    let wishlist = shopper.wishlist().await?;

    Ok(ThankYouTemplate {
        layout: LayoutView::build(&shopper, &cart, &wishlist).await?,
        order,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_form_fields_flag_missing() {
        let form = CheckoutForm {
            first_name: "Ada".to_string(),
            ..CheckoutForm::default()
        };
        let missing = form.missing_fields();
        let fields = form_fields(&form, &missing);

        let first = fields.iter().find(|f| f.name == "firstName").unwrap();
        assert!(first.required);
        assert!(!first.invalid);
        assert_eq!(first.value, "Ada");

        let email = fields.iter().find(|f| f.name == "email").unwrap();
        assert!(email.invalid);
        assert_eq!(email.input_type, "email");

        assert!(fields.iter().filter(|f| !f.required).all(|f| !f.invalid));
    }

    #[test]
    fn test_country_options() {
        let options = country_options("CA");
        assert_eq!(options.len(), 3);
        assert!(options.iter().any(|o| o.code == "CA" && o.selected));
        assert!(
            options
                .iter()
                .any(|o| o.code == "USA" && o.label == "United States")
        );
        assert_eq!(options.iter().filter(|o| o.selected).count(), 1);
        assert!(country_options("").iter().all(|o| !o.selected));
    }

    #[test]
    fn test_template_notice_only_when_invalid() {
        let cart = Cart::new();
        let form = CheckoutForm::default();

        let clean = CheckoutTemplate::new(
            LayoutView::default(),
            &form,
            &[],
            &cart,
            CheckoutState::Editing,
        );
        assert!(clean.notice.is_none());
        assert!(!clean.placing);

        let invalid = CheckoutTemplate::new(
            LayoutView::default(),
            &form,
            &form.missing_fields(),
            &cart,
            CheckoutState::Editing,
        );
        assert_eq!(
            invalid.notice.as_deref(),
            Some("Please fill in all required fields!")
        );
    }
}
