//! Integration tests for the session cart and wishlist.

#![allow(clippy::unwrap_used)]

use axum::http::StatusCode;
use hearthwood_integration_tests::TestClient;

fn cart_badge(count: u32) -> String {
    format!("data-count=\"cart\">{count}<")
}

fn wishlist_badge(count: usize) -> String {
    format!("data-count=\"wishlist\">{count}<")
}

// =============================================================================
// Cart
// =============================================================================

#[tokio::test]
async fn test_add_merges_quantities() {
    let mut client = TestClient::new();

    let response = client
        .post_form("/cart/add", &[("product_id", "1"), ("return_to", "/products")])
        .await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.location(), "/products");

    client
        .post_form("/cart/add", &[("product_id", "1")])
        .await;

    let cart = client.get("/cart").await;
    assert_eq!(cart.status, StatusCode::OK);
    assert_eq!(cart.body.matches("class=\"cart-item\"").count(), 1);
    assert!(cart.body.contains("value=\"2\""));
    assert!(cart.body.contains(&cart_badge(2)));
}

#[tokio::test]
async fn test_cart_summary_totals() {
    let mut client = TestClient::new();
    client
        .post_form("/cart/add", &[("product_id", "1"), ("quantity", "2")])
        .await;

    let cart = client.get("/cart").await;
    assert!(cart.body.contains("data-total=\"subtotal\">$40.00<"));
    assert!(cart.body.contains("data-total=\"discount\">-$10.00<"));
    assert!(cart.body.contains("data-total=\"tax\">$4.00<"));
    assert!(cart.body.contains("data-total=\"total\">$34.00<"));
}

#[tokio::test]
async fn test_flash_is_shown_once() {
    let mut client = TestClient::new();
    let response = client
        .post_form("/cart/add", &[("product_id", "3")])
        .await;

    let page = client.follow(&response).await;
    assert!(page.body.contains("Item added to cart"));

    let again = client.get("/products").await;
    assert!(!again.body.contains("Item added to cart"));
}

#[tokio::test]
async fn test_update_quantity_and_zero_removes() {
    let mut client = TestClient::new();
    client
        .post_form("/cart/add", &[("product_id", "4")])
        .await;

    let response = client
        .post_form("/cart/update", &[("product_id", "4"), ("quantity", "5")])
        .await;
    assert_eq!(response.location(), "/cart");
    let cart = client.follow(&response).await;
    assert!(cart.body.contains("Cart updated"));
    assert!(cart.body.contains(&cart_badge(5)));

    client
        .post_form("/cart/update", &[("product_id", "4"), ("quantity", "0")])
        .await;
    let cart = client.get("/cart").await;
    assert!(cart.body.contains("Your cart is empty."));
    assert!(cart.body.contains(&cart_badge(0)));
}

#[tokio::test]
async fn test_malformed_quantities_do_not_reject_the_form() {
    let mut client = TestClient::new();

    for raw in ["-1", "", "lots"] {
        let response = client
            .post_form("/cart/add", &[("product_id", "4"), ("quantity", raw)])
            .await;
        assert_eq!(response.status, StatusCode::SEE_OTHER, "quantity {raw:?}");
    }
    // "-1" clamps to one item, blank and junk default to one each
    let cart = client.get("/cart").await;
    assert!(cart.body.contains(&cart_badge(3)));

    let response = client
        .post_form("/cart/update", &[("product_id", "4"), ("quantity", "")])
        .await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);
    let cart = client.get("/cart").await;
    assert!(cart.body.contains(&cart_badge(3)));

    let response = client
        .post_form("/cart/update", &[("product_id", "4"), ("quantity", "-3")])
        .await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);
    let cart = client.get("/cart").await;
    assert!(cart.body.contains("Your cart is empty."));
}

#[tokio::test]
async fn test_quantity_is_capped() {
    let mut client = TestClient::new();
    client
        .post_form(
            "/cart/add",
            &[("product_id", "1"), ("quantity", "4294967295")],
        )
        .await;

    let cart = client.get("/cart").await;
    assert_eq!(cart.status, StatusCode::OK);
    assert!(cart.body.contains(&cart_badge(999)));
}

#[tokio::test]
async fn test_remove_and_clear() {
    let mut client = TestClient::new();
    for id in ["1", "2", "3"] {
        client.post_form("/cart/add", &[("product_id", id)]).await;
    }

    let response = client
        .post_form("/cart/remove", &[("product_id", "2")])
        .await;
    let cart = client.follow(&response).await;
    assert!(cart.body.contains("Item removed from cart"));
    assert_eq!(cart.body.matches("class=\"cart-item\"").count(), 2);
    assert!(!cart.body.contains("Classic Wooden Chair"));

    let response = client.post_form("/cart/clear", &[]).await;
    let cart = client.follow(&response).await;
    assert!(cart.body.contains("Cart cleared"));
    assert!(cart.body.contains("Your cart is empty."));
}

#[tokio::test]
async fn test_add_unknown_product_is_not_found() {
    let mut client = TestClient::new();
    let response = client
        .post_form("/cart/add", &[("product_id", "999")])
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_add_blank_product_is_bad_request() {
    let mut client = TestClient::new();
    let response = client.post_form("/cart/add", &[("product_id", " ")]).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_offsite_return_to_is_ignored() {
    let mut client = TestClient::new();
    let response = client
        .post_form(
            "/cart/add",
            &[("product_id", "1"), ("return_to", "https://evil.example/")],
        )
        .await;

    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.location(), "/products");
}

#[tokio::test]
async fn test_carts_are_per_visitor() {
    let mut alice = TestClient::new();
    let mut bob = alice.new_visitor();

    alice.post_form("/cart/add", &[("product_id", "1")]).await;

    assert!(alice.get("/cart").await.body.contains(&cart_badge(1)));
    assert!(bob.get("/cart").await.body.contains(&cart_badge(0)));
}

// =============================================================================
// Wishlist
// =============================================================================

#[tokio::test]
async fn test_wishlist_toggle() {
    let mut client = TestClient::new();

    let response = client
        .post_form(
            "/wishlist/toggle",
            &[("product_id", "5"), ("return_to", "/products/5")],
        )
        .await;
    assert_eq!(response.location(), "/products/5");
    let page = client.follow(&response).await;
    assert!(page.body.contains("Added to Wishlist"));
    assert!(page.body.contains("Remove from Wishlist"));
    assert!(page.body.contains(&wishlist_badge(1)));

    let wishlist = client.get("/wishlist").await;
    assert!(wishlist.body.contains("Upholstered Armchair"));
    assert!(wishlist.body.contains("$49.99"));

    let response = client
        .post_form("/wishlist/toggle", &[("product_id", "5")])
        .await;
    assert_eq!(response.location(), "/wishlist");
    let wishlist = client.follow(&response).await;
    assert!(wishlist.body.contains("Removed from Wishlist"));
    assert!(wishlist.body.contains("Your wishlist is empty."));
    assert!(wishlist.body.contains(&wishlist_badge(0)));
}

#[tokio::test]
async fn test_wishlist_unknown_product_is_not_found() {
    let mut client = TestClient::new();
    let response = client
        .post_form("/wishlist/toggle", &[("product_id", "nope")])
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_wishlist_does_not_touch_cart() {
    let mut client = TestClient::new();
    client
        .post_form("/wishlist/toggle", &[("product_id", "6")])
        .await;

    let cart = client.get("/cart").await;
    assert!(cart.body.contains("Your cart is empty."));
    assert!(cart.body.contains(&wishlist_badge(1)));
}
