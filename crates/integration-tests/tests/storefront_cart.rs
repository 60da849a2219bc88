//! Cart and checkout flow tests, with the session cookie carried between
//! requests.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use axum::http::StatusCode;
use rapid_sites_core::{Catalog, Product, ProductId};
use rapid_sites_integration_tests::{RecordingMailer, TestClient, app_with, app_with_mailer};
use rust_decimal::Decimal;

fn assert_total(count: &serde_json::Value, expected: f64) {
    let total = count["total"].as_f64().unwrap();
    assert!((total - expected).abs() < 1e-9, "total {total} != {expected}");
}

fn client() -> TestClient {
    TestClient::new(app_with_mailer(Arc::new(RecordingMailer::default())))
}

#[tokio::test]
async fn empty_cart_and_checkout() {
    let mut client = client();

    let cart = client.get("/cart").await;
    assert_eq!(cart.status, StatusCode::OK);
    assert!(cart.body.contains("Shopping Cart"));
    assert!(cart.body.contains("Your cart is empty"));
    assert!(!cart.body.contains("Proceed to Checkout"));

    let checkout = client.get("/checkout").await;
    assert_eq!(checkout.status, StatusCode::OK);
    assert!(checkout.body.contains("Your cart is empty"));
    assert!(!checkout.body.contains("Order Summary"));

    let count = client.get("/cart/count").await.json();
    assert_eq!(count["itemCount"], 0);
    assert_total(&count, 0.0);
}

#[tokio::test]
async fn add_then_view_cart_and_checkout() {
    let mut client = client();

    let added = client.post_form("/cart/add", "product_id=1&quantity=3").await;
    assert_eq!(added.status, StatusCode::SEE_OTHER);
    assert_eq!(added.location(), Some("/cart"));

    let cart = client.get("/cart").await;
    assert_eq!(cart.status, StatusCode::OK);
    assert!(cart.body.contains("Added to cart!"));
    assert!(cart.body.contains("Premium Coffee Beans has been added to your cart."));
    assert!(cart.body.contains("$74.97"));
    assert!(cart.body.contains("Continue Shopping"));
    assert!(cart.body.contains("Proceed to Checkout"));

    // The notice is shown once
    let again = client.get("/cart").await;
    assert!(!again.body.contains("Added to cart!"));
    assert!(again.body.contains("$74.97"));

    let checkout = client.get("/checkout").await;
    assert!(checkout.body.contains("Order Summary"));
    assert!(checkout.body.contains("$74.97"));
    assert!(checkout.body.contains("Complete Order (Demo)"));
    assert!(checkout.body.contains("disabled"));

    let count = client.get("/cart/count").await.json();
    assert_eq!(count["itemCount"], 3);
    assert_total(&count, 74.97);
}

#[tokio::test]
async fn adding_twice_merges_lines() {
    let mut client = client();

    client.post_form("/cart/add", "product_id=3").await;
    client.post_form("/cart/add", "product_id=3&quantity=2").await;

    let count = client.get("/cart/count").await.json();
    assert_eq!(count["itemCount"], 3);
    assert_total(&count, 56.97);
}

#[tokio::test]
async fn update_remove_and_clear() {
    let mut client = client();
    client.post_form("/cart/add", "product_id=1").await;
    client.post_form("/cart/add", "product_id=2").await;

    let updated = client.post_form("/cart/update", "id=1&quantity=4").await;
    assert_eq!(updated.status, StatusCode::SEE_OTHER);
    let count = client.get("/cart/count").await.json();
    assert_eq!(count["itemCount"], 5);

    client.post_form("/cart/update", "id=2&quantity=0").await;
    let count = client.get("/cart/count").await.json();
    assert_eq!(count["itemCount"], 4);

    let removed = client.post_form("/cart/remove", "id=1").await;
    assert_eq!(removed.status, StatusCode::SEE_OTHER);
    let count = client.get("/cart/count").await.json();
    assert_eq!(count["itemCount"], 0);

    client.post_form("/cart/add", "product_id=5").await;
    let cleared = client.post_form("/cart/clear", "").await;
    assert_eq!(cleared.status, StatusCode::SEE_OTHER);
    let cart = client.get("/cart").await;
    assert!(cart.body.contains("Your cart is empty"));
}

#[tokio::test]
async fn negative_quantity_update_removes_line() {
    let mut client = client();
    client.post_form("/cart/add", "product_id=6").await;

    client.post_form("/cart/update", "id=6&quantity=-2").await;

    let count = client.get("/cart/count").await.json();
    assert_eq!(count["itemCount"], 0);
}

#[tokio::test]
async fn carts_are_isolated_per_session() {
    let app = app_with_mailer(Arc::new(RecordingMailer::default()));
    let mut alice = TestClient::new(app.clone());
    let mut bob = TestClient::new(app);

    alice.post_form("/cart/add", "product_id=1&quantity=2").await;

    let bob_count = bob.get("/cart/count").await.json();
    assert_eq!(bob_count["itemCount"], 0);

    let alice_count = alice.get("/cart/count").await.json();
    assert_eq!(alice_count["itemCount"], 2);
}

#[tokio::test]
async fn add_unknown_product_is_not_found() {
    let response = client()
        .post_form("/cart/add", "product_id=999&quantity=1")
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn add_out_of_stock_product_is_rejected() {
    let catalog = Catalog::new(vec![Product {
        id: ProductId::new("7"),
        slug: "sold-out-kettle".to_string(),
        name: "Sold Out Kettle".to_string(),
        description: "Gooseneck pour-over kettle".to_string(),
        price: Decimal::new(5900, 2),
        compare_at_price: None,
        stock: 0,
        featured: false,
        images: Vec::new(),
    }]);
    let mut client = TestClient::new(app_with(
        catalog,
        Arc::new(RecordingMailer::default()),
    ));

    let page = client.get("/store/sold-out-kettle").await;
    assert!(page.body.contains("Out of Stock"));

    let response = client.post_form("/cart/add", "product_id=7").await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let count = client.get("/cart/count").await.json();
    assert_eq!(count["itemCount"], 0);
}

#[tokio::test]
async fn add_zero_quantity_is_rejected_without_notice() {
    let mut client = client();

    let response = client
        .post_form("/cart/add", "product_id=1&quantity=0")
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let cart = client.get("/cart").await;
    assert!(cart.body.contains("Your cart is empty"));
    assert!(!cart.body.contains("Added to cart!"));

    let count = client.get("/cart/count").await.json();
    assert_eq!(count["itemCount"], 0);
}

#[tokio::test]
async fn cart_badge_shows_count_on_pages() {
    let mut client = client();
    client.post_form("/cart/add", "product_id=2&quantity=2").await;

    let home = client.get("/").await;
    assert!(home.body.contains("data-cart-count>2<"));
}
