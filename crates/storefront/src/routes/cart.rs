//! Cart route handlers.
//!
//! Mutations are plain form posts that redirect back to `/cart`. The cart
//! itself lives in the visitor's session; see [`SessionCart`].

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form, Json,
    extract::State,
    response::{IntoResponse, Redirect},
};
use rapid_sites_core::{CartStore, LineItem, MemorySlot};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use super::{Layout, format_money};
use crate::error::{AppError, Result, add_breadcrumb};
use crate::filters;
use crate::models::CartNotice;
use crate::services::SessionCart;
use crate::state::AppState;

/// Cart line display data for templates.
#[derive(Clone)]
pub struct CartItemView {
    pub id: String,
    pub slug: String,
    pub name: String,
    pub quantity: u32,
    pub price: String,
    pub line_price: String,
    pub image: Option<String>,
}

impl From<&LineItem> for CartItemView {
    fn from(item: &LineItem) -> Self {
        Self {
            id: item.id.to_string(),
            slug: item.slug.clone(),
            name: item.name.clone(),
            quantity: item.quantity,
            price: format_money(item.price),
            line_price: format_money(item.line_total()),
            image: item.image.clone(),
        }
    }
}

/// Cart display data for templates.
#[derive(Clone)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub subtotal: String,
    pub item_count: u64,
}

impl From<&CartStore<MemorySlot>> for CartView {
    fn from(store: &CartStore<MemorySlot>) -> Self {
        Self {
            items: store.items().iter().map(CartItemView::from).collect(),
            subtotal: format_money(store.total()),
            item_count: store.item_count(),
        }
    }
}

/// Add to cart form data.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub product_id: String,
    pub quantity: Option<u32>,
}

/// Update cart form data.
///
/// The quantity is signed: zero or less removes the line.
#[derive(Debug, Deserialize)]
pub struct UpdateCartForm {
    pub id: String,
    pub quantity: i64,
}

/// Remove from cart form data.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartForm {
    pub id: String,
}

/// Cart badge data.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartCount {
    pub item_count: u64,
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,
}

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart/show.html")]
pub struct CartShowTemplate {
    pub layout: Layout,
    pub cart: CartView,
}

/// Display cart page.
#[instrument(skip(state, cart))]
pub async fn show(State(state): State<AppState>, cart: SessionCart) -> impl IntoResponse {
    let notice = cart.take_notice().await;

    CartShowTemplate {
        layout: Layout::new(&state, &cart).with_notice(notice),
        cart: CartView::from(cart.store()),
    }
}

/// Add a catalog product to the cart.
///
/// Unknown products are 404; out-of-stock products and a zero quantity are 400.
#[instrument(skip(state, cart), fields(product_id = %form.product_id))]
pub async fn add(
    State(state): State<AppState>,
    mut cart: SessionCart,
    Form(form): Form<AddToCartForm>,
) -> Result<Redirect> {
    let product = state
        .catalog()
        .by_id(&form.product_id)
        .ok_or_else(|| AppError::NotFound(format!("product {}", form.product_id)))?;

    if !product.in_stock() {
        return Err(AppError::BadRequest(format!(
            "{} is out of stock",
            product.name
        )));
    }

    let quantity = form.quantity.unwrap_or(1);
    if quantity == 0 {
        return Err(AppError::BadRequest("quantity must be at least 1".to_string()));
    }

    cart.store_mut().add_item(product.to_line_item(quantity));
    cart.save().await;

    add_breadcrumb(
        "cart",
        "Added to cart",
        Some(&[("product_id", product.id.as_str())]),
    );
    tracing::info!(quantity, "Added product to cart");

    cart.set_notice(&CartNotice::added(&product.name)).await;

    Ok(Redirect::to("/cart"))
}

/// Set the quantity of a cart line.
#[instrument(skip(cart), fields(id = %form.id, quantity = form.quantity))]
pub async fn update(mut cart: SessionCart, Form(form): Form<UpdateCartForm>) -> Redirect {
    cart.store_mut().update_quantity(&form.id, form.quantity);
    cart.save().await;

    Redirect::to("/cart")
}

/// Remove a cart line.
#[instrument(skip(cart), fields(id = %form.id))]
pub async fn remove(mut cart: SessionCart, Form(form): Form<RemoveFromCartForm>) -> Redirect {
    cart.store_mut().remove_item(&form.id);
    cart.save().await;

    Redirect::to("/cart")
}

/// Empty the cart.
#[instrument(skip(cart))]
pub async fn clear(mut cart: SessionCart) -> Redirect {
    cart.store_mut().clear_cart();
    cart.save().await;

    Redirect::to("/cart")
}

/// Cart badge data for the header.
#[instrument(skip(cart))]
pub async fn count(cart: SessionCart) -> Json<CartCount> {
    Json(CartCount {
        item_count: cart.store().item_count(),
        total: cart.store().total(),
    })
}
