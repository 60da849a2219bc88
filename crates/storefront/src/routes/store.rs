//! Store route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
};
use rapid_sites_core::Product;
use tracing::instrument;

use super::{Layout, format_money};
use crate::error::{AppError, Result};
use crate::filters;
use crate::services::SessionCart;
use crate::state::AppState;

/// Product display data for templates.
#[derive(Clone)]
pub struct ProductView {
    pub id: String,
    pub slug: String,
    pub name: String,
    pub description: String,
    pub price: String,
    pub compare_at_price: Option<String>,
    pub on_sale: bool,
    pub in_stock: bool,
    pub stock: u32,
    pub image: Option<String>,
}

impl From<&Product> for ProductView {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.to_string(),
            slug: product.slug.clone(),
            name: product.name.clone(),
            description: product.description.clone(),
            price: format_money(product.price),
            compare_at_price: product
                .compare_at_price
                .filter(|_| product.on_sale())
                .map(format_money),
            on_sale: product.on_sale(),
            in_stock: product.in_stock(),
            stock: product.stock,
            image: product.primary_image().map(String::from),
        }
    }
}

/// Product listing page template.
#[derive(Template, WebTemplate)]
#[template(path = "store/index.html")]
pub struct StoreIndexTemplate {
    pub layout: Layout,
    pub products: Vec<ProductView>,
}

/// Product detail page template.
#[derive(Template, WebTemplate)]
#[template(path = "store/show.html")]
pub struct StoreShowTemplate {
    pub layout: Layout,
    pub product: ProductView,
}

/// Display the product grid.
#[instrument(skip(state, cart))]
pub async fn index(State(state): State<AppState>, cart: SessionCart) -> impl IntoResponse {
    StoreIndexTemplate {
        layout: Layout::new(&state, &cart),
        products: state.catalog().all().iter().map(ProductView::from).collect(),
    }
}

/// Display a single product.
#[instrument(skip(state, cart))]
pub async fn show(
    State(state): State<AppState>,
    cart: SessionCart,
    Path(slug): Path<String>,
) -> Result<StoreShowTemplate> {
    let product = state
        .catalog()
        .by_slug(&slug)
        .ok_or_else(|| AppError::NotFound(format!("product {slug}")))?;

    Ok(StoreShowTemplate {
        layout: Layout::new(&state, &cart),
        product: ProductView::from(product),
    })
}
