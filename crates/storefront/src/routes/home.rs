//! Home page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, response::IntoResponse};
use tracing::instrument;

use super::Layout;
use super::store::ProductView;
use crate::filters;
use crate::services::SessionCart;
use crate::state::AppState;

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub layout: Layout,
    pub featured: Vec<ProductView>,
}

/// Display the home page.
#[instrument(skip(state, cart))]
pub async fn home(State(state): State<AppState>, cart: SessionCart) -> impl IntoResponse {
    HomeTemplate {
        layout: Layout::new(&state, &cart),
        featured: state.catalog().featured().map(ProductView::from).collect(),
    }
}
