//! Static marketing page handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, response::IntoResponse};
use rapid_sites_core::MIN_MESSAGE_CHARS;
use tracing::instrument;

use super::Layout;
use crate::filters;
use crate::services::SessionCart;
use crate::state::AppState;

/// About page template.
#[derive(Template, WebTemplate)]
#[template(path = "pages/about.html")]
pub struct AboutTemplate {
    pub layout: Layout,
}

/// Contact page template.
#[derive(Template, WebTemplate)]
#[template(path = "pages/contact.html")]
pub struct ContactTemplate {
    pub layout: Layout,
    pub contact_email: String,
    pub min_message_chars: usize,
}

/// Display the about page.
#[instrument(skip(state, cart))]
pub async fn about(State(state): State<AppState>, cart: SessionCart) -> impl IntoResponse {
    AboutTemplate {
        layout: Layout::new(&state, &cart),
    }
}

/// Display the contact page.
#[instrument(skip(state, cart))]
pub async fn contact(State(state): State<AppState>, cart: SessionCart) -> impl IntoResponse {
    ContactTemplate {
        layout: Layout::new(&state, &cart),
        contact_email: state.config().site.contact_email.to_string(),
        min_message_chars: MIN_MESSAGE_CHARS,
    }
}
