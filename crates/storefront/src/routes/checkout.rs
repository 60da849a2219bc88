//! Checkout route handler.
//!
//! Shows a read-only order summary. Payment is not wired up, so the page
//! never submits an order.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, response::IntoResponse};
use rapid_sites_core::{CheckoutLine, CheckoutSummary};
use tracing::instrument;

use super::{Layout, format_money};
use crate::filters;
use crate::services::SessionCart;
use crate::state::AppState;

/// Order summary row for templates.
#[derive(Clone)]
pub struct SummaryLineView {
    pub name: String,
    pub quantity: u32,
    pub unit_price: String,
    pub line_total: String,
}

impl From<&CheckoutLine> for SummaryLineView {
    fn from(line: &CheckoutLine) -> Self {
        Self {
            name: line.name.clone(),
            quantity: line.quantity,
            unit_price: format_money(line.unit_price),
            line_total: format_money(line.line_total),
        }
    }
}

/// Order summary for templates. `None` renders the empty-cart state.
#[derive(Clone)]
pub struct SummaryView {
    pub lines: Vec<SummaryLineView>,
    pub item_count: u64,
    pub subtotal: String,
    pub total: String,
}

impl SummaryView {
    fn from_summary(summary: &CheckoutSummary) -> Option<Self> {
        match summary {
            CheckoutSummary::Empty => None,
            CheckoutSummary::Ready {
                lines,
                item_count,
                total,
            } => Some(Self {
                lines: lines.iter().map(SummaryLineView::from).collect(),
                item_count: *item_count,
                // No shipping or tax yet
                subtotal: format_money(*total),
                total: format_money(*total),
            }),
        }
    }
}

/// Checkout page template.
#[derive(Template, WebTemplate)]
#[template(path = "checkout/show.html")]
pub struct CheckoutTemplate {
    pub layout: Layout,
    pub summary: Option<SummaryView>,
}

/// Display the checkout page.
#[instrument(skip(state, cart))]
pub async fn show(State(state): State<AppState>, cart: SessionCart) -> impl IntoResponse {
    CheckoutTemplate {
        layout: Layout::new(&state, &cart),
        summary: SummaryView::from_summary(&cart.store().summary()),
    }
}
