//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Home page (featured products)
//! GET  /about                  - About page
//! GET  /contact                - Contact page (form posts to /api/contact)
//!
//! # Store
//! GET  /store                  - Product listing
//! GET  /store/{slug}           - Product detail
//!
//! # Cart (form posts, redirect back to /cart)
//! GET  /cart                   - Cart page
//! POST /cart/add               - Add product to cart
//! POST /cart/update            - Set line quantity (<= 0 removes)
//! POST /cart/remove            - Remove line
//! POST /cart/clear             - Empty the cart
//! GET  /cart/count             - Badge data (JSON)
//!
//! # Checkout
//! GET  /checkout               - Order summary (payment not wired up)
//!
//! # API (rate limited)
//! POST /api/contact            - Contact form submission
//! ```

pub mod cart;
pub mod checkout;
pub mod contact;
pub mod home;
pub mod pages;
pub mod store;

use axum::{
    Router,
    routing::{get, post},
};
use rapid_sites_core::Price;
use rust_decimal::Decimal;

use crate::middleware::contact_rate_limiter;
use crate::models::CartNotice;
use crate::services::SessionCart;
use crate::state::AppState;

/// Data every page layout needs: site name, cart badge, and flash notice.
#[derive(Clone)]
pub struct Layout {
    pub site_name: String,
    pub cart_count: u64,
    pub notice: Option<CartNotice>,
}

impl Layout {
    /// Layout for a page render, without a notice.
    #[must_use]
    pub fn new(state: &AppState, cart: &SessionCart) -> Self {
        Self {
            site_name: state.config().site.name.clone(),
            cart_count: cart.store().item_count(),
            notice: None,
        }
    }

    /// Attach a pending flash notice.
    #[must_use]
    pub fn with_notice(mut self, notice: Option<CartNotice>) -> Self {
        self.notice = notice;
        self
    }
}

/// Format an amount in the store currency, e.g. `$24.99`.
#[must_use]
pub fn format_money(amount: Decimal) -> String {
    Price::usd(amount).to_string()
}

/// Create the store routes router.
pub fn store_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(store::index))
        .route("/{slug}", get(store::show))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/update", post(cart::update))
        .route("/remove", post(cart::remove))
        .route("/clear", post(cart::clear))
        .route("/count", get(cart::count))
}

/// Create the rate-limited API routes router.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/contact", post(contact::submit))
        .layer(contact_rate_limiter())
}

/// Create all page routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::home))
        .route("/about", get(pages::about))
        .route("/contact", get(pages::contact))
        .nest("/store", store_routes())
        .nest("/cart", cart_routes())
        .route("/checkout", get(checkout::show))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_money() {
        assert_eq!(format_money(Decimal::new(7497, 2)), "$74.97");
        assert_eq!(format_money(Decimal::ZERO), "$0.00");
    }
}
