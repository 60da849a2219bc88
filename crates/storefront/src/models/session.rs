//! Session-related types.
//!
//! Values stored in the visitor's session between requests.

use serde::{Deserialize, Serialize};

/// One-shot notice shown after adding a product to the cart.
///
/// Stored by `POST /cart/add` and taken (removed) by the next page render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartNotice {
    pub title: String,
    pub description: String,
}

impl CartNotice {
    /// Notice for a product that was just added.
    #[must_use]
    pub fn added(product_name: &str) -> Self {
        Self {
            title: "Added to cart!".to_string(),
            description: format!("{product_name} has been added to your cart."),
        }
    }
}

/// Session keys.
pub mod keys {
    /// Key for the serialized cart blob (the cart's durable slot).
    pub const CART: &str = "cart";

    /// Key for the pending [`CartNotice`](super::CartNotice).
    pub const CART_NOTICE: &str = "cart_notice";
}
