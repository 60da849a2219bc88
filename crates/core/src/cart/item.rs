//! Cart line item.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::ProductId;

/// One product in the cart and how many units of it.
///
/// Price, name, slug, and image are captured when the product is first
/// added and are not refreshed from the catalog afterwards.
///
/// The serialized form is the persisted cart blob format:
///
/// ```json
/// {"id":"1","slug":"premium-coffee-beans","name":"Premium Coffee Beans","price":24.99,"quantity":3}
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub id: ProductId,
    pub slug: String,
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub quantity: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl LineItem {
    /// `price × quantity`, or `None` when the product does not fit in a `Decimal`.
    #[must_use]
    pub fn checked_line_total(&self) -> Option<Decimal> {
        self.price.checked_mul(Decimal::from(self.quantity))
    }

    /// `price × quantity`, saturating at the `Decimal` bounds.
    ///
    /// Lines held by a [`CartStore`](super::CartStore) never saturate; the
    /// store refuses quantities whose total would not fit.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.price.saturating_mul(Decimal::from(self.quantity))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_line_total() {
        let item = LineItem {
            id: ProductId::new("1"),
            slug: "premium-coffee-beans".to_string(),
            name: "Premium Coffee Beans".to_string(),
            price: Decimal::new(2499, 2),
            quantity: 3,
            image: None,
        };
        assert_eq!(item.line_total(), Decimal::new(7497, 2));
    }

    #[test]
    fn test_line_total_overflow_saturates() {
        let item = LineItem {
            id: ProductId::new("1"),
            slug: "premium-coffee-beans".to_string(),
            name: "Premium Coffee Beans".to_string(),
            price: Decimal::MAX,
            quantity: 2,
            image: None,
        };
        assert_eq!(item.checked_line_total(), None);
        assert_eq!(item.line_total(), Decimal::MAX);
    }

    #[test]
    fn test_parses_browser_blob() {
        let json = r#"{"id":"1","slug":"premium-coffee-beans","name":"Premium Coffee Beans","price":24.99,"quantity":2,"image":"/img/beans.jpg"}"#;
        let item: LineItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.price, Decimal::new(2499, 2));
        assert_eq!(item.image.as_deref(), Some("/img/beans.jpg"));

        let out = serde_json::to_value(&item).unwrap();
        assert_eq!(out["price"], serde_json::json!(24.99));
    }

    #[test]
    fn test_rejects_negative_quantity() {
        let json = r#"{"id":"1","slug":"s","name":"n","price":1.0,"quantity":-1}"#;
        assert!(serde_json::from_str::<LineItem>(json).is_err());
    }
}
