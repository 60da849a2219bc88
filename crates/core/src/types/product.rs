//! Catalog product record.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::ProductId;
use crate::cart::LineItem;

/// A product as supplied by the catalog.
///
/// Products are read-only from the cart's point of view: adding one to the
/// cart snapshots its price and display fields into a [`LineItem`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub slug: String,
    pub name: String,
    pub description: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "rust_decimal::serde::float_option"
    )]
    pub compare_at_price: Option<Decimal>,
    pub stock: u32,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub images: Vec<String>,
}

impl Product {
    /// Whether a higher compare-at price should be shown struck through.
    #[must_use]
    pub fn on_sale(&self) -> bool {
        self.compare_at_price
            .is_some_and(|compare_at| compare_at > self.price)
    }

    /// Whether any units are available.
    #[must_use]
    pub const fn in_stock(&self) -> bool {
        self.stock > 0
    }

    /// First image, used as the cart thumbnail.
    #[must_use]
    pub fn primary_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }

    /// Build the cart line for `quantity` units of this product.
    #[must_use]
    pub fn to_line_item(&self, quantity: u32) -> LineItem {
        LineItem {
            id: self.id.clone(),
            slug: self.slug.clone(),
            name: self.name.clone(),
            price: self.price,
            quantity,
            image: self.primary_image().map(str::to_owned),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn mug() -> Product {
        Product {
            id: ProductId::new("3"),
            slug: "handcrafted-mug".to_string(),
            name: "Handcrafted Mug".to_string(),
            description: "Beautiful ceramic mug by local artisans".to_string(),
            price: Decimal::new(1899, 2),
            compare_at_price: None,
            stock: 25,
            featured: false,
            images: vec!["/static/img/mug.jpg".to_string()],
        }
    }

    #[test]
    fn test_on_sale_requires_higher_compare_at() {
        let mut product = mug();
        assert!(!product.on_sale());

        product.compare_at_price = Some(Decimal::new(2499, 2));
        assert!(product.on_sale());

        product.compare_at_price = Some(Decimal::new(1899, 2));
        assert!(!product.on_sale());
    }

    #[test]
    fn test_in_stock() {
        let mut product = mug();
        assert!(product.in_stock());
        product.stock = 0;
        assert!(!product.in_stock());
    }

    #[test]
    fn test_to_line_item_snapshots_fields() {
        let item = mug().to_line_item(2);
        assert_eq!(item.id, "3");
        assert_eq!(item.slug, "handcrafted-mug");
        assert_eq!(item.price, Decimal::new(1899, 2));
        assert_eq!(item.quantity, 2);
        assert_eq!(item.image.as_deref(), Some("/static/img/mug.jpg"));
    }

    #[test]
    fn test_serde_uses_camel_case_numbers() {
        let mut product = mug();
        product.compare_at_price = Some(Decimal::new(2499, 2));
        let json = serde_json::to_value(&product).unwrap();
        assert_eq!(json["compareAtPrice"], serde_json::json!(24.99));
        assert_eq!(json["price"], serde_json::json!(18.99));
    }
}
