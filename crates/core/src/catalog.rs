//! Read-only product catalog.
//!
//! The storefront sells from a fixed demo catalog until a CMS-backed product
//! collection is wired up. Consumers only ever read from it.

use rust_decimal::Decimal;

use crate::types::{Product, ProductId};

/// An in-memory, read-only list of products in display order.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Build a catalog from an explicit product list.
    #[must_use]
    pub const fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    /// The demo catalog shown on `/store`.
    #[must_use]
    pub fn demo() -> Self {
        Self::new(vec![
            demo_product(
                "1",
                "premium-coffee-beans",
                "Premium Coffee Beans",
                "Organic, fair-trade coffee beans from Colombia",
                2499,
                Some(2999),
                50,
                true,
            ),
            demo_product(
                "2",
                "artisan-tea-collection",
                "Artisan Tea Collection",
                "Curated selection of premium loose-leaf teas",
                3499,
                None,
                30,
                true,
            ),
            demo_product(
                "3",
                "handcrafted-mug",
                "Handcrafted Mug",
                "Beautiful ceramic mug by local artisans",
                1899,
                None,
                25,
                false,
            ),
            demo_product(
                "4",
                "french-press",
                "French Press Coffee Maker",
                "Premium stainless steel french press",
                4599,
                None,
                15,
                false,
            ),
            demo_product(
                "5",
                "tea-infuser-set",
                "Tea Infuser Set",
                "Set of 3 premium stainless steel infusers",
                2299,
                None,
                40,
                false,
            ),
            demo_product(
                "6",
                "coffee-grinder",
                "Burr Coffee Grinder",
                "Professional grade burr grinder",
                8999,
                Some(9999),
                10,
                true,
            ),
        ])
    }

    /// All products in display order.
    #[must_use]
    pub fn all(&self) -> &[Product] {
        &self.products
    }

    /// Products flagged for the home page.
    pub fn featured(&self) -> impl Iterator<Item = &Product> {
        self.products.iter().filter(|p| p.featured)
    }

    /// Look up a product by ID.
    #[must_use]
    pub fn by_id(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Look up a product by its URL slug.
    #[must_use]
    pub fn by_slug(&self, slug: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.slug == slug)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

#[allow(clippy::too_many_arguments, clippy::fn_params_excessive_bools)]
fn demo_product(
    id: &str,
    slug: &str,
    name: &str,
    description: &str,
    price_cents: i64,
    compare_at_cents: Option<i64>,
    stock: u32,
    featured: bool,
) -> Product {
    Product {
        id: ProductId::new(id),
        slug: slug.to_owned(),
        name: name.to_owned(),
        description: description.to_owned(),
        price: Decimal::new(price_cents, 2),
        compare_at_price: compare_at_cents.map(|cents| Decimal::new(cents, 2)),
        stock,
        featured,
        images: Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_catalog_lookup() {
        let catalog = Catalog::demo();
        assert_eq!(catalog.len(), 6);

        let coffee = catalog.by_slug("premium-coffee-beans");
        assert_eq!(coffee.map(|p| p.price), Some(Decimal::new(2499, 2)));
        assert_eq!(
            catalog.by_id("6").map(|p| p.name.as_str()),
            Some("Burr Coffee Grinder")
        );
        assert!(catalog.by_slug("missing").is_none());
    }

    #[test]
    fn test_featured_products() {
        let catalog = Catalog::demo();
        let featured: Vec<_> = catalog.featured().map(|p| p.id.as_str()).collect();
        assert_eq!(featured, vec!["1", "2", "6"]);
    }

    #[test]
    fn test_sale_products() {
        let catalog = Catalog::demo();
        let on_sale: Vec<_> = catalog
            .all()
            .iter()
            .filter(|p| p.on_sale())
            .map(|p| p.slug.as_str())
            .collect();
        assert_eq!(on_sale, vec!["premium-coffee-beans", "coffee-grinder"]);
    }
}
