//! Cart commands.
//!
//! Every command opens the cart from its slot, applies one operation, and
//! lets the store persist the result.

use std::io::Write;

use rapid_sites_core::{CartStore, Catalog, KeyValueSlot, Price};

use crate::error::CliError;

/// Print the cart contents and totals.
///
/// # Errors
///
/// Returns an error if writing to `out` fails.
pub fn show<S: KeyValueSlot>(store: &CartStore<S>, out: &mut impl Write) -> Result<(), CliError> {
    if store.is_empty() {
        writeln!(out, "Your cart is empty")?;
        return Ok(());
    }

    for item in store.items() {
        writeln!(
            out,
            "{:<4} {:<28} {:>4} x {:>9} = {:>10}",
            item.id,
            item.name,
            item.quantity,
            Price::usd(item.price).to_string(),
            Price::usd(item.line_total()).to_string()
        )?;
    }
    writeln!(
        out,
        "{} item(s), total {}",
        store.item_count(),
        Price::usd(store.total())
    )?;
    Ok(())
}

/// Add `quantity` units of a catalog product.
///
/// # Errors
///
/// Returns an error if the product is unknown or out of stock.
pub fn add<S: KeyValueSlot>(
    store: &mut CartStore<S>,
    catalog: &Catalog,
    product_id: &str,
    quantity: u32,
) -> Result<(), CliError> {
    let product = catalog
        .by_id(product_id)
        .ok_or_else(|| CliError::UnknownProduct(product_id.to_string()))?;

    if !product.in_stock() {
        return Err(CliError::OutOfStock(product.name.clone()));
    }

    store.add_item(product.to_line_item(quantity));
    tracing::info!(product_id, quantity, "Added to cart");
    Ok(())
}

/// Remove a line. Removing an absent line succeeds.
pub fn remove<S: KeyValueSlot>(store: &mut CartStore<S>, id: &str) {
    store.remove_item(id);
    tracing::info!(id, "Removed from cart");
}

/// Set a line's quantity; zero or less removes it. Updating an absent line
/// changes nothing.
pub fn update<S: KeyValueSlot>(store: &mut CartStore<S>, id: &str, quantity: i64) {
    if store.get(id).is_none() {
        tracing::info!(id, "No cart line to update");
        return;
    }

    store.update_quantity(id, quantity);
    tracing::info!(id, quantity, "Updated cart quantity");
}

/// Remove every line.
pub fn clear<S: KeyValueSlot>(store: &mut CartStore<S>) {
    store.clear_cart();
    tracing::info!("Cleared cart");
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rapid_sites_core::MemorySlot;

    use super::*;

    fn output<S: KeyValueSlot>(store: &CartStore<S>) -> String {
        let mut out = Vec::new();
        show(store, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_add_then_show_total() {
        let catalog = Catalog::demo();
        let mut store = CartStore::open(MemorySlot::new());

        add(&mut store, &catalog, "1", 3).unwrap();

        let text = output(&store);
        assert!(text.contains("Premium Coffee Beans"));
        assert!(text.contains("3 item(s), total $74.97"));
    }

    #[test]
    fn test_add_unknown_product() {
        let catalog = Catalog::demo();
        let mut store = CartStore::open(MemorySlot::new());

        let err = add(&mut store, &catalog, "999", 1).unwrap_err();
        assert!(matches!(err, CliError::UnknownProduct(id) if id == "999"));
        assert!(store.is_empty());
    }

    #[test]
    fn test_update_to_zero_removes() {
        let catalog = Catalog::demo();
        let mut store = CartStore::open(MemorySlot::new());
        add(&mut store, &catalog, "2", 2).unwrap();

        update(&mut store, "2", 0);
        assert!(store.is_empty());
        assert_eq!(output(&store), "Your cart is empty\n");
    }

    #[test]
    fn test_update_missing_line_is_noop() {
        let catalog = Catalog::demo();
        let mut store = CartStore::open(MemorySlot::new());
        add(&mut store, &catalog, "1", 1).unwrap();

        update(&mut store, "4", 2);
        assert_eq!(store.items().len(), 1);
        assert_eq!(store.item_count(), 1);
    }

    #[test]
    fn test_remove_and_clear() {
        let catalog = Catalog::demo();
        let mut store = CartStore::open(MemorySlot::new());
        add(&mut store, &catalog, "1", 1).unwrap();
        add(&mut store, &catalog, "3", 1).unwrap();

        remove(&mut store, "1");
        remove(&mut store, "1");
        assert_eq!(store.item_count(), 1);

        clear(&mut store);
        assert!(store.is_empty());
    }
}
