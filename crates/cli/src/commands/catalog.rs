//! Catalog commands.

use std::io::Write;

use rapid_sites_core::{Catalog, Price};

use crate::error::CliError;

/// List every catalog product.
///
/// # Errors
///
/// Returns an error if writing to `out` fails.
pub fn list(catalog: &Catalog, out: &mut impl Write) -> Result<(), CliError> {
    writeln!(out, "{:<4} {:<28} {:>10} {:>7}  SLUG", "ID", "NAME", "PRICE", "STOCK")?;
    for product in catalog.all() {
        let mut flags = String::new();
        if product.on_sale() {
            flags.push_str(" [sale]");
        }
        if product.featured {
            flags.push_str(" [featured]");
        }
        writeln!(
            out,
            "{:<4} {:<28} {:>10} {:>7}  {}{}",
            product.id,
            product.name,
            Price::usd(product.price).to_string(),
            product.stock,
            product.slug,
            flags
        )?;
    }
    Ok(())
}
