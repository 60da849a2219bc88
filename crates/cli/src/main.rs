//! Rapid Sites CLI - local cart and catalog tools.
//!
//! Drives the same cart store the storefront uses, persisted to a JSON file
//! instead of a browser session.
//!
//! # Usage
//!
//! ```bash
//! # List demo products
//! rs-cli catalog list
//!
//! # Add three bags of coffee, then look at the cart
//! rs-cli cart add 1 --quantity 3
//! rs-cli cart show
//!
//! # Change or drop a line
//! rs-cli cart update 1 2
//! rs-cli cart remove 1
//! rs-cli cart clear
//! ```
//!
//! # Environment Variables
//!
//! - `RS_CART_DIR` - Directory holding `cart.json` (default `.rapid-sites`)

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use rapid_sites_core::{CartStore, Catalog};

mod commands;
mod error;
mod slot;

use error::CliError;
use slot::FileSlot;

#[derive(Parser)]
#[command(name = "rs-cli")]
#[command(author, version, about = "Rapid Sites CLI tools")]
struct Cli {
    /// Directory where the cart is stored
    #[arg(long, env = "RS_CART_DIR", default_value = ".rapid-sites", global = true)]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Inspect and change the local cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Browse the product catalog
    Catalog {
        #[command(subcommand)]
        action: CatalogAction,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Show cart contents and totals
    Show,
    /// Add a catalog product
    Add {
        /// Product ID (see `catalog list`)
        product_id: String,

        /// Number of units
        #[arg(short, long, default_value_t = 1)]
        quantity: u32,
    },
    /// Remove a line
    Remove {
        /// Product ID of the line
        id: String,
    },
    /// Set a line's quantity (0 or less removes it)
    Update {
        /// Product ID of the line
        id: String,

        /// New quantity
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },
    /// Remove every line
    Clear,
}

#[derive(Subcommand)]
enum CatalogAction {
    /// List all products
    List,
}

fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    // Logs go to stderr; stdout carries command output
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut stdout = std::io::stdout().lock();

    match run(cli, &mut stdout) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("Command failed: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli, out: &mut impl Write) -> Result<(), CliError> {
    let catalog = Catalog::demo();

    match cli.command {
        Commands::Catalog { action } => match action {
            CatalogAction::List => commands::catalog::list(&catalog, out)?,
        },
        Commands::Cart { action } => {
            let mut store = CartStore::open(FileSlot::new(&cli.data_dir));
            tracing::debug!(dir = %store.slot().dir().display(), "Opened cart");

            match action {
                CartAction::Show => {}
                CartAction::Add {
                    product_id,
                    quantity,
                } => commands::cart::add(&mut store, &catalog, &product_id, quantity)?,
                CartAction::Remove { id } => commands::cart::remove(&mut store, &id),
                CartAction::Update { id, quantity } => {
                    commands::cart::update(&mut store, &id, quantity);
                }
                CartAction::Clear => commands::cart::clear(&mut store),
            }

            commands::cart::show(&store, out)?;
        }
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn run_args(dir: &std::path::Path, args: &[&str]) -> Result<String, CliError> {
        let mut argv = vec!["rs-cli", "--data-dir", dir.to_str().unwrap()];
        argv.extend_from_slice(args);
        let cli = Cli::try_parse_from(argv).unwrap();

        let mut out = Vec::new();
        run(cli, &mut out)?;
        Ok(String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_cart_persists_between_invocations() {
        let dir = tempfile::tempdir().unwrap();

        run_args(dir.path(), &["cart", "add", "1", "--quantity", "3"]).unwrap();
        let shown = run_args(dir.path(), &["cart", "show"]).unwrap();

        assert!(shown.contains("3 item(s), total $74.97"));
    }

    #[test]
    fn test_negative_update_removes_line() {
        let dir = tempfile::tempdir().unwrap();

        run_args(dir.path(), &["cart", "add", "2"]).unwrap();
        let shown = run_args(dir.path(), &["cart", "update", "2", "-1"]).unwrap();

        assert_eq!(shown, "Your cart is empty\n");
    }

    #[test]
    fn test_update_unknown_line_leaves_cart_unchanged() {
        let dir = tempfile::tempdir().unwrap();

        run_args(dir.path(), &["cart", "add", "1"]).unwrap();
        let shown = run_args(dir.path(), &["cart", "update", "9", "5"]).unwrap();

        assert!(shown.contains("1 item(s), total $24.99"));
    }

    #[test]
    fn test_show_oversized_cart_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("cart.json"),
            r#"[
                {"id":"1","slug":"a","name":"A","price":70000000000000000000000000000,"quantity":2},
                {"id":"2","slug":"b","name":"B","price":1.5,"quantity":2}
            ]"#,
        )
        .unwrap();

        let shown = run_args(dir.path(), &["cart", "show"]).unwrap();
        assert!(shown.contains("2 item(s), total $3.00"));
    }

    #[test]
    fn test_unknown_product_fails() {
        let dir = tempfile::tempdir().unwrap();
        let result = run_args(dir.path(), &["cart", "add", "42"]);
        assert!(matches!(result, Err(CliError::UnknownProduct(_))));
    }

    #[test]
    fn test_cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
