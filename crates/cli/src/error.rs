//! CLI error type.

use thiserror::Error;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CliError {
    /// No catalog product has this ID.
    #[error("Unknown product: {0}")]
    UnknownProduct(String),

    /// The product exists but has no stock.
    #[error("{0} is out of stock")]
    OutOfStock(String),

    /// Writing command output failed.
    #[error("Output error: {0}")]
    Io(#[from] std::io::Error),
}
