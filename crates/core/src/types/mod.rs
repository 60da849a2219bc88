//! Core types for Rapid Sites.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod contact;
pub mod email;
pub mod id;
pub mod price;
pub mod product;

pub use contact::{ContactSubmission, FieldError, MIN_MESSAGE_CHARS, ValidContact};
pub use email::{Email, EmailError};
pub use id::ProductId;
pub use price::{CurrencyCode, Price};
pub use product::Product;
