//! Rapid Sites Core - Shared types and cart logic.
//!
//! This crate provides the domain pieces used across all Rapid Sites components:
//! - `storefront` - Public-facing marketing site and demo store
//! - `cli` - Command-line cart and catalog tools
//!
//! # Architecture
//!
//! The core crate contains types, traits, and pure logic only - no network
//! access and no filesystem access. Durable storage is abstracted behind
//! [`KeyValueSlot`], so the same [`CartStore`] runs against a browser session
//! in the storefront and against a JSON file in the CLI.
//!
//! # Modules
//!
//! - [`cart`] - The cart store, line items, and the key-value slot contract
//! - [`catalog`] - The read-only product catalog (demo data)
//! - [`types`] - Newtype wrappers for product IDs, prices, emails, products,
//!   and contact submissions

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod types;

pub use cart::{
    CART_SLOT_KEY, CartStore, CheckoutLine, CheckoutSummary, KeyValueSlot, LineItem, MemorySlot,
    SlotError,
};
pub use catalog::Catalog;
pub use types::*;
