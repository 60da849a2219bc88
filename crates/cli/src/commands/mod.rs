//! Command implementations.
//!
//! Commands write their human-readable output to a caller-supplied writer so
//! that they can be exercised in tests.

pub mod cart;
pub mod catalog;
