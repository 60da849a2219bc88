//! Domain models for storefront.

pub mod session;

pub use session::{CartNotice, keys as session_keys};
