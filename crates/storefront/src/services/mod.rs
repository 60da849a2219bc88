//! Business logic services for storefront.
//!
//! # Services
//!
//! - `cart` - Session-backed cart store
//! - `email` - Contact form delivery (Resend, or log-only in development)

pub mod cart;
pub mod email;

pub use cart::SessionCart;
pub use email::{ContactEmail, ContactMailer, LogMailer, MailerError, ResendMailer};
