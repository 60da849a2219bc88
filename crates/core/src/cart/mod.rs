//! Shopping cart: line items, the cart store, and its storage contract.
//!
//! # Lifecycle
//!
//! ```text
//! CartStore::new(slot)  ->  load()  ->  add_item / remove_item /
//!     (uninitialized)        (ready)    update_quantity / clear_cart
//! ```
//!
//! Every mutation in the ready state writes the full item list back to the
//! slot it was loaded from. Mutations made before `load()` only touch memory,
//! so an empty default can never overwrite a cart that has not been read yet.

mod item;
mod slot;
mod store;

pub use item::LineItem;
pub use slot::{KeyValueSlot, MemorySlot, SlotError};
pub use store::{CART_SLOT_KEY, CartStore, CheckoutLine, CheckoutSummary};
