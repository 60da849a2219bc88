//! Durable key-value slot contract.
//!
//! The cart persists itself as a single string value under a fixed key.
//! Implementations can back the slot with a browser session, a file on disk,
//! or plain memory; the cart store only ever calls `get`, `set`, and `clear`.

use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::{Mutex, PoisonError};

use thiserror::Error;

/// Errors raised by a slot backend.
#[derive(Debug, Error)]
pub enum SlotError {
    /// Reading or writing the underlying medium failed.
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The backend refused the operation (quota exceeded, store closed, ...).
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// A string-valued key-value store that outlives a single page load.
///
/// All methods take `&self`; implementations use interior mutability where
/// they need it.
pub trait KeyValueSlot: Debug {
    /// Read the value stored under `key`.
    ///
    /// Returns `Ok(None)` if nothing is stored.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, SlotError>;

    /// Overwrite the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written.
    fn set(&self, key: &str, value: &str) -> Result<(), SlotError>;

    /// Remove the value stored under `key`. Missing keys are not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written.
    fn clear(&self, key: &str) -> Result<(), SlotError>;
}

impl<T: KeyValueSlot + ?Sized> KeyValueSlot for &T {
    fn get(&self, key: &str) -> Result<Option<String>, SlotError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), SlotError> {
        (**self).set(key, value)
    }

    fn clear(&self, key: &str) -> Result<(), SlotError> {
        (**self).clear(key)
    }
}

/// In-memory slot.
///
/// Used in tests, and by the storefront as a per-request copy of the
/// session-held cart blob.
#[derive(Debug, Default)]
pub struct MemorySlot {
    values: Mutex<HashMap<String, String>>,
}

impl MemorySlot {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a slot that already holds `value` under `key`.
    #[must_use]
    pub fn with_value(key: &str, value: impl Into<String>) -> Self {
        let slot = Self::new();
        slot.lock().insert(key.to_owned(), value.into());
        slot
    }

    /// Read a value without going through the fallible trait method.
    #[must_use]
    pub fn snapshot(&self, key: &str) -> Option<String> {
        self.lock().get(key).cloned()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        // A poisoned map is still a valid map.
        self.values.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl KeyValueSlot for MemorySlot {
    fn get(&self, key: &str) -> Result<Option<String>, SlotError> {
        Ok(self.snapshot(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), SlotError> {
        self.lock().insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn clear(&self, key: &str) -> Result<(), SlotError> {
        self.lock().remove(key);
        Ok(())
    }
}
