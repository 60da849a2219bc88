//! Session-backed cart.
//!
//! The visitor's session is the cart's durable slot. Each request copies the
//! stored blob into a [`MemorySlot`], runs a [`CartStore`] over it, and, for
//! requests that mutate the cart, writes the slot back into the session.
//! Concurrent requests from the same visitor are last-write-wins.

use axum::extract::FromRequestParts;
use axum::http::{StatusCode, request::Parts};
use tower_sessions::Session;

use rapid_sites_core::{CART_SLOT_KEY, CartStore, MemorySlot};

use crate::models::{CartNotice, session_keys};

/// A loaded cart plus the session it came from.
pub struct SessionCart {
    session: Session,
    store: CartStore<MemorySlot>,
}

impl SessionCart {
    /// Load the cart stored in `session`.
    ///
    /// A session read failure is logged and yields an empty cart.
    pub async fn load(session: Session) -> Self {
        let slot = match session.get::<String>(session_keys::CART).await {
            Ok(Some(raw)) => MemorySlot::with_value(CART_SLOT_KEY, raw),
            Ok(None) => MemorySlot::new(),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read cart from session");
                MemorySlot::new()
            }
        };

        Self {
            session,
            store: CartStore::open(slot),
        }
    }

    /// The loaded cart.
    #[must_use]
    pub const fn store(&self) -> &CartStore<MemorySlot> {
        &self.store
    }

    /// The loaded cart, for mutation. Call [`save`](Self::save) afterwards.
    pub fn store_mut(&mut self) -> &mut CartStore<MemorySlot> {
        &mut self.store
    }

    /// Write the cart back into the session.
    ///
    /// Failures are logged, not returned: the response still reflects the
    /// in-memory cart.
    pub async fn save(&self) {
        let result = match self.store.slot().snapshot(CART_SLOT_KEY) {
            Some(raw) => self.session.insert(session_keys::CART, raw).await,
            None => self
                .session
                .remove::<String>(session_keys::CART)
                .await
                .map(|_| ()),
        };

        if let Err(e) = result {
            tracing::warn!(error = %e, "Failed to persist cart to session");
        }
    }

    /// Queue a notice for the next page render.
    pub async fn set_notice(&self, notice: &CartNotice) {
        if let Err(e) = self.session.insert(session_keys::CART_NOTICE, notice).await {
            tracing::warn!(error = %e, "Failed to store cart notice");
        }
    }

    /// Remove and return the pending notice, if any.
    pub async fn take_notice(&self) -> Option<CartNotice> {
        self.session
            .remove::<CartNotice>(session_keys::CART_NOTICE)
            .await
            .unwrap_or_else(|e| {
                tracing::warn!(error = %e, "Failed to read cart notice");
                None
            })
    }
}

impl<S> FromRequestParts<S> for SessionCart
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, &'static str);

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let session = Session::from_request_parts(parts, state).await?;
        Ok(Self::load(session).await)
    }
}
