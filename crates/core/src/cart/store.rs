//! The cart store.

use rust_decimal::Decimal;

use super::item::LineItem;
use super::slot::KeyValueSlot;
use crate::types::ProductId;

/// Fixed slot key under which the cart blob is stored.
pub const CART_SLOT_KEY: &str = "cart";

/// Single source of truth for one visitor's cart.
///
/// The store owns its item list and a handle to the slot it persists to.
/// Mutations take `&mut self`; there is exactly one writer per store.
///
/// No operation returns an error. Storage failures are logged and the
/// in-memory list stays authoritative for the rest of the session.
#[derive(Debug)]
pub struct CartStore<S> {
    slot: S,
    items: Vec<LineItem>,
    loaded: bool,
}

impl<S: KeyValueSlot> CartStore<S> {
    /// Create an empty, not-yet-loaded store over `slot`.
    #[must_use]
    pub const fn new(slot: S) -> Self {
        Self {
            slot,
            items: Vec::new(),
            loaded: false,
        }
    }

    /// Create a store and immediately [`load`](Self::load) it.
    #[must_use]
    pub fn open(slot: S) -> Self {
        let mut store = Self::new(slot);
        store.load();
        store
    }

    /// Read the persisted snapshot into memory.
    ///
    /// - No snapshot: the item list is left as it is.
    /// - Unreadable or malformed snapshot: logged, cart starts empty.
    /// - Valid snapshot: replaces the item list. Zero-quantity and
    ///   negative-price entries are dropped, repeated IDs are merged, and
    ///   lines that would push the total past what a `Decimal` holds are
    ///   dropped, so a hand-edited blob cannot break the store's invariants.
    ///
    /// Marks the store as loaded in every case. Only the first call reads;
    /// later calls do nothing.
    pub fn load(&mut self) {
        if self.loaded {
            return;
        }

        match self.slot.get(CART_SLOT_KEY) {
            Ok(None) => {}
            Ok(Some(raw)) => match serde_json::from_str::<Vec<LineItem>>(&raw) {
                Ok(items) => self.items = normalize(items),
                Err(e) => {
                    tracing::warn!(error = %e, "Failed to parse stored cart, starting empty");
                    self.items.clear();
                }
            },
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read stored cart, starting empty");
                self.items.clear();
            }
        }

        self.loaded = true;
    }

    /// Add `item`, merging with an existing line of the same ID.
    ///
    /// When the ID is already present only the quantity changes; the stored
    /// name, price, slug, and image are kept. New IDs are appended, so the
    /// list keeps insertion order. Items with a zero quantity are ignored, as
    /// are adds that would make the cart total overflow.
    pub fn add_item(&mut self, item: LineItem) {
        if item.quantity == 0 {
            tracing::debug!(id = %item.id, "Ignoring add with zero quantity");
            return;
        }

        if !merge_line(&mut self.items, item) {
            return;
        }

        self.persist();
    }

    /// Remove the line with `id`. Unknown IDs are a no-op.
    pub fn remove_item(&mut self, id: &str) {
        self.items.retain(|i| i.id != id);
        self.persist();
    }

    /// Set the quantity of the line with `id`.
    ///
    /// A quantity of zero or less removes the line. Unknown IDs are a no-op.
    /// Quantities above `u32::MAX` are clamped; a quantity whose line total
    /// would overflow the cart total leaves the line unchanged.
    pub fn update_quantity(&mut self, id: &str, quantity: i64) {
        if quantity <= 0 {
            self.remove_item(id);
            return;
        }

        let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
        let Some(price) = self.get(id).map(|i| i.price) else {
            return;
        };
        if total_with(&self.items, id, price, quantity).is_none() {
            tracing::warn!(id, quantity, "Ignoring quantity that overflows the cart total");
            return;
        }
        if let Some(item) = self.items.iter_mut().find(|i| i.id == id) {
            item.quantity = quantity;
        }

        self.persist();
    }

    /// Remove every line.
    pub fn clear_cart(&mut self) {
        self.items.clear();
        self.persist();
    }

    /// Write the full item list to the slot, if the store has been loaded.
    fn persist(&self) {
        if !self.loaded {
            return;
        }

        let encoded = match serde_json::to_string(&self.items) {
            Ok(encoded) => encoded,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to encode cart");
                return;
            }
        };

        if let Err(e) = self.slot.set(CART_SLOT_KEY, &encoded) {
            tracing::warn!(error = %e, "Failed to persist cart, keeping in-memory state");
        }
    }
}

impl<S> CartStore<S> {
    /// Lines in insertion order.
    #[must_use]
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Look up a line by product ID.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&LineItem> {
        self.items.iter().find(|i| i.id == id)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Whether [`load`](Self::load) has run.
    #[must_use]
    pub const fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Total number of units across all lines.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|i| u64::from(i.quantity)).sum()
    }

    /// Sum of `price × quantity` across all lines.
    ///
    /// Saturates rather than panicking; the store never admits lines whose
    /// sum would overflow, so in practice the result is exact.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.items
            .iter()
            .map(LineItem::line_total)
            .fold(Decimal::ZERO, Decimal::saturating_add)
    }

    /// The order summary shown on the checkout page.
    #[must_use]
    pub fn summary(&self) -> CheckoutSummary {
        if self.items.is_empty() {
            return CheckoutSummary::Empty;
        }

        CheckoutSummary::Ready {
            lines: self
                .items
                .iter()
                .map(|item| CheckoutLine {
                    id: item.id.clone(),
                    name: item.name.clone(),
                    quantity: item.quantity,
                    unit_price: item.price,
                    line_total: item.line_total(),
                })
                .collect(),
            item_count: self.item_count(),
            total: self.total(),
        }
    }

    /// Borrow the underlying slot.
    #[must_use]
    pub const fn slot(&self) -> &S {
        &self.slot
    }

    /// Consume the store, returning its lines.
    #[must_use]
    pub fn into_items(self) -> Vec<LineItem> {
        self.items
    }
}

/// What checkout has to show for the current cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckoutSummary {
    /// Nothing to check out; the page shows the empty-cart state.
    Empty,
    /// Read-only order summary.
    Ready {
        lines: Vec<CheckoutLine>,
        item_count: u64,
        total: Decimal,
    },
}

impl CheckoutSummary {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }
}

/// One row of the checkout order summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutLine {
    pub id: ProductId,
    pub name: String,
    pub quantity: u32,
    pub unit_price: Decimal,
    pub line_total: Decimal,
}

fn normalize(items: Vec<LineItem>) -> Vec<LineItem> {
    let mut merged: Vec<LineItem> = Vec::with_capacity(items.len());
    for item in items {
        if item.quantity == 0 || item.price.is_sign_negative() {
            tracing::warn!(id = %item.id, "Dropping invalid stored cart line");
            continue;
        }
        merge_line(&mut merged, item);
    }
    merged
}

/// Append `item` or add its quantity to the line with the same ID.
///
/// Returns `false`, leaving `items` untouched, when the resulting cart total
/// would not fit in a `Decimal`.
fn merge_line(items: &mut Vec<LineItem>, item: LineItem) -> bool {
    let (price, quantity) = match items.iter().find(|i| i.id == item.id) {
        Some(existing) => (
            existing.price,
            existing.quantity.saturating_add(item.quantity),
        ),
        None => (item.price, item.quantity),
    };

    if total_with(items, item.id.as_str(), price, quantity).is_none() {
        tracing::warn!(id = %item.id, quantity, "Dropping cart line that overflows the total");
        return false;
    }

    if let Some(existing) = items.iter_mut().find(|i| i.id == item.id) {
        existing.quantity = quantity;
    } else {
        items.push(item);
    }
    true
}

/// Cart total if the line with `id` had `price` and `quantity`, or `None` on
/// overflow.
fn total_with(items: &[LineItem], id: &str, price: Decimal, quantity: u32) -> Option<Decimal> {
    let line = price.checked_mul(Decimal::from(quantity))?;
    items
        .iter()
        .filter(|i| i.id != id)
        .try_fold(line, |acc, i| acc.checked_add(i.checked_line_total()?))
}
