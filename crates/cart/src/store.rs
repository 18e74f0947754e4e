//! Canonical cart state and its persistence round-trip.
//!
//! The cart store owns the serialized cart value under one fixed key in the
//! injected [`KeyValueStore`]; no other component reads or writes that key.
//! Every operation is one read-modify-write cycle: load the persisted
//! state, apply the pure mutation on [`Cart`], save, and push the result
//! into the page's display sinks. The pure mutations live on `Cart` itself
//! so they stay testable without storage or a UI harness.

use copper_mango_core::ProductName;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use crate::config::CartConfig;
use crate::error::Result;
use crate::notify::{LogNotifier, Notifier};
use crate::storage::KeyValueStore;
use crate::view::ViewSynchronizer;

/// One row in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// Product identity; the stored string is displayed verbatim.
    pub name: ProductName,
    /// Non-negative unit price in the storefront's base currency.
    pub price: Decimal,
    /// Count of units held, always at least 1.
    pub quantity: u32,
}

impl LineItem {
    /// `price x quantity` for this row.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }
}

/// Outcome of a removal attempt.
///
/// Removing an absent item is not an error; the two cases are only
/// distinguished for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoveOutcome {
    /// At least one row matched and was removed.
    Removed,
    /// Nothing matched; the cart is unchanged.
    NotFound,
}

/// Ordered cart contents, first-added item first.
///
/// Invariant: at most one row per normalized product name - a repeated add
/// merges into the existing row instead of appending. Rows always hold
/// `quantity >= 1`; the defined mutation for leaving the cart is whole-item
/// removal, never decrement-to-zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<LineItem>,
}

impl Cart {
    /// An empty cart.
    #[must_use]
    pub const fn empty() -> Self {
        Self { items: Vec::new() }
    }

    /// The rows in insertion order.
    #[must_use]
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Whether the cart holds no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Add one unit of a product.
    ///
    /// If a row with the same normalized name exists its quantity is
    /// incremented; otherwise a new row is appended with the trimmed name
    /// and `quantity = 1`.
    pub fn add(&mut self, name: &str, price: Decimal) {
        if let Some(existing) = self.items.iter_mut().find(|item| item.name.matches(name)) {
            existing.quantity += 1;
        } else {
            self.items.push(LineItem {
                name: ProductName::trimmed(name),
                price,
                quantity: 1,
            });
        }
    }

    /// Remove every row whose normalized name equals the normalized input.
    ///
    /// Matching is full-name equality after trimming both sides; stored
    /// names are not required to be pre-trimmed.
    pub fn remove(&mut self, name: &str) -> RemoveOutcome {
        let before = self.items.len();
        self.items.retain(|item| !item.name.matches(name));
        if self.items.len() < before {
            RemoveOutcome::Removed
        } else {
            RemoveOutcome::NotFound
        }
    }

    /// Sum of all quantities.
    #[must_use]
    pub fn total_quantity(&self) -> u32 {
        self.items.iter().map(|item| item.quantity).sum()
    }

    /// Sum of `price x quantity` over all rows.
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.items.iter().map(LineItem::line_total).sum()
    }

    /// Whether deserialized data satisfies the row invariants
    /// (`quantity >= 1`, non-negative price).
    pub(crate) fn is_well_formed(&self) -> bool {
        self.items
            .iter()
            .all(|item| item.quantity >= 1 && item.price >= Decimal::ZERO)
    }
}

impl FromIterator<LineItem> for Cart {
    /// Collect rows into a cart. Callers are expected to supply rows that
    /// already satisfy the one-row-per-name invariant.
    fn from_iter<I: IntoIterator<Item = LineItem>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

/// Canonical cart state behind the storefront pages.
///
/// Owns the storage handle, the configured key, the page's
/// [`ViewSynchronizer`], and the confirmation [`Notifier`]. The two
/// mutation entry points ([`add_item`](Self::add_item) and
/// [`remove_item`](Self::remove_item)) and the render entry point
/// ([`refresh_views`](Self::refresh_views)) are the only surfaces exposed
/// to the page's event wiring.
pub struct CartStore<S: KeyValueStore> {
    storage: S,
    key: String,
    views: ViewSynchronizer,
    notifier: Box<dyn Notifier>,
}

impl<S: KeyValueStore> CartStore<S> {
    /// Create a store over `storage`, notifying through the default
    /// [`LogNotifier`].
    #[must_use]
    pub fn new(storage: S, config: &CartConfig, views: ViewSynchronizer) -> Self {
        Self::with_notifier(storage, config, views, Box::new(LogNotifier))
    }

    /// Create a store with an explicit notification channel.
    #[must_use]
    pub fn with_notifier(
        storage: S,
        config: &CartConfig,
        views: ViewSynchronizer,
        notifier: Box<dyn Notifier>,
    ) -> Self {
        Self {
            storage,
            key: config.storage_key.clone(),
            views,
            notifier,
        }
    }

    /// Read the persisted cart.
    ///
    /// An absent key yields an empty cart. A present but malformed value
    /// (invalid JSON, or rows violating the shape invariants) is treated as
    /// absence and logged - parse failures never propagate. This is a
    /// boundary-hardening contract: the storage medium is outside the
    /// engine's control.
    ///
    /// # Errors
    ///
    /// Returns `CartError::Storage` if the medium itself could not be read.
    pub fn load(&self) -> Result<Cart> {
        let Some(raw) = self.storage.get(&self.key)? else {
            return Ok(Cart::empty());
        };

        match serde_json::from_str::<Cart>(&raw) {
            Ok(cart) if cart.is_well_formed() => Ok(cart),
            Ok(_) => {
                warn!(key = %self.key, "persisted cart violates shape invariants, starting empty");
                Ok(Cart::empty())
            }
            Err(e) => {
                warn!(key = %self.key, error = %e, "persisted cart is not valid JSON, starting empty");
                Ok(Cart::empty())
            }
        }
    }

    /// Serialize and write the full cart, then synchronize the views:
    /// the counter update runs unconditionally, the list re-render only
    /// when a list target exists in the current context.
    ///
    /// # Errors
    ///
    /// Returns `CartError::Storage` if the write failed. Writes are not
    /// retried; prior persisted state is unaffected.
    pub fn save(&mut self, cart: &Cart) -> Result<()> {
        let raw = serde_json::to_string(cart)?;
        self.storage.set(&self.key, &raw)?;

        self.views.update_counter(cart);
        self.views.render_list(cart);
        Ok(())
    }

    /// Add one unit of a product and persist the result.
    ///
    /// The name is trimmed before matching; a row with the same normalized
    /// name absorbs the add as a quantity increment. Confirms the action to
    /// the visitor and returns the resulting total quantity.
    ///
    /// # Errors
    ///
    /// Returns `CartError::Storage` if the read or write failed.
    #[instrument(skip(self))]
    pub fn add_item(&mut self, name: &str, price: Decimal) -> Result<u32> {
        let name = name.trim();
        let mut cart = self.load()?;
        cart.add(name, price);
        self.save(&cart)?;

        let total = cart.total_quantity();
        self.notifier
            .notify(&format!("1 x {name} added to cart. Cart total items: {total}"));
        Ok(total)
    }

    /// Remove a product by name and persist the result.
    ///
    /// The filtered cart is saved regardless of whether anything matched,
    /// so a removal attempt always rewrites the persisted value; removing
    /// an absent name is a successful no-op. The outcome is logged and
    /// returned for diagnostics.
    ///
    /// # Errors
    ///
    /// Returns `CartError::Storage` if the read or write failed.
    #[instrument(skip(self))]
    pub fn remove_item(&mut self, name: &str) -> Result<RemoveOutcome> {
        let name = name.trim();
        let mut cart = self.load()?;

        let outcome = cart.remove(name);
        match outcome {
            RemoveOutcome::Removed => {
                debug!(product = name, remaining = cart.items().len(), "removed item from cart");
            }
            RemoveOutcome::NotFound => {
                debug!(product = name, "item not in cart, nothing removed");
            }
        }

        self.save(&cart)?;
        self.notifier.notify(&format!("\"{name}\" has been removed."));
        Ok(outcome)
    }

    /// Total quantity across the persisted cart. Pure query, no write.
    ///
    /// # Errors
    ///
    /// Returns `CartError::Storage` if the medium could not be read.
    pub fn total_quantity(&self) -> Result<u32> {
        Ok(self.load()?.total_quantity())
    }

    /// Subtotal across the persisted cart. Pure query, no write.
    ///
    /// # Errors
    ///
    /// Returns `CartError::Storage` if the medium could not be read.
    pub fn subtotal(&self) -> Result<Decimal> {
        Ok(self.load()?.subtotal())
    }

    /// Page-load entry point: push the persisted state into every sink
    /// present, without mutating anything.
    ///
    /// # Errors
    ///
    /// Returns `CartError::Storage` if the medium could not be read.
    pub fn refresh_views(&mut self) -> Result<()> {
        let cart = self.load()?;
        self.views.update_counter(&cart);
        self.views.render_list(&cart);
        Ok(())
    }
}
