//! Persistent cart store.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use rust_decimal::Decimal;
use thiserror::Error;
use tokio::sync::watch;
use tracing::debug;

use crate::{
    domain::cart::models::CartLine,
    storage::{StorageBackend, StorageError},
};

/// Storage key the cart is persisted under.
pub const CART_KEY: &str = "cart";

/// Errors raised by cart store operations.
#[derive(Debug, Error)]
pub enum CartStoreError {
    /// The durable write or read failed; the in-memory cart still reflects
    /// the last successfully persisted state.
    #[error("cart storage failed")]
    Storage(#[from] StorageError),

    /// The stored cart JSON could not be read or written.
    #[error("cart JSON is invalid")]
    Json(#[from] serde_json::Error),
}

/// The canonical shopping cart, persisted write-through to local storage.
///
/// All views share one store instance and observe the same line list; the
/// storage backend is an implementation detail behind it. Mutations are
/// full read-modify-write critical sections: the candidate state is made
/// durable first and only then committed to memory and announced to
/// subscribers, so no observer — including a process restarted after a
/// crash — ever sees a duplicate-key or zero-quantity line.
pub struct CartStore {
    storage: Arc<dyn StorageBackend>,
    lines: Mutex<Vec<CartLine>>,
    watch: watch::Sender<Vec<CartLine>>,
}

impl std::fmt::Debug for CartStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartStore")
            .field("lines", &self.lines)
            .finish_non_exhaustive()
    }
}

impl CartStore {
    /// Open the cart persisted in `storage`, starting empty when nothing
    /// is stored yet.
    ///
    /// # Errors
    ///
    /// Returns an error when storage cannot be read or holds invalid JSON.
    pub fn open(storage: Arc<dyn StorageBackend>) -> Result<Self, CartStoreError> {
        let lines = match storage.read(CART_KEY)? {
            Some(raw) => normalize(serde_json::from_str(&raw)?),
            None => Vec::new(),
        };

        let (watch, _) = watch::channel(lines.clone());

        Ok(Self {
            storage,
            lines: Mutex::new(lines),
            watch,
        })
    }

    /// Add one unit of a product, inserting a new line at quantity 1 when
    /// the product is not in the cart yet.
    ///
    /// A blank product key is malformed input and the call is a no-op.
    ///
    /// # Errors
    ///
    /// Returns an error when the mutation could not be persisted; the cart
    /// is unchanged in that case.
    pub fn add_or_increment(
        &self,
        product_key: &str,
        unit_price: Decimal,
    ) -> Result<(), CartStoreError> {
        if product_key.trim().is_empty() {
            return Ok(());
        }

        self.mutate(|lines| {
            match lines.iter_mut().find(|line| line.product_key == product_key) {
                Some(line) => line.quantity = line.quantity.saturating_add(1),
                None => lines.push(CartLine {
                    product_key: product_key.to_string(),
                    unit_price,
                    quantity: 1,
                }),
            }
        })
    }

    /// Overwrite a line's quantity; `0` removes the line. Idempotent, and
    /// a no-op for products not in the cart.
    ///
    /// # Errors
    ///
    /// Returns an error when the mutation could not be persisted; the cart
    /// is unchanged in that case.
    pub fn set_quantity(&self, product_key: &str, quantity: u32) -> Result<(), CartStoreError> {
        self.mutate(|lines| {
            if quantity == 0 {
                lines.retain(|line| line.product_key != product_key);
            } else if let Some(line) =
                lines.iter_mut().find(|line| line.product_key == product_key)
            {
                line.quantity = quantity;
            }
        })
    }

    /// Remove a line; a no-op when the product is not in the cart.
    ///
    /// # Errors
    ///
    /// Returns an error when the mutation could not be persisted; the cart
    /// is unchanged in that case.
    pub fn remove(&self, product_key: &str) -> Result<(), CartStoreError> {
        self.mutate(|lines| lines.retain(|line| line.product_key != product_key))
    }

    /// Empty the cart. Used after a fully successful checkout.
    ///
    /// # Errors
    ///
    /// Returns an error when the mutation could not be persisted; the cart
    /// is unchanged in that case.
    pub fn clear(&self) -> Result<(), CartStoreError> {
        self.mutate(Vec::clear)
    }

    /// The current lines, in stable insertion order.
    #[must_use]
    pub fn snapshot(&self) -> Vec<CartLine> {
        self.lock().clone()
    }

    /// Total number of units across all lines — the cart badge count.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.lock()
            .iter()
            .fold(0_u32, |count, line| count.saturating_add(line.quantity))
    }

    /// Subscribe to cart changes. The receiver always holds the latest
    /// snapshot; every committed mutation publishes a new one.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Vec<CartLine>> {
        self.watch.subscribe()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<CartLine>> {
        self.lines.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Run one read-modify-write cycle: durable write first, then commit
    /// and notify. Mutations that change nothing skip the write.
    fn mutate(&self, apply: impl FnOnce(&mut Vec<CartLine>)) -> Result<(), CartStoreError> {
        let mut lines = self.lock();

        let mut next = lines.clone();
        apply(&mut next);

        if next == *lines {
            return Ok(());
        }

        let json = serde_json::to_string(&next)?;
        self.storage.write(CART_KEY, &json)?;

        *lines = next;
        self.watch.send_replace(lines.clone());

        Ok(())
    }
}

/// Drop lines a foreign writer may have left in an invalid state: zero
/// quantities and duplicate keys (first occurrence wins).
fn normalize(mut lines: Vec<CartLine>) -> Vec<CartLine> {
    let before = lines.len();

    let mut seen = rustc_hash::FxHashSet::default();
    lines.retain(|line| line.quantity > 0 && seen.insert(line.product_key.clone()));

    if lines.len() != before {
        debug!(
            dropped = before - lines.len(),
            "normalized stored cart lines"
        );
    }

    lines
}
