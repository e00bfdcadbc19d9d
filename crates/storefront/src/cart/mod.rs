//! The persisted shopping cart.
//!
//! [`CartStore`] owns an ordered list of [`CartLineItem`]s (insertion order is
//! display order) and writes the whole list to a single storage key after
//! every mutation. It is rehydrated once, in [`CartStore::open`].
//!
//! # Invariants
//!
//! - Every line has `quantity >= 1`. A decrement that would reach zero removes
//!   the line instead.
//! - Lines are keyed by product id; adding a product already in the cart
//!   increments the existing line.
//! - Totals are computed from the current lines on every call to
//!   [`CartStore::summary`] and never stored.
//!
//! # Failure handling
//!
//! A stored value that is missing, not JSON, or violates the invariants above
//! rehydrates as an empty cart. Index-based mutations outside the current
//! bounds are no-ops. Nothing here panics or poisons the session.

mod line_item;
mod summary;

use std::collections::HashSet;

use thiserror::Error;
use tracing::{debug, info, instrument, warn};

use four_skincare_core::{CurrencyCode, Product, ProductId};

use crate::error::add_breadcrumb;
use crate::storage::{Storage, StorageError};

pub use line_item::CartLineItem;
pub use summary::CartSummary;

/// The storage key holding the serialized cart.
pub const CART_STORAGE_KEY: &str = "cart";

/// Errors from cart persistence.
#[derive(Debug, Error)]
pub enum CartError {
    /// The mutation was applied in memory but could not be written.
    #[error("failed to persist cart: {0}")]
    Persist(#[from] StorageError),

    /// The cart could not be serialized.
    #[error("failed to encode cart: {0}")]
    Encode(#[from] serde_json::Error),
}

/// What a mutation did, for the render layer to react to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartChange {
    /// A new line was appended at `index`.
    Added {
        index: usize,
        id: ProductId,
        quantity: u32,
    },
    /// An existing line's quantity went up.
    Incremented {
        index: usize,
        id: ProductId,
        quantity: u32,
    },
    /// An existing line's quantity went down and stayed positive.
    Decremented {
        index: usize,
        id: ProductId,
        quantity: u32,
    },
    /// The line at `index` was removed; later lines shifted down by one.
    Removed { index: usize, id: ProductId },
    /// Nothing changed (out-of-range index or zero quantity).
    Unchanged,
}

impl CartChange {
    /// Whether the cart was modified.
    #[must_use]
    pub const fn is_changed(&self) -> bool {
        !matches!(self, Self::Unchanged)
    }
}

/// Why a stored cart was discarded during rehydration.
#[derive(Debug, Error)]
enum RehydrateError {
    #[error("not a cart document: {0}")]
    Json(#[from] serde_json::Error),
    #[error("line {index} has zero quantity")]
    ZeroQuantity { index: usize },
    #[error("line {index} has a negative price")]
    NegativePrice { index: usize },
    #[error("product {0} appears on more than one line")]
    DuplicateId(ProductId),
}

fn decode(raw: &str) -> Result<Vec<CartLineItem>, RehydrateError> {
    let items: Vec<CartLineItem> = serde_json::from_str(raw)?;
    let mut seen = HashSet::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        if item.quantity == 0 {
            return Err(RehydrateError::ZeroQuantity { index });
        }
        if item.price.is_sign_negative() && !item.price.is_zero() {
            return Err(RehydrateError::NegativePrice { index });
        }
        if !seen.insert(item.id) {
            return Err(RehydrateError::DuplicateId(item.id));
        }
    }
    Ok(items)
}

/// The cart for one storefront session.
///
/// Callers hold the store explicitly and pass it where it is needed; there is
/// no global cart. The store holds no subscription mechanism, so the render
/// layer re-reads [`CartStore::items`] and [`CartStore::summary`] after every
/// mutation.
#[derive(Debug)]
pub struct CartStore<S> {
    storage: S,
    currency: CurrencyCode,
    items: Vec<CartLineItem>,
}

impl<S: Storage> CartStore<S> {
    /// Open the cart kept in `storage`, rehydrating any saved lines.
    ///
    /// Never fails: an absent, unreadable or malformed stored cart yields an
    /// empty cart.
    #[instrument(skip_all)]
    pub fn open(storage: S, currency: CurrencyCode) -> Self {
        let items = Self::rehydrate(&storage);
        info!(lines = items.len(), "Cart rehydrated");
        Self {
            storage,
            currency,
            items,
        }
    }

    fn rehydrate(storage: &S) -> Vec<CartLineItem> {
        let raw = match storage.get(CART_STORAGE_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                warn!(error = %e, "Cart storage unreadable, starting with an empty cart");
                return Vec::new();
            }
        };

        decode(&raw).unwrap_or_else(|e| {
            warn!(error = %e, "Discarding malformed stored cart");
            Vec::new()
        })
    }

    /// Write the full line list under [`CART_STORAGE_KEY`].
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the storage write fails.
    pub fn persist(&self) -> Result<(), CartError> {
        let json = serde_json::to_string(&self.items)?;
        self.storage.set(CART_STORAGE_KEY, &json)?;
        debug!(lines = self.items.len(), "Cart persisted");
        Ok(())
    }

    fn commit(&self, change: CartChange) -> Result<CartChange, CartError> {
        if change.is_changed() {
            let detail = format!("{change:?}");
            add_breadcrumb("cart", "Cart updated", Some(&[("change", detail.as_str())]));
            self.persist()?;
        }
        Ok(change)
    }

    /// Add `quantity` units of `product`.
    ///
    /// Increments the existing line for the product, or appends a new one.
    /// A zero quantity changes nothing.
    ///
    /// # Errors
    ///
    /// Returns [`CartError`] if the updated cart cannot be persisted. The
    /// in-memory cart keeps the change either way.
    #[instrument(skip(self, product), fields(product_id = %product.id))]
    pub fn add_item(&mut self, product: &Product, quantity: u32) -> Result<CartChange, CartError> {
        if quantity == 0 {
            return Ok(CartChange::Unchanged);
        }

        let change = if let Some((index, line)) = self
            .items
            .iter_mut()
            .enumerate()
            .find(|(_, line)| line.id == product.id)
        {
            line.quantity = line.quantity.saturating_add(quantity);
            CartChange::Incremented {
                index,
                id: line.id,
                quantity: line.quantity,
            }
        } else {
            self.items
                .push(CartLineItem::from_product(product, quantity));
            CartChange::Added {
                index: self.items.len() - 1,
                id: product.id,
                quantity,
            }
        };

        self.commit(change)
    }

    /// Increase the quantity of the line at `index` by one.
    ///
    /// # Errors
    ///
    /// Returns [`CartError`] if the updated cart cannot be persisted.
    pub fn increment_item(&mut self, index: usize) -> Result<CartChange, CartError> {
        let change = self
            .items
            .get_mut(index)
            .map_or(CartChange::Unchanged, |line| {
                line.quantity = line.quantity.saturating_add(1);
                CartChange::Incremented {
                    index,
                    id: line.id,
                    quantity: line.quantity,
                }
            });
        self.commit(change)
    }

    /// Decrease the quantity of the line at `index` by one, removing the line
    /// when it would reach zero.
    ///
    /// # Errors
    ///
    /// Returns [`CartError`] if the updated cart cannot be persisted.
    pub fn decrement_item(&mut self, index: usize) -> Result<CartChange, CartError> {
        let change = match self.items.get_mut(index) {
            None => CartChange::Unchanged,
            Some(line) if line.quantity > 1 => {
                line.quantity -= 1;
                CartChange::Decremented {
                    index,
                    id: line.id,
                    quantity: line.quantity,
                }
            }
            Some(_) => {
                let line = self.items.remove(index);
                CartChange::Removed { index, id: line.id }
            }
        };
        self.commit(change)
    }

    /// Remove the line at `index` regardless of its quantity.
    ///
    /// # Errors
    ///
    /// Returns [`CartError`] if the updated cart cannot be persisted.
    pub fn remove_item(&mut self, index: usize) -> Result<CartChange, CartError> {
        let change = if index < self.items.len() {
            let line = self.items.remove(index);
            CartChange::Removed { index, id: line.id }
        } else {
            CartChange::Unchanged
        };
        self.commit(change)
    }

    /// Totals computed from the current lines.
    #[must_use]
    pub fn summary(&self) -> CartSummary {
        CartSummary::compute(&self.items, self.currency)
    }

    /// Current lines in display order.
    #[must_use]
    pub fn items(&self) -> &[CartLineItem] {
        &self.items
    }

    /// The line at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&CartLineItem> {
        self.items.get(index)
    }

    /// Number of lines (not units).
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Currency used for totals.
    #[must_use]
    pub const fn currency(&self) -> CurrencyCode {
        self.currency
    }

    /// The storage backend.
    #[must_use]
    pub const fn storage(&self) -> &S {
        &self.storage
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;
    use crate::catalog::Catalog;
    use crate::storage::MemoryStorage;

    fn product(id: i32) -> Product {
        Catalog::skincare_defaults()
            .get(ProductId::new(id))
            .cloned()
            .unwrap()
    }

    fn empty_cart() -> CartStore<MemoryStorage> {
        CartStore::open(MemoryStorage::new(), CurrencyCode::PKR)
    }

    /// Storage whose writes always fail.
    struct ReadOnlyStorage;

    impl Storage for ReadOnlyStorage {
        fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Ok(None)
        }

        fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Poisoned)
        }

        fn remove(&self, _key: &str) -> Result<(), StorageError> {
            Err(StorageError::Poisoned)
        }
    }

    #[test]
    fn test_add_same_product_merges() {
        let mut cart = empty_cart();
        let serum = product(2);

        let first = cart.add_item(&serum, 1).unwrap();
        assert!(matches!(first, CartChange::Added { index: 0, .. }));
        let second = cart.add_item(&serum, 1).unwrap();
        assert!(matches!(second, CartChange::Incremented { index: 0, quantity: 2, .. }));

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.items()[0].quantity, 2);
        assert_eq!(cart.summary().item_count, 2);
    }

    #[test]
    fn test_same_name_different_id_does_not_merge() {
        let mut cart = empty_cart();
        let original = product(1);
        let mut lookalike = original.clone();
        lookalike.id = ProductId::new(100);
        lookalike.price = Decimal::new(99, 0);

        cart.add_item(&original, 1).unwrap();
        cart.add_item(&lookalike, 1).unwrap();
        assert_eq!(cart.len(), 2);
        assert_eq!(cart.summary().subtotal.amount(), Decimal::new(124, 0));
    }

    #[test]
    fn test_add_zero_quantity_is_unchanged() {
        let mut cart = empty_cart();
        assert_eq!(cart.add_item(&product(1), 0).unwrap(), CartChange::Unchanged);
        assert!(cart.is_empty());
        assert!(cart.storage().is_empty());
    }

    #[test]
    fn test_decrement_last_unit_removes_line() {
        let mut cart = empty_cart();
        cart.add_item(&product(5), 1).unwrap();

        let change = cart.decrement_item(0).unwrap();
        assert_eq!(change, CartChange::Removed {
            index: 0,
            id: ProductId::new(5)
        });
        assert!(cart.is_empty());
        assert_eq!(cart.summary().item_count, 0);
    }

    #[test]
    fn test_decrement_keeps_positive_quantity() {
        let mut cart = empty_cart();
        cart.add_item(&product(5), 3).unwrap();
        let change = cart.decrement_item(0).unwrap();
        assert!(matches!(change, CartChange::Decremented { quantity: 2, .. }));
    }

    #[test]
    fn test_out_of_range_index_is_noop() {
        let mut cart = empty_cart();
        cart.add_item(&product(1), 1).unwrap();

        assert_eq!(cart.increment_item(4).unwrap(), CartChange::Unchanged);
        assert_eq!(cart.decrement_item(1).unwrap(), CartChange::Unchanged);
        assert_eq!(cart.remove_item(9).unwrap(), CartChange::Unchanged);
        assert_eq!(cart.items()[0].quantity, 1);
    }

    #[test]
    fn test_remove_shifts_indices() {
        let mut cart = empty_cart();
        cart.add_item(&product(1), 1).unwrap();
        cart.add_item(&product(2), 4).unwrap();
        cart.add_item(&product(3), 1).unwrap();

        cart.remove_item(1).unwrap();
        let ids: Vec<_> = cart.items().iter().map(|l| l.id.as_i32()).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn test_increment_saturates() {
        let mut cart = empty_cart();
        cart.add_item(&product(1), u32::MAX).unwrap();
        cart.increment_item(0).unwrap();
        cart.add_item(&product(1), 5).unwrap();
        assert_eq!(cart.items()[0].quantity, u32::MAX);
    }

    #[test]
    fn test_every_mutation_persists() {
        let storage = MemoryStorage::new();
        let mut cart = CartStore::open(storage.clone(), CurrencyCode::PKR);

        cart.add_item(&product(2), 2).unwrap();
        let saved = storage.get(CART_STORAGE_KEY).unwrap().unwrap();
        assert_eq!(decode(&saved).unwrap(), cart.items());

        cart.decrement_item(0).unwrap();
        let saved = storage.get(CART_STORAGE_KEY).unwrap().unwrap();
        assert_eq!(decode(&saved).unwrap()[0].quantity, 1);

        cart.remove_item(0).unwrap();
        assert_eq!(storage.get(CART_STORAGE_KEY).unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn test_rehydrate_round_trip() {
        let storage = MemoryStorage::new();
        let mut cart = CartStore::open(storage.clone(), CurrencyCode::PKR);
        cart.add_item(&product(4), 2).unwrap();
        cart.add_item(&product(6), 1).unwrap();

        let reopened = CartStore::open(storage, CurrencyCode::PKR);
        assert_eq!(reopened.items(), cart.items());
        assert_eq!(reopened.summary(), cart.summary());
    }

    #[test]
    fn test_rehydrate_accepts_numeric_prices() {
        let storage = MemoryStorage::new();
        storage
            .set(
                CART_STORAGE_KEY,
                r#"[{"id":2,"name":"Hydrating Serum","price":45,"image":"a.jpg","quantity":3}]"#,
            )
            .unwrap();
        let cart = CartStore::open(storage, CurrencyCode::PKR);
        assert_eq!(cart.summary().subtotal.amount(), Decimal::new(135, 0));
    }

    #[test]
    fn test_malformed_values_rehydrate_empty() {
        let cases = [
            "not json",
            "{\"id\": 1}",
            "[{\"name\":\"Detox Mask\",\"price\":35,\"image\":\"\",\"quantity\":1}]",
            r#"[{"id":1,"name":"A","price":1,"image":"","quantity":0}]"#,
            r#"[{"id":1,"name":"A","price":1,"image":"","quantity":-2}]"#,
            r#"[{"id":1,"name":"A","price":-1,"image":"","quantity":1}]"#,
            r#"[{"id":1,"name":"A","price":1,"image":"","quantity":1},
                {"id":1,"name":"A","price":1,"image":"","quantity":2}]"#,
        ];
        for raw in cases {
            let storage = MemoryStorage::new();
            storage.set(CART_STORAGE_KEY, raw).unwrap();
            let cart = CartStore::open(storage, CurrencyCode::PKR);
            assert!(cart.is_empty(), "expected empty cart for {raw}");
        }
    }

    #[test]
    fn test_persist_failure_keeps_in_memory_change() {
        let mut cart = CartStore::open(ReadOnlyStorage, CurrencyCode::PKR);
        let result = cart.add_item(&product(1), 1);
        assert!(matches!(result, Err(CartError::Persist(_))));
        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn test_unchanged_does_not_write() {
        let mut cart = CartStore::open(ReadOnlyStorage, CurrencyCode::PKR);
        assert_eq!(cart.remove_item(0).unwrap(), CartChange::Unchanged);
    }
}
