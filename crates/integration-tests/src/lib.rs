//! Integration tests for the Four Skincare storefront.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p four-skincare-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_scenarios` - cart mutations, persistence and rehydration
//! - `catalog_queries` - category tabs, search and catalog files
//! - `debounced_search` - search-as-you-type under paused time
//!
//! This crate only holds shared fixtures; the tests live in `tests/`.

use rust_decimal::Decimal;
use tempfile::TempDir;

use four_skincare_core::{Badge, Category, CurrencyCode, Product, ProductId};
use four_skincare_storefront::cart::CartStore;
use four_skincare_storefront::catalog::Catalog;
use four_skincare_storefront::storage::{FileStorage, MemoryStorage};

/// A bare product with the given id, name, price and category.
#[must_use]
pub fn product(id: i32, name: &str, price: i64, category: Category) -> Product {
    Product {
        id: ProductId::new(id),
        name: name.to_owned(),
        price: Decimal::new(price, 0),
        category,
        image: format!("images/product-{id}.jpg"),
        description: String::new(),
        rating: None,
        badge: Badge::new(""),
    }
}

/// The built-in six-product catalog.
#[must_use]
pub fn catalog() -> Catalog {
    Catalog::skincare_defaults()
}

/// Look up a product from the built-in catalog.
///
/// # Panics
///
/// Panics if `id` is not in the built-in catalog.
#[must_use]
#[allow(clippy::expect_used)]
pub fn product_by_id(id: i32) -> Product {
    catalog()
        .get(ProductId::new(id))
        .cloned()
        .expect("product in built-in catalog")
}

/// An empty cart over fresh in-memory storage.
///
/// The storage handle shares its map with the cart, so tests can inspect
/// or seed what the cart persisted.
#[must_use]
pub fn memory_cart() -> (CartStore<MemoryStorage>, MemoryStorage) {
    let storage = MemoryStorage::new();
    let cart = CartStore::open(storage.clone(), CurrencyCode::PKR);
    (cart, storage)
}

/// File-backed storage in a fresh temporary directory.
///
/// Keep the returned [`TempDir`] alive for as long as the storage is used.
///
/// # Panics
///
/// Panics if the temporary directory cannot be created.
#[must_use]
#[allow(clippy::expect_used)]
pub fn temp_file_storage() -> (TempDir, FileStorage) {
    let dir = tempfile::tempdir().expect("create temp dir");
    let storage = FileStorage::new(dir.path().join("storage.json"));
    (dir, storage)
}
