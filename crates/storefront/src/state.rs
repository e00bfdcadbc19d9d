//! Session state handed to the render layer.

use std::sync::Arc;

use tracing::{info, instrument};
use url::Url;

use four_skincare_core::{Product, ProductId};

use crate::cart::{CartChange, CartStore};
use crate::catalog::Catalog;
use crate::config::StorefrontConfig;
use crate::error::{AppError, Result};
use crate::search::SearchSession;
use crate::services::whatsapp::{self, LinkError};
use crate::storage::{FileStorage, Storage};

/// Everything one storefront session needs, owned in one place.
///
/// The render layer holds this explicitly and passes it to whatever draws
/// the page; there are no globals. The catalog is shared via `Arc` so search
/// sessions can hold it too.
pub struct Storefront<S> {
    config: StorefrontConfig,
    catalog: Arc<Catalog>,
    cart: CartStore<S>,
}

impl Storefront<FileStorage> {
    /// Open the session described by `config`: load the catalog and
    /// rehydrate the cart from the configured storage file.
    ///
    /// # Errors
    ///
    /// Returns an error if a configured catalog file cannot be loaded.
    #[instrument(skip_all)]
    pub fn from_config(config: StorefrontConfig) -> Result<Self> {
        let catalog = match &config.catalog_path {
            Some(path) => Catalog::load(path)?,
            None => Catalog::skincare_defaults(),
        };
        let storage = FileStorage::new(&config.storage_path);
        info!(
            storage = %config.storage_path.display(),
            products = catalog.len(),
            "Storefront session opened"
        );
        Ok(Self::new(config, catalog, storage))
    }
}

impl<S: Storage> Storefront<S> {
    /// Assemble a session from its parts.
    pub fn new(config: StorefrontConfig, catalog: Catalog, storage: S) -> Self {
        let cart = CartStore::open(storage, config.currency);
        Self {
            config,
            catalog: Arc::new(catalog),
            cart,
        }
    }

    /// The session configuration.
    #[must_use]
    pub const fn config(&self) -> &StorefrontConfig {
        &self.config
    }

    /// The product catalog.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// The cart.
    #[must_use]
    pub const fn cart(&self) -> &CartStore<S> {
        &self.cart
    }

    /// Mutable access to the cart for index-based quantity changes.
    pub const fn cart_mut(&mut self) -> &mut CartStore<S> {
        &mut self.cart
    }

    /// Look up a product, failing with [`AppError::NotFound`].
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no product has this id.
    pub fn product(&self, id: ProductId) -> Result<&Product> {
        self.catalog
            .get(id)
            .ok_or_else(|| AppError::NotFound(format!("product {id}")))
    }

    /// Add a catalog product to the cart by id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] for an unknown id, or [`AppError::Cart`]
    /// if the cart could not be saved.
    pub fn add_to_cart(&mut self, id: ProductId, quantity: u32) -> Result<CartChange> {
        let product = self
            .catalog
            .get(id)
            .ok_or_else(|| AppError::NotFound(format!("product {id}")))?;
        Ok(self.cart.add_item(product, quantity)?)
    }

    /// A new debounced search over this session's catalog.
    #[must_use]
    pub fn search_session(&self) -> SearchSession {
        SearchSession::new(Arc::clone(&self.catalog), self.config.search_debounce)
    }

    /// The WhatsApp enquiry link for a product.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] for an unknown id and [`AppError::Link`]
    /// if no number is configured.
    pub fn inquiry_link(&self, id: ProductId) -> Result<Url> {
        let product = self.product(id)?;
        let number = self
            .config
            .whatsapp_number
            .as_ref()
            .ok_or(LinkError::MissingNumber)?;
        Ok(whatsapp::product_inquiry_link(number, &product.name)?)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::services::whatsapp::WhatsAppNumber;
    use crate::storage::MemoryStorage;

    fn storefront(config: StorefrontConfig) -> Storefront<MemoryStorage> {
        Storefront::new(config, Catalog::skincare_defaults(), MemoryStorage::new())
    }

    #[test]
    fn test_add_to_cart_by_id() {
        let mut shop = storefront(StorefrontConfig::default());
        shop.add_to_cart(ProductId::new(2), 1).unwrap();
        shop.add_to_cart(ProductId::new(2), 2).unwrap();
        assert_eq!(shop.cart().summary().item_count, 3);
        assert_eq!(shop.cart().len(), 1);
    }

    #[test]
    fn test_add_unknown_product() {
        let mut shop = storefront(StorefrontConfig::default());
        assert!(matches!(
            shop.add_to_cart(ProductId::new(404), 1),
            Err(AppError::NotFound(_))
        ));
        assert!(shop.cart().is_empty());
    }

    #[test]
    fn test_inquiry_link_requires_number() {
        let shop = storefront(StorefrontConfig::default());
        assert!(matches!(
            shop.inquiry_link(ProductId::new(1)),
            Err(AppError::Link(LinkError::MissingNumber))
        ));

        let config = StorefrontConfig {
            whatsapp_number: Some(WhatsAppNumber::parse("923001234567").unwrap()),
            ..StorefrontConfig::default()
        };
        let shop = storefront(config);
        let link = shop.inquiry_link(ProductId::new(1)).unwrap();
        assert!(link.as_str().ends_with("Natural%20Cleanser"));
    }

    #[test]
    fn test_from_config_uses_storage_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = StorefrontConfig {
            storage_path: dir.path().join("storage.json"),
            ..StorefrontConfig::default()
        };

        let mut shop = Storefront::from_config(config.clone()).unwrap();
        shop.add_to_cart(ProductId::new(6), 2).unwrap();

        let reopened = Storefront::from_config(config).unwrap();
        assert_eq!(reopened.cart().items(), shop.cart().items());
    }
}
