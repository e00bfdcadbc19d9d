//! Cart line items and their persisted shape.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use four_skincare_core::{Product, ProductId};

/// One product in the cart with its quantity.
///
/// Name, unit price and image are copied from the catalog when the line is
/// created so the cart renders without a catalog lookup. Identity is the
/// product id alone: two products sharing a name never merge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLineItem {
    /// Catalog product id.
    pub id: ProductId,
    /// Product name at the time it was added.
    pub name: String,
    /// Unit price at the time it was added.
    pub price: Decimal,
    /// Product image.
    pub image: String,
    /// Always at least 1 while the line is in a cart.
    pub quantity: u32,
}

impl CartLineItem {
    /// A new line for `product` with `quantity` units.
    #[must_use]
    pub fn from_product(product: &Product, quantity: u32) -> Self {
        Self {
            id: product.id,
            name: product.name.clone(),
            price: product.price,
            image: product.image.clone(),
            quantity,
        }
    }

    /// Unit price times quantity, saturating at [`Decimal::MAX`].
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.price
            .checked_mul(Decimal::from(self.quantity))
            .unwrap_or(Decimal::MAX)
    }
}
