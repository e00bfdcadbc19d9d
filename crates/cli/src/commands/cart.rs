//! Cart commands.
//!
//! Positions on the command line are 1-based, matching `cart show`.

use tracing::info;

use four_skincare_core::ProductId;
use four_skincare_storefront::cart::{CartChange, CartError, CartStore};
use four_skincare_storefront::error::Result;
use four_skincare_storefront::state::Storefront;
use four_skincare_storefront::storage::Storage;

use crate::render;

/// Print the cart and its totals.
pub fn show<S: Storage>(shop: &Storefront<S>) {
    let cart = shop.cart();
    render::emit(&render::cart(cart.items(), &cart.summary()));
}

/// Add a product by id.
///
/// # Errors
///
/// Returns an error for an unknown product or if the cart cannot be saved.
pub fn add<S: Storage>(shop: &mut Storefront<S>, product: ProductId, quantity: u32) -> Result<()> {
    let change = shop.add_to_cart(product, quantity)?;
    report(shop, &change);
    Ok(())
}

/// Add one unit to the line at `position`.
///
/// # Errors
///
/// Returns an error if the cart cannot be saved.
pub fn increment<S: Storage>(shop: &mut Storefront<S>, position: usize) -> Result<()> {
    at_position(shop, position, CartStore::increment_item)
}

/// Remove one unit from the line at `position`.
///
/// # Errors
///
/// Returns an error if the cart cannot be saved.
pub fn decrement<S: Storage>(shop: &mut Storefront<S>, position: usize) -> Result<()> {
    at_position(shop, position, CartStore::decrement_item)
}

/// Remove the line at `position`.
///
/// # Errors
///
/// Returns an error if the cart cannot be saved.
pub fn remove<S: Storage>(shop: &mut Storefront<S>, position: usize) -> Result<()> {
    at_position(shop, position, CartStore::remove_item)
}

fn at_position<S, F>(shop: &mut Storefront<S>, position: usize, op: F) -> Result<()>
where
    S: Storage,
    F: FnOnce(&mut CartStore<S>, usize) -> std::result::Result<CartChange, CartError>,
{
    // Position 0 has no line; treat it like any other missing position.
    let change = match position.checked_sub(1) {
        Some(index) => op(shop.cart_mut(), index)?,
        None => CartChange::Unchanged,
    };
    report(shop, &change);
    Ok(())
}

fn report<S: Storage>(shop: &Storefront<S>, change: &CartChange) {
    if !change.is_changed() {
        info!(?change, "Cart left unchanged");
    }
    render::emit(render::notice(change));
    show(shop);
}
