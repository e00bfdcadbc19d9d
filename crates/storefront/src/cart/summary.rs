//! Derived cart totals.

use rust_decimal::Decimal;
use serde::Serialize;

use four_skincare_core::{CurrencyCode, Price};

use super::line_item::CartLineItem;

/// Totals derived from the current line items. Never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CartSummary {
    /// Sum of all line quantities.
    pub item_count: u64,
    /// Sum of quantity times unit price.
    pub subtotal: Price,
    /// Always zero: every order ships free.
    pub shipping: Price,
    /// Subtotal plus shipping.
    pub total: Price,
}

impl CartSummary {
    /// Compute totals for `items`.
    #[must_use]
    pub fn compute(items: &[CartLineItem], currency: CurrencyCode) -> Self {
        let item_count = items.iter().map(|item| u64::from(item.quantity)).sum();
        let subtotal = items
            .iter()
            .map(CartLineItem::line_total)
            .fold(Decimal::ZERO, |acc, line| {
                acc.checked_add(line).unwrap_or(Decimal::MAX)
            });
        let shipping = Decimal::ZERO;
        let total = subtotal.checked_add(shipping).unwrap_or(Decimal::MAX);

        Self {
            item_count,
            subtotal: price(subtotal, currency),
            shipping: price(shipping, currency),
            total: price(total, currency),
        }
    }

    /// Whether the cart is empty.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.item_count == 0
    }
}

// Line prices are validated non-negative on the way in, so sums are too.
fn price(amount: Decimal, currency: CurrencyCode) -> Price {
    Price::new(amount, currency).unwrap_or_else(|_| Price::zero(currency))
}
