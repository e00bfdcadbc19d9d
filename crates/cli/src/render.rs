//! Plain-text views of storefront state.
//!
//! Every view is built as a `String` so it can be tested; [`emit`] is the
//! only place that writes to stdout.

use std::fmt::Write as _;

use rust_decimal::Decimal;

use four_skincare_core::{CurrencyCode, Price, Product};
use four_skincare_storefront::cart::{CartChange, CartLineItem, CartSummary};
use four_skincare_storefront::search::SearchResults;

/// Write a rendered view to stdout.
#[allow(clippy::print_stdout)]
pub fn emit(view: &str) {
    println!("{view}");
}

fn money(amount: Decimal, currency: CurrencyCode) -> String {
    Price::new(amount, currency).map_or_else(|_| amount.to_string(), |price| price.to_string())
}

/// One catalog row: id, name, price, category, then rating and badge if set.
pub fn product_row(product: &Product, currency: CurrencyCode) -> String {
    let mut row = format!(
        "#{:<3} {:<20} {:>12}  {}",
        product.id.to_string(),
        product.name,
        money(product.price, currency),
        product.category
    );
    if let Some(rating) = &product.rating {
        let _ = write!(row, "  {rating}/5");
    }
    if let Some(badge) = &product.badge {
        let _ = write!(row, "  [{badge}]");
    }
    row
}

/// A product grid, or the empty-state message.
pub fn product_list(products: &[&Product], currency: CurrencyCode) -> String {
    if products.is_empty() {
        return "No products found".to_string();
    }
    products
        .iter()
        .map(|product| product_row(product, currency))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Search results with the query they answer.
pub fn search_results(results: &SearchResults, currency: CurrencyCode) -> String {
    let products: Vec<&Product> = results.products.iter().collect();
    let heading = if results.query.text.trim().is_empty() {
        format!("All products in {}", results.query.category)
    } else {
        format!(
            "Results for \"{}\" in {}",
            results.query.text.trim(),
            results.query.category
        )
    };
    format!("{heading}\n{}", product_list(&products, currency))
}

/// The cart drawer: numbered lines, then totals.
pub fn cart(items: &[CartLineItem], summary: &CartSummary) -> String {
    if items.is_empty() {
        return "Your cart is empty".to_string();
    }
    let currency = summary.total.currency_code();
    let mut view = String::new();
    for (position, item) in (1..).zip(items) {
        let _ = writeln!(
            view,
            "{position:>2}. {:<20} {:>12} x {:<3} {:>12}",
            item.name,
            money(item.price, currency),
            item.quantity,
            money(item.line_total(), currency)
        );
    }
    let _ = writeln!(view, "Items:    {}", summary.item_count);
    let _ = writeln!(view, "Subtotal: {}", summary.subtotal);
    let _ = writeln!(view, "Shipping: {}", shipping(&summary.shipping));
    let _ = write!(view, "Total:    {}", summary.total);
    view
}

fn shipping(price: &Price) -> String {
    if price.amount().is_zero() {
        "Free".to_string()
    } else {
        price.to_string()
    }
}

/// Toast shown after a cart action.
pub const fn notice(change: &CartChange) -> &'static str {
    match change {
        CartChange::Added { .. } | CartChange::Incremented { .. } => "Product added to cart!",
        CartChange::Decremented { .. } => "Quantity updated",
        CartChange::Removed { .. } => "Product removed from cart",
        CartChange::Unchanged => "Nothing to change at that position",
    }
}
