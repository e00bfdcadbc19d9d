//! Browse and search the catalog.

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};

use four_skincare_core::CategoryFilter;
use four_skincare_storefront::error::Result;
use four_skincare_storefront::state::Storefront;
use four_skincare_storefront::storage::Storage;

use crate::render;

fn category_filter(raw: &str) -> CategoryFilter {
    let filter = CategoryFilter::parse(raw);
    if let CategoryFilter::Unmatched(name) = &filter {
        warn!(category = %name, "Unknown category, nothing will match");
    }
    filter
}

/// Print the products in one category tab.
pub fn list<S: Storage>(shop: &Storefront<S>, category: &str) {
    let filter = category_filter(category);
    let products = shop.catalog().list(&filter);
    render::emit(&render::product_list(&products, shop.config().currency));
}

/// Run a search.
///
/// With a query, evaluates it once. Without one, reads queries from stdin,
/// one per line, and prints results once typing pauses for the debounce
/// interval.
///
/// # Errors
///
/// Returns an error if stdin cannot be read.
pub async fn search<S: Storage>(
    shop: &Storefront<S>,
    query: Option<String>,
    category: &str,
) -> Result<()> {
    let currency = shop.config().currency;
    let mut session = shop.search_session();
    session.select_category(category_filter(category));

    if let Some(query) = query {
        session.input(query);
    } else {
        info!(
            debounce_ms = shop.config().search_debounce.as_millis(),
            "Reading queries from stdin"
        );
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        loop {
            tokio::select! {
                line = lines.next_line() => match line? {
                    Some(text) => session.input(text),
                    None => break,
                },
                Some(results) = session.settled(), if session.is_pending() => {
                    render::emit(&render::search_results(&results, currency));
                }
            }
        }
    }

    // Flush whatever was typed last.
    if let Some(results) = session.settled().await {
        render::emit(&render::search_results(&results, currency));
    }
    Ok(())
}
