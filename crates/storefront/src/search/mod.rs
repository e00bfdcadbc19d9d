//! Search-as-you-type over the catalog.
//!
//! A [`SearchSession`] sits between the search box and the catalog. Every
//! keystroke goes through [`SearchSession::input`]; the query only runs once
//! the input has been quiet for the debounce interval, and only the last
//! query of a burst is evaluated. Results are composed with the active
//! category tab.

mod debounce;

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, instrument};

use four_skincare_core::{CategoryFilter, Product};

use crate::catalog::{Catalog, ProductQuery};

pub use debounce::Debouncer;

/// Default quiet interval before a search runs.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

/// The outcome of one evaluated query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResults {
    /// The query that produced these results.
    pub query: ProductQuery,
    /// Matching products in catalog order.
    pub products: Vec<Product>,
}

impl SearchResults {
    /// Whether nothing matched; the render layer shows "no results".
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

/// Debounced search state for one search box.
pub struct SearchSession {
    catalog: Arc<Catalog>,
    category: CategoryFilter,
    text: String,
    debouncer: Debouncer<String>,
}

impl SearchSession {
    /// Create a session over `catalog` with the given debounce interval.
    #[must_use]
    pub fn new(catalog: Arc<Catalog>, debounce: Duration) -> Self {
        Self {
            catalog,
            category: CategoryFilter::All,
            text: String::new(),
            debouncer: Debouncer::new(debounce),
        }
    }

    /// The active category tab.
    #[must_use]
    pub const fn category(&self) -> &CategoryFilter {
        &self.category
    }

    /// Whether input is waiting for the debounce interval to pass.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.debouncer.is_pending()
    }

    /// The last query that was evaluated.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Record a keystroke. Restarts the debounce timer.
    ///
    /// # Panics
    ///
    /// Panics if called outside a Tokio runtime.
    pub fn input(&mut self, text: impl Into<String>) {
        self.debouncer.schedule(text.into());
    }

    /// Switch category tab and re-evaluate the last query immediately.
    pub fn select_category(&mut self, category: CategoryFilter) -> SearchResults {
        self.category = category;
        self.current()
    }

    /// Evaluate the last settled query against the active tab.
    #[must_use]
    pub fn current(&self) -> SearchResults {
        let query = ProductQuery {
            category: self.category.clone(),
            text: self.text.clone(),
        };
        let products = self.catalog.query(&query).into_iter().cloned().collect();
        SearchResults { query, products }
    }

    /// Wait for the pending input to settle and return its results.
    ///
    /// Returns `None` if no input is pending.
    #[instrument(skip(self))]
    pub async fn settled(&mut self) -> Option<SearchResults> {
        let text = self.debouncer.next().await?;
        self.text = text;
        let results = self.current();
        debug!(
            query = %results.query.text,
            category = %results.query.category,
            matches = results.products.len(),
            "Search evaluated"
        );
        Some(results)
    }

    /// Drop pending input without evaluating it.
    pub fn cancel(&mut self) {
        self.debouncer.cancel();
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use four_skincare_core::Category;

    use super::*;

    fn session() -> SearchSession {
        SearchSession::new(Arc::new(Catalog::skincare_defaults()), DEFAULT_DEBOUNCE)
    }

    fn names(results: &SearchResults) -> Vec<&str> {
        results.products.iter().map(|p| p.name.as_str()).collect()
    }

    #[tokio::test(start_paused = true)]
    async fn test_burst_evaluates_last_query_only() {
        let mut search = session();
        for prefix in ["n", "ni", "nig", "night"] {
            search.input(prefix);
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
        let results = search.settled().await.unwrap();
        assert_eq!(results.query.text, "night");
        assert_eq!(names(&results), vec!["Night Moisturizer"]);
        assert!(search.settled().await.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_category_composes_with_query() {
        let mut search = session();
        search.input("deep");
        let results = search.settled().await.unwrap();
        assert_eq!(names(&results), vec!["Hydrating Serum", "Detox Mask"]);

        let results = search.select_category(CategoryFilter::Only(Category::Mask));
        assert_eq!(names(&results), vec!["Detox Mask"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_clearing_query_reapplies_active_category() {
        let mut search = session();
        search.select_category(CategoryFilter::Only(Category::Serum));
        search.input("vitamin");
        assert_eq!(names(&search.settled().await.unwrap()), vec!["Vitamin C Serum"]);

        search.input("   ");
        let results = search.settled().await.unwrap();
        assert_eq!(names(&results), vec!["Hydrating Serum", "Vitamin C Serum"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_match_is_empty() {
        let mut search = session();
        search.input("retinol");
        assert!(search.settled().await.unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_keeps_previous_query() {
        let mut search = session();
        search.input("mask");
        search.settled().await.unwrap();
        search.input("serum");
        search.cancel();
        assert!(search.settled().await.is_none());
        assert_eq!(search.text(), "mask");
    }
}
