//! The read-only product catalog.
//!
//! A [`Catalog`] is built once per session, validated at construction, and
//! only ever queried afterwards. Queries never fail: a filter that matches
//! nothing yields an empty list, and turning that into a "no results" message
//! is the render layer's job.
//!
//! # Filtering
//!
//! - [`Catalog::list_by_category`] - exact, case-sensitive category match;
//!   the sentinel `"all"` returns everything
//! - [`Catalog::search`] - case-insensitive substring match over name,
//!   description and category
//! - [`Catalog::query`] - both at once, category first
//!
//! All three preserve catalog order.

mod defaults;

use std::collections::HashSet;
use std::path::Path;

use rust_decimal::Decimal;
use thiserror::Error;
use tracing::{info, instrument};

use four_skincare_core::{Category, CategoryFilter, Product, ProductId};

/// Errors that can occur while building a catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Two products share an id.
    #[error("duplicate product id {0}")]
    DuplicateId(ProductId),

    /// A product has a negative price.
    #[error("product {id} has a negative price ({price})")]
    NegativePrice { id: ProductId, price: Decimal },

    /// The catalog document could not be parsed.
    #[error("invalid catalog JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The catalog file could not be read.
    #[error("failed to read catalog {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// A combined category + free-text product query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductQuery {
    /// Active category tab.
    pub category: CategoryFilter,
    /// Search box contents. Blank text applies no text filter.
    pub text: String,
}

impl ProductQuery {
    /// A text-only query across every category.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            category: CategoryFilter::All,
            text: text.into(),
        }
    }

    /// Restrict the query to a category filter.
    #[must_use]
    pub fn in_category(mut self, category: CategoryFilter) -> Self {
        self.category = category;
        self
    }
}

/// The static product list for a session.
#[derive(Debug, Clone)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Build a catalog, validating ids and prices.
    ///
    /// Ratings are validated by [`four_skincare_core::Rating`] itself.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::DuplicateId`] or [`CatalogError::NegativePrice`].
    pub fn new(products: Vec<Product>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::with_capacity(products.len());
        for product in &products {
            if !seen.insert(product.id) {
                return Err(CatalogError::DuplicateId(product.id));
            }
            if product.price.is_sign_negative() && !product.price.is_zero() {
                return Err(CatalogError::NegativePrice {
                    id: product.id,
                    price: product.price,
                });
            }
        }
        Ok(Self { products })
    }

    /// Parse a catalog from a JSON array of products.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or fails validation.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let products: Vec<Product> = serde_json::from_str(json)?;
        Self::new(products)
    }

    /// Load a catalog from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or its contents are invalid.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let catalog = Self::from_json(&json)?;
        info!(products = catalog.len(), "Catalog loaded");
        Ok(catalog)
    }

    /// The built-in Four Skincare product line.
    #[must_use]
    pub fn skincare_defaults() -> Self {
        Self {
            products: defaults::products(),
        }
    }

    /// Every product, in catalog order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Number of products.
    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Whether the catalog has no products.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Look up a product by id.
    #[must_use]
    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Distinct categories in order of first appearance, for category tabs.
    #[must_use]
    pub fn categories(&self) -> Vec<Category> {
        let mut categories = Vec::new();
        for product in &self.products {
            if !categories.contains(&product.category) {
                categories.push(product.category);
            }
        }
        categories
    }

    /// Products in `category`, or all of them for the sentinel `"all"`.
    ///
    /// The match is exact and case-sensitive: `"Serum"` matches nothing.
    #[must_use]
    pub fn list_by_category(&self, category: &str) -> Vec<&Product> {
        self.list(&CategoryFilter::parse(category))
    }

    /// Products passing a parsed category filter.
    #[must_use]
    pub fn list(&self, filter: &CategoryFilter) -> Vec<&Product> {
        self.products
            .iter()
            .filter(|p| filter.matches(p.category))
            .collect()
    }

    /// Case-insensitive substring search over name, description and category.
    ///
    /// A blank query applies no filter and returns the whole catalog.
    #[must_use]
    pub fn search(&self, query: &str) -> Vec<&Product> {
        self.query(&ProductQuery::text(query))
    }

    /// Apply a category filter, then a text filter.
    ///
    /// Blank text leaves the category-filtered list as is, so clearing the
    /// search box falls back to the active tab rather than to every product.
    #[must_use]
    pub fn query(&self, query: &ProductQuery) -> Vec<&Product> {
        let needle = query.text.trim().to_lowercase();
        self.products
            .iter()
            .filter(|p| query.category.matches(p.category))
            .filter(|p| needle.is_empty() || matches_text(p, &needle))
            .collect()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::skincare_defaults()
    }
}

fn matches_text(product: &Product, needle: &str) -> bool {
    product.name.to_lowercase().contains(needle)
        || product.description.to_lowercase().contains(needle)
        || product.category.as_str().contains(needle)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    fn names(products: &[&Product]) -> Vec<String> {
        products.iter().map(|p| p.name.clone()).collect()
    }

    #[test]
    fn test_defaults_pass_validation() {
        let catalog = Catalog::new(defaults::products()).unwrap();
        assert_eq!(catalog.len(), 6);
    }

    #[test]
    fn test_list_all_returns_every_product_in_order() {
        let catalog = Catalog::skincare_defaults();
        let all = catalog.list_by_category("all");
        assert_eq!(all.len(), catalog.len());
        for (listed, original) in all.iter().zip(catalog.products()) {
            assert_eq!(listed.id, original.id);
        }
    }

    #[test]
    fn test_list_by_category_exact_match() {
        let catalog = Catalog::skincare_defaults();
        assert_eq!(
            names(&catalog.list_by_category("serum")),
            vec!["Hydrating Serum", "Vitamin C Serum"]
        );
        assert!(catalog.list_by_category("Serum").is_empty());
        assert!(catalog.list_by_category("toner").is_empty());
    }

    #[test]
    fn test_search_is_case_insensitive_across_fields() {
        let catalog = Catalog::skincare_defaults();
        assert_eq!(names(&catalog.search("SERUM")), vec![
            "Hydrating Serum",
            "Vitamin C Serum"
        ]);
        // description match
        assert_eq!(names(&catalog.search("overnight")), vec!["Night Moisturizer"]);
        // category match
        assert_eq!(names(&catalog.search("mask")), vec!["Detox Mask"]);
    }

    #[test]
    fn test_blank_search_is_unfiltered() {
        let catalog = Catalog::skincare_defaults();
        assert_eq!(catalog.search("").len(), catalog.len());
        assert_eq!(catalog.search("   \t").len(), catalog.len());
    }

    #[test]
    fn test_search_without_match_is_empty() {
        let catalog = Catalog::skincare_defaults();
        assert!(catalog.search("sunscreen").is_empty());
    }

    #[test]
    fn test_query_blank_text_keeps_category() {
        let catalog = Catalog::skincare_defaults();
        let query = ProductQuery::text("  ").in_category(CategoryFilter::Only(Category::Moisturizer));
        assert_eq!(names(&catalog.query(&query)), vec![
            "Anti-Aging Cream",
            "Night Moisturizer"
        ]);
    }

    #[test]
    fn test_query_combines_filters() {
        let catalog = Catalog::skincare_defaults();
        let query = ProductQuery::text("deep").in_category(CategoryFilter::Only(Category::Serum));
        assert_eq!(names(&catalog.query(&query)), vec!["Hydrating Serum"]);
    }

    #[test]
    fn test_get_and_categories() {
        let catalog = Catalog::skincare_defaults();
        assert_eq!(catalog.get(ProductId::new(5)).unwrap().name, "Detox Mask");
        assert!(catalog.get(ProductId::new(99)).is_none());
        assert_eq!(catalog.categories(), vec![
            Category::Cleanser,
            Category::Serum,
            Category::Moisturizer,
            Category::Mask
        ]);
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let mut products = defaults::products();
        products[1].id = products[0].id;
        assert!(matches!(
            Catalog::new(products),
            Err(CatalogError::DuplicateId(id)) if id == ProductId::new(1)
        ));
    }

    #[test]
    fn test_negative_price_rejected() {
        let mut products = defaults::products();
        products[2].price = Decimal::new(-5, 0);
        assert!(matches!(
            Catalog::new(products),
            Err(CatalogError::NegativePrice { .. })
        ));
    }

    #[test]
    fn test_from_json() {
        let json = r#"[
            {"id": 10, "name": "Rose Toner Mask", "price": 12.5, "category": "mask",
             "image": "assets/rose.jpg", "description": "Calming rose clay", "badge": ""}
        ]"#;
        let catalog = Catalog::from_json(json).unwrap();
        assert_eq!(catalog.len(), 1);
        assert!(catalog.products()[0].badge.is_none());

        assert!(matches!(
            Catalog::from_json("{not json"),
            Err(CatalogError::Json(_))
        ));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            Catalog::load(dir.path().join("missing.json")),
            Err(CatalogError::Io { .. })
        ));
    }
}
