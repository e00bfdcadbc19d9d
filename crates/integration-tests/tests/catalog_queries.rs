//! Catalog listing and search behavior.

#![allow(clippy::unwrap_used)]

use four_skincare_core::{Category, CategoryFilter, Product, ProductId};
use four_skincare_integration_tests::{catalog, product};
use four_skincare_storefront::catalog::{Catalog, CatalogError, ProductQuery};

fn ids(products: &[&Product]) -> Vec<i32> {
    products.iter().map(|p| p.id.as_i32()).collect()
}

#[test]
fn test_serum_tab_lists_both_serums_in_order() {
    let catalog = catalog();
    assert_eq!(catalog.len(), 6);
    assert_eq!(ids(&catalog.list_by_category("serum")), vec![2, 4]);
}

#[test]
fn test_all_tab_lists_every_product_once_in_order() {
    let catalog = catalog();
    let all = catalog.list_by_category("all");
    let expected: Vec<&Product> = catalog.products().iter().collect();
    assert_eq!(all, expected);
}

#[test]
fn test_category_match_is_case_sensitive() {
    let catalog = catalog();
    assert!(catalog.list_by_category("Serum").is_empty());
    assert!(catalog.list_by_category("sunscreen").is_empty());
}

#[test]
fn test_blank_search_returns_everything() {
    let catalog = catalog();
    let everything = catalog.list(&CategoryFilter::All);
    assert_eq!(catalog.search(""), everything);
    assert_eq!(catalog.search("   \t"), everything);
}

#[test]
fn test_search_is_case_insensitive_across_fields() {
    let catalog = catalog();
    // name
    assert_eq!(ids(&catalog.search("VITAMIN")), vec![4]);
    // description
    assert_eq!(ids(&catalog.search("overnight")), vec![6]);
    // category; Anti-Aging Cream only matches here
    assert_eq!(ids(&catalog.search("Moisturizer")), vec![3, 6]);
}

#[test]
fn test_query_applies_category_then_text() {
    let catalog = catalog();
    let query = ProductQuery::text("deep").in_category(CategoryFilter::Only(Category::Serum));
    assert_eq!(ids(&catalog.query(&query)), vec![2]);

    let cleared = ProductQuery::text("").in_category(CategoryFilter::Only(Category::Moisturizer));
    assert_eq!(ids(&catalog.query(&cleared)), vec![3, 6]);
}

#[test]
fn test_lookup_by_id() {
    let catalog = catalog();
    assert_eq!(catalog.get(ProductId::new(5)).unwrap().name, "Detox Mask");
    assert!(catalog.get(ProductId::new(99)).is_none());
}

#[test]
fn test_categories_in_first_seen_order() {
    assert_eq!(
        catalog().categories(),
        vec![
            Category::Cleanser,
            Category::Serum,
            Category::Moisturizer,
            Category::Mask
        ]
    );
}

#[test]
fn test_duplicate_ids_rejected() {
    let err = Catalog::new(vec![
        product(1, "A", 10, Category::Mask),
        product(1, "B", 12, Category::Serum),
    ])
    .unwrap_err();
    assert!(matches!(err, CatalogError::DuplicateId(id) if id == ProductId::new(1)));
}

#[test]
fn test_negative_price_rejected() {
    let err = Catalog::new(vec![product(7, "Refund", -5, Category::Cleanser)]).unwrap_err();
    assert!(matches!(err, CatalogError::NegativePrice { .. }));
}

#[test]
fn test_load_catalog_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("catalog.json");
    std::fs::write(
        &path,
        r#"[
            {"id": 20, "name": "Rose Toner", "price": "18.50", "category": "serum",
             "image": "assets/toner.jpg", "description": "Balancing mist", "badge": ""},
            {"id": 21, "name": "Clay Mask", "price": 22, "category": "mask",
             "image": "assets/clay.jpg", "description": "Weekly detox", "rating": 4.2,
             "badge": "new"}
        ]"#,
    )
    .unwrap();

    let catalog = Catalog::load(&path).unwrap();
    assert_eq!(catalog.len(), 2);
    assert_eq!(ids(&catalog.list_by_category("mask")), vec![21]);
    assert!(catalog.get(ProductId::new(20)).unwrap().badge.is_none());
}

#[test]
fn test_load_missing_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    let err = Catalog::load(dir.path().join("absent.json")).unwrap_err();
    assert!(matches!(err, CatalogError::Io { .. }));
}
