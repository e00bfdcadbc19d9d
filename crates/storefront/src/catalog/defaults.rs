//! The storefront's built-in product line.

use rust_decimal::Decimal;

use four_skincare_core::{Badge, Category, Product, ProductId, Rating};

fn rating(tenths: i64) -> Option<Rating> {
    Rating::new(Decimal::new(tenths, 1)).ok()
}

#[allow(clippy::too_many_arguments)]
fn product(
    id: i32,
    name: &str,
    price: i64,
    category: Category,
    image: &str,
    description: &str,
    rating_tenths: i64,
    badge: &str,
) -> Product {
    Product {
        id: ProductId::new(id),
        name: name.to_owned(),
        price: Decimal::new(price, 0),
        category,
        image: image.to_owned(),
        description: description.to_owned(),
        rating: rating(rating_tenths),
        badge: Badge::new(badge),
    }
}

/// Six products across four categories; two serums and two moisturizers.
pub(super) fn products() -> Vec<Product> {
    vec![
        product(
            1,
            "Natural Cleanser",
            25,
            Category::Cleanser,
            "assets/natural-cleanser.jpg",
            "Gentle cleansing for all skin types",
            48,
            "new",
        ),
        product(
            2,
            "Hydrating Serum",
            45,
            Category::Serum,
            "assets/hydrating-serum.jpg",
            "Deep hydration for radiant skin",
            49,
            "bestseller",
        ),
        product(
            3,
            "Anti-Aging Cream",
            65,
            Category::Moisturizer,
            "assets/anti-aging-cream.jpg",
            "Restore youthful radiance",
            47,
            "",
        ),
        product(
            4,
            "Vitamin C Serum",
            55,
            Category::Serum,
            "assets/vitamin-c-serum.jpg",
            "Brighten and even skin tone",
            49,
            "bestseller",
        ),
        product(
            5,
            "Detox Mask",
            35,
            Category::Mask,
            "assets/detox-mask.jpg",
            "Deep cleansing treatment",
            46,
            "",
        ),
        product(
            6,
            "Night Moisturizer",
            40,
            Category::Moisturizer,
            "assets/night-moisturizer.jpg",
            "Overnight rejuvenation",
            48,
            "new",
        ),
    ]
}
