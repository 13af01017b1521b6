//! Built-in product list shipped with the storefront.

use crate::catalog::Product;
use crate::ids::ProductId;
use crate::money::{Currency, Money};

const BUSINESS_NAME: &str = "JENNY'S ORGANIC SPICES";

struct Seed {
    id: &'static str,
    name: &'static str,
    price_pesewas: i64,
    weight: &'static str,
    tags: &'static [&'static str],
    main_image: &'static str,
    secondary_image: &'static str,
    rating: f32,
    description: &'static str,
}

const SEEDS: &[Seed] = &[
    Seed {
        id: "1",
        name: "ALL PURPOSE SPICE MIX",
        price_pesewas: 2500,
        weight: "250g",
        tags: &["STEWS", "SOUPS", "GRILLS"],
        main_image: "/images/main_all_purpose_spice.png",
        secondary_image: "/images/All_purpose_spice.png",
        rating: 5.0,
        description: "A versatile blend of carefully selected organic spices perfect for enhancing the flavor of your favorite dishes. This all-purpose mix combines traditional spices with modern culinary techniques.",
    },
    Seed {
        id: "2",
        name: "CURRY POWDER SPICE MIX",
        price_pesewas: 3000,
        weight: "250g",
        tags: &["CURRY", "RICE", "VEGETABLES"],
        main_image: "/images/main_curry-powder.png",
        secondary_image: "/images/curry_powder.png",
        rating: 4.8,
        description: "Authentic curry powder blend with aromatic spices that bring depth and warmth to your curries. Perfect for both traditional and fusion dishes.",
    },
    Seed {
        id: "3",
        name: "KELEWELE SPICE MIX",
        price_pesewas: 2000,
        weight: "200g",
        tags: &["FRYING", "STREET FOOD", "SNACKS"],
        main_image: "/images/main_kelewele-spice.png",
        secondary_image: "/images/kelewele_spice.png",
        rating: 4.9,
        description: "Traditional Ghanaian spice mix perfect for making delicious kelewele (spiced plantain). This blend captures the authentic street food experience.",
    },
    Seed {
        id: "4",
        name: "CHICKEN SPICE MIX",
        price_pesewas: 2800,
        weight: "250g",
        tags: &["CHICKEN", "GRILLING", "ROASTING"],
        main_image: "/images/main_chicken-spice.png",
        secondary_image: "/images/chicken_spice.png",
        rating: 5.0,
        description: "Specially crafted spice blend designed to bring out the best in chicken dishes. Whether you're grilling, roasting, or pan-frying, this mix delivers exceptional flavor.",
    },
];

/// Materialize the built-in products.
pub(crate) fn builtin_products() -> Vec<Product> {
    SEEDS
        .iter()
        .map(|seed| Product {
            id: ProductId::new(seed.id),
            business_name: BUSINESS_NAME.to_string(),
            product_name: seed.name.to_string(),
            price: Money::new(seed.price_pesewas, Currency::GHS),
            weight: seed.weight.to_string(),
            tags: seed.tags.iter().map(|t| t.to_string()).collect(),
            main_image: seed.main_image.to_string(),
            secondary_image: seed.secondary_image.to_string(),
            rating: seed.rating,
            description: seed.description.to_string(),
        })
        .collect()
}
