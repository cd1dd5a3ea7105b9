//! Seed the catalog with sample products.
//!
//! # Usage
//!
//! ```bash
//! vc-cli seed products --per-category 10
//! ```
//!
//! Creates randomized products for every catalog category, with a stock
//! image per category. Intended for development databases; running it
//! twice simply adds more products.

use rand::Rng;
use rust_decimal::Decimal;

use voltcart_core::ProductCategory;
use voltcart_storefront::db::products::{NewProduct, ProductRepository};

use super::CommandError;

/// Stock image per category.
const fn category_image(category: ProductCategory) -> &'static str {
    match category {
        ProductCategory::Accessories => "https://cdn.voltcart.in/seed/accessories_trimmer.jpg",
        ProductCategory::Pipes => "https://cdn.voltcart.in/seed/pipes_conduit.webp",
        ProductCategory::Switches => "https://cdn.voltcart.in/seed/switch.jpg",
        ProductCategory::Wires => "https://cdn.voltcart.in/seed/wire.webp",
        ProductCategory::Lighting => "https://cdn.voltcart.in/seed/bulb.jpg",
    }
}

/// Name stems per category for generated product names.
const fn category_stems(category: ProductCategory) -> &'static [&'static str] {
    match category {
        ProductCategory::Accessories => &["Cable Trimmer", "Tester Kit", "Wall Clamp", "Tape Roll"],
        ProductCategory::Pipes => &["PVC Conduit", "Flexible Conduit", "Junction Pipe", "Bend"],
        ProductCategory::Switches => &["Modular Switch", "Rocker Switch", "Dimmer", "Socket"],
        ProductCategory::Wires => &["Copper Wire", "Flex Cable", "Earthing Wire", "Coaxial Cable"],
        ProductCategory::Lighting => &["LED Bulb", "Tube Light", "Panel Light", "Flood Light"],
    }
}

const GRADES: &[&str] = &["Standard", "Premium", "Heavy Duty", "Compact", "Pro"];

/// Seed `per_category` products into every catalog category.
///
/// # Errors
///
/// Returns an error if the database is unreachable or an insert fails.
pub async fn products(per_category: u32) -> Result<(), CommandError> {
    let pool = super::connect().await?;
    let repo = ProductRepository::new(&pool);
    let mut rng = rand::rng();

    let mut count = 0_u32;
    for category in ProductCategory::ALL {
        for _ in 0..per_category {
            let stems = category_stems(category);
            let stem = stems[rng.random_range(0..stems.len())];
            let grade = GRADES[rng.random_range(0..GRADES.len())];

            let product = repo
                .create(NewProduct {
                    name: format!("{grade} {stem}"),
                    // Random price between 10.00 and 1000.00
                    price: Decimal::new(rng.random_range(1000..100_000), 2),
                    category,
                    description: format!("{grade} {stem} for residential and commercial wiring."),
                    image: category_image(category).to_owned(),
                    rating: f64::from(rng.random_range(0..=5)),
                    quantity: rng.random_range(1..=100),
                })
                .await?;

            count += 1;
            tracing::info!("{count}: added {} ({category})", product.name);
        }
    }

    tracing::info!("Seeding completed successfully: {count} products");
    Ok(())
}
