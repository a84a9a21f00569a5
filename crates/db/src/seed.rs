//! Sample catalogue seeding for development and demos.
//!
//! Seeding is idempotent by natural key: categories are matched by slug,
//! products by SKU, users by email. Rows that already exist are skipped
//! and counted, so re-running `migrator seed` never duplicates data.

use std::collections::HashMap;

use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, Set,
};
use thiserror::Error;
use tracing::info;

use crate::entities::{categories, products, users};
use tavola_shared::auth::{self, PasswordError};

/// Errors from a seeding run.
#[derive(Debug, Error)]
pub enum SeedError {
    /// Database failure.
    #[error(transparent)]
    Db(#[from] DbErr),

    /// Password hashing failure for a seeded account.
    #[error("failed to hash seeded password: {0}")]
    Password(#[from] PasswordError),

    /// A product references a category slug that was not seeded.
    #[error("product {sku} references unknown category {slug}")]
    MissingCategory {
        /// Product SKU.
        sku: &'static str,
        /// Referenced category slug.
        slug: &'static str,
    },
}

/// Outcome of one seeding run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SeedReport {
    /// Newly inserted rows.
    pub inserted: usize,
    /// Rows skipped because their natural key already existed.
    pub skipped: usize,
}

impl SeedReport {
    fn merge(&mut self, other: Self) {
        self.inserted += other.inserted;
        self.skipped += other.skipped;
    }
}

/// Seeds the sample catalogue and accounts.
///
/// Safe to run repeatedly; see the module docs for the idempotency rule.
pub async fn run(db: &DatabaseConnection) -> Result<SeedReport, SeedError> {
    let mut report = SeedReport::default();

    info!("seeding categories");
    report.merge(seed_categories(db).await?);

    info!("seeding products");
    report.merge(seed_products(db).await?);

    info!("seeding users");
    report.merge(seed_users(db).await?);

    info!(
        inserted = report.inserted,
        skipped = report.skipped,
        "seeding complete"
    );
    Ok(report)
}

struct CategorySeed {
    name_en: &'static str,
    name_ro: &'static str,
    slug: &'static str,
    description_en: &'static str,
    description_ro: &'static str,
}

const CATEGORIES: [CategorySeed; 10] = [
    CategorySeed {
        name_en: "Plates",
        name_ro: "Farfurii",
        slug: "plates",
        description_en: "Professional dinner plates and serving dishes",
        description_ro: "Farfurii profesionale pentru cină și servire",
    },
    CategorySeed {
        name_en: "Cups",
        name_ro: "Căni",
        slug: "cups",
        description_en: "Professional cups and drinking vessels",
        description_ro: "Căni profesionale și vase pentru băuturi",
    },
    CategorySeed {
        name_en: "Salad Bowls",
        name_ro: "Boluri pentru Salate",
        slug: "salad-bowls",
        description_en: "Professional salad bowls and mixing bowls",
        description_ro: "Boluri profesionale pentru salate și amestecare",
    },
    CategorySeed {
        name_en: "Mugs",
        name_ro: "Căni Mari",
        slug: "mugs",
        description_en: "Professional coffee mugs and tea cups",
        description_ro: "Căni mari profesionale pentru cafea și ceai",
    },
    CategorySeed {
        name_en: "Sauciers",
        name_ro: "Sosnițe",
        slug: "sauciers",
        description_en: "Professional sauce boats and gravy boats",
        description_ro: "Sosnițe profesionale pentru sosuri și zeamă",
    },
    CategorySeed {
        name_en: "Cutlery",
        name_ro: "Tacâmuri",
        slug: "cutlery",
        description_en: "Professional knives, forks, and spoons",
        description_ro: "Cuțite, furculițe și linguri profesionale",
    },
    CategorySeed {
        name_en: "Pots",
        name_ro: "Oale",
        slug: "pots",
        description_en: "Professional cooking pots and saucepans",
        description_ro: "Oale profesionale pentru gătit",
    },
    CategorySeed {
        name_en: "Teapots",
        name_ro: "Ceainice",
        slug: "teapots",
        description_en: "Professional teapots and tea accessories",
        description_ro: "Ceainice profesionale și accesorii pentru ceai",
    },
    CategorySeed {
        name_en: "Pans",
        name_ro: "Tigăi",
        slug: "pans",
        description_en: "Professional frying pans and skillets",
        description_ro: "Tigăi profesionale pentru prăjit",
    },
    CategorySeed {
        name_en: "Deals",
        name_ro: "Oferte",
        slug: "deals",
        description_en: "Special offers and discounted items",
        description_ro: "Oferte speciale și produse reduse",
    },
];

struct ProductSeed {
    name_en: &'static str,
    name_ro: &'static str,
    slug: &'static str,
    description_en: &'static str,
    description_ro: &'static str,
    short_en: &'static str,
    short_ro: &'static str,
    /// Price in cents, converted to a two-decimal amount.
    price_cents: i64,
    category_slug: &'static str,
    sku: &'static str,
    stock: i32,
}

const PRODUCTS: [ProductSeed; 10] = [
    ProductSeed {
        name_en: "Professional Dinner Plates Set",
        name_ro: "Set Farfurii Profesionale pentru Cină",
        slug: "professional-dinner-plates-set",
        description_en: "High-quality professional dinner plates set for restaurants",
        description_ro: "Set de farfurii profesionale de înaltă calitate pentru restaurante",
        short_en: "Premium dinner plates for restaurants",
        short_ro: "Farfurii premium pentru restaurante",
        price_cents: 8999,
        category_slug: "plates",
        sku: "PLT-001",
        stock: 50,
    },
    ProductSeed {
        name_en: "Professional Coffee Cups Set",
        name_ro: "Set Căni Profesionale pentru Cafea",
        slug: "professional-coffee-cups-set",
        description_en: "Professional coffee cups for cafes and restaurants",
        description_ro: "Căni profesionale pentru cafenele și restaurante",
        short_en: "Professional coffee cups for cafes",
        short_ro: "Căni profesionale pentru cafenele",
        price_cents: 4599,
        category_slug: "cups",
        sku: "CUP-001",
        stock: 100,
    },
    ProductSeed {
        name_en: "Professional Salad Bowls Set",
        name_ro: "Set Boluri Profesionale pentru Salate",
        slug: "professional-salad-bowls-set",
        description_en: "Professional salad bowls for restaurants",
        description_ro: "Boluri profesionale pentru restaurante",
        short_en: "Professional salad bowls for restaurants",
        short_ro: "Boluri profesionale pentru restaurante",
        price_cents: 6599,
        category_slug: "salad-bowls",
        sku: "SAL-001",
        stock: 30,
    },
    ProductSeed {
        name_en: "Professional Coffee Mugs Set",
        name_ro: "Set Căni Mari Profesionale pentru Cafea",
        slug: "professional-coffee-mugs-set",
        description_en: "Large professional coffee mugs for cafes",
        description_ro: "Căni mari profesionale pentru cafenele",
        short_en: "Large coffee mugs for cafes",
        short_ro: "Căni mari pentru cafenele",
        price_cents: 5599,
        category_slug: "mugs",
        sku: "MUG-001",
        stock: 80,
    },
    ProductSeed {
        name_en: "Professional Sauce Boats Set",
        name_ro: "Set Sosnițe Profesionale",
        slug: "professional-sauce-boats-set",
        description_en: "Professional sauce boats for fine dining",
        description_ro: "Sosnițe profesionale pentru fine dining",
        short_en: "Sauce boats for fine dining",
        short_ro: "Sosnițe pentru fine dining",
        price_cents: 7599,
        category_slug: "sauciers",
        sku: "SAU-001",
        stock: 25,
    },
    ProductSeed {
        name_en: "Professional Cutlery Set",
        name_ro: "Set Tacâmuri Profesionale",
        slug: "professional-cutlery-set",
        description_en: "Professional knives, forks, and spoons set",
        description_ro: "Set de cuțite, furculițe și linguri profesionale",
        short_en: "Professional cutlery set",
        short_ro: "Set tacâmuri profesionale",
        price_cents: 12099,
        category_slug: "cutlery",
        sku: "CUT-001",
        stock: 40,
    },
    ProductSeed {
        name_en: "Professional Cooking Pots Set",
        name_ro: "Set Oale Profesionale pentru Gătit",
        slug: "professional-cooking-pots-set",
        description_en: "Professional cooking pots for commercial kitchens",
        description_ro: "Oale profesionale pentru bucătăriile comerciale",
        short_en: "Professional cooking pots",
        short_ro: "Oale profesionale pentru gătit",
        price_cents: 19999,
        category_slug: "pots",
        sku: "POT-001",
        stock: 15,
    },
    ProductSeed {
        name_en: "Professional Teapots Set",
        name_ro: "Set Ceainice Profesionale",
        slug: "professional-teapots-set",
        description_en: "Professional teapots for tea service",
        description_ro: "Ceainice profesionale pentru servirea ceaiului",
        short_en: "Professional teapots for tea service",
        short_ro: "Ceainice profesionale pentru ceai",
        price_cents: 8599,
        category_slug: "teapots",
        sku: "TEA-001",
        stock: 20,
    },
    ProductSeed {
        name_en: "Professional Frying Pans Set",
        name_ro: "Set Tigăi Profesionale",
        slug: "professional-frying-pans-set",
        description_en: "Professional frying pans for commercial kitchens",
        description_ro: "Tigăi profesionale pentru bucătăriile comerciale",
        short_en: "Professional frying pans",
        short_ro: "Tigăi profesionale",
        price_cents: 15999,
        category_slug: "pans",
        sku: "PAN-001",
        stock: 18,
    },
    ProductSeed {
        name_en: "Special Offer Bundle",
        name_ro: "Pachet Ofertă Specială",
        slug: "special-offer-bundle",
        description_en: "Special discounted bundle of professional tableware",
        description_ro: "Pachet redus special de veselă profesională",
        short_en: "Special offer bundle",
        short_ro: "Pachet ofertă specială",
        price_cents: 29999,
        category_slug: "deals",
        sku: "DEAL-001",
        stock: 10,
    },
];

struct UserSeed {
    email: &'static str,
    username: &'static str,
    full_name: &'static str,
    password: &'static str,
    role: &'static str,
    phone: &'static str,
}

const USERS: [UserSeed; 2] = [
    UserSeed {
        email: "admin@tavola.dev",
        username: "admin",
        full_name: "Tavola Admin",
        password: "admin123",
        role: "admin",
        phone: "+40 123 456 789",
    },
    UserSeed {
        email: "customer@example.com",
        username: "customer",
        full_name: "John Doe",
        password: "customer123",
        role: "customer",
        phone: "+40 987 654 321",
    },
];

async fn seed_categories(db: &DatabaseConnection) -> Result<SeedReport, SeedError> {
    let mut report = SeedReport::default();

    for (sort_order, seed) in CATEGORIES.iter().enumerate() {
        let existing = categories::Entity::find()
            .filter(categories::Column::Slug.eq(seed.slug))
            .one(db)
            .await?;
        if existing.is_some() {
            report.skipped += 1;
            continue;
        }

        let category = categories::ActiveModel {
            name_en: Set(seed.name_en.to_string()),
            name_ro: Set(seed.name_ro.to_string()),
            slug: Set(seed.slug.to_string()),
            description_en: Set(Some(seed.description_en.to_string())),
            description_ro: Set(Some(seed.description_ro.to_string())),
            image_url: Set(None),
            sort_order: Set(i32::try_from(sort_order).unwrap_or(i32::MAX)),
            is_active: Set(true),
            created_at: Set(Utc::now().into()),
            updated_at: Set(None),
            ..Default::default()
        };
        category.insert(db).await?;
        report.inserted += 1;
    }

    Ok(report)
}

async fn seed_products(db: &DatabaseConnection) -> Result<SeedReport, SeedError> {
    let mut report = SeedReport::default();

    let category_ids: HashMap<String, i32> = categories::Entity::find()
        .all(db)
        .await?
        .into_iter()
        .map(|c| (c.slug, c.id))
        .collect();

    for seed in &PRODUCTS {
        let existing = products::Entity::find()
            .filter(products::Column::Sku.eq(seed.sku))
            .one(db)
            .await?;
        if existing.is_some() {
            report.skipped += 1;
            continue;
        }

        let category_id =
            *category_ids
                .get(seed.category_slug)
                .ok_or(SeedError::MissingCategory {
                    sku: seed.sku,
                    slug: seed.category_slug,
                })?;

        let product = products::ActiveModel {
            name_en: Set(seed.name_en.to_string()),
            name_ro: Set(seed.name_ro.to_string()),
            slug: Set(seed.slug.to_string()),
            description_en: Set(Some(seed.description_en.to_string())),
            description_ro: Set(Some(seed.description_ro.to_string())),
            short_description_en: Set(Some(seed.short_en.to_string())),
            short_description_ro: Set(Some(seed.short_ro.to_string())),
            price: Set(Decimal::new(seed.price_cents, 2)),
            sale_price: Set(None),
            category_id: Set(Some(category_id)),
            brand: Set(Some("Tavola".to_string())),
            sku: Set(Some(seed.sku.to_string())),
            stock_quantity: Set(seed.stock),
            is_active: Set(true),
            images: Set(Some(serde_json::json!([]))),
            has_variants: Set(false),
            variant_type_en: Set(None),
            variant_type_ro: Set(None),
            created_at: Set(Utc::now().into()),
            updated_at: Set(None),
            ..Default::default()
        };
        product.insert(db).await?;
        report.inserted += 1;
    }

    Ok(report)
}

async fn seed_users(db: &DatabaseConnection) -> Result<SeedReport, SeedError> {
    let mut report = SeedReport::default();

    for seed in &USERS {
        let existing = users::Entity::find()
            .filter(users::Column::Email.eq(seed.email))
            .one(db)
            .await?;
        if existing.is_some() {
            report.skipped += 1;
            continue;
        }

        let user = users::ActiveModel {
            email: Set(seed.email.to_string()),
            username: Set(seed.username.to_string()),
            full_name: Set(seed.full_name.to_string()),
            hashed_password: Set(auth::hash_password(seed.password)?),
            phone: Set(Some(seed.phone.to_string())),
            role: Set(seed.role.to_string()),
            is_active: Set(true),
            created_at: Set(Utc::now().into()),
            updated_at: Set(None),
            ..Default::default()
        };
        user.insert(db).await?;
        report.inserted += 1;
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_seed_slugs_and_skus_are_unique() {
        let slugs: HashSet<&str> = CATEGORIES.iter().map(|c| c.slug).collect();
        assert_eq!(slugs.len(), CATEGORIES.len());

        let skus: HashSet<&str> = PRODUCTS.iter().map(|p| p.sku).collect();
        assert_eq!(skus.len(), PRODUCTS.len());

        let emails: HashSet<&str> = USERS.iter().map(|u| u.email).collect();
        assert_eq!(emails.len(), USERS.len());
    }

    #[test]
    fn test_every_product_references_a_seeded_category() {
        let slugs: HashSet<&str> = CATEGORIES.iter().map(|c| c.slug).collect();
        for product in &PRODUCTS {
            assert!(
                slugs.contains(product.category_slug),
                "{} references missing category {}",
                product.sku,
                product.category_slug
            );
        }
    }

    #[test]
    fn test_prices_are_positive_two_decimal_amounts() {
        for product in &PRODUCTS {
            let price = Decimal::new(product.price_cents, 2);
            assert!(price > Decimal::ZERO, "{} has no price", product.sku);
            assert_eq!(price.scale(), 2);
        }
    }
}
