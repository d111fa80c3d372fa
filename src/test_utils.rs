//! Shared test utilities for the catalog.
//!
//! This module provides common helper functions for setting up test databases
//! and creating test entities with sensible defaults.

use crate::{
    core::{
        brand::{NewBrand, create_brand},
        category::{NewCategory, create_category},
        product::{
            HardwareSpec, NewProduct, Product, SoftwareSpec, create_hardware_product,
            create_software_product,
        },
        user::create_user,
    },
    entities::{self, product::ProductStatus, software_details::LicenseType},
    errors::Result,
};
use rust_decimal::Decimal;
use sea_orm::DatabaseConnection;

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Creates a root category with only a name.
pub async fn create_test_category(
    db: &DatabaseConnection,
    name: &str,
) -> Result<entities::category::Model> {
    create_category(db, NewCategory::named(name)).await
}

/// Creates a category under `parent_id`.
pub async fn create_child_category(
    db: &DatabaseConnection,
    name: &str,
    parent_id: i64,
) -> Result<entities::category::Model> {
    create_category(
        db,
        NewCategory {
            parent_id: Some(parent_id),
            ..NewCategory::named(name)
        },
    )
    .await
}

/// Creates a brand with only a name.
pub async fn create_test_brand(
    db: &DatabaseConnection,
    name: &str,
) -> Result<entities::brand::Model> {
    create_brand(db, NewBrand::named(name)).await
}

/// Creates a review author with a derived email address.
pub async fn create_test_user(
    db: &DatabaseConnection,
    username: &str,
) -> Result<entities::user::Model> {
    create_user(db, username, &format!("{username}@example.com")).await
}

/// Common product fields with sensible defaults.
///
/// # Defaults
/// * `status`: published
/// * `featured`: false
/// * slug derived from `name`, no brand, no sale price
pub fn hardware_draft(name: &str, sku: &str, category_id: i64, price: i64) -> NewProduct {
    NewProduct {
        name: name.to_string(),
        sku: sku.to_string(),
        description: format!("{name} description"),
        price: Decimal::from(price),
        category_id,
        status: ProductStatus::Published,
        ..NewProduct::default()
    }
}

/// Hardware details with `quantity` units and a mid-range laptop configuration.
pub fn hardware_spec(quantity: i32) -> HardwareSpec {
    HardwareSpec {
        quantity,
        warranty_months: 12,
        dimensions: "30x20x2".to_string(),
        color: "Silver".to_string(),
        processor: Some("Intel Core i5".to_string()),
        memory: Some("8GB".to_string()),
        storage: Some("256GB SSD".to_string()),
        ..HardwareSpec::default()
    }
}

/// Creates a published hardware product with 5 units in stock.
pub async fn create_test_hardware(
    db: &DatabaseConnection,
    name: &str,
    sku: &str,
    category_id: i64,
    price: i64,
) -> Result<Product> {
    create_hardware_product(db, hardware_draft(name, sku, category_id, price), hardware_spec(5))
        .await
}

/// Creates a published software product.
///
/// # Defaults
/// * `license_type`: perpetual
/// * `version`: "2024"
/// * `platform`: "Windows"
pub async fn create_test_software(
    db: &DatabaseConnection,
    name: &str,
    sku: &str,
    category_id: i64,
    price: i64,
) -> Result<Product> {
    create_software_product(
        db,
        hardware_draft(name, sku, category_id, price),
        SoftwareSpec::new(LicenseType::Perpetual, "2024", "Windows"),
    )
    .await
}

/// Creates a published software product with a specific license type.
pub async fn create_custom_software(
    db: &DatabaseConnection,
    name: &str,
    sku: &str,
    category_id: i64,
    license_type: LicenseType,
) -> Result<Product> {
    let mut spec = SoftwareSpec::new(license_type, "1.0", "Cross-platform");
    if license_type == LicenseType::Subscription {
        spec.subscription_period = Some(12);
    }
    create_software_product(db, hardware_draft(name, sku, category_id, 10), spec).await
}

/// Sets up a complete test environment with one root category named "Laptops".
/// Returns (db, category) for common test scenarios.
pub async fn setup_with_category() -> Result<(DatabaseConnection, entities::category::Model)> {
    let db = setup_test_db().await?;
    let category = create_test_category(&db, "Laptops").await?;
    Ok((db, category))
}
