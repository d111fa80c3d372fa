//! Database configuration module for the storefront catalog.
//!
//! This module handles `SQLite` database connection and table creation using `SeaORM`.
//! Tables are generated from the entity definitions with `Schema::create_table_from_entity`,
//! so foreign keys (including their `ON DELETE` actions) and unique columns follow the
//! Rust structs. The few CHECK constraints the entities cannot express (non-negative
//! prices and stock, review ratings in 1..=5) are added to the generated statements here.
//! Product slugs and SKUs are unique per kind, through composite indexes on
//! `(kind, slug)` and `(kind, sku)`.

use crate::entities::{
    Brand, Category, HardwareDetails, Product, ProductImage, ProductReview, SoftwareDetails,
    User, hardware_details, product, product_review,
};
use crate::errors::Result;
use sea_orm::sea_query::{Expr, Index, IndexCreateStatement, TableCreateStatement};
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, EntityTrait, Schema};
use std::path::Path;
use tracing::{debug, info};

const DEFAULT_DATABASE_URL: &str = "sqlite://data/catalog.sqlite?mode=rwc";

/// Gets the database URL from environment variable or returns default `SQLite` path.
///
/// This function looks for `DATABASE_URL` in the environment and falls back to
/// a default local `SQLite` file (created on first use) if not found.
#[must_use]
pub fn get_database_url() -> String {
    std::env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string())
}

/// Establishes a connection to the database named by `DATABASE_URL`.
///
/// `SQLite` connections opened through sqlx enforce foreign keys, which the cascading
/// deletes of the catalog rely on.
pub async fn create_connection() -> Result<DatabaseConnection> {
    let database_url = get_database_url();
    if let Some(dir) = sqlite_parent_dir(&database_url) {
        std::fs::create_dir_all(dir)?;
    }
    debug!("Connecting to {}", database_url);
    Database::connect(&database_url).await.map_err(Into::into)
}

/// Directory holding a file-backed `SQLite` database, if it has one.
fn sqlite_parent_dir(database_url: &str) -> Option<&Path> {
    let path = database_url.strip_prefix("sqlite://")?;
    let path = path.split('?').next()?;
    Path::new(path)
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
}

fn table_for<E: EntityTrait>(schema: &Schema, entity: E) -> TableCreateStatement {
    let mut table = schema.create_table_from_entity(entity);
    table.if_not_exists();
    table
}

/// Unique index over `(kind, column)` on the products table.
fn unique_per_kind(name: &str, column: product::Column) -> IndexCreateStatement {
    Index::create()
        .name(name)
        .table(Product)
        .col(product::Column::Kind)
        .col(column)
        .unique()
        .if_not_exists()
        .to_owned()
}

/// Creates all catalog tables if they do not exist yet.
///
/// Tables are created parents first so every foreign key points at an existing table.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let user_table = table_for(&schema, User);
    let category_table = table_for(&schema, Category);
    let brand_table = table_for(&schema, Brand);

    let mut product_table = table_for(&schema, Product);
    product_table.check(Expr::col(product::Column::Price).gte(0));
    product_table.check(
        Expr::col(product::Column::SalePrice)
            .is_null()
            .or(Expr::col(product::Column::SalePrice).gte(0)),
    );

    let mut hardware_table = table_for(&schema, HardwareDetails);
    hardware_table.check(Expr::col(hardware_details::Column::Quantity).gte(0));
    hardware_table.check(Expr::col(hardware_details::Column::WarrantyMonths).gte(0));

    let software_table = table_for(&schema, SoftwareDetails);
    let image_table = table_for(&schema, ProductImage);

    let mut review_table = table_for(&schema, ProductReview);
    review_table.check(Expr::col(product_review::Column::Rating).between(1, 5));

    for table in [
        &user_table,
        &category_table,
        &brand_table,
        &product_table,
        &hardware_table,
        &software_table,
        &image_table,
        &review_table,
    ] {
        db.execute(builder.build(table)).await?;
    }

    for index in [
        unique_per_kind("idx_products_kind_slug", product::Column::Slug),
        unique_per_kind("idx_products_kind_sku", product::Column::Sku),
    ] {
        db.execute(builder.build(&index)).await?;
    }

    info!("Catalog tables ensured.");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{category::Model as CategoryModel, product::Model as ProductModel};
    use sea_orm::QuerySelect;

    #[test]
    fn test_sqlite_parent_dir() {
        assert_eq!(
            sqlite_parent_dir("sqlite://data/catalog.sqlite?mode=rwc"),
            Some(Path::new("data"))
        );
        assert_eq!(sqlite_parent_dir("sqlite://catalog.sqlite"), None);
        assert_eq!(sqlite_parent_dir("sqlite::memory:"), None);
    }

    #[tokio::test]
    async fn test_create_tables() -> Result<()> {
        let db = Database::connect("sqlite::memory:").await?;
        create_tables(&db).await?;

        // Test that tables exist by querying them
        let _: Vec<CategoryModel> = Category::find().limit(1).all(&db).await?;
        let _: Vec<ProductModel> = Product::find().limit(1).all(&db).await?;
        let _ = ProductReview::find().limit(1).all(&db).await?;
        let _ = ProductImage::find().limit(1).all(&db).await?;
        Ok(())
    }

    #[tokio::test]
    async fn test_create_tables_is_idempotent() -> Result<()> {
        let db = Database::connect("sqlite::memory:").await?;
        create_tables(&db).await?;
        create_tables(&db).await?;
        Ok(())
    }
}
