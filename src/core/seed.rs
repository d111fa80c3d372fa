//! Taxonomy seeding from catalog.toml.
//!
//! Seed entries are matched to existing rows by slug. Existing rows are left untouched,
//! so running the seed on every start is safe.

use crate::{
    config::catalog::{BrandSeed, CatalogConfig, CategorySeed},
    core::{
        brand::{NewBrand, create_brand, get_brand_by_slug},
        category::{NewCategory, create_category, get_category_by_slug},
        slug::resolve_slug,
    },
    errors::{Error, Result},
};
use sea_orm::DatabaseConnection;
use tracing::{debug, info, instrument};

/// Number of rows each seed run created
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedSummary {
    /// Categories inserted
    pub categories_created: usize,
    /// Brands inserted
    pub brands_created: usize,
}

async fn seed_category(db: &DatabaseConnection, seed: &CategorySeed) -> Result<bool> {
    let slug = resolve_slug(seed.slug.as_deref(), &seed.name)?;
    if get_category_by_slug(db, &slug).await?.is_some() {
        debug!("Category '{}' already exists. Skipping.", slug);
        return Ok(false);
    }

    let parent_id = match seed.parent.as_deref() {
        Some(parent) => Some(
            get_category_by_slug(db, parent)
                .await?
                .ok_or_else(|| Error::CategoryNotFound {
                    key: parent.to_string(),
                })?
                .id,
        ),
        None => None,
    };

    create_category(
        db,
        NewCategory {
            name: seed.name.clone(),
            slug: Some(slug),
            description: seed.description.clone(),
            parent_id,
            image: seed.image.clone(),
        },
    )
    .await?;
    Ok(true)
}

async fn seed_brand(db: &DatabaseConnection, seed: &BrandSeed) -> Result<bool> {
    let slug = resolve_slug(seed.slug.as_deref(), &seed.name)?;
    if get_brand_by_slug(db, &slug).await?.is_some() {
        debug!("Brand '{}' already exists. Skipping.", slug);
        return Ok(false);
    }

    create_brand(
        db,
        NewBrand {
            name: seed.name.clone(),
            slug: Some(slug),
            website: seed.website.clone(),
            logo: seed.logo.clone(),
        },
    )
    .await?;
    Ok(true)
}

/// Creates the configured categories and brands that do not exist yet.
///
/// Categories are processed in file order, so a parent must be listed before its
/// children.
///
/// # Errors
/// Returns `Error::CategoryNotFound` if a parent slug does not resolve, or any error
/// from creating the rows.
#[instrument(skip(db, config))]
pub async fn seed_taxonomy(db: &DatabaseConnection, config: &CatalogConfig) -> Result<SeedSummary> {
    info!(
        "Seeding taxonomy. Found {} categories and {} brands in config.",
        config.categories.len(),
        config.brands.len()
    );

    let mut summary = SeedSummary::default();
    for seed in &config.categories {
        if seed_category(db, seed).await? {
            summary.categories_created += 1;
        }
    }
    for seed in &config.brands {
        if seed_brand(db, seed).await? {
            summary.brands_created += 1;
        }
    }

    info!(
        "Seeded {} categories and {} brands",
        summary.categories_created, summary.brands_created
    );
    Ok(summary)
}
