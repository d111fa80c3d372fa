//! Brand business logic.
//!
//! Brands are a flat list. Deleting one keeps its products and clears their brand.

use crate::{
    config::media::{Bucket, upload_path},
    core::slug::resolve_slug,
    entities::{Brand, brand},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, prelude::*};
use tracing::{info, instrument};

/// Input for [`create_brand`]
#[derive(Debug, Clone, Default)]
pub struct NewBrand {
    /// Display name, required
    pub name: String,
    /// Explicit slug; derived from `name` when `None` or blank
    pub slug: Option<String>,
    /// Website URL, may be empty
    pub website: String,
    /// Logo reference, stored under the `brands/` bucket
    pub logo: Option<String>,
}

impl NewBrand {
    /// A brand with only a name.
    #[must_use]
    pub fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Self::default()
        }
    }
}

/// Creates a brand, deriving its slug when none is given.
///
/// # Errors
/// Returns an error if:
/// - The name is empty or whitespace-only
/// - No valid slug can be determined
/// - The slug is already taken (`Error::UniqueViolation`)
#[instrument(skip(db, new), fields(name = %new.name))]
pub async fn create_brand(db: &DatabaseConnection, new: NewBrand) -> Result<brand::Model> {
    let name = new.name.trim();
    if name.is_empty() {
        return Err(Error::validation("Brand name cannot be empty"));
    }
    let slug = resolve_slug(new.slug.as_deref(), name)?;

    let brand = brand::ActiveModel {
        name: Set(name.to_string()),
        slug: Set(slug),
        website: Set(new.website.trim().to_string()),
        logo: Set(new.logo.map(|logo| upload_path(Bucket::Brands, &logo))),
        ..Default::default()
    }
    .insert(db)
    .await?;

    info!("Created brand '{}' (ID: {}, slug: {})", brand.name, brand.id, brand.slug);
    Ok(brand)
}

/// Finds a brand by its unique ID.
pub async fn get_brand_by_id(db: &DatabaseConnection, brand_id: i64) -> Result<Option<brand::Model>> {
    Brand::find_by_id(brand_id).one(db).await.map_err(Into::into)
}

/// Finds a brand by its slug.
pub async fn get_brand_by_slug(db: &DatabaseConnection, slug: &str) -> Result<Option<brand::Model>> {
    Brand::find()
        .filter(brand::Column::Slug.eq(slug))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Retrieves every brand, ordered alphabetically by name.
pub async fn list_brands(db: &DatabaseConnection) -> Result<Vec<brand::Model>> {
    Brand::find()
        .order_by_asc(brand::Column::Name)
        .order_by_asc(brand::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Deletes a brand; its products stay in the catalog without a brand.
///
/// # Errors
/// Returns `Error::BrandNotFound` if no brand has this id.
#[instrument(skip(db))]
pub async fn delete_brand(db: &DatabaseConnection, brand_id: i64) -> Result<()> {
    let result = Brand::delete_by_id(brand_id).exec(db).await?;
    if result.rows_affected == 0 {
        return Err(Error::BrandNotFound {
            key: brand_id.to_string(),
        });
    }
    info!("Deleted brand {}", brand_id);
    Ok(())
}
