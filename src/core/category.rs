//! Category business logic - Handles the category side of the taxonomy.
//!
//! Categories are created with a slug derived from their name unless one is given, and
//! slug uniqueness is left to the unique column so concurrent creators cannot race past
//! a check. Subcategory lookups return direct children only.

use crate::{
    config::media::{Bucket, upload_path},
    core::slug::resolve_slug,
    entities::{Category, category},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, prelude::*};
use tracing::{info, instrument};

/// Input for [`create_category`]
#[derive(Debug, Clone, Default)]
pub struct NewCategory {
    /// Display name, required
    pub name: String,
    /// Explicit slug; derived from `name` when `None` or blank
    pub slug: Option<String>,
    /// Description, may be empty
    pub description: String,
    /// Parent category id
    pub parent_id: Option<i64>,
    /// Image reference, stored under the `categories/` bucket
    pub image: Option<String>,
}

impl NewCategory {
    /// A root category with only a name.
    #[must_use]
    pub fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Self::default()
        }
    }
}

/// Creates a category, deriving its slug when none is given.
///
/// # Errors
/// Returns an error if:
/// - The name is empty or whitespace-only
/// - No valid slug can be determined
/// - The parent category does not exist
/// - The slug is already taken (`Error::UniqueViolation`)
#[instrument(skip(db, new), fields(name = %new.name))]
pub async fn create_category(db: &DatabaseConnection, new: NewCategory) -> Result<category::Model> {
    let name = new.name.trim();
    if name.is_empty() {
        return Err(Error::validation("Category name cannot be empty"));
    }
    let slug = resolve_slug(new.slug.as_deref(), name)?;

    if let Some(parent_id) = new.parent_id {
        if get_category_by_id(db, parent_id).await?.is_none() {
            return Err(Error::CategoryNotFound {
                key: parent_id.to_string(),
            });
        }
    }

    let category = category::ActiveModel {
        name: Set(name.to_string()),
        slug: Set(slug),
        description: Set(new.description),
        parent_id: Set(new.parent_id),
        image: Set(new.image.map(|image| upload_path(Bucket::Categories, &image))),
        ..Default::default()
    }
    .insert(db)
    .await?;

    info!(
        "Created category '{}' (ID: {}, slug: {})",
        category.name, category.id, category.slug
    );
    Ok(category)
}

/// Finds a category by its unique ID.
pub async fn get_category_by_id(
    db: &DatabaseConnection,
    category_id: i64,
) -> Result<Option<category::Model>> {
    Category::find_by_id(category_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Finds a category by its slug.
pub async fn get_category_by_slug(
    db: &DatabaseConnection,
    slug: &str,
) -> Result<Option<category::Model>> {
    Category::find()
        .filter(category::Column::Slug.eq(slug))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Retrieves every category, ordered alphabetically by name.
pub async fn list_categories(db: &DatabaseConnection) -> Result<Vec<category::Model>> {
    Category::find()
        .order_by_asc(category::Column::Name)
        .order_by_asc(category::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves the categories without a parent, ordered by name.
pub async fn list_root_categories(db: &DatabaseConnection) -> Result<Vec<category::Model>> {
    Category::find()
        .filter(category::Column::ParentId.is_null())
        .order_by_asc(category::Column::Name)
        .order_by_asc(category::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves the direct children of a category, ordered by name.
///
/// Grandchildren are not included; callers that need deeper trees walk level by level.
pub async fn get_subcategories(
    db: &DatabaseConnection,
    parent_id: i64,
) -> Result<Vec<category::Model>> {
    Category::find()
        .filter(category::Column::ParentId.eq(parent_id))
        .order_by_asc(category::Column::Name)
        .order_by_asc(category::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Deletes a category.
///
/// Products in the category are deleted with it (and their details, images and reviews
/// with them); child categories become root categories.
///
/// # Errors
/// Returns `Error::CategoryNotFound` if no category has this id.
#[instrument(skip(db))]
pub async fn delete_category(db: &DatabaseConnection, category_id: i64) -> Result<()> {
    let result = Category::delete_by_id(category_id).exec(db).await?;
    if result.rows_affected == 0 {
        return Err(Error::CategoryNotFound {
            key: category_id.to_string(),
        });
    }
    info!("Deleted category {}", category_id);
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;
    use sea_orm::{DatabaseBackend, MockDatabase};

    #[tokio::test]
    async fn test_create_category_validation() -> Result<()> {
        let db = MockDatabase::new(DatabaseBackend::Sqlite).into_connection();

        let result = create_category(&db, NewCategory::named("   ")).await;
        assert!(matches!(result.unwrap_err(), Error::Validation { .. }));

        let result = create_category(&db, NewCategory::named("%%%")).await;
        assert!(matches!(result.unwrap_err(), Error::Validation { .. }));

        Ok(())
    }

    #[tokio::test]
    async fn test_create_category_derives_slug() -> Result<()> {
        let db = setup_test_db().await?;

        let category = create_category(&db, NewCategory::named("Gaming Laptops")).await?;
        assert_eq!(category.name, "Gaming Laptops");
        assert_eq!(category.slug, "gaming-laptops");
        assert!(category.parent_id.is_none());

        let found = get_category_by_slug(&db, "gaming-laptops").await?.unwrap();
        assert_eq!(found, category);
        Ok(())
    }

    #[tokio::test]
    async fn test_create_category_keeps_explicit_slug_and_image_bucket() -> Result<()> {
        let db = setup_test_db().await?;

        let category = create_category(
            &db,
            NewCategory {
                name: "Phones".to_string(),
                slug: Some("mobile".to_string()),
                image: Some("phones.png".to_string()),
                ..NewCategory::default()
            },
        )
        .await?;
        assert_eq!(category.slug, "mobile");
        assert_eq!(category.image.as_deref(), Some("categories/phones.png"));
        Ok(())
    }

    #[tokio::test]
    async fn test_duplicate_slug_is_unique_violation() -> Result<()> {
        let db = setup_test_db().await?;

        create_category(&db, NewCategory::named("Laptops")).await?;
        let result = create_category(&db, NewCategory::named("laptops")).await;
        assert!(matches!(result.unwrap_err(), Error::UniqueViolation { .. }));
        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_parent_is_rejected() -> Result<()> {
        let db = setup_test_db().await?;

        let result = create_category(
            &db,
            NewCategory {
                parent_id: Some(999),
                ..NewCategory::named("Orphan")
            },
        )
        .await;
        assert!(matches!(result.unwrap_err(), Error::CategoryNotFound { .. }));
        Ok(())
    }

    #[tokio::test]
    async fn test_subcategories_are_direct_children_only() -> Result<()> {
        let db = setup_test_db().await?;

        let computers = create_test_category(&db, "Computers").await?;
        let laptops = create_child_category(&db, "Laptops", computers.id).await?;
        let desktops = create_child_category(&db, "Desktops", computers.id).await?;
        let ultrabooks = create_child_category(&db, "Ultrabooks", laptops.id).await?;

        let children = get_subcategories(&db, computers.id).await?;
        assert_eq!(children, vec![desktops, laptops.clone()]);

        let grandchildren = get_subcategories(&db, laptops.id).await?;
        assert_eq!(grandchildren, vec![ultrabooks]);

        let roots = list_root_categories(&db).await?;
        assert_eq!(roots, vec![computers]);
        assert_eq!(list_categories(&db).await?.len(), 4);
        Ok(())
    }

    #[tokio::test]
    async fn test_delete_parent_orphans_children() -> Result<()> {
        let db = setup_test_db().await?;

        let computers = create_test_category(&db, "Computers").await?;
        let laptops = create_child_category(&db, "Laptops", computers.id).await?;

        delete_category(&db, computers.id).await?;

        let laptops = get_category_by_id(&db, laptops.id).await?.unwrap();
        assert!(laptops.parent_id.is_none());
        assert!(get_category_by_slug(&db, "computers").await?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn test_delete_missing_category() -> Result<()> {
        let db = setup_test_db().await?;
        let result = delete_category(&db, 42).await;
        assert!(matches!(result.unwrap_err(), Error::CategoryNotFound { .. }));
        Ok(())
    }
}
