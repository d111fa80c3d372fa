//! Product image business logic.
//!
//! Images are attached through a [`ProductRef`], stored with a single `product_id` and
//! listed primary first, then in the order they were added.

use crate::{
    config::media::{Bucket, upload_path},
    core::product::ProductRef,
    entities::{Product, ProductImage, product_image},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, prelude::*};
use tracing::{info, instrument};

/// Input for [`add_image`]
#[derive(Debug, Clone)]
pub struct NewImage {
    /// Product the image belongs to
    pub product: ProductRef,
    /// Media reference, stored under the `products/` bucket
    pub image: String,
    /// Alternative text
    pub alt_text: String,
    /// Whether this is the main picture of the product
    pub is_primary: bool,
}

/// Attaches an image to a product.
///
/// # Errors
/// Returns an error if:
/// - The image reference is blank
/// - The product does not exist (`Error::ProductNotFound`) or is of the other kind
#[instrument(skip(db, new), fields(product = ?new.product))]
pub async fn add_image(db: &DatabaseConnection, new: NewImage) -> Result<product_image::Model> {
    if new.image.trim().is_empty() {
        return Err(Error::validation("Image reference cannot be empty"));
    }
    let product = new.product.resolve(db).await?;

    let image = product_image::ActiveModel {
        product_id: Set(product.id),
        image: Set(upload_path(Bucket::Products, &new.image)),
        alt_text: Set(new.alt_text.trim().to_string()),
        is_primary: Set(new.is_primary),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    }
    .insert(db)
    .await?;

    info!(
        "Attached image {} (ID: {}) to product '{}'",
        image.image, image.id, product.name
    );
    Ok(image)
}

/// Retrieves the images of a product, primary first, then oldest first.
pub async fn list_images(
    db: &DatabaseConnection,
    product_id: i64,
) -> Result<Vec<product_image::Model>> {
    ProductImage::find()
        .filter(product_image::Column::ProductId.eq(product_id))
        .order_by_desc(product_image::Column::IsPrimary)
        .order_by_asc(product_image::Column::CreatedAt)
        .order_by_asc(product_image::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Removes an image.
///
/// # Errors
/// Returns `Error::ImageNotFound` if no image has this id.
#[instrument(skip(db))]
pub async fn delete_image(db: &DatabaseConnection, image_id: i64) -> Result<()> {
    let result = ProductImage::delete_by_id(image_id).exec(db).await?;
    if result.rows_affected == 0 {
        return Err(Error::ImageNotFound {
            key: image_id.to_string(),
        });
    }
    Ok(())
}

/// Short description of an image, e.g. `"Image for Zen Book (primary)"`.
///
/// # Errors
/// Returns `Error::ProductNotFound` if the owning product cannot be loaded.
pub async fn image_label(db: &DatabaseConnection, image: &product_image::Model) -> Result<String> {
    let product = Product::find_by_id(image.product_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::ProductNotFound {
            key: image.product_id.to_string(),
        })?;
    let role = if image.is_primary { "primary" } else { "secondary" };
    Ok(format!("Image for {} ({role})", product.name))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;
    use sea_orm::{DatabaseBackend, MockDatabase};

    fn new_image(product: ProductRef, image: &str, is_primary: bool) -> NewImage {
        NewImage {
            product,
            image: image.to_string(),
            alt_text: format!("{image} alt"),
            is_primary,
        }
    }

    #[tokio::test]
    async fn test_add_image_validation() -> Result<()> {
        let db = MockDatabase::new(DatabaseBackend::Sqlite).into_connection();
        let result = add_image(&db, new_image(ProductRef::Hardware(1), "  ", false)).await;
        assert!(matches!(result.unwrap_err(), Error::Validation { .. }));
        Ok(())
    }

    #[tokio::test]
    async fn test_images_list_primary_first() -> Result<()> {
        let (db, category) = setup_with_category().await?;
        let laptop = create_test_hardware(&db, "Laptop", "HW-00001", category.id, 900).await?;
        let product = ProductRef::Hardware(laptop.base.id);

        let side = add_image(&db, new_image(product, "side.jpg", false)).await?;
        let back = add_image(&db, new_image(product, "back.jpg", false)).await?;
        let front = add_image(&db, new_image(product, "front.jpg", true)).await?;

        assert_eq!(front.image, "products/front.jpg");
        let ids: Vec<i64> = list_images(&db, laptop.base.id)
            .await?
            .iter()
            .map(|image| image.id)
            .collect();
        assert_eq!(ids, vec![front.id, side.id, back.id]);

        assert_eq!(image_label(&db, &front).await?, "Image for Laptop (primary)");
        assert_eq!(image_label(&db, &side).await?, "Image for Laptop (secondary)");
        Ok(())
    }

    #[tokio::test]
    async fn test_image_for_wrong_kind_is_rejected() -> Result<()> {
        let (db, category) = setup_with_category().await?;
        let suite = create_test_software(&db, "Suite", "SW-00001", category.id, 50).await?;

        let result = add_image(&db, new_image(ProductRef::Hardware(suite.base.id), "a.jpg", true)).await;
        assert!(matches!(result.unwrap_err(), Error::Validation { .. }));

        let result = add_image(&db, new_image(ProductRef::Software(999), "a.jpg", true)).await;
        assert!(matches!(result.unwrap_err(), Error::ProductNotFound { .. }));
        Ok(())
    }

    #[tokio::test]
    async fn test_image_without_product_is_rejected_by_storage() -> Result<()> {
        let db = setup_test_db().await?;

        // Bypasses add_image entirely; the foreign key still refuses a dangling owner.
        let result = product_image::ActiveModel {
            product_id: Set(12345),
            image: Set("products/orphan.jpg".to_string()),
            alt_text: Set(String::new()),
            is_primary: Set(false),
            created_at: Set(chrono::Utc::now()),
            ..Default::default()
        }
        .insert(&db)
        .await;
        assert!(result.is_err());
        Ok(())
    }

    #[tokio::test]
    async fn test_images_are_deleted_with_product() -> Result<()> {
        let (db, category) = setup_with_category().await?;
        let laptop = create_test_hardware(&db, "Laptop", "HW-00001", category.id, 900).await?;
        let image = add_image(&db, new_image(ProductRef::Hardware(laptop.base.id), "a.jpg", true)).await?;

        crate::core::product::delete_product(&db, laptop.base.id).await?;

        assert!(ProductImage::find_by_id(image.id).one(&db).await?.is_none());
        let result = delete_image(&db, image.id).await;
        assert!(matches!(result.unwrap_err(), Error::ImageNotFound { .. }));
        Ok(())
    }

    #[tokio::test]
    async fn test_delete_image() -> Result<()> {
        let (db, category) = setup_with_category().await?;
        let laptop = create_test_hardware(&db, "Laptop", "HW-00001", category.id, 900).await?;
        let image = add_image(&db, new_image(ProductRef::Hardware(laptop.base.id), "a.jpg", true)).await?;

        delete_image(&db, image.id).await?;
        assert!(list_images(&db, laptop.base.id).await?.is_empty());

        let result = delete_image(&db, 999).await;
        assert!(matches!(result.unwrap_err(), Error::ImageNotFound { key } if key == "999"));
        Ok(())
    }
}
