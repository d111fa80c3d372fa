//! Product review business logic.
//!
//! Reviews are written by users against a [`ProductRef`], listed newest first, and
//! summarized into an average rating for detail pages.

use crate::{
    core::{product::ProductRef, user::get_user_by_id},
    entities::{Product, ProductReview, User, product_review},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, prelude::*};
use serde::Serialize;
use tracing::{info, instrument};

/// Lowest accepted rating
pub const MIN_RATING: i32 = 1;
/// Highest accepted rating
pub const MAX_RATING: i32 = 5;

/// Input for [`add_review`]
#[derive(Debug, Clone)]
pub struct NewReview {
    /// Reviewed product
    pub product: ProductRef,
    /// Author
    pub user_id: i64,
    /// 1 to 5
    pub rating: i32,
    /// Headline
    pub title: String,
    /// Body
    pub comment: String,
    /// Whether the author bought the product here
    pub verified_purchase: bool,
}

/// Average rating and number of reviews of a product
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RatingSummary {
    /// Mean rating, 0 when there are no reviews
    pub avg_rating: f64,
    /// Number of reviews
    pub review_count: u64,
}

/// Checks that a rating is within 1..=5.
///
/// # Errors
/// Returns `Error::InvalidRating` otherwise.
pub fn validate_rating(rating: i32) -> Result<()> {
    if !(MIN_RATING..=MAX_RATING).contains(&rating) {
        return Err(Error::InvalidRating { rating });
    }
    Ok(())
}

/// Human-readable label of a rating value
#[must_use]
pub const fn rating_label(rating: i32) -> &'static str {
    match rating {
        1 => "Poor",
        2 => "Fair",
        3 => "Good",
        4 => "Very Good",
        5 => "Excellent",
        _ => "Unrated",
    }
}

/// Adds a review to a product.
///
/// # Errors
/// Returns an error if:
/// - The rating is outside 1..=5 or the title is blank
/// - The product does not exist or is of the other kind
/// - The user does not exist
#[instrument(skip(db, new), fields(product = ?new.product, rating = new.rating))]
pub async fn add_review(db: &DatabaseConnection, new: NewReview) -> Result<product_review::Model> {
    validate_rating(new.rating)?;
    if new.title.trim().is_empty() {
        return Err(Error::validation("Review title cannot be empty"));
    }

    let product = new.product.resolve(db).await?;
    if get_user_by_id(db, new.user_id).await?.is_none() {
        return Err(Error::UserNotFound {
            key: new.user_id.to_string(),
        });
    }

    let review = product_review::ActiveModel {
        product_id: Set(product.id),
        user_id: Set(new.user_id),
        rating: Set(new.rating),
        title: Set(new.title.trim().to_string()),
        comment: Set(new.comment),
        verified_purchase: Set(new.verified_purchase),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    }
    .insert(db)
    .await?;

    info!(
        "Added {}-star review (ID: {}) to product '{}'",
        review.rating, review.id, product.name
    );
    Ok(review)
}

/// Retrieves the reviews of a product, newest first.
pub async fn list_reviews(
    db: &DatabaseConnection,
    product_id: i64,
) -> Result<Vec<product_review::Model>> {
    ProductReview::find()
        .filter(product_review::Column::ProductId.eq(product_id))
        .order_by_desc(product_review::Column::CreatedAt)
        .order_by_desc(product_review::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Averages the ratings of `reviews`.
///
/// An empty slice gives an average of 0 rather than dividing by zero.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn summarize(reviews: &[product_review::Model]) -> RatingSummary {
    if reviews.is_empty() {
        return RatingSummary {
            avg_rating: 0.0,
            review_count: 0,
        };
    }
    let total: i64 = reviews.iter().map(|review| i64::from(review.rating)).sum();
    RatingSummary {
        avg_rating: total as f64 / reviews.len() as f64,
        review_count: reviews.len() as u64,
    }
}

/// Short description of a review, e.g. `"4-star review by user0 for Zen Book"`.
///
/// # Errors
/// Returns `Error::ProductNotFound` or `Error::UserNotFound` if either side of the
/// review cannot be loaded.
pub async fn review_label(
    db: &DatabaseConnection,
    review: &product_review::Model,
) -> Result<String> {
    let product = Product::find_by_id(review.product_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::ProductNotFound {
            key: review.product_id.to_string(),
        })?;
    let user = User::find_by_id(review.user_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::UserNotFound {
            key: review.user_id.to_string(),
        })?;
    Ok(format!(
        "{}-star review by {} for {}",
        review.rating, user.username, product.name
    ))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::test_utils::*;
    use sea_orm::{DatabaseBackend, MockDatabase};

    fn new_review(product: ProductRef, user_id: i64, rating: i32) -> NewReview {
        NewReview {
            product,
            user_id,
            rating,
            title: format!("{rating} stars"),
            comment: "Works as advertised".to_string(),
            verified_purchase: true,
        }
    }

    #[test]
    fn test_validate_rating_bounds() {
        assert!(validate_rating(1).is_ok());
        assert!(validate_rating(5).is_ok());
        assert!(matches!(validate_rating(0), Err(Error::InvalidRating { rating: 0 })));
        assert!(matches!(validate_rating(6), Err(Error::InvalidRating { rating: 6 })));
        assert_eq!(rating_label(4), "Very Good");
    }

    #[test]
    fn test_summarize_empty_is_zero() {
        let summary = summarize(&[]);
        assert_eq!(summary.avg_rating, 0.0);
        assert_eq!(summary.review_count, 0);
    }

    #[tokio::test]
    async fn test_add_review_validation() -> Result<()> {
        let db = MockDatabase::new(DatabaseBackend::Sqlite).into_connection();

        let result = add_review(&db, new_review(ProductRef::Hardware(1), 1, 0)).await;
        assert!(matches!(result.unwrap_err(), Error::InvalidRating { rating: 0 }));

        let mut blank_title = new_review(ProductRef::Hardware(1), 1, 3);
        blank_title.title = " ".to_string();
        let result = add_review(&db, blank_title).await;
        assert!(matches!(result.unwrap_err(), Error::Validation { .. }));
        Ok(())
    }

    #[tokio::test]
    async fn test_reviews_newest_first_and_summary() -> Result<()> {
        let (db, category) = setup_with_category().await?;
        let user = create_test_user(&db, "user0").await?;
        let laptop = create_test_hardware(&db, "Laptop", "HW-00001", category.id, 900).await?;
        let product = ProductRef::Hardware(laptop.base.id);

        let first = add_review(&db, new_review(product, user.id, 3)).await?;
        let second = add_review(&db, new_review(product, user.id, 5)).await?;

        let reviews = list_reviews(&db, laptop.base.id).await?;
        let ids: Vec<i64> = reviews.iter().map(|review| review.id).collect();
        assert_eq!(ids, vec![second.id, first.id]);

        let summary = summarize(&reviews);
        assert_eq!(summary.avg_rating, 4.0);
        assert_eq!(summary.review_count, 2);

        assert_eq!(
            review_label(&db, &first).await?,
            "3-star review by user0 for Laptop"
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_review_requires_existing_user_and_product() -> Result<()> {
        let (db, category) = setup_with_category().await?;
        let suite = create_test_software(&db, "Suite", "SW-00001", category.id, 50).await?;

        let result = add_review(&db, new_review(ProductRef::Software(suite.base.id), 77, 4)).await;
        assert!(matches!(result.unwrap_err(), Error::UserNotFound { .. }));

        let user = create_test_user(&db, "user1").await?;
        let result = add_review(&db, new_review(ProductRef::Hardware(suite.base.id), user.id, 4)).await;
        assert!(matches!(result.unwrap_err(), Error::Validation { .. }));
        Ok(())
    }

    #[tokio::test]
    async fn test_reviews_are_deleted_with_product() -> Result<()> {
        let (db, category) = setup_with_category().await?;
        let user = create_test_user(&db, "user0").await?;
        let laptop = create_test_hardware(&db, "Laptop", "HW-00001", category.id, 900).await?;
        let suite = create_test_software(&db, "Suite", "SW-00001", category.id, 50).await?;

        let review = add_review(&db, new_review(ProductRef::Hardware(laptop.base.id), user.id, 5)).await?;
        add_review(&db, new_review(ProductRef::Software(suite.base.id), user.id, 4)).await?;

        crate::core::product::delete_product(&db, laptop.base.id).await?;

        assert!(list_reviews(&db, laptop.base.id).await?.is_empty());
        assert!(ProductReview::find_by_id(review.id).one(&db).await?.is_none());
        // Reviews of other products and their author are untouched
        assert_eq!(list_reviews(&db, suite.base.id).await?.len(), 1);
        assert!(get_user_by_id(&db, user.id).await?.is_some());
        Ok(())
    }

    #[tokio::test]
    async fn test_out_of_range_rating_is_rejected_by_storage() -> Result<()> {
        let (db, category) = setup_with_category().await?;
        let user = create_test_user(&db, "user0").await?;
        let laptop = create_test_hardware(&db, "Laptop", "HW-00001", category.id, 900).await?;

        // Bypasses add_review; the CHECK constraint still holds.
        let result = product_review::ActiveModel {
            product_id: Set(laptop.base.id),
            user_id: Set(user.id),
            rating: Set(9),
            title: Set("Too good".to_string()),
            comment: Set(String::new()),
            verified_purchase: Set(false),
            created_at: Set(chrono::Utc::now()),
            ..Default::default()
        }
        .insert(&db)
        .await;
        assert!(result.is_err());
        Ok(())
    }
}
