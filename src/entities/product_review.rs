//! Product review entity - User ratings and comments.
//!
//! Like images, a review has exactly one owning product. Ratings are restricted to
//! 1..=5 by a CHECK constraint created alongside the table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Product review database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "product_reviews")]
pub struct Model {
    /// Unique identifier for the review
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Reviewed product
    pub product_id: i64,
    /// Author of the review
    pub user_id: i64,
    /// 1 (poor) to 5 (excellent)
    pub rating: i32,
    /// Short headline
    pub title: String,
    /// Review body
    #[sea_orm(column_type = "Text")]
    pub comment: String,
    /// Whether the author bought the product through the store
    pub verified_purchase: bool,
    /// When the review was written
    pub created_at: DateTimeUtc,
}

/// Defines relationships between ProductReview and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each review belongs to one product
    #[sea_orm(
        belongs_to = "super::product::Entity",
        from = "Column::ProductId",
        to = "super::product::Column::Id",
        on_delete = "Cascade"
    )]
    Product,
    /// Each review is written by one user
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
    )]
    User,
}

impl Related<super::product::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Product.def()
    }
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
