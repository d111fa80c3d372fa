//! Product image entity - Pictures attached to a product.
//!
//! The owning product is a single non-null foreign key, so an image always belongs to
//! exactly one product regardless of its kind.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Product image database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "product_images")]
pub struct Model {
    /// Unique identifier for the image
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Owning product
    pub product_id: i64,
    /// Media reference under the `products/` bucket
    pub image: String,
    /// Alternative text, may be empty
    pub alt_text: String,
    /// Primary images are listed first
    pub is_primary: bool,
    /// When the image was attached
    pub created_at: DateTimeUtc,
}

/// Defines relationships between ProductImage and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each image belongs to one product
    #[sea_orm(
        belongs_to = "super::product::Entity",
        from = "Column::ProductId",
        to = "super::product::Column::Id",
        on_delete = "Cascade"
    )]
    Product,
}

impl Related<super::product::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Product.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
