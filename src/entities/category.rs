//! Category entity - Node of the catalog taxonomy.
//!
//! Categories form a tree through the nullable `parent_id` self-reference. Only one
//! level of nesting is used by the pages, but depth is not limited. Deleting a parent
//! leaves its children in place as root categories.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Category database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "categories")]
pub struct Model {
    /// Unique identifier for the category
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Display name (e.g., "Laptops")
    pub name: String,
    /// URL-safe identifier, unique across categories
    #[sea_orm(unique)]
    pub slug: String,
    /// Free-form description, may be empty
    #[sea_orm(column_type = "Text")]
    pub description: String,
    /// Parent category, None for root categories
    pub parent_id: Option<i64>,
    /// Media reference under the `categories/` bucket
    pub image: Option<String>,
}

/// Defines relationships between Category and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each category may belong to a parent category
    #[sea_orm(
        belongs_to = "Entity",
        from = "Column::ParentId",
        to = "Column::Id",
        on_delete = "SetNull"
    )]
    Parent,
    /// One category has many products
    #[sea_orm(has_many = "super::product::Entity")]
    Products,
}

impl Related<super::product::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Products.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
