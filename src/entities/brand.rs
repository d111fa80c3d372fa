//! Brand entity - Flat list of manufacturers and publishers.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Brand database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "brands")]
pub struct Model {
    /// Unique identifier for the brand
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Display name (e.g., "Acme Computing")
    pub name: String,
    /// URL-safe identifier, unique across brands
    #[sea_orm(unique)]
    pub slug: String,
    /// Media reference under the `brands/` bucket
    pub logo: Option<String>,
    /// Brand website, empty when unknown
    pub website: String,
}

/// Defines relationships between Brand and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One brand has many products
    #[sea_orm(has_many = "super::product::Entity")]
    Products,
}

impl Related<super::product::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Products.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
