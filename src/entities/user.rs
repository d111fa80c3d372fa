//! User entity - Owner of product reviews.
//!
//! Only the fields reviews need are stored; authentication lives elsewhere.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// User database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    /// Unique identifier for the user
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Login name, unique
    #[sea_orm(unique)]
    pub username: String,
    /// Contact address, may be empty
    pub email: String,
    /// When the user was created
    pub created_at: DateTimeUtc,
}

/// Defines relationships between User and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One user writes many reviews
    #[sea_orm(has_many = "super::product_review::Entity")]
    Reviews,
}

impl Related<super::product_review::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Reviews.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
