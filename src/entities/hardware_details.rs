//! Hardware detail entity - Attributes specific to physical products.
//!
//! One row per hardware product, keyed by the product id and deleted with it.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Hardware detail database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "hardware_details")]
pub struct Model {
    /// Id of the owning product
    #[sea_orm(primary_key, auto_increment = false)]
    pub product_id: i64,
    /// Units on hand, never negative
    pub quantity: i32,
    /// Warranty duration in months
    pub warranty_months: i32,
    /// Weight in kg
    #[sea_orm(column_type = "Decimal(Some((6, 2)))", nullable)]
    pub weight: Option<Decimal>,
    /// Format: LxWxH in cm, may be empty
    pub dimensions: String,
    /// May be empty
    pub color: String,
    /// Physical condition
    pub condition: Condition,
    /// e.g. "Intel i7"
    pub processor: Option<String>,
    /// e.g. "16GB"
    pub memory: Option<String>,
    /// e.g. "512GB SSD"
    pub storage: Option<String>,
    /// e.g. "14\""
    pub display: Option<String>,
    /// e.g. "10 hours"
    pub battery_life: Option<String>,
    /// e.g. "720p HD"
    pub camera: Option<String>,
    /// e.g. "Windows 11"
    pub operating_system: Option<String>,
}

impl Model {
    /// Hardware is in stock while at least one unit is on hand.
    #[must_use]
    pub const fn in_stock(&self) -> bool {
        self.quantity > 0
    }
}

/// Physical condition of a hardware product
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    EnumIter,
    DeriveActiveEnum,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(15))")]
#[serde(rename_all = "snake_case")]
pub enum Condition {
    /// Factory new
    #[default]
    #[sea_orm(string_value = "new")]
    New,
    /// Restored by the manufacturer or a reseller
    #[sea_orm(string_value = "refurbished")]
    Refurbished,
    /// Second hand
    #[sea_orm(string_value = "used")]
    Used,
}

/// Defines relationships between hardware details and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Detail row belongs to one product
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
