//! Product entity - Fields shared by every product variant.
//!
//! Each row is tagged with a [`ProductKind`] and owns exactly one row in the matching
//! detail table (`hardware_details` or `software_details`). Slug and SKU are unique per
//! kind, through the `(kind, slug)` and `(kind, sku)` indexes built in `create_tables`.
//! Images and reviews point here through a single `product_id`, so every attachment has
//! exactly one owner.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Product database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "products")]
pub struct Model {
    /// Unique identifier for the product
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Variant tag, fixed at creation
    pub kind: ProductKind,
    /// Display name
    pub name: String,
    /// URL-safe identifier, unique within its kind
    pub slug: String,
    /// Stock-keeping unit, unique within its kind
    pub sku: String,
    /// Long description
    #[sea_orm(column_type = "Text")]
    pub description: String,
    /// List price
    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub price: Decimal,
    /// Discounted price, only meaningful when lower than `price`
    #[sea_orm(column_type = "Decimal(Some((10, 2)))", nullable)]
    pub sale_price: Option<Decimal>,
    /// Owning category; deleting the category deletes the product
    pub category_id: i64,
    /// Brand, cleared when the brand is deleted
    pub brand_id: Option<i64>,
    /// Promoted on the home page and first in default ordering
    pub featured: bool,
    /// Publication status; only `published` products appear in listings
    pub status: ProductStatus,
    /// Optional market release date
    pub release_date: Option<Date>,
    /// When the product was created
    pub created_at: DateTimeUtc,
    /// When the product was last modified
    pub updated_at: DateTimeUtc,
}

impl Model {
    /// A product is on sale when it has a sale price strictly below its list price.
    ///
    /// A sale price at or above the list price is stored but never reported as a sale.
    #[must_use]
    pub fn is_on_sale(&self) -> bool {
        self.sale_price.is_some_and(|sale| sale < self.price)
    }

    /// Price a customer actually pays.
    #[must_use]
    pub fn effective_price(&self) -> Decimal {
        if self.is_on_sale() {
            self.sale_price.unwrap_or(self.price)
        } else {
            self.price
        }
    }
}

/// Product variant tag
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter, DeriveActiveEnum,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
#[serde(rename_all = "snake_case")]
pub enum ProductKind {
    /// Physical goods with stock
    #[sea_orm(string_value = "hardware")]
    Hardware,
    /// Downloadable or licensed software
    #[sea_orm(string_value = "software")]
    Software,
}

impl ProductKind {
    /// Lowercase tag as stored
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Hardware => "hardware",
            Self::Software => "software",
        }
    }
}

impl std::fmt::Display for ProductKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Publication status
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
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
#[serde(rename_all = "snake_case")]
pub enum ProductStatus {
    /// Not visible in listings
    #[default]
    #[sea_orm(string_value = "draft")]
    Draft,
    /// Visible in listings and search
    #[sea_orm(string_value = "published")]
    Published,
    /// Temporarily unavailable
    #[sea_orm(string_value = "out_of_stock")]
    OutOfStock,
    /// No longer sold
    #[sea_orm(string_value = "discontinued")]
    Discontinued,
}

impl ProductStatus {
    /// Human-readable label
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Draft => "Draft",
            Self::Published => "Published",
            Self::OutOfStock => "Out of Stock",
            Self::Discontinued => "Discontinued",
        }
    }
}

/// Defines relationships between Product and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each product belongs to one category
    #[sea_orm(
        belongs_to = "super::category::Entity",
        from = "Column::CategoryId",
        to = "super::category::Column::Id",
        on_delete = "Cascade"
    )]
    Category,
    /// Each product may belong to one brand
    #[sea_orm(
        belongs_to = "super::brand::Entity",
        from = "Column::BrandId",
        to = "super::brand::Column::Id",
        on_delete = "SetNull"
    )]
    Brand,
    /// Hardware products have one hardware detail row
    #[sea_orm(has_one = "super::hardware_details::Entity")]
    HardwareDetails,
    /// Software products have one software detail row
    #[sea_orm(has_one = "super::software_details::Entity")]
    SoftwareDetails,
    /// One product has many images
    #[sea_orm(has_many = "super::product_image::Entity")]
    Images,
    /// One product has many reviews
    #[sea_orm(has_many = "super::product_review::Entity")]
    Reviews,
}

impl Related<super::category::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Category.def()
    }
}

impl Related<super::brand::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Brand.def()
    }
}

impl Related<super::hardware_details::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::HardwareDetails.def()
    }
}

impl Related<super::software_details::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SoftwareDetails.def()
    }
}

impl Related<super::product_image::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Images.def()
    }
}

impl Related<super::product_review::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Reviews.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
