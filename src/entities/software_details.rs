//! Software detail entity - Licensing and platform attributes of digital products.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Software detail database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "software_details")]
pub struct Model {
    /// Id of the owning product
    #[sea_orm(primary_key, auto_increment = false)]
    pub product_id: i64,
    /// How the software is licensed
    pub license_type: LicenseType,
    /// Free-text version (e.g., "2024")
    pub version: String,
    /// Edition, when the product ships in several
    pub edition: Option<Edition>,
    /// Compatible platforms (e.g., "Windows, Mac")
    pub platform: String,
    /// Where the software can be downloaded
    pub download_link: Option<String>,
    /// Whether installation needs an activation key
    pub activation_key_required: bool,
    /// Billing period in months for subscriptions
    pub subscription_period: Option<i32>,
    /// Minimum requirements, may be empty
    #[sea_orm(column_type = "Text")]
    pub system_requirements: String,
}

/// License model of a software product
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter, DeriveActiveEnum,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
#[serde(rename_all = "snake_case")]
pub enum LicenseType {
    /// One-time purchase
    #[sea_orm(string_value = "perpetual")]
    Perpetual,
    /// Recurring payment
    #[sea_orm(string_value = "subscription")]
    Subscription,
    /// Free tier with paid upgrades
    #[sea_orm(string_value = "freemium")]
    Freemium,
    /// Open-source license
    #[sea_orm(string_value = "open_source")]
    OpenSource,
}

impl LicenseType {
    /// Every license type, in display order.
    pub const ALL: [Self; 4] = [
        Self::Perpetual,
        Self::Subscription,
        Self::Freemium,
        Self::OpenSource,
    ];

    /// Value used in query strings and storage
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Perpetual => "perpetual",
            Self::Subscription => "subscription",
            Self::Freemium => "freemium",
            Self::OpenSource => "open_source",
        }
    }

    /// Human-readable label
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Perpetual => "Perpetual",
            Self::Subscription => "Subscription",
            Self::Freemium => "Freemium",
            Self::OpenSource => "Open Source",
        }
    }

    /// Looks up a license type by its query-string value.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|license| license.as_str() == value)
    }
}

/// Edition of a software product
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumIter, DeriveActiveEnum,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
#[serde(rename_all = "snake_case")]
pub enum Edition {
    /// Entry edition
    #[sea_orm(string_value = "standard")]
    Standard,
    /// Professional edition
    #[sea_orm(string_value = "professional")]
    Professional,
    /// Enterprise edition
    #[sea_orm(string_value = "enterprise")]
    Enterprise,
    /// Everything included
    #[sea_orm(string_value = "ultimate")]
    Ultimate,
}

/// Defines relationships between software details and other entities
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
