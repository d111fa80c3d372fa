//! Product business logic - Handles both product variants.
//!
//! A product is stored as one row of common fields plus one row in the detail table of
//! its kind. [`Product`] puts the two back together as a tagged variant, and the derived
//! predicates (`is_on_sale`, `in_stock`) are computed from it on every call. The kind is
//! chosen by the constructor that is called, never by the caller's input.

use crate::{
    core::{brand::get_brand_by_id, category::get_category_by_id, slug::resolve_slug},
    entities::{
        HardwareDetails, Product as ProductEntity, SoftwareDetails,
        hardware_details::{self, Condition},
        product::{self, ProductKind, ProductStatus},
        software_details::{self, Edition, LicenseType},
    },
    errors::{Error, Result},
};
use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use sea_orm::{ConnectionTrait, Set, TransactionTrait, prelude::*};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{info, instrument};

/// A catalog product: the common fields plus the details of its variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Product {
    /// Fields shared by every variant
    #[serde(flatten)]
    pub base: product::Model,
    /// Variant-specific fields
    pub details: ProductDetails,
}

/// Variant-specific product fields
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductDetails {
    /// Physical product details
    Hardware(hardware_details::Model),
    /// Software product details
    Software(software_details::Model),
}

impl Product {
    /// Variant tag, taken from the details actually loaded
    #[must_use]
    pub const fn kind(&self) -> ProductKind {
        match self.details {
            ProductDetails::Hardware(_) => ProductKind::Hardware,
            ProductDetails::Software(_) => ProductKind::Software,
        }
    }

    /// See [`product::Model::is_on_sale`].
    #[must_use]
    pub fn is_on_sale(&self) -> bool {
        self.base.is_on_sale()
    }

    /// Hardware is in stock while units are on hand; software while it is published.
    #[must_use]
    pub fn in_stock(&self) -> bool {
        match &self.details {
            ProductDetails::Hardware(hardware) => hardware.in_stock(),
            ProductDetails::Software(_) => self.base.status == ProductStatus::Published,
        }
    }

    /// Hardware details, if this is a hardware product
    #[must_use]
    pub const fn hardware(&self) -> Option<&hardware_details::Model> {
        match &self.details {
            ProductDetails::Hardware(hardware) => Some(hardware),
            ProductDetails::Software(_) => None,
        }
    }

    /// Software details, if this is a software product
    #[must_use]
    pub const fn software(&self) -> Option<&software_details::Model> {
        match &self.details {
            ProductDetails::Software(software) => Some(software),
            ProductDetails::Hardware(_) => None,
        }
    }
}

/// Reference to the product an image or review belongs to.
///
/// The kind travels with the id so an attachment meant for a software product cannot
/// silently land on a hardware product with the same id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductRef {
    /// A hardware product id
    Hardware(i64),
    /// A software product id
    Software(i64),
}

impl ProductRef {
    /// Builds a reference from the two-optional-key input shape, where exactly one of
    /// `hardware` and `software` must be set. `subject` names the attachment in the
    /// error message (e.g. "An image").
    ///
    /// # Errors
    /// Returns `Error::Validation` when both or neither keys are set.
    pub fn exactly_one(hardware: Option<i64>, software: Option<i64>, subject: &str) -> Result<Self> {
        match (hardware, software) {
            (Some(id), None) => Ok(Self::Hardware(id)),
            (None, Some(id)) => Ok(Self::Software(id)),
            (None, None) => Err(Error::validation(format!(
                "{subject} must be associated with either a hardware or software product"
            ))),
            (Some(_), Some(_)) => Err(Error::validation(format!(
                "{subject} cannot be associated with both hardware and software products"
            ))),
        }
    }

    /// Kind of the referenced product
    #[must_use]
    pub const fn kind(self) -> ProductKind {
        match self {
            Self::Hardware(_) => ProductKind::Hardware,
            Self::Software(_) => ProductKind::Software,
        }
    }

    /// Id of the referenced product
    #[must_use]
    pub const fn id(self) -> i64 {
        match self {
            Self::Hardware(id) | Self::Software(id) => id,
        }
    }

    /// Loads the referenced product row, checking that its kind matches.
    ///
    /// # Errors
    /// Returns `Error::ProductNotFound` if the id does not exist and
    /// `Error::Validation` if it names a product of the other kind.
    pub async fn resolve(self, db: &DatabaseConnection) -> Result<product::Model> {
        let product = ProductEntity::find_by_id(self.id())
            .one(db)
            .await?
            .ok_or_else(|| Error::ProductNotFound {
                key: self.id().to_string(),
            })?;
        if product.kind != self.kind() {
            return Err(Error::validation(format!(
                "Product {} is a {} product, not {}",
                product.id,
                product.kind,
                self.kind()
            )));
        }
        Ok(product)
    }
}

/// Common fields for a new product of either kind
#[derive(Debug, Clone, Default)]
pub struct NewProduct {
    /// Display name, required
    pub name: String,
    /// Explicit slug; derived from `name` when `None` or blank
    pub slug: Option<String>,
    /// Stock-keeping unit, required and unique within the kind
    pub sku: String,
    /// Long description
    pub description: String,
    /// List price, not negative
    pub price: Decimal,
    /// Sale price, not negative; not checked against `price`
    pub sale_price: Option<Decimal>,
    /// Owning category id
    pub category_id: i64,
    /// Brand id
    pub brand_id: Option<i64>,
    /// Promote on the home page
    pub featured: bool,
    /// Initial status
    pub status: ProductStatus,
    /// Market release date
    pub release_date: Option<NaiveDate>,
}

/// Hardware-specific fields for a new product
#[derive(Debug, Clone, Default)]
pub struct HardwareSpec {
    /// Units on hand
    pub quantity: i32,
    /// Warranty duration in months
    pub warranty_months: i32,
    /// Weight in kg
    pub weight: Option<Decimal>,
    /// Format: LxWxH in cm
    pub dimensions: String,
    /// Color name
    pub color: String,
    /// Physical condition
    pub condition: Condition,
    /// Processor
    pub processor: Option<String>,
    /// Memory
    pub memory: Option<String>,
    /// Storage
    pub storage: Option<String>,
    /// Display
    pub display: Option<String>,
    /// Battery life
    pub battery_life: Option<String>,
    /// Camera
    pub camera: Option<String>,
    /// Operating system
    pub operating_system: Option<String>,
}

/// Software-specific fields for a new product
#[derive(Debug, Clone)]
pub struct SoftwareSpec {
    /// License model
    pub license_type: LicenseType,
    /// Version, required
    pub version: String,
    /// Edition
    pub edition: Option<Edition>,
    /// Compatible platforms, required
    pub platform: String,
    /// Download URL
    pub download_link: Option<String>,
    /// Whether an activation key is needed
    pub activation_key_required: bool,
    /// Billing period in months, positive when set
    pub subscription_period: Option<i32>,
    /// Minimum requirements
    pub system_requirements: String,
}

impl SoftwareSpec {
    /// Software fields with the required ones set and everything else at its default.
    #[must_use]
    pub fn new(license_type: LicenseType, version: &str, platform: &str) -> Self {
        Self {
            license_type,
            version: version.to_string(),
            edition: None,
            platform: platform.to_string(),
            download_link: None,
            activation_key_required: true,
            subscription_period: None,
            system_requirements: String::new(),
        }
    }
}

fn validate_price(amount: Decimal) -> Result<()> {
    if amount < Decimal::ZERO {
        return Err(Error::InvalidPrice { amount });
    }
    Ok(())
}

fn validate_new_product(new: &NewProduct) -> Result<()> {
    if new.name.trim().is_empty() {
        return Err(Error::validation("Product name cannot be empty"));
    }
    if new.sku.trim().is_empty() {
        return Err(Error::validation("Product SKU cannot be empty"));
    }
    validate_price(new.price)?;
    if let Some(sale_price) = new.sale_price {
        validate_price(sale_price)?;
    }
    Ok(())
}

fn validate_hardware_spec(spec: &HardwareSpec) -> Result<()> {
    if spec.quantity < 0 {
        return Err(Error::validation(format!(
            "Quantity cannot be negative (got {})",
            spec.quantity
        )));
    }
    if spec.warranty_months < 0 {
        return Err(Error::validation(format!(
            "Warranty cannot be negative (got {} months)",
            spec.warranty_months
        )));
    }
    Ok(())
}

fn validate_software_spec(spec: &SoftwareSpec) -> Result<()> {
    if spec.version.trim().is_empty() {
        return Err(Error::validation("Software version cannot be empty"));
    }
    if spec.platform.trim().is_empty() {
        return Err(Error::validation("Software platform cannot be empty"));
    }
    if let Some(period) = spec.subscription_period {
        if period <= 0 {
            return Err(Error::validation(format!(
                "Subscription period must be a positive number of months (got {period})"
            )));
        }
    }
    Ok(())
}

/// Checks the category and brand a new product points at.
async fn ensure_references(db: &DatabaseConnection, new: &NewProduct) -> Result<()> {
    if get_category_by_id(db, new.category_id).await?.is_none() {
        return Err(Error::CategoryNotFound {
            key: new.category_id.to_string(),
        });
    }
    if let Some(brand_id) = new.brand_id {
        if get_brand_by_id(db, brand_id).await?.is_none() {
            return Err(Error::BrandNotFound {
                key: brand_id.to_string(),
            });
        }
    }
    Ok(())
}

/// Validates the common fields and returns the slug to store.
async fn prepare_base(db: &DatabaseConnection, new: &NewProduct) -> Result<String> {
    validate_new_product(new)?;
    let slug = resolve_slug(new.slug.as_deref(), new.name.trim())?;
    ensure_references(db, new).await?;
    Ok(slug)
}

async fn insert_base<C: ConnectionTrait>(
    conn: &C,
    kind: ProductKind,
    new: NewProduct,
    slug: String,
) -> Result<product::Model> {
    let now = Utc::now();
    product::ActiveModel {
        kind: Set(kind),
        name: Set(new.name.trim().to_string()),
        slug: Set(slug),
        sku: Set(new.sku.trim().to_string()),
        description: Set(new.description),
        price: Set(new.price),
        sale_price: Set(new.sale_price),
        category_id: Set(new.category_id),
        brand_id: Set(new.brand_id),
        featured: Set(new.featured),
        status: Set(new.status),
        release_date: Set(new.release_date),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(conn)
    .await
    .map_err(Into::into)
}

/// Creates a hardware product and its detail row in one transaction.
///
/// # Errors
/// Returns an error if:
/// - The name or SKU is blank, or no slug can be determined
/// - The price or sale price is negative
/// - The quantity or warranty is negative
/// - The category or brand does not exist
/// - The slug or SKU is already taken by a product of the same kind (`Error::UniqueViolation`)
#[instrument(skip(db, new, spec), fields(name = %new.name, sku = %new.sku))]
pub async fn create_hardware_product(
    db: &DatabaseConnection,
    new: NewProduct,
    spec: HardwareSpec,
) -> Result<Product> {
    validate_hardware_spec(&spec)?;
    let slug = prepare_base(db, &new).await?;

    let txn = db.begin().await?;
    let base = insert_base(&txn, ProductKind::Hardware, new, slug).await?;
    let details = hardware_details::ActiveModel {
        product_id: Set(base.id),
        quantity: Set(spec.quantity),
        warranty_months: Set(spec.warranty_months),
        weight: Set(spec.weight),
        dimensions: Set(spec.dimensions),
        color: Set(spec.color),
        condition: Set(spec.condition),
        processor: Set(spec.processor),
        memory: Set(spec.memory),
        storage: Set(spec.storage),
        display: Set(spec.display),
        battery_life: Set(spec.battery_life),
        camera: Set(spec.camera),
        operating_system: Set(spec.operating_system),
    }
    .insert(&txn)
    .await?;
    txn.commit().await?;

    info!(
        "Created hardware product '{}' (ID: {}, slug: {}, SKU: {})",
        base.name, base.id, base.slug, base.sku
    );
    Ok(Product {
        base,
        details: ProductDetails::Hardware(details),
    })
}

/// Creates a software product and its detail row in one transaction.
///
/// # Errors
/// Returns an error if:
/// - The name, SKU, version or platform is blank, or no slug can be determined
/// - The price or sale price is negative
/// - The subscription period is set but not positive
/// - The category or brand does not exist
/// - The slug or SKU is already taken by a product of the same kind (`Error::UniqueViolation`)
#[instrument(skip(db, new, spec), fields(name = %new.name, sku = %new.sku))]
pub async fn create_software_product(
    db: &DatabaseConnection,
    new: NewProduct,
    spec: SoftwareSpec,
) -> Result<Product> {
    validate_software_spec(&spec)?;
    let slug = prepare_base(db, &new).await?;

    let txn = db.begin().await?;
    let base = insert_base(&txn, ProductKind::Software, new, slug).await?;
    let details = software_details::ActiveModel {
        product_id: Set(base.id),
        license_type: Set(spec.license_type),
        version: Set(spec.version.trim().to_string()),
        edition: Set(spec.edition),
        platform: Set(spec.platform.trim().to_string()),
        download_link: Set(spec.download_link),
        activation_key_required: Set(spec.activation_key_required),
        subscription_period: Set(spec.subscription_period),
        system_requirements: Set(spec.system_requirements),
    }
    .insert(&txn)
    .await?;
    txn.commit().await?;

    info!(
        "Created software product '{}' (ID: {}, slug: {}, SKU: {})",
        base.name, base.id, base.slug, base.sku
    );
    Ok(Product {
        base,
        details: ProductDetails::Software(details),
    })
}

/// Attaches variant details to product rows, keeping their order.
///
/// Details are fetched with one query per kind.
///
/// # Errors
/// Returns `Error::Database` if a product has no detail row of its kind.
pub async fn load_products(
    db: &DatabaseConnection,
    bases: Vec<product::Model>,
) -> Result<Vec<Product>> {
    let (hardware_ids, software_ids): (Vec<i64>, Vec<i64>) = {
        let mut hardware = Vec::new();
        let mut software = Vec::new();
        for base in &bases {
            match base.kind {
                ProductKind::Hardware => hardware.push(base.id),
                ProductKind::Software => software.push(base.id),
            }
        }
        (hardware, software)
    };

    let mut hardware: HashMap<i64, hardware_details::Model> = if hardware_ids.is_empty() {
        HashMap::new()
    } else {
        HardwareDetails::find()
            .filter(hardware_details::Column::ProductId.is_in(hardware_ids))
            .all(db)
            .await?
            .into_iter()
            .map(|details| (details.product_id, details))
            .collect()
    };
    let mut software: HashMap<i64, software_details::Model> = if software_ids.is_empty() {
        HashMap::new()
    } else {
        SoftwareDetails::find()
            .filter(software_details::Column::ProductId.is_in(software_ids))
            .all(db)
            .await?
            .into_iter()
            .map(|details| (details.product_id, details))
            .collect()
    };

    bases
        .into_iter()
        .map(|base| {
            let id = base.id;
            let details = match base.kind {
                ProductKind::Hardware => hardware.remove(&id).map(ProductDetails::Hardware),
                ProductKind::Software => software.remove(&id).map(ProductDetails::Software),
            };
            details
                .map(|details| Product { base, details })
                .ok_or_else(|| {
                    Error::Database(DbErr::RecordNotFound(format!(
                        "variant details for product {id}"
                    )))
                })
        })
        .collect()
}

/// Retrieves a product with its details by id.
pub async fn get_product_by_id(db: &DatabaseConnection, product_id: i64) -> Result<Option<Product>> {
    let Some(base) = ProductEntity::find_by_id(product_id).one(db).await? else {
        return Ok(None);
    };
    Ok(load_products(db, vec![base]).await?.pop())
}

/// Retrieves a product of the given kind by slug, regardless of its status.
pub async fn get_product_by_slug(
    db: &DatabaseConnection,
    kind: ProductKind,
    slug: &str,
) -> Result<Option<Product>> {
    let Some(base) = ProductEntity::find()
        .filter(product::Column::Kind.eq(kind))
        .filter(product::Column::Slug.eq(slug))
        .one(db)
        .await?
    else {
        return Ok(None);
    };
    Ok(load_products(db, vec![base]).await?.pop())
}

/// Retrieves a hardware product by slug.
pub async fn get_hardware_by_slug(db: &DatabaseConnection, slug: &str) -> Result<Option<Product>> {
    get_product_by_slug(db, ProductKind::Hardware, slug).await
}

/// Retrieves a software product by slug.
pub async fn get_software_by_slug(db: &DatabaseConnection, slug: &str) -> Result<Option<Product>> {
    get_product_by_slug(db, ProductKind::Software, slug).await
}

async fn find_base_for_update(db: &DatabaseConnection, product_id: i64) -> Result<product::ActiveModel> {
    ProductEntity::find_by_id(product_id)
        .one(db)
        .await?
        .map(Into::into)
        .ok_or_else(|| Error::ProductNotFound {
            key: product_id.to_string(),
        })
}

/// Changes the publication status of a product.
///
/// # Errors
/// Returns `Error::ProductNotFound` if the product does not exist.
#[instrument(skip(db))]
pub async fn set_product_status(
    db: &DatabaseConnection,
    product_id: i64,
    status: ProductStatus,
) -> Result<product::Model> {
    let mut product = find_base_for_update(db, product_id).await?;
    product.status = Set(status);
    product.updated_at = Set(Utc::now());
    let product = product.update(db).await?;
    info!("Product {} is now {}", product.id, status.label());
    Ok(product)
}

/// Sets the list price and sale price of a product.
///
/// A sale price at or above the list price is accepted; the product is simply not
/// reported as on sale.
///
/// # Errors
/// Returns `Error::InvalidPrice` for negative amounts and `Error::ProductNotFound` if
/// the product does not exist.
#[instrument(skip(db))]
pub async fn update_pricing(
    db: &DatabaseConnection,
    product_id: i64,
    price: Decimal,
    sale_price: Option<Decimal>,
) -> Result<product::Model> {
    validate_price(price)?;
    if let Some(sale_price) = sale_price {
        validate_price(sale_price)?;
    }

    let mut product = find_base_for_update(db, product_id).await?;
    product.price = Set(price);
    product.sale_price = Set(sale_price);
    product.updated_at = Set(Utc::now());
    product.update(db).await.map_err(Into::into)
}

/// Deletes a product together with its details, images and reviews.
///
/// # Errors
/// Returns `Error::ProductNotFound` if the product does not exist.
#[instrument(skip(db))]
pub async fn delete_product(db: &DatabaseConnection, product_id: i64) -> Result<()> {
    let result = ProductEntity::delete_by_id(product_id).exec(db).await?;
    if result.rows_affected == 0 {
        return Err(Error::ProductNotFound {
            key: product_id.to_string(),
        });
    }
    info!("Deleted product {}", product_id);
    Ok(())
}
