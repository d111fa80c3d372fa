//! List-page query building.
//!
//! Public listings only show published products of one kind. Each optional query
//! parameter narrows the set: category and brand by slug, license type (software only)
//! by value, and `q` by ASCII-case-insensitive substring over a fixed set of text fields. The
//! sort key picks one of four orderings and results come back in pages of
//! [`PAGE_SIZE`].
//!
//! Unknown `sort` and `license` values fall back silently unless
//! [`ListingConfig::strict_params`] is set, in which case they are rejected.

use crate::{
    config::catalog::ListingConfig,
    core::{
        brand::list_brands,
        category::list_categories,
        product::{Product, load_products},
    },
    entities::{
        Brand, Category, HardwareDetails, Product as ProductEntity, SoftwareDetails, brand,
        category, hardware_details,
        product::{self, ProductKind, ProductStatus},
        software_details::{self, LicenseType},
    },
    errors::{Error, Result},
};
use sea_orm::{
    Condition, ItemsAndPagesNumber, PaginatorTrait, QueryOrder, Select,
    prelude::*,
    sea_query::{Expr, Func, IntoColumnRef, LikeExpr, Query, SimpleExpr},
};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::debug;

/// Number of products per listing page
pub const PAGE_SIZE: u64 = 12;

const LIKE_ESCAPE: char = '!';

/// Ordering of a product listing
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    /// Cheapest first
    PriceLow,
    /// Most expensive first
    PriceHigh,
    /// Most recently created first
    Newest,
    /// Featured products first, then by name
    #[default]
    Default,
}

impl SortKey {
    /// Value used in query strings
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PriceLow => "price_low",
            Self::PriceHigh => "price_high",
            Self::Newest => "newest",
            Self::Default => "default",
        }
    }

    /// Parses a sort key, treating anything unrecognised as [`SortKey::Default`].
    #[must_use]
    pub fn lenient(value: Option<&str>) -> Self {
        value.and_then(|v| v.parse().ok()).unwrap_or_default()
    }

    /// Parses a sort key the way `config` asks for.
    ///
    /// # Errors
    /// Returns `Error::InvalidParameter` for an unknown key in strict mode.
    pub fn resolve(value: Option<&str>, config: &ListingConfig) -> Result<Self> {
        match value {
            Some(value) if config.strict_params => value.parse(),
            _ => Ok(Self::lenient(value)),
        }
    }

    /// Adds this ordering to a product query.
    ///
    /// The product id is appended as a final key so pages never overlap.
    #[must_use]
    pub fn apply(self, select: Select<ProductEntity>) -> Select<ProductEntity> {
        let select = match self {
            Self::PriceLow => select.order_by_asc(product::Column::Price),
            Self::PriceHigh => select.order_by_desc(product::Column::Price),
            Self::Newest => select.order_by_desc(product::Column::CreatedAt),
            Self::Default => select
                .order_by_desc(product::Column::Featured)
                .order_by_asc(product::Column::Name),
        };
        select.order_by_asc(product::Column::Id)
    }
}

impl FromStr for SortKey {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        match value {
            "price_low" => Ok(Self::PriceLow),
            "price_high" => Ok(Self::PriceHigh),
            "newest" => Ok(Self::Newest),
            "default" => Ok(Self::Default),
            other => Err(Error::InvalidParameter {
                name: "sort",
                value: other.to_string(),
            }),
        }
    }
}

/// Query parameters of a listing page, as received
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingParams {
    /// Category slug
    pub category: Option<String>,
    /// Brand slug
    pub brand: Option<String>,
    /// License type (software listings only)
    pub license: Option<String>,
    /// Free-text search
    pub q: Option<String>,
    /// Sort key
    pub sort: Option<String>,
    /// 1-based page number
    pub page: Option<u64>,
}

fn present(value: Option<&String>) -> Option<&str> {
    value.map(|v| v.trim()).filter(|v| !v.is_empty())
}

impl ListingParams {
    /// Category slug, if given and non-blank
    #[must_use]
    pub fn category(&self) -> Option<&str> {
        present(self.category.as_ref())
    }

    /// Brand slug, if given and non-blank
    #[must_use]
    pub fn brand(&self) -> Option<&str> {
        present(self.brand.as_ref())
    }

    /// License value, if given and non-blank
    #[must_use]
    pub fn license(&self) -> Option<&str> {
        present(self.license.as_ref())
    }

    /// Search text, if given and non-blank
    #[must_use]
    pub fn query(&self) -> Option<&str> {
        present(self.q.as_ref())
    }

    /// Sort key, if given and non-blank
    #[must_use]
    pub fn sort(&self) -> Option<&str> {
        present(self.sort.as_ref())
    }

    /// Requested page, 1 when absent
    #[must_use]
    pub fn page(&self) -> u64 {
        self.page.unwrap_or(1)
    }
}

/// One page of results
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    /// Items on this page
    pub items: Vec<T>,
    /// 1-based page number
    pub number: u64,
    /// Maximum items per page
    pub page_size: u64,
    /// Items across all pages
    pub total_items: u64,
    /// Number of pages, at least 1
    pub total_pages: u64,
}

impl<T> Page<T> {
    /// Whether a later page exists
    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.number < self.total_pages
    }

    /// Whether an earlier page exists
    #[must_use]
    pub const fn has_previous(&self) -> bool {
        self.number > 1
    }
}

/// Everything a listing page shows
#[derive(Debug, Clone, Serialize)]
pub struct Listing {
    /// Product kind being listed
    pub kind: ProductKind,
    /// Current page of products
    pub page: Page<Product>,
    /// All categories, for the filter sidebar
    pub categories: Vec<category::Model>,
    /// All brands, for the filter sidebar
    pub brands: Vec<brand::Model>,
    /// License choices; empty for hardware listings
    pub license_types: Vec<LicenseType>,
    /// Ordering actually applied
    pub sort: SortKey,
    /// Parameters echoed back
    pub params: ListingParams,
}

/// `LIKE` pattern matching `query` anywhere, with wildcards escaped.
///
/// Only ASCII letters are lowercased, matching SQLite's `lower()` on the column side;
/// other characters must match exactly.
fn like_pattern(query: &str) -> String {
    let mut pattern = String::with_capacity(query.len() + 2);
    pattern.push('%');
    for ch in query.to_ascii_lowercase().chars() {
        if matches!(ch, '%' | '_') || ch == LIKE_ESCAPE {
            pattern.push(LIKE_ESCAPE);
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

fn contains_ci<C: IntoColumnRef>(column: C, pattern: &str) -> SimpleExpr {
    Expr::expr(Func::lower(Expr::col(column))).like(LikeExpr::new(pattern).escape(LIKE_ESCAPE))
}

/// Substring match of `query` over the searchable fields of `kind`, ignoring ASCII case.
///
/// Both kinds search name and description; hardware adds processor, memory and storage,
/// software adds version and platform.
#[must_use]
pub fn text_search(kind: ProductKind, query: &str) -> Condition {
    let pattern = like_pattern(query);

    let details = match kind {
        ProductKind::Hardware => {
            let fields = [
                hardware_details::Column::Processor,
                hardware_details::Column::Memory,
                hardware_details::Column::Storage,
            ]
            .into_iter()
            .fold(Condition::any(), |cond, column| {
                cond.add(contains_ci((HardwareDetails, column), &pattern))
            });
            Query::select()
                .column(hardware_details::Column::ProductId)
                .from(HardwareDetails)
                .cond_where(fields)
                .to_owned()
        }
        ProductKind::Software => {
            let fields = [
                software_details::Column::Version,
                software_details::Column::Platform,
            ]
            .into_iter()
            .fold(Condition::any(), |cond, column| {
                cond.add(contains_ci((SoftwareDetails, column), &pattern))
            });
            Query::select()
                .column(software_details::Column::ProductId)
                .from(SoftwareDetails)
                .cond_where(fields)
                .to_owned()
        }
    };

    Condition::any()
        .add(contains_ci((ProductEntity, product::Column::Name), &pattern))
        .add(contains_ci((ProductEntity, product::Column::Description), &pattern))
        .add(product::Column::Id.in_subquery(details))
}

/// Published products of one kind, unordered.
#[must_use]
pub fn published(kind: ProductKind) -> Select<ProductEntity> {
    ProductEntity::find()
        .filter(product::Column::Kind.eq(kind))
        .filter(product::Column::Status.eq(ProductStatus::Published))
}

fn resolve_license(config: &ListingConfig, value: &str) -> Result<String> {
    match LicenseType::parse(value) {
        Some(license) => Ok(license.as_str().to_string()),
        None if config.strict_params => Err(Error::InvalidParameter {
            name: "license",
            value: value.to_string(),
        }),
        // Compared as-is, which matches nothing
        None => Ok(value.to_string()),
    }
}

/// Builds the filtered, ordered query behind a listing page.
///
/// # Errors
/// Returns `Error::InvalidParameter` for unknown sort or license values in strict mode.
pub fn listing_query(
    config: &ListingConfig,
    kind: ProductKind,
    params: &ListingParams,
) -> Result<(Select<ProductEntity>, SortKey)> {
    let mut select = published(kind);

    if let Some(slug) = params.category() {
        select = select.filter(
            product::Column::CategoryId.in_subquery(
                Query::select()
                    .column(category::Column::Id)
                    .from(Category)
                    .and_where(category::Column::Slug.eq(slug))
                    .to_owned(),
            ),
        );
    }

    if let Some(slug) = params.brand() {
        select = select.filter(
            product::Column::BrandId.in_subquery(
                Query::select()
                    .column(brand::Column::Id)
                    .from(Brand)
                    .and_where(brand::Column::Slug.eq(slug))
                    .to_owned(),
            ),
        );
    }

    if kind == ProductKind::Software {
        if let Some(license) = params.license() {
            let license = resolve_license(config, license)?;
            select = select.filter(
                product::Column::Id.in_subquery(
                    Query::select()
                        .column(software_details::Column::ProductId)
                        .from(SoftwareDetails)
                        .and_where(software_details::Column::LicenseType.eq(license))
                        .to_owned(),
                ),
            );
        }
    }

    if let Some(query) = params.query() {
        select = select.filter(text_search(kind, query));
    }

    let sort = SortKey::resolve(params.sort(), config)?;
    Ok((sort.apply(select), sort))
}

/// Fetches one 1-based page of `select`.
///
/// Page 1 is always valid, even when nothing matches.
///
/// # Errors
/// Returns `Error::InvalidParameter` for page 0 and `Error::PageOutOfRange` past the
/// last page.
pub async fn paginate(
    db: &DatabaseConnection,
    select: Select<ProductEntity>,
    page: u64,
) -> Result<Page<Product>> {
    if page == 0 {
        return Err(Error::InvalidParameter {
            name: "page",
            value: page.to_string(),
        });
    }

    let paginator = select.paginate(db, PAGE_SIZE);
    let ItemsAndPagesNumber {
        number_of_items,
        number_of_pages,
    } = paginator.num_items_and_pages().await?;
    let last_page = number_of_pages.max(1);
    if page > last_page {
        return Err(Error::PageOutOfRange { page, last_page });
    }

    let bases = paginator.fetch_page(page - 1).await?;
    let items = load_products(db, bases).await?;
    Ok(Page {
        items,
        number: page,
        page_size: PAGE_SIZE,
        total_items: number_of_items,
        total_pages: last_page,
    })
}

/// Assembles a listing page for products of `kind`.
///
/// # Errors
/// Returns an error for rejected parameters, out-of-range pages, or database failures.
pub async fn list_products(
    db: &DatabaseConnection,
    config: &ListingConfig,
    kind: ProductKind,
    params: &ListingParams,
) -> Result<Listing> {
    let (select, sort) = listing_query(config, kind, params)?;
    debug!("Listing {} products with {:?} (sort: {})", kind, params, sort.as_str());
    let page = paginate(db, select, params.page()).await?;

    let license_types = match kind {
        ProductKind::Hardware => Vec::new(),
        ProductKind::Software => LicenseType::ALL.to_vec(),
    };

    Ok(Listing {
        kind,
        page,
        categories: list_categories(db).await?,
        brands: list_brands(db).await?,
        license_types,
        sort,
        params: params.clone(),
    })
}

/// Hardware listing page.
pub async fn list_hardware(
    db: &DatabaseConnection,
    config: &ListingConfig,
    params: &ListingParams,
) -> Result<Listing> {
    list_products(db, config, ProductKind::Hardware, params).await
}

/// Software listing page.
pub async fn list_software(
    db: &DatabaseConnection,
    config: &ListingConfig,
    params: &ListingParams,
) -> Result<Listing> {
    list_products(db, config, ProductKind::Software, params).await
}
