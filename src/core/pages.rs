//! Page assembly - Combines lookups into the data each catalog page shows.
//!
//! Detail pages resolve by slug regardless of publication status; everything that
//! lists other products (related items, featured items, search, category pages) only
//! shows published ones.

use crate::{
    core::{
        category::{get_category_by_slug, get_subcategories, list_root_categories},
        image::list_images,
        listing::{SortKey, published, text_search},
        product::{Product, get_product_by_slug, load_products},
        review::{RatingSummary, list_reviews, summarize},
    },
    entities::{
        brand, category,
        product::{self, ProductKind},
        product_image, product_review,
    },
    errors::{Error, Result},
};
use sea_orm::{QuerySelect, prelude::*};
use serde::Serialize;
use tracing::debug;

/// Featured products shown per kind on the home page
pub const FEATURED_LIMIT: u64 = 8;
/// Related products shown on a detail page
pub const RELATED_LIMIT: u64 = 4;

/// Home page contents
#[derive(Debug, Clone, Serialize)]
pub struct HomePage {
    /// Featured published hardware, newest first
    pub featured_hardware: Vec<Product>,
    /// Featured published software, newest first
    pub featured_software: Vec<Product>,
    /// Root categories
    pub categories: Vec<category::Model>,
}

/// Category page contents
#[derive(Debug, Clone, Serialize)]
pub struct CategoryDetail {
    /// The category itself
    pub category: category::Model,
    /// Direct children
    pub subcategories: Vec<category::Model>,
    /// Published hardware in the category or a direct child
    pub hardware_products: Vec<Product>,
    /// Published software in the category or a direct child
    pub software_products: Vec<Product>,
}

/// Product detail page contents
#[derive(Debug, Clone, Serialize)]
pub struct ProductDetail {
    /// The product with its variant details
    pub product: Product,
    /// Owning category
    pub category: category::Model,
    /// Brand, if any
    pub brand: Option<brand::Model>,
    /// Images, primary first
    pub images: Vec<product_image::Model>,
    /// Reviews, newest first
    pub reviews: Vec<product_review::Model>,
    /// Average rating and review count
    pub rating: RatingSummary,
    /// Other published products of the same kind and category
    pub related: Vec<Product>,
}

/// Search results across both kinds
#[derive(Debug, Clone, Serialize)]
pub struct SearchResults {
    /// Query as given, trimmed
    pub query: String,
    /// Matching published hardware
    pub hardware_results: Vec<Product>,
    /// Matching published software
    pub software_results: Vec<Product>,
    /// Sum of both result counts
    pub total_results: usize,
}

async fn featured(db: &DatabaseConnection, kind: ProductKind) -> Result<Vec<Product>> {
    let bases = SortKey::Newest
        .apply(published(kind).filter(product::Column::Featured.eq(true)))
        .limit(FEATURED_LIMIT)
        .all(db)
        .await?;
    load_products(db, bases).await
}

/// Assembles the home page.
pub async fn home(db: &DatabaseConnection) -> Result<HomePage> {
    Ok(HomePage {
        featured_hardware: featured(db, ProductKind::Hardware).await?,
        featured_software: featured(db, ProductKind::Software).await?,
        categories: list_root_categories(db).await?,
    })
}

/// Root categories, for the category index page.
pub async fn category_list(db: &DatabaseConnection) -> Result<Vec<category::Model>> {
    list_root_categories(db).await
}

/// Assembles a category page.
///
/// # Errors
/// Returns `Error::CategoryNotFound` if no category has this slug.
pub async fn category_detail(db: &DatabaseConnection, slug: &str) -> Result<CategoryDetail> {
    let category = get_category_by_slug(db, slug)
        .await?
        .ok_or_else(|| Error::CategoryNotFound {
            key: slug.to_string(),
        })?;
    let subcategories = get_subcategories(db, category.id).await?;

    let mut category_ids: Vec<i64> = subcategories.iter().map(|c| c.id).collect();
    category_ids.push(category.id);

    let hardware_products = in_categories(db, ProductKind::Hardware, &category_ids).await?;
    let software_products = in_categories(db, ProductKind::Software, &category_ids).await?;

    Ok(CategoryDetail {
        category,
        subcategories,
        hardware_products,
        software_products,
    })
}

async fn in_categories(
    db: &DatabaseConnection,
    kind: ProductKind,
    category_ids: &[i64],
) -> Result<Vec<Product>> {
    let query = published(kind).filter(product::Column::CategoryId.is_in(category_ids.to_vec()));
    let bases = SortKey::Default.apply(query).all(db).await?;
    load_products(db, bases).await
}

/// Assembles a product detail page.
///
/// The product is found by slug whatever its status; related products are limited to
/// published ones.
///
/// # Errors
/// Returns `Error::ProductNotFound` if no product of this kind has the slug.
pub async fn product_detail(
    db: &DatabaseConnection,
    kind: ProductKind,
    slug: &str,
) -> Result<ProductDetail> {
    let product = get_product_by_slug(db, kind, slug)
        .await?
        .ok_or_else(|| Error::ProductNotFound {
            key: format!("{kind}/{slug}"),
        })?;

    let category = product
        .base
        .find_related(category::Entity)
        .one(db)
        .await?
        .ok_or_else(|| Error::CategoryNotFound {
            key: product.base.category_id.to_string(),
        })?;
    let brand = product.base.find_related(brand::Entity).one(db).await?;

    let images = list_images(db, product.base.id).await?;
    let reviews = list_reviews(db, product.base.id).await?;
    let rating = summarize(&reviews);

    let related = SortKey::Default
        .apply(
            published(kind)
                .filter(product::Column::CategoryId.eq(product.base.category_id))
                .filter(product::Column::Id.ne(product.base.id)),
        )
        .limit(RELATED_LIMIT)
        .all(db)
        .await?;
    let related = load_products(db, related).await?;

    Ok(ProductDetail {
        product,
        category,
        brand,
        images,
        reviews,
        rating,
        related,
    })
}

/// Hardware detail page.
pub async fn hardware_detail(db: &DatabaseConnection, slug: &str) -> Result<ProductDetail> {
    product_detail(db, ProductKind::Hardware, slug).await
}

/// Software detail page.
pub async fn software_detail(db: &DatabaseConnection, slug: &str) -> Result<ProductDetail> {
    product_detail(db, ProductKind::Software, slug).await
}

async fn search_kind(db: &DatabaseConnection, kind: ProductKind, query: &str) -> Result<Vec<Product>> {
    let bases = SortKey::Default
        .apply(published(kind).filter(text_search(kind, query)))
        .all(db)
        .await?;
    load_products(db, bases).await
}

/// Searches published products of both kinds.
///
/// Returns `None` when the query is empty or whitespace-only.
pub async fn search(db: &DatabaseConnection, query: &str) -> Result<Option<SearchResults>> {
    let query = query.trim();
    if query.is_empty() {
        return Ok(None);
    }

    let hardware_results = search_kind(db, ProductKind::Hardware, query).await?;
    let software_results = search_kind(db, ProductKind::Software, query).await?;
    let total_results = hardware_results.len() + software_results.len();
    debug!("Search '{}' matched {} products", query, total_results);

    Ok(Some(SearchResults {
        query: query.to_string(),
        hardware_results,
        software_results,
        total_results,
    }))
}
