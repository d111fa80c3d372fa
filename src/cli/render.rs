//! JSON rendering of page data.
//!
//! Entities are serialized as stored and then extended with what a template would have
//! computed: public media URLs, sale and stock flags, display labels.

use crate::{
    config::media::MediaConfig,
    core::{
        listing::Listing,
        pages::{CategoryDetail, HomePage, ProductDetail, SearchResults},
        product::Product,
    },
    entities::{brand, category, product_image},
    errors::Result,
};
use serde::Serialize;
use serde_json::{Map, Value, json};

fn object<T: Serialize>(item: &T) -> Result<Map<String, Value>> {
    Ok(match serde_json::to_value(item)? {
        Value::Object(map) => map,
        other => Map::from_iter([("value".to_string(), other)]),
    })
}

/// Renders catalog data with media URLs resolved against one [`MediaConfig`]
#[derive(Debug, Clone, Copy)]
pub struct Renderer<'a> {
    media: &'a MediaConfig,
}

impl<'a> Renderer<'a> {
    /// Creates a renderer using `media` for URLs.
    #[must_use]
    pub const fn new(media: &'a MediaConfig) -> Self {
        Self { media }
    }

    fn media_url(&self, reference: Option<&str>) -> Value {
        reference.map_or(Value::Null, |reference| {
            Value::String(self.media.url_for(reference))
        })
    }

    /// A category with `image_url`.
    pub fn category(&self, category: &category::Model) -> Result<Value> {
        let mut map = object(category)?;
        map.insert("image_url".to_string(), self.media_url(category.image.as_deref()));
        Ok(Value::Object(map))
    }

    /// A brand with `logo_url`.
    pub fn brand(&self, brand: &brand::Model) -> Result<Value> {
        let mut map = object(brand)?;
        map.insert("logo_url".to_string(), self.media_url(brand.logo.as_deref()));
        Ok(Value::Object(map))
    }

    /// An image with `url`.
    pub fn image(&self, image: &product_image::Model) -> Result<Value> {
        let mut map = object(image)?;
        map.insert("url".to_string(), self.media_url(Some(&image.image)));
        Ok(Value::Object(map))
    }

    /// A product with its derived flags and labels.
    pub fn product(&self, product: &Product) -> Result<Value> {
        let mut map = object(product)?;
        map.insert("is_on_sale".to_string(), Value::Bool(product.is_on_sale()));
        map.insert(
            "effective_price".to_string(),
            serde_json::to_value(product.base.effective_price())?,
        );
        map.insert("in_stock".to_string(), Value::Bool(product.in_stock()));
        map.insert("status_label".to_string(), json!(product.base.status.label()));
        if let Some(software) = product.software() {
            map.insert(
                "license_label".to_string(),
                json!(software.license_type.label()),
            );
        }
        Ok(Value::Object(map))
    }

    fn products(&self, products: &[Product]) -> Result<Vec<Value>> {
        products.iter().map(|product| self.product(product)).collect()
    }

    fn categories(&self, categories: &[category::Model]) -> Result<Vec<Value>> {
        categories.iter().map(|category| self.category(category)).collect()
    }

    fn brands(&self, brands: &[brand::Model]) -> Result<Vec<Value>> {
        brands.iter().map(|brand| self.brand(brand)).collect()
    }

    /// Home page.
    pub fn home(&self, home: &HomePage) -> Result<Value> {
        Ok(json!({
            "featured_hardware": self.products(&home.featured_hardware)?,
            "featured_software": self.products(&home.featured_software)?,
            "categories": self.categories(&home.categories)?,
        }))
    }

    /// Category index page.
    pub fn category_list(&self, categories: &[category::Model]) -> Result<Value> {
        Ok(json!({ "categories": self.categories(categories)? }))
    }

    /// Category page.
    pub fn category_detail(&self, detail: &CategoryDetail) -> Result<Value> {
        Ok(json!({
            "category": self.category(&detail.category)?,
            "subcategories": self.categories(&detail.subcategories)?,
            "hardware_products": self.products(&detail.hardware_products)?,
            "software_products": self.products(&detail.software_products)?,
        }))
    }

    /// Listing page with its filter context and pagination state.
    pub fn listing(&self, listing: &Listing) -> Result<Value> {
        let page = &listing.page;
        let license_types: Vec<Value> = listing
            .license_types
            .iter()
            .map(|license| json!({ "value": license.as_str(), "label": license.label() }))
            .collect();

        Ok(json!({
            "kind": listing.kind,
            "products": self.products(&page.items)?,
            "page": {
                "number": page.number,
                "page_size": page.page_size,
                "total_items": page.total_items,
                "total_pages": page.total_pages,
                "has_next": page.has_next(),
                "has_previous": page.has_previous(),
            },
            "categories": self.categories(&listing.categories)?,
            "brands": self.brands(&listing.brands)?,
            "license_types": license_types,
            "sort": listing.sort,
            "params": listing.params,
        }))
    }

    /// Product detail page.
    pub fn product_detail(&self, detail: &ProductDetail) -> Result<Value> {
        let images: Vec<Value> = detail
            .images
            .iter()
            .map(|image| self.image(image))
            .collect::<Result<_>>()?;
        let brand = match &detail.brand {
            Some(brand) => self.brand(brand)?,
            None => Value::Null,
        };

        Ok(json!({
            "product": self.product(&detail.product)?,
            "category": self.category(&detail.category)?,
            "brand": brand,
            "images": images,
            "reviews": detail.reviews,
            "avg_rating": detail.rating.avg_rating,
            "review_count": detail.rating.review_count,
            "related_products": self.products(&detail.related)?,
        }))
    }

    /// Search results; a blank query renders as `null` results.
    pub fn search(&self, query: &str, results: Option<&SearchResults>) -> Result<Value> {
        let Some(results) = results else {
            return Ok(json!({ "query": query, "results": null }));
        };
        Ok(json!({
            "query": results.query,
            "results": {
                "hardware_results": self.products(&results.hardware_results)?,
                "software_results": self.products(&results.software_results)?,
                "total_results": results.total_results,
            },
        }))
    }
}
