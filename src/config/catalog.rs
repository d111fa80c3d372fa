//! Catalog configuration loading from catalog.toml
//!
//! The file holds listing behaviour switches and an optional taxonomy seed: categories
//! and brands that must exist before products can be added. A missing file is not an
//! error; the catalog then runs with defaults and no seed.

use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;
use tracing::warn;

const DEFAULT_CONFIG_PATH: &str = "catalog.toml";

/// Configuration structure representing the entire catalog.toml file
#[derive(Debug, Default, Deserialize)]
pub struct CatalogConfig {
    /// Listing page behaviour
    #[serde(default)]
    pub listing: ListingConfig,
    /// Categories to create when missing, parents before children
    #[serde(default)]
    pub categories: Vec<CategorySeed>,
    /// Brands to create when missing
    #[serde(default)]
    pub brands: Vec<BrandSeed>,
}

/// How list pages treat their query parameters
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct ListingConfig {
    /// Reject unknown `sort` and `license` values instead of falling back
    #[serde(default)]
    pub strict_params: bool,
}

/// A category to seed
#[derive(Debug, Clone, Deserialize)]
pub struct CategorySeed {
    /// Display name
    pub name: String,
    /// Explicit slug, derived from the name when absent
    pub slug: Option<String>,
    /// Description
    #[serde(default)]
    pub description: String,
    /// Slug of the parent category, which must be seeded earlier
    pub parent: Option<String>,
    /// Image reference under the `categories/` bucket
    pub image: Option<String>,
}

/// A brand to seed
#[derive(Debug, Clone, Deserialize)]
pub struct BrandSeed {
    /// Display name
    pub name: String,
    /// Explicit slug, derived from the name when absent
    pub slug: Option<String>,
    /// Website URL
    #[serde(default)]
    pub website: String,
    /// Logo reference under the `brands/` bucket
    pub logo: Option<String>,
}

/// Loads catalog configuration from a TOML file
///
/// # Errors
/// Returns an error if:
/// - The file exists but cannot be read
/// - The TOML syntax is invalid
/// - A seed entry misses a required field
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<CatalogConfig> {
    let path = path.as_ref();
    if !path.exists() {
        warn!("{} not found, using default catalog configuration", path.display());
        return Ok(CatalogConfig::default());
    }

    let contents = std::fs::read_to_string(path).map_err(|e| Error::Config {
        message: format!("Failed to read config file {}: {e}", path.display()),
    })?;
    parse_config(&contents)
}

/// Parses catalog configuration from TOML text
pub fn parse_config(contents: &str) -> Result<CatalogConfig> {
    toml::from_str(contents).map_err(|e| Error::Config {
        message: format!("Failed to parse catalog.toml: {e}"),
    })
}

/// Loads the configuration named by `CATALOG_CONFIG`, or ./catalog.toml
pub fn load_default_config() -> Result<CatalogConfig> {
    let path =
        std::env::var("CATALOG_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    load_config(path)
}
