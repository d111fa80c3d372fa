//! Media references.
//!
//! Images are stored elsewhere (an object store or a static file server); the catalog only
//! keeps reference strings such as `products/laptop.jpg`. Each kind of owner writes to its
//! own bucket prefix, and references are turned into URLs by joining them to `MEDIA_URL`.

use serde::Serialize;

const DEFAULT_MEDIA_URL: &str = "/media/";

/// Logical storage bucket for a media reference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Bucket {
    /// Category images
    Categories,
    /// Brand logos
    Brands,
    /// Product images
    Products,
}

impl Bucket {
    /// Prefix every reference in this bucket starts with
    #[must_use]
    pub const fn prefix(self) -> &'static str {
        match self {
            Self::Categories => "categories/",
            Self::Brands => "brands/",
            Self::Products => "products/",
        }
    }
}

/// Places `reference` inside `bucket`.
///
/// References already carrying the bucket prefix are kept as they are; anything else
/// is reduced to its file name and prefixed.
#[must_use]
pub fn upload_path(bucket: Bucket, reference: &str) -> String {
    let reference = reference.trim().trim_start_matches('/');
    if reference.starts_with(bucket.prefix()) {
        return reference.to_string();
    }
    let file_name = reference.rsplit('/').next().unwrap_or(reference);
    format!("{}{file_name}", bucket.prefix())
}

/// Where stored references are served from
#[derive(Debug, Clone)]
pub struct MediaConfig {
    /// Base URL, always ending in `/`
    pub base_url: String,
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self::new(DEFAULT_MEDIA_URL)
    }
}

impl MediaConfig {
    /// Creates a configuration for the given base URL.
    #[must_use]
    pub fn new(base_url: &str) -> Self {
        let mut base_url = base_url.trim().to_string();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }
        Self { base_url }
    }

    /// Reads `MEDIA_URL`, falling back to `/media/`.
    #[must_use]
    pub fn from_env() -> Self {
        std::env::var("MEDIA_URL").map_or_else(|_| Self::default(), |url| Self::new(&url))
    }

    /// Public URL of a stored reference
    #[must_use]
    pub fn url_for(&self, reference: &str) -> String {
        format!("{}{}", self.base_url, reference.trim_start_matches('/'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upload_path_prefixes_bucket() {
        assert_eq!(upload_path(Bucket::Products, "laptop.jpg"), "products/laptop.jpg");
        assert_eq!(
            upload_path(Bucket::Products, "products/laptop.jpg"),
            "products/laptop.jpg"
        );
        assert_eq!(upload_path(Bucket::Brands, "/tmp/acme.png"), "brands/acme.png");
    }

    #[test]
    fn test_url_for_joins_base() {
        let media = MediaConfig::new("https://cdn.example/media");
        assert_eq!(
            media.url_for("products/laptop.jpg"),
            "https://cdn.example/media/products/laptop.jpg"
        );
        assert_eq!(MediaConfig::default().url_for("/brands/a.png"), "/media/brands/a.png");
    }
}
