/// Database configuration and connection management
pub mod database;

/// Catalog settings and taxonomy seeds loaded from catalog.toml
pub mod catalog;

/// Media bucket layout and URL resolution
pub mod media;
