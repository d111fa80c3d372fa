//! Core business logic - framework-agnostic catalog operations.
//!
//! Everything here takes a `DatabaseConnection` and returns structured data; the CLI layer
//! only formats what these functions produce.

/// Brand taxonomy
pub mod brand;
/// Category taxonomy
pub mod category;
/// Product images
pub mod image;
/// List-page query building, filtering and pagination
pub mod listing;
/// Page assembly: home, category, detail and search contexts
pub mod pages;
/// Products and their variant details
pub mod product;
/// Product reviews and rating summaries
pub mod review;
/// Taxonomy seeding from catalog.toml
pub mod seed;
/// Slug derivation
pub mod slug;
/// Review authors
pub mod user;
