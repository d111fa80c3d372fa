//! Command-line interface - one subcommand per catalog page.
//!
//! Each subcommand assembles the same data the corresponding storefront page shows and
//! returns it as JSON.

/// JSON rendering of page data
pub mod render;

use crate::{
    config::{catalog::ListingConfig, media::MediaConfig},
    core::{
        listing::{ListingParams, list_hardware, list_software},
        pages::{
            category_detail, category_list, hardware_detail, home, search, software_detail,
        },
    },
    errors::Result,
};
use clap::{Args, Parser, Subcommand};
use render::Renderer;
use sea_orm::DatabaseConnection;
use serde_json::Value;
use tracing::debug;

/// Command-line arguments
#[derive(Debug, Parser)]
#[command(name = "storefront-catalog")]
#[command(about = "Browse the storefront product catalog as JSON")]
#[command(version)]
pub struct Cli {
    /// Pretty-print the JSON output
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Page to render
    #[command(subcommand)]
    pub command: Command,
}

/// Catalog pages
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Featured products and root categories
    Home,

    /// Root categories
    Categories,

    /// A category with its subcategories and products
    Category {
        /// Category slug
        slug: String,
    },

    /// Published hardware, filtered and paginated
    Hardware(ListArgs),

    /// Published software, filtered and paginated
    Software(ListArgs),

    /// One hardware product with images, reviews and related products
    HardwareDetail {
        /// Product slug
        slug: String,
    },

    /// One software product with images, reviews and related products
    SoftwareDetail {
        /// Product slug
        slug: String,
    },

    /// Search published products of both kinds
    Search {
        /// Search text
        q: String,
    },
}

/// Listing filters
#[derive(Debug, Clone, Default, Args)]
pub struct ListArgs {
    /// Category slug
    #[arg(long)]
    pub category: Option<String>,

    /// Brand slug
    #[arg(long)]
    pub brand: Option<String>,

    /// License type (software only)
    #[arg(long)]
    pub license: Option<String>,

    /// Search text
    #[arg(long)]
    pub q: Option<String>,

    /// Sort key: `price_low`, `price_high`, `newest` or `default`
    #[arg(long)]
    pub sort: Option<String>,

    /// 1-based page number
    #[arg(long)]
    pub page: Option<u64>,
}

impl From<ListArgs> for ListingParams {
    fn from(args: ListArgs) -> Self {
        Self {
            category: args.category,
            brand: args.brand,
            license: args.license,
            q: args.q,
            sort: args.sort,
            page: args.page,
        }
    }
}

/// Shared state every command runs against.
pub struct Catalog {
    /// Database connection for all catalog queries
    pub database: DatabaseConnection,
    /// Listing parameter handling
    pub listing: ListingConfig,
    /// Where media references are served from
    pub media: MediaConfig,
}

impl Catalog {
    /// Bundles a connection with the loaded configuration.
    #[must_use]
    pub const fn new(database: DatabaseConnection, listing: ListingConfig, media: MediaConfig) -> Self {
        Self {
            database,
            listing,
            media,
        }
    }
}

/// Runs one command and returns its page as JSON.
///
/// # Errors
/// Returns any lookup, parameter, or database error raised while assembling the page.
pub async fn run(catalog: &Catalog, command: Command) -> Result<Value> {
    debug!("Running {:?}", command);
    let db = &catalog.database;
    let render = Renderer::new(&catalog.media);

    match command {
        Command::Home => render.home(&home(db).await?),
        Command::Categories => render.category_list(&category_list(db).await?),
        Command::Category { slug } => render.category_detail(&category_detail(db, &slug).await?),
        Command::Hardware(args) => {
            let listing = list_hardware(db, &catalog.listing, &args.into()).await?;
            render.listing(&listing)
        }
        Command::Software(args) => {
            let listing = list_software(db, &catalog.listing, &args.into()).await?;
            render.listing(&listing)
        }
        Command::HardwareDetail { slug } => {
            render.product_detail(&hardware_detail(db, &slug).await?)
        }
        Command::SoftwareDetail { slug } => {
            render.product_detail(&software_detail(db, &slug).await?)
        }
        Command::Search { q } => render.search(&q, search(db, &q).await?.as_ref()),
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::{errors::Error, test_utils::*};
    use clap::CommandFactory;

    async fn catalog_with_products() -> Result<Catalog> {
        let (db, category) = setup_with_category().await?;
        create_test_hardware(&db, "Laptop", "HW-00001", category.id, 900).await?;
        create_test_software(&db, "Editor", "SW-00001", category.id, 50).await?;
        Ok(Catalog::new(
            db,
            ListingConfig::default(),
            MediaConfig::default(),
        ))
    }

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_listing_flags() {
        let cli = Cli::try_parse_from([
            "storefront-catalog",
            "software",
            "--license",
            "subscription",
            "--sort",
            "price_low",
            "--page",
            "2",
        ])
        .unwrap();
        let Command::Software(args) = cli.command else {
            panic!("expected software command");
        };
        let params = ListingParams::from(args);
        assert_eq!(params.license.as_deref(), Some("subscription"));
        assert_eq!(params.page(), 2);
    }

    #[tokio::test]
    async fn test_run_listing() -> Result<()> {
        let catalog = catalog_with_products().await?;
        let json = run(&catalog, Command::Hardware(ListArgs::default())).await?;
        assert_eq!(json["kind"], "hardware");
        assert_eq!(json["products"].as_array().unwrap().len(), 1);
        assert_eq!(json["page"]["number"], 1);
        assert_eq!(json["license_types"].as_array().unwrap().len(), 0);
        Ok(())
    }

    #[tokio::test]
    async fn test_run_category_splits_kinds() -> Result<()> {
        let catalog = catalog_with_products().await?;
        let json = run(
            &catalog,
            Command::Category {
                slug: "laptops".to_string(),
            },
        )
        .await?;
        assert_eq!(json["category"]["slug"], "laptops");
        assert_eq!(json["hardware_products"][0]["name"], "Laptop");
        assert_eq!(json["software_products"][0]["name"], "Editor");
        assert_eq!(json["software_products"].as_array().unwrap().len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_run_search_and_detail() -> Result<()> {
        let catalog = catalog_with_products().await?;

        let json = run(
            &catalog,
            Command::Search {
                q: "editor".to_string(),
            },
        )
        .await?;
        assert_eq!(json["results"]["total_results"], 1);

        let json = run(
            &catalog,
            Command::SoftwareDetail {
                slug: "editor".to_string(),
            },
        )
        .await?;
        assert_eq!(json["product"]["license_label"], "Perpetual");

        let result = run(
            &catalog,
            Command::HardwareDetail {
                slug: "editor".to_string(),
            },
        )
        .await;
        assert!(matches!(result.unwrap_err(), Error::ProductNotFound { .. }));
        Ok(())
    }
}
