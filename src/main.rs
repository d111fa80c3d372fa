use clap::Parser;
use dotenvy::dotenv;
use storefront_catalog::{
    cli::{self, Catalog, Cli},
    config::{catalog, database, media::MediaConfig},
    core::seed::seed_taxonomy,
    errors::Result,
};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize tracing; stdout is reserved for the JSON output
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    // 2. Load .env file
    dotenv().ok(); // Make it non-fatal, env vars can be set externally
    let cli = Cli::parse();

    // 3. Load catalog.toml
    let config = catalog::load_default_config()
        .inspect_err(|e| error!("Failed to load catalog configuration: {}", e))?;

    // 4. Connect and make sure the schema exists
    let db = database::create_connection()
        .await
        .inspect_err(|e| error!("Failed to connect to database: {}", e))?;
    database::create_tables(&db)
        .await
        .inspect(|_| info!("Database initialized successfully."))
        .inspect_err(|e| error!("Failed to initialize database: {}", e))?;

    // 5. Seed configured categories and brands
    seed_taxonomy(&db, &config)
        .await
        .inspect_err(|e| error!("Failed to seed taxonomy: {}", e))?;

    // 6. Render the requested page
    let catalog = Catalog::new(db, config.listing, MediaConfig::from_env());
    let output = cli::run(&catalog, cli.command)
        .await
        .inspect_err(|e| error!("{}", e))?;

    let rendered = if cli.pretty {
        serde_json::to_string_pretty(&output)?
    } else {
        serde_json::to_string(&output)?
    };
    println!("{rendered}");
    Ok(())
}
