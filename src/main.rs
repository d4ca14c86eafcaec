use dotenvy::dotenv;
use infobar::{api, config, core::product, errors::Result};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file; env vars can also be set externally
    dotenv().ok();

    // 3. Load the application configuration (file, then env overrides)
    let app_config = config::load_app_config()
        .inspect_err(|e| error!("Failed to load application configuration: {e}"))?;

    // 4. Connect and make sure the schema exists
    let db = config::database::create_connection(&app_config.database.url)
        .await
        .inspect_err(|e| error!("Failed to connect to database: {e}"))?;
    config::database::create_tables(&db)
        .await
        .inspect(|_| info!("Database schema ready"))
        .inspect_err(|e| error!("Failed to create tables: {e}"))?;

    // 5. Seed the product catalogue from config
    product::seed_products(&db, &app_config.products)
        .await
        .inspect_err(|e| error!("Failed to seed products: {e}"))?;

    // 6. Serve the API until shutdown
    api::serve(&app_config.server.bind_addr, db)
        .await
        .inspect_err(|e| error!("Server error: {e}"))
}
