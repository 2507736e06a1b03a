#![allow(clippy::result_large_err)]

use chrono::Utc;
use dotenvy::dotenv;
use mercadito::config::{database, store as store_config};
use mercadito::core::{analytics, catalog, offers};
use mercadito::errors::Result;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file (as early as possible)
    dotenv().ok();
    info!("Attempted to load .env file.");

    // 3. Load the business settings
    let settings = store_config::load_default_settings()?;
    info!(
        "Loaded settings: store at ({:.4}, {:.4}), radius {} km",
        settings.store_lat, settings.store_lng, settings.proximity_radius_km
    );

    // 4. Initialize database
    if let Some(dir) = database::get_database_url()
        .strip_prefix("sqlite://")
        .and_then(|p| p.split('?').next())
        .and_then(|p| std::path::Path::new(p).parent().map(std::path::Path::to_path_buf))
    {
        std::fs::create_dir_all(&dir)?;
    }
    let db = database::create_connection().await?;
    database::create_tables(&db).await?;
    info!("Database initialized successfully.");

    // 5. Seed the initial catalog on a fresh install
    catalog::seed_initial_products(&db).await?;

    // 6. Maintenance pass: evict offers and stories past their expiry
    let now_ms = Utc::now().timestamp_millis();
    let dropped = offers::prune_expired(&db, now_ms).await?;
    if dropped > 0 {
        warn!("Maintenance pass evicted {} expired offers/stories", dropped);
    }

    // 7. Log the dashboard headline
    let summary = analytics::analytics_summary(&db).await?;
    info!(
        "Store ready: {} orders on file, {:.2} completed revenue",
        summary.total_orders, summary.total_revenue
    );

    Ok(())
}
