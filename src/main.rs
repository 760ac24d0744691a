use sea_orm::Database;
use sea_orm_migration::MigratorTrait;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use dorm_sensors::common::AppState;
use dorm_sensors::config::Config;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,dorm_sensors=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting dorm-sensors...");

    // Load configuration (fail-fast)
    let config = Config::from_env()?;
    tracing::info!(deployment = ?config.deployment, "Configuration loaded");

    // Connect to database (fail-fast)
    tracing::info!("Connecting to database...");
    let db = Database::connect(&config.database_url).await?;
    tracing::info!("Database connection established");

    let state = AppState::new(db, config);

    if state.config.run_migrations {
        tracing::info!("Running migrations...");
        migration::Migrator::up(&state.db, None).await?;
        tracing::info!("Migrations completed");
    }

    let active = state.registry.count_all().await?;
    let public = state.registry.list_public().await?.len();
    let first_page = state.registry.search("", "", state.first_page()).await?;
    tracing::info!(
        active,
        public,
        first_page = first_page.len(),
        "User sensor registry ready"
    );

    Ok(())
}
