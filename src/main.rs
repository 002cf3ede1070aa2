use color_eyre::eyre::Result;
use dotenv::dotenv;
use gridwatch_db::{create_pool, schema::initialize_database};
use gridwatch_poller::config::PollerConfig;
use tracing::info;
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    // Load environment variables
    dotenv().ok();

    // Load configuration
    let config = PollerConfig::from_env()?;

    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting gridwatch poller");

    // Create database connection pool
    let db_pool = create_pool(&config.database_url).await?;

    // Initialize database schema
    initialize_database(&db_pool).await?;

    // Run the poll loop
    gridwatch_poller::start_poller(config, db_pool).await?;

    Ok(())
}
