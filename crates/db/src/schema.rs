use eyre::Result;
use sqlx::{Pool, Postgres};
use tracing::info;

pub async fn initialize_database(pool: &Pool<Postgres>) -> Result<()> {
    info!("Initializing database schema...");

    // Create subscriptions table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS subscriptions (
            chat_id BIGINT PRIMARY KEY,
            provider VARCHAR(64) NOT NULL,
            region_code VARCHAR(255) NOT NULL,
            group_num VARCHAR(16) NOT NULL,
            subgroup_num VARCHAR(16) NOT NULL,
            last_state TEXT NOT NULL DEFAULT '',
            username VARCHAR(255) NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create indexes
    sqlx::query(
        r#"
        CREATE INDEX IF NOT EXISTS idx_subscriptions_provider ON subscriptions(provider);
        CREATE INDEX IF NOT EXISTS idx_subscriptions_region_code ON subscriptions(region_code);
        "#,
    )
    .execute(pool)
    .await?;

    info!("Database schema initialized successfully.");
    Ok(())
}
