use crate::models::DbSubscription;
use chrono::Utc;
use eyre::Result;
use sqlx::{Pool, Postgres};

/// Create or replace a subscription, keeping any previously stored schedule
/// state so re-subscribing does not re-announce a schedule the subscriber
/// already saw.
pub async fn upsert_subscription(
    pool: &Pool<Postgres>,
    chat_id: i64,
    provider: &str,
    region_code: &str,
    group_num: &str,
    subgroup_num: &str,
    username: Option<&str>,
) -> Result<DbSubscription> {
    let now = Utc::now();

    tracing::debug!(
        "Upserting subscription: chat_id={}, provider={}, region={}, group={}.{}",
        chat_id,
        provider,
        region_code,
        group_num,
        subgroup_num
    );

    let subscription = sqlx::query_as::<_, DbSubscription>(
        r#"
        INSERT INTO subscriptions (chat_id, provider, region_code, group_num, subgroup_num, last_state, username, created_at)
        VALUES ($1, $2, $3, $4, $5, COALESCE((SELECT last_state FROM subscriptions WHERE chat_id = $1), ''), $6, $7)
        ON CONFLICT (chat_id) DO UPDATE SET
            provider = EXCLUDED.provider,
            region_code = EXCLUDED.region_code,
            group_num = EXCLUDED.group_num,
            subgroup_num = EXCLUDED.subgroup_num,
            username = EXCLUDED.username
        RETURNING chat_id, provider, region_code, group_num, subgroup_num, last_state, username, created_at
        "#,
    )
    .bind(chat_id)
    .bind(provider)
    .bind(region_code)
    .bind(group_num)
    .bind(subgroup_num)
    .bind(username)
    .bind(now)
    .fetch_one(pool)
    .await?;

    Ok(subscription)
}

pub async fn get_subscription(
    pool: &Pool<Postgres>,
    chat_id: i64,
) -> Result<Option<DbSubscription>> {
    let subscription = sqlx::query_as::<_, DbSubscription>(
        r#"
        SELECT chat_id, provider, region_code, group_num, subgroup_num, last_state, username, created_at
        FROM subscriptions
        WHERE chat_id = $1
        "#,
    )
    .bind(chat_id)
    .fetch_optional(pool)
    .await?;

    Ok(subscription)
}

pub async fn list_subscriptions(pool: &Pool<Postgres>) -> Result<Vec<DbSubscription>> {
    let subscriptions = sqlx::query_as::<_, DbSubscription>(
        r#"
        SELECT chat_id, provider, region_code, group_num, subgroup_num, last_state, username, created_at
        FROM subscriptions
        ORDER BY created_at ASC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(subscriptions)
}

pub async fn set_last_state(pool: &Pool<Postgres>, chat_id: i64, last_state: &str) -> Result<()> {
    sqlx::query(
        r#"
        UPDATE subscriptions
        SET last_state = $2
        WHERE chat_id = $1
        "#,
    )
    .bind(chat_id)
    .bind(last_state)
    .execute(pool)
    .await?;

    Ok(())
}

pub async fn delete_subscription(pool: &Pool<Postgres>, chat_id: i64) -> Result<()> {
    sqlx::query(
        r#"
        DELETE FROM subscriptions
        WHERE chat_id = $1
        "#,
    )
    .bind(chat_id)
    .execute(pool)
    .await?;

    Ok(())
}
