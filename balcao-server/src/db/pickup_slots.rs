//! Pickup slot queries

use shared::models::PickupSlot;
use shared::util::{now_millis, snowflake_id};
use sqlx::PgPool;

use super::BoxError;

pub async fn list(pool: &PgPool, store_id: i64) -> Result<Vec<PickupSlot>, BoxError> {
    let slots = sqlx::query_as::<_, PickupSlot>(
        "SELECT * FROM pickup_slots WHERE store_id = $1 ORDER BY day_of_week, start_time",
    )
    .bind(store_id)
    .fetch_all(pool)
    .await?;

    Ok(slots)
}

pub async fn list_active(pool: &PgPool, store_id: i64) -> Result<Vec<PickupSlot>, BoxError> {
    let slots = sqlx::query_as::<_, PickupSlot>(
        "SELECT * FROM pickup_slots WHERE store_id = $1 AND is_active = TRUE ORDER BY day_of_week, start_time",
    )
    .bind(store_id)
    .fetch_all(pool)
    .await?;

    Ok(slots)
}

/// Active slots sharing a weekday, for overlap validation
pub async fn list_active_for_day(
    pool: &PgPool,
    store_id: i64,
    day_of_week: i32,
) -> Result<Vec<PickupSlot>, BoxError> {
    let slots = sqlx::query_as::<_, PickupSlot>(
        "SELECT * FROM pickup_slots WHERE store_id = $1 AND day_of_week = $2 AND is_active = TRUE ORDER BY start_time",
    )
    .bind(store_id)
    .bind(day_of_week)
    .fetch_all(pool)
    .await?;

    Ok(slots)
}

pub async fn create(
    pool: &PgPool,
    store_id: i64,
    day_of_week: i32,
    start_time: &str,
    end_time: &str,
) -> Result<PickupSlot, BoxError> {
    let now = now_millis();

    let slot = sqlx::query_as::<_, PickupSlot>(
        r#"
        INSERT INTO pickup_slots (id, store_id, day_of_week, start_time, end_time, is_active, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, TRUE, $6, $6)
        RETURNING *
        "#,
    )
    .bind(snowflake_id())
    .bind(store_id)
    .bind(day_of_week)
    .bind(start_time)
    .bind(end_time)
    .bind(now)
    .fetch_one(pool)
    .await?;

    Ok(slot)
}

pub async fn find_by_id(
    pool: &PgPool,
    store_id: i64,
    slot_id: i64,
) -> Result<Option<PickupSlot>, BoxError> {
    let slot = sqlx::query_as::<_, PickupSlot>(
        "SELECT * FROM pickup_slots WHERE id = $1 AND store_id = $2",
    )
    .bind(slot_id)
    .bind(store_id)
    .fetch_optional(pool)
    .await?;

    Ok(slot)
}

pub async fn set_active(
    pool: &PgPool,
    store_id: i64,
    slot_id: i64,
    is_active: bool,
) -> Result<Option<PickupSlot>, BoxError> {
    let slot = sqlx::query_as::<_, PickupSlot>(
        "UPDATE pickup_slots SET is_active = $3, updated_at = $4 WHERE id = $1 AND store_id = $2 RETURNING *",
    )
    .bind(slot_id)
    .bind(store_id)
    .bind(is_active)
    .bind(now_millis())
    .fetch_optional(pool)
    .await?;

    Ok(slot)
}

pub async fn delete(pool: &PgPool, store_id: i64, slot_id: i64) -> Result<bool, BoxError> {
    let result = sqlx::query("DELETE FROM pickup_slots WHERE id = $1 AND store_id = $2")
        .bind(slot_id)
        .bind(store_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
