//! Operating schedule override queries

use chrono::NaiveDate;
use shared::models::ScheduleOverride;
use shared::util::{now_millis, snowflake_id};
use sqlx::PgPool;

use super::BoxError;

/// Load all overrides in an inclusive date range
pub async fn list_range(
    pool: &PgPool,
    store_id: i64,
    from: NaiveDate,
    to: NaiveDate,
) -> Result<Vec<ScheduleOverride>, BoxError> {
    let overrides = sqlx::query_as::<_, ScheduleOverride>(
        "SELECT * FROM schedule_overrides WHERE store_id = $1 AND date >= $2 AND date <= $3 ORDER BY date",
    )
    .bind(store_id)
    .bind(from)
    .bind(to)
    .fetch_all(pool)
    .await?;

    Ok(overrides)
}

/// Upsert the open/closed state for one date.
///
/// A row is written even when the value matches the weekday default; the
/// resolver treats default-ness as value equality, not row absence, so a
/// merchant can pin a date against later pattern changes.
pub async fn upsert(
    pool: &PgPool,
    store_id: i64,
    date: NaiveDate,
    is_open: bool,
) -> Result<ScheduleOverride, BoxError> {
    let now = now_millis();

    let row = sqlx::query_as::<_, ScheduleOverride>(
        r#"
        INSERT INTO schedule_overrides (id, store_id, date, is_open, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $5)
        ON CONFLICT (store_id, date)
        DO UPDATE SET is_open = EXCLUDED.is_open, updated_at = EXCLUDED.updated_at
        RETURNING *
        "#,
    )
    .bind(snowflake_id())
    .bind(store_id)
    .bind(date)
    .bind(is_open)
    .bind(now)
    .fetch_one(pool)
    .await?;

    Ok(row)
}
