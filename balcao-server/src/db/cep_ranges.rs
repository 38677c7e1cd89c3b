//! Delivery area (CEP range) queries

use shared::models::CepRange;
use shared::util::{now_millis, snowflake_id};
use sqlx::PgPool;

use super::BoxError;

pub async fn list(pool: &PgPool, store_id: i64) -> Result<Vec<CepRange>, BoxError> {
    let ranges = sqlx::query_as::<_, CepRange>(
        "SELECT * FROM cep_ranges WHERE store_id = $1 ORDER BY cep_start",
    )
    .bind(store_id)
    .fetch_all(pool)
    .await?;

    Ok(ranges)
}

/// Insert a range; bounds must already be normalized to 8-digit strings
pub async fn create(
    pool: &PgPool,
    store_id: i64,
    cep_start: &str,
    cep_end: &str,
) -> Result<CepRange, BoxError> {
    let range = sqlx::query_as::<_, CepRange>(
        r#"
        INSERT INTO cep_ranges (id, store_id, cep_start, cep_end, created_at)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING *
        "#,
    )
    .bind(snowflake_id())
    .bind(store_id)
    .bind(cep_start)
    .bind(cep_end)
    .bind(now_millis())
    .fetch_one(pool)
    .await?;

    Ok(range)
}

pub async fn delete(pool: &PgPool, store_id: i64, range_id: i64) -> Result<bool, BoxError> {
    let result = sqlx::query("DELETE FROM cep_ranges WHERE id = $1 AND store_id = $2")
        .bind(range_id)
        .bind(store_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
