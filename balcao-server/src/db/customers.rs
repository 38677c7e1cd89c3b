//! Customer queries

use shared::models::Customer;
use shared::util::{now_millis, snowflake_id};
use sqlx::PgPool;

use super::BoxError;

/// Upsert a customer by (store_id, whatsapp).
///
/// `whatsapp` must already be normalized. On conflict the existing row
/// keeps its id and the name is refreshed to what the customer typed last.
/// A single statement, so two concurrent placements with the same number
/// both land on the same row.
pub async fn upsert(
    pool: &PgPool,
    store_id: i64,
    name: &str,
    whatsapp: &str,
) -> Result<Customer, BoxError> {
    let now = now_millis();

    let customer = sqlx::query_as::<_, Customer>(
        r#"
        INSERT INTO customers (id, store_id, name, whatsapp, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $5)
        ON CONFLICT (store_id, whatsapp)
        DO UPDATE SET name = EXCLUDED.name, updated_at = EXCLUDED.updated_at
        RETURNING *
        "#,
    )
    .bind(snowflake_id())
    .bind(store_id)
    .bind(name)
    .bind(whatsapp)
    .bind(now)
    .fetch_one(pool)
    .await?;

    Ok(customer)
}
