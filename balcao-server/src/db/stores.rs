//! Store queries

use shared::models::Store;
use sqlx::PgPool;

use super::BoxError;

/// Look up an active store by its public slug.
///
/// Returns None for both unknown slugs and inactive stores so callers
/// cannot distinguish the two cases.
pub async fn find_active_by_slug(pool: &PgPool, slug: &str) -> Result<Option<Store>, BoxError> {
    let store = sqlx::query_as::<_, Store>(
        "SELECT * FROM stores WHERE slug = $1 AND is_active = TRUE",
    )
    .bind(slug)
    .fetch_optional(pool)
    .await?;

    Ok(store)
}
