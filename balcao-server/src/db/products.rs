//! Product queries

use shared::models::{Product, ProductDetail, ProductVariant};
use sqlx::PgPool;

use super::BoxError;

/// Load a product with its variants, scoped to the store.
///
/// A product belonging to another store comes back as None, same as a
/// missing one.
pub async fn find_detail(
    pool: &PgPool,
    store_id: i64,
    product_id: i64,
) -> Result<Option<ProductDetail>, BoxError> {
    let product = sqlx::query_as::<_, Product>(
        "SELECT * FROM products WHERE id = $1 AND store_id = $2",
    )
    .bind(product_id)
    .bind(store_id)
    .fetch_optional(pool)
    .await?;

    let Some(product) = product else {
        return Ok(None);
    };

    let variants = sqlx::query_as::<_, ProductVariant>(
        "SELECT * FROM product_variants WHERE product_id = $1 ORDER BY display_order, id",
    )
    .bind(product.id)
    .fetch_all(pool)
    .await?;

    Ok(Some(ProductDetail { product, variants }))
}
