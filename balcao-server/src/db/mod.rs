//! Database access layer
//!
//! One module per aggregate, raw SQL through sqlx. Every query on a
//! tenant-owned table filters by `store_id`; cross-store reads are not
//! expressible from this layer's public functions.

pub mod cep_ranges;
pub mod customers;
pub mod orders;
pub mod pickup_slots;
pub mod products;
pub mod schedules;
pub mod stores;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Log a storage failure and hide its detail from the caller
pub fn internal(e: BoxError) -> shared::error::AppError {
    tracing::error!("database error: {e}");
    shared::error::AppError::database("database operation failed")
}
