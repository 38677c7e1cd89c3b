//! Store model — the tenant boundary

use serde::{Deserialize, Serialize};

/// Store entity. Every other entity is partitioned by `store_id`; no
/// operation may read or write across stores.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Store {
    pub id: i64,
    /// URL-safe public identifier used by the unauthenticated catalog link
    pub slug: String,
    pub name: String,
    pub is_active: bool,
    /// Per-store sequential counter backing `Order::order_number`
    pub next_order_number: i32,
    pub created_at: i64,
    pub updated_at: i64,
}
