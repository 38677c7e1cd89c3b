//! Customer model

use serde::{Deserialize, Serialize};

/// Customer entity, deduplicated per store by normalized WhatsApp number.
///
/// `whatsapp` is always stored normalized (digits only, country code
/// included); normalization happens before any lookup or write. Customers
/// are created lazily during order placement and never deleted by the order
/// workflow. `name` always reflects the most recent placement; repeat orders
/// under the same number overwrite it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Customer {
    pub id: i64,
    pub store_id: i64,
    pub name: String,
    /// Normalized digit string, E.164-like with country code
    pub whatsapp: String,
    pub created_at: i64,
    pub updated_at: i64,
}
