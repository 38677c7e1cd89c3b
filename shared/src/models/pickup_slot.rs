//! Pickup slot model

use serde::{Deserialize, Serialize};

/// Recurring weekly pickup window.
///
/// Times are wall-clock `HH:mm` strings; `day_of_week` uses 0 = Sunday
/// through 6 = Saturday. Windows are half-open `[start, end)`, so two slots
/// on the same day may touch at an endpoint without conflicting.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct PickupSlot {
    pub id: i64,
    pub store_id: i64,
    pub day_of_week: i32,
    pub start_time: String,
    pub end_time: String,
    pub is_active: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

impl PickupSlot {
    /// Human-readable window, e.g. "09:00-12:00"
    pub fn window(&self) -> String {
        format!("{}-{}", self.start_time, self.end_time)
    }
}

/// Payload for creating a pickup slot
#[derive(Debug, Clone, Deserialize)]
pub struct PickupSlotCreate {
    pub day_of_week: i32,
    pub start_time: String,
    pub end_time: String,
}
