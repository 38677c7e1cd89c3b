//! Operating schedule models

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Persisted per-date override of the default weekly pattern.
///
/// Only dates that differ from (or were explicitly pinned against) the
/// default have a row; all other dates resolve from the weekday rule.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct ScheduleOverride {
    pub id: i64,
    pub store_id: i64,
    pub date: NaiveDate,
    pub is_open: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

/// One resolved calendar day as returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScheduleDay {
    pub date: NaiveDate,
    pub is_open: bool,
    /// True when `is_open` equals what the weekday rule alone would say,
    /// regardless of whether an override row exists for the date
    pub is_default: bool,
    /// False for dates before today (UTC); past days are read-only
    pub is_editable: bool,
}

/// Payload for setting a single date's open/closed state
#[derive(Debug, Clone, Deserialize)]
pub struct ScheduleOverrideSet {
    pub date: NaiveDate,
    pub is_open: bool,
}
