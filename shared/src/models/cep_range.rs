//! Delivery area (CEP range) models

use serde::{Deserialize, Serialize};

/// Inclusive CEP range a store delivers to.
///
/// Bounds are stored as 8-digit zero-padded strings so lexicographic
/// comparison matches numeric comparison. A store with zero ranges is
/// unrestricted and accepts any valid CEP.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct CepRange {
    pub id: i64,
    pub store_id: i64,
    pub cep_start: String,
    pub cep_end: String,
    pub created_at: i64,
}

/// Payload for creating a CEP range
#[derive(Debug, Clone, Deserialize)]
pub struct CepRangeCreate {
    pub cep_start: String,
    pub cep_end: String,
}

/// Result of a delivery eligibility check
#[derive(Debug, Clone, Serialize)]
pub struct DeliveryCheck {
    /// The normalized 8-digit CEP that was checked
    pub cep: String,
    pub eligible: bool,
    /// True when the store has no ranges configured at all
    pub unrestricted: bool,
}
