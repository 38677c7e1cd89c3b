//! CEP normalization and range membership
//!
//! Ranges are stored as fixed-width 8-digit zero-padded strings, so
//! lexicographic comparison equals numeric comparison. A store with zero
//! ranges is unrestricted and accepts every valid CEP.

use shared::error::{AppError, ErrorCode};
use shared::models::{CepRange, DeliveryCheck};
use sqlx::PgPool;

use crate::db;

/// Normalize a CEP to its 8-digit form.
///
/// Accepts formatted input like "01310-100"; anything that does not reduce
/// to exactly 8 digits is rejected.
pub fn normalize_cep(raw: &str) -> Result<String, AppError> {
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.len() != 8 {
        return Err(
            AppError::with_message(ErrorCode::InvalidCep, "CEP must contain exactly 8 digits")
                .with_detail("cep", raw),
        );
    }
    Ok(digits)
}

/// Whether a normalized CEP falls inside any configured range.
/// An empty range list means the store is unrestricted.
pub fn is_within_any_range(cep: &str, ranges: &[CepRange]) -> bool {
    if ranges.is_empty() {
        return true;
    }
    ranges
        .iter()
        .any(|r| r.cep_start.as_str() <= cep && cep <= r.cep_end.as_str())
}

/// Validate and normalize range bounds before persisting
pub fn validate_range(cep_start: &str, cep_end: &str) -> Result<(String, String), AppError> {
    let start = normalize_cep(cep_start)
        .map_err(|_| AppError::with_message(ErrorCode::InvalidCepRange, "Range bounds must be 8-digit CEPs"))?;
    let end = normalize_cep(cep_end)
        .map_err(|_| AppError::with_message(ErrorCode::InvalidCepRange, "Range bounds must be 8-digit CEPs"))?;
    if start > end {
        return Err(AppError::with_message(
            ErrorCode::InvalidCepRange,
            "Range start must not exceed range end",
        ));
    }
    Ok((start, end))
}

/// Public delivery eligibility check for a store
pub async fn check(pool: &PgPool, store_id: i64, raw_cep: &str) -> Result<DeliveryCheck, AppError> {
    let cep = normalize_cep(raw_cep)?;
    let ranges = db::cep_ranges::list(pool, store_id)
        .await
        .map_err(db::internal)?;

    Ok(DeliveryCheck {
        eligible: is_within_any_range(&cep, &ranges),
        unrestricted: ranges.is_empty(),
        cep,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn range(start: &str, end: &str) -> CepRange {
        CepRange {
            id: 1,
            store_id: 1,
            cep_start: start.to_string(),
            cep_end: end.to_string(),
            created_at: 0,
        }
    }

    #[test]
    fn test_normalize_accepts_formatted_input() {
        assert_eq!(normalize_cep("01310-100").unwrap(), "01310100");
        assert_eq!(normalize_cep("01310100").unwrap(), "01310100");
    }

    #[test]
    fn test_normalize_rejects_wrong_length() {
        assert!(normalize_cep("1310100").is_err());
        assert!(normalize_cep("013101000").is_err());
        assert!(normalize_cep("").is_err());
        assert!(normalize_cep("abcdefgh").is_err());
    }

    #[test]
    fn test_empty_ranges_accept_everything() {
        assert!(is_within_any_range("01050000", &[]));
        assert!(is_within_any_range("99999999", &[]));
    }

    #[test]
    fn test_inclusive_bounds() {
        let ranges = vec![range("01000000", "01099999")];
        assert!(is_within_any_range("01000000", &ranges));
        assert!(is_within_any_range("01099999", &ranges));
        assert!(is_within_any_range("01050000", &ranges));
        // one below the start
        assert!(!is_within_any_range("00999999", &ranges));
        assert!(!is_within_any_range("02000000", &ranges));
    }

    #[test]
    fn test_union_across_ranges() {
        let ranges = vec![range("01000000", "01099999"), range("04000000", "04099999")];
        assert!(is_within_any_range("04050000", &ranges));
        assert!(!is_within_any_range("03000000", &ranges));
    }

    #[test]
    fn test_validate_range() {
        let (s, e) = validate_range("01000-000", "01099999").unwrap();
        assert_eq!(s, "01000000");
        assert_eq!(e, "01099999");
        assert!(validate_range("01099999", "01000000").is_err());
        assert!(validate_range("123", "01000000").is_err());
    }
}
