//! WhatsApp number normalization
//!
//! Customers type numbers in every imaginable format. The stored form is a
//! bare digit string with country code, which is also the dedup key for
//! `(store_id, whatsapp)`.

use shared::error::{AppError, ErrorCode};

/// Normalize a raw WhatsApp number.
///
/// Strips all non-digits. A 10 or 11 digit result is treated as a local
/// number (area code + subscriber) and gets the country code prepended.
/// The final form must be 12 or 13 digits; anything else is malformed.
pub fn normalize(raw: &str, country_code: &str) -> Result<String, AppError> {
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();

    let full = match digits.len() {
        10 | 11 => format!("{country_code}{digits}"),
        _ => digits,
    };

    if !(12..=13).contains(&full.len()) {
        return Err(AppError::with_message(
            ErrorCode::InvalidWhatsApp,
            "WhatsApp number must have 10-11 digits (or 12-13 with country code)",
        )
        .with_detail("whatsapp", raw));
    }

    Ok(full)
}

/// Format a normalized number for display: "+55 (11) 91234-5678".
///
/// The split follows the configured country code, not a fixed width.
/// Falls back to a bare "+digits" when the number does not carry that
/// code or the remainder is not a 10 or 11 digit local number.
pub fn format_display(normalized: &str, country_code: &str) -> String {
    let local = match normalized.strip_prefix(country_code) {
        Some(rest) if rest.len() == 10 || rest.len() == 11 => rest,
        _ => return format!("+{normalized}"),
    };
    // 2-digit area code + 8 or 9 digit subscriber
    let (area, subscriber) = local.split_at(2);
    let split = subscriber.len() - 4;
    format!(
        "+{country_code} ({area}) {}-{}",
        &subscriber[..split],
        &subscriber[split..]
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_local_number() {
        assert_eq!(normalize("(11) 91234-5678", "55").unwrap(), "5511912345678");
        assert_eq!(normalize("11 3123-4567", "55").unwrap(), "551131234567");
    }

    #[test]
    fn test_normalize_already_has_country_code() {
        assert_eq!(normalize("+55 11 91234-5678", "55").unwrap(), "5511912345678");
        assert_eq!(normalize("5511912345678", "55").unwrap(), "5511912345678");
    }

    #[test]
    fn test_normalize_rejects_malformed() {
        assert!(normalize("", "55").is_err());
        assert!(normalize("12345", "55").is_err());
        assert!(normalize("551191234567890", "55").is_err());
        assert!(normalize("abc", "55").is_err());
    }

    #[test]
    fn test_format_display() {
        assert_eq!(format_display("5511912345678", "55"), "+55 (11) 91234-5678");
        assert_eq!(format_display("551131234567", "55"), "+55 (11) 3123-4567");
    }

    #[test]
    fn test_format_display_follows_country_code_length() {
        assert_eq!(format_display("15551234567", "1"), "+1 (55) 5123-4567");
        assert_eq!(
            format_display("3519123456789", "351"),
            "+351 (91) 2345-6789"
        );
    }

    #[test]
    fn test_format_display_unexpected_shape_falls_back() {
        assert_eq!(format_display("4411912345678", "55"), "+4411912345678");
        assert_eq!(format_display("5511", "55"), "+5511");
    }
}
