//! HTTP status code mapping for error codes

use super::codes::ErrorCode;
use http::StatusCode;

impl ErrorCode {
    /// Get the appropriate HTTP status code for this error code
    ///
    /// The mapping follows the API failure taxonomy: malformed input is 400,
    /// well-formed input that violates a business rule is 422, absent (or
    /// foreign-tenant) resources are 404, and illegal state transitions or
    /// overlapping windows are 409.
    pub fn http_status(&self) -> StatusCode {
        match self {
            // Success
            Self::Success => StatusCode::OK,

            // 404 Not Found — absence and cross-tenant access look identical
            Self::NotFound
            | Self::StoreNotFound
            | Self::StoreInactive
            | Self::OrderNotFound
            | Self::CustomerNotFound
            | Self::ProductNotFound
            | Self::VariantNotFound
            | Self::SlotNotFound
            | Self::CepRangeNotFound => StatusCode::NOT_FOUND,

            // 409 Conflict
            Self::AlreadyExists
            | Self::InvalidStatusTransition
            | Self::SlotOverlap => StatusCode::CONFLICT,

            // 422 Unprocessable Entity — well-formed but violates a rule
            Self::PastDeliveryDate
            | Self::MissingDeliveryField
            | Self::ProductInactive
            | Self::VariantRequired
            | Self::ProductInvalidPrice
            | Self::BelowMinQuantity
            | Self::OutOfDeliveryArea
            | Self::PastDateImmutable => StatusCode::UNPROCESSABLE_ENTITY,

            // 401 Unauthorized
            Self::NotAuthenticated
            | Self::TokenExpired
            | Self::TokenInvalid => StatusCode::UNAUTHORIZED,

            // 500 Internal Server Error
            Self::InternalError
            | Self::DatabaseError
            | Self::ConfigError
            | Self::Unknown => StatusCode::INTERNAL_SERVER_ERROR,

            // 400 Bad Request (default for malformed input)
            _ => StatusCode::BAD_REQUEST,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_status() {
        assert_eq!(ErrorCode::NotFound.http_status(), StatusCode::NOT_FOUND);
        assert_eq!(ErrorCode::StoreNotFound.http_status(), StatusCode::NOT_FOUND);
        assert_eq!(
            ErrorCode::ProductNotFound.http_status(),
            StatusCode::NOT_FOUND
        );
        // Inactive stores are indistinguishable from absent ones
        assert_eq!(
            ErrorCode::StoreInactive.http_status(),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn test_conflict_status() {
        assert_eq!(
            ErrorCode::InvalidStatusTransition.http_status(),
            StatusCode::CONFLICT
        );
        assert_eq!(ErrorCode::SlotOverlap.http_status(), StatusCode::CONFLICT);
    }

    #[test]
    fn test_unprocessable_status() {
        assert_eq!(
            ErrorCode::ProductInactive.http_status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            ErrorCode::PastDeliveryDate.http_status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            ErrorCode::OutOfDeliveryArea.http_status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }

    #[test]
    fn test_bad_request_default() {
        assert_eq!(
            ErrorCode::ValidationFailed.http_status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(ErrorCode::InvalidCep.http_status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ErrorCode::InvalidWhatsApp.http_status(),
            StatusCode::BAD_REQUEST
        );
    }
}
