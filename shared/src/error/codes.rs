//! Unified error codes for the Balcão platform
//!
//! Error codes are shared between the server and its clients and are
//! organized by category:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 3xxx: Store errors
//! - 4xxx: Order errors
//! - 5xxx: Delivery errors
//! - 6xxx: Product errors
//! - 7xxx: Pickup slot / schedule errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient serialization
/// and cross-language compatibility (Rust, TypeScript, etc.)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Invalid request
    InvalidRequest = 5,
    /// Invalid format
    InvalidFormat = 6,
    /// Required field missing
    RequiredField = 7,
    /// Value out of range
    ValueOutOfRange = 8,

    // ==================== 1xxx: Auth ====================
    /// User is not authenticated
    NotAuthenticated = 1001,
    /// Token has expired
    TokenExpired = 1003,
    /// Token is invalid
    TokenInvalid = 1004,

    // ==================== 3xxx: Store ====================
    /// Store not found (or not visible to the caller)
    StoreNotFound = 3001,
    /// Store exists but is deactivated
    StoreInactive = 3002,

    // ==================== 4xxx: Order ====================
    /// Order not found
    OrderNotFound = 4001,
    /// Requested status transition is not legal
    InvalidStatusTransition = 4002,
    /// Order has no line items
    OrderEmpty = 4003,
    /// Delivery date is not strictly in the future
    PastDeliveryDate = 4004,
    /// A delivery order is missing a required address field
    MissingDeliveryField = 4005,
    /// WhatsApp number cannot be normalized
    InvalidWhatsApp = 4006,
    /// Order note exceeds the maximum length
    NoteTooLong = 4007,
    /// Customer not found
    CustomerNotFound = 4101,

    // ==================== 5xxx: Delivery ====================
    /// CEP is not an 8-digit postal code
    InvalidCep = 5001,
    /// CEP falls outside all configured delivery ranges
    OutOfDeliveryArea = 5002,
    /// CEP range not found
    CepRangeNotFound = 5003,
    /// CEP range bounds are malformed or inverted
    InvalidCepRange = 5004,

    // ==================== 6xxx: Product ====================
    /// Product not found
    ProductNotFound = 6001,
    /// Product is deactivated
    ProductInactive = 6002,
    /// Product is variant-priced and no variant was chosen
    VariantRequired = 6003,
    /// Variant not found or not active for this product
    VariantNotFound = 6004,
    /// Product has no usable price
    ProductInvalidPrice = 6005,
    /// Quantity is below the product's minimum
    BelowMinQuantity = 6006,

    // ==================== 7xxx: Pickup slot / Schedule ====================
    /// Pickup slot not found
    SlotNotFound = 7001,
    /// Time window overlaps an existing active slot
    SlotOverlap = 7002,
    /// Time window is malformed or end <= start
    InvalidTimeWindow = 7003,
    /// Day of week is outside 0..=6
    InvalidDayOfWeek = 7004,
    /// Requested schedule window exceeds the hard cap
    ScheduleWindowTooLarge = 7101,
    /// Past dates cannot be modified
    PastDateImmutable = 7102,
    /// Date is not a valid YYYY-MM-DD string
    InvalidDateFormat = 7103,
    /// from > to
    InvalidDateRange = 7104,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Database error
    DatabaseError = 9002,
    /// Configuration error
    ConfigError = 9005,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Check if this is a success code
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::Unknown => "An unknown error occurred",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::AlreadyExists => "Resource already exists",
            ErrorCode::InvalidRequest => "Invalid request",
            ErrorCode::InvalidFormat => "Invalid format",
            ErrorCode::RequiredField => "Required field is missing",
            ErrorCode::ValueOutOfRange => "Value is out of range",

            // Auth
            ErrorCode::NotAuthenticated => "User is not authenticated",
            ErrorCode::TokenExpired => "Authentication token has expired",
            ErrorCode::TokenInvalid => "Authentication token is invalid",

            // Store
            ErrorCode::StoreNotFound => "Store not found",
            ErrorCode::StoreInactive => "Store is inactive",

            // Order
            ErrorCode::OrderNotFound => "Order not found",
            ErrorCode::InvalidStatusTransition => "Status transition is not allowed",
            ErrorCode::OrderEmpty => "Order must contain at least one item",
            ErrorCode::PastDeliveryDate => "Delivery date must be in the future",
            ErrorCode::MissingDeliveryField => "Delivery order is missing a required field",
            ErrorCode::InvalidWhatsApp => "WhatsApp number is invalid",
            ErrorCode::NoteTooLong => "Order note is too long",
            ErrorCode::CustomerNotFound => "Customer not found",

            // Delivery
            ErrorCode::InvalidCep => "CEP must contain exactly 8 digits",
            ErrorCode::OutOfDeliveryArea => "CEP is outside the delivery area",
            ErrorCode::CepRangeNotFound => "CEP range not found",
            ErrorCode::InvalidCepRange => "CEP range is invalid",

            // Product
            ErrorCode::ProductNotFound => "Product not found",
            ErrorCode::ProductInactive => "Product is not available",
            ErrorCode::VariantRequired => "Product requires a variant selection",
            ErrorCode::VariantNotFound => "Variant not found",
            ErrorCode::ProductInvalidPrice => "Product has no usable price",
            ErrorCode::BelowMinQuantity => "Quantity is below the product minimum",

            // Pickup slot / Schedule
            ErrorCode::SlotNotFound => "Pickup slot not found",
            ErrorCode::SlotOverlap => "Time window overlaps an existing slot",
            ErrorCode::InvalidTimeWindow => "Time window is invalid",
            ErrorCode::InvalidDayOfWeek => "Day of week must be between 0 and 6",
            ErrorCode::ScheduleWindowTooLarge => "Schedule window exceeds the maximum",
            ErrorCode::PastDateImmutable => "Past dates cannot be modified",
            ErrorCode::InvalidDateFormat => "Date must be in YYYY-MM-DD format",
            ErrorCode::InvalidDateRange => "Date range is invalid",

            // System
            ErrorCode::InternalError => "Internal server error",
            ErrorCode::DatabaseError => "Database error",
            ErrorCode::ConfigError => "Configuration error",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl From<ErrorCode> for u16 {
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error returned when converting an unknown u16 into an [`ErrorCode`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        let code = match value {
            0 => Self::Success,
            1 => Self::Unknown,
            2 => Self::ValidationFailed,
            3 => Self::NotFound,
            4 => Self::AlreadyExists,
            5 => Self::InvalidRequest,
            6 => Self::InvalidFormat,
            7 => Self::RequiredField,
            8 => Self::ValueOutOfRange,
            1001 => Self::NotAuthenticated,
            1003 => Self::TokenExpired,
            1004 => Self::TokenInvalid,
            3001 => Self::StoreNotFound,
            3002 => Self::StoreInactive,
            4001 => Self::OrderNotFound,
            4002 => Self::InvalidStatusTransition,
            4003 => Self::OrderEmpty,
            4004 => Self::PastDeliveryDate,
            4005 => Self::MissingDeliveryField,
            4006 => Self::InvalidWhatsApp,
            4007 => Self::NoteTooLong,
            4101 => Self::CustomerNotFound,
            5001 => Self::InvalidCep,
            5002 => Self::OutOfDeliveryArea,
            5003 => Self::CepRangeNotFound,
            5004 => Self::InvalidCepRange,
            6001 => Self::ProductNotFound,
            6002 => Self::ProductInactive,
            6003 => Self::VariantRequired,
            6004 => Self::VariantNotFound,
            6005 => Self::ProductInvalidPrice,
            6006 => Self::BelowMinQuantity,
            7001 => Self::SlotNotFound,
            7002 => Self::SlotOverlap,
            7003 => Self::InvalidTimeWindow,
            7004 => Self::InvalidDayOfWeek,
            7101 => Self::ScheduleWindowTooLarge,
            7102 => Self::PastDateImmutable,
            7103 => Self::InvalidDateFormat,
            7104 => Self::InvalidDateRange,
            9001 => Self::InternalError,
            9002 => Self::DatabaseError,
            9005 => Self::ConfigError,
            other => return Err(InvalidErrorCode(other)),
        };
        Ok(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_roundtrip() {
        for code in [
            ErrorCode::Success,
            ErrorCode::NotFound,
            ErrorCode::InvalidStatusTransition,
            ErrorCode::OutOfDeliveryArea,
            ErrorCode::SlotOverlap,
            ErrorCode::InternalError,
        ] {
            assert_eq!(ErrorCode::try_from(code.code()).unwrap(), code);
        }
    }

    #[test]
    fn test_unknown_code_rejected() {
        assert_eq!(ErrorCode::try_from(12345), Err(InvalidErrorCode(12345)));
    }
}
