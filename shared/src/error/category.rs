//! Error category classification

use super::codes::ErrorCode;
use serde::{Deserialize, Serialize};

/// Error category classification based on error code ranges
///
/// Categories are determined by the leading digit of the error code:
/// - 0xxx: General errors
/// - 1xxx: Authentication errors
/// - 3xxx: Store errors
/// - 4xxx: Order errors
/// - 5xxx: Delivery errors
/// - 6xxx: Product errors
/// - 7xxx: Scheduling errors
/// - 9xxx: System errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// General errors (0xxx)
    General,
    /// Authentication errors (1xxx)
    Auth,
    /// Store errors (3xxx)
    Store,
    /// Order errors (4xxx)
    Order,
    /// Delivery errors (5xxx)
    Delivery,
    /// Product errors (6xxx)
    Product,
    /// Pickup slot / schedule errors (7xxx)
    Scheduling,
    /// System errors (9xxx)
    System,
}

impl ErrorCategory {
    /// Determine category from error code value
    pub fn from_code(code: u16) -> Self {
        match code {
            0..1000 => Self::General,
            1000..2000 => Self::Auth,
            3000..4000 => Self::Store,
            4000..5000 => Self::Order,
            5000..6000 => Self::Delivery,
            6000..7000 => Self::Product,
            7000..8000 => Self::Scheduling,
            _ => Self::System,
        }
    }

    /// Get the string name for this category
    pub fn name(&self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Auth => "auth",
            Self::Store => "store",
            Self::Order => "order",
            Self::Delivery => "delivery",
            Self::Product => "product",
            Self::Scheduling => "scheduling",
            Self::System => "system",
        }
    }
}

impl ErrorCode {
    /// Get the category for this error code
    pub fn category(&self) -> ErrorCategory {
        ErrorCategory::from_code(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_from_code() {
        assert_eq!(ErrorCode::NotFound.category(), ErrorCategory::General);
        assert_eq!(ErrorCode::TokenExpired.category(), ErrorCategory::Auth);
        assert_eq!(ErrorCode::StoreNotFound.category(), ErrorCategory::Store);
        assert_eq!(ErrorCode::OrderEmpty.category(), ErrorCategory::Order);
        assert_eq!(ErrorCode::InvalidCep.category(), ErrorCategory::Delivery);
        assert_eq!(ErrorCode::VariantRequired.category(), ErrorCategory::Product);
        assert_eq!(ErrorCode::SlotOverlap.category(), ErrorCategory::Scheduling);
        assert_eq!(ErrorCode::DatabaseError.category(), ErrorCategory::System);
    }
}
