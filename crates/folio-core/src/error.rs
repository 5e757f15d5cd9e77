//! # Error Types
//!
//! Domain-specific error types for folio-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  folio-core errors (this file)                                         │
//! │  ├── CheckoutError    - Rejection of a whole checkout                  │
//! │  ├── ValidationError  - Input shape / range failures                   │
//! │  └── ConfigError      - Unusable checkout configuration                │
//! │                                                                         │
//! │  Flow: ValidationError → CheckoutError → caller (re-presents order)    │
//! │        ValidationError → ConfigError   → caller (fix config file)      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (SKU, amounts)
//! 3. Every `CheckoutError` is atomic: inventory and customer are untouched

use thiserror::Error;

use crate::money::Money;

// =============================================================================
// Checkout Error
// =============================================================================

/// Reasons a checkout is rejected.
///
/// Every variant is raised before the commit stage, so a caller receiving
/// one can rely on inventory stock and store credit being exactly as they
/// were before the call.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// Shipping method string is not one of the supported methods.
    #[error("Unsupported shipping method: {0}")]
    InvalidShippingMethod(String),

    /// Order references a SKU absent from inventory.
    #[error("Unknown SKU: {0}")]
    UnknownSku(String),

    /// A stock-tracked item has no stock figure.
    #[error("Missing stock for {0}")]
    MissingStock(String),

    /// Requested quantity exceeds available stock.
    ///
    /// ## User Workflow
    /// ```text
    /// Order: ST2 × 9999
    ///      │
    ///      ▼
    /// Check stock: available=50
    ///      │
    ///      ▼
    /// InsufficientStock { sku: "ST2", available: 50, requested: 9999 }
    ///      │
    ///      ▼
    /// UI shows: "Only 50 ST2 in stock"
    /// ```
    #[error("Insufficient stock for {sku}: available {available}, requested {requested}")]
    InsufficientStock {
        sku: String,
        available: u32,
        requested: u64,
    },

    /// Payment method string is not one of the supported methods.
    #[error("Unsupported payment method: {0}")]
    UnsupportedPaymentMethod(String),

    /// Store credit does not cover the order total.
    #[error("Insufficient store credit: available {available}, required {required}")]
    InsufficientStoreCredit { available: Money, required: Money },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised for malformed order lines and out-of-range configuration values.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: String, max: String },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },
}

// =============================================================================
// Config Error
// =============================================================================

/// Errors loading a checkout configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The TOML document could not be parsed into a config.
    #[error("Invalid checkout config: {0}")]
    Parse(#[from] toml::de::Error),

    /// The config parsed but holds an unusable value.
    #[error("Invalid checkout config: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Convenience type alias for Results with CheckoutError.
pub type CheckoutResult<T> = Result<T, CheckoutError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CheckoutError::InsufficientStock {
            sku: "ST2".to_string(),
            available: 50,
            requested: 9999,
        };
        assert_eq!(
            err.to_string(),
            "Insufficient stock for ST2: available 50, requested 9999"
        );

        let err = CheckoutError::InsufficientStoreCredit {
            available: Money::from_cents(1000),
            required: Money::from_cents(3620),
        };
        assert_eq!(
            err.to_string(),
            "Insufficient store credit: available 10.00, required 36.20"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "sku".to_string(),
        };
        assert_eq!(err.to_string(), "sku is required");

        let err = ValidationError::MustBePositive {
            field: "quantity".to_string(),
        };
        assert_eq!(err.to_string(), "quantity must be positive");
    }

    #[test]
    fn test_validation_converts_to_checkout_error() {
        let validation_err = ValidationError::Required {
            field: "sku".to_string(),
        };
        let checkout_err: CheckoutError = validation_err.into();
        assert!(matches!(checkout_err, CheckoutError::Validation(_)));
    }
}
